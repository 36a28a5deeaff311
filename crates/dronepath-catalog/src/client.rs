//! Catalog service HTTP client.

use dronepath_core::{Coordinate, Perimeter};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{CatalogError, Result};
use crate::menus::{ItemQuote, Menus, Shop};
use crate::zones::parse_no_fly_zones;

/// Read-only client for the catalog web server.
pub struct CatalogClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

#[derive(Debug, Deserialize)]
struct LocationDetails {
    coordinates: LngLat,
}

#[derive(Debug, Deserialize)]
struct LngLat {
    lng: f64,
    lat: f64,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every shop and its menu.
    pub async fn menus(&self) -> Result<Menus> {
        let url = format!("{}/menus/menus.json", self.base_url);
        let shops: Vec<Shop> = self.get_json(&url).await?;
        Ok(Menus::new(shops))
    }

    /// Price a basket of items and find the shops to collect them from.
    pub async fn resolve_items(&self, items: &[String]) -> Result<ItemQuote> {
        Ok(self.menus().await?.quote(items))
    }

    /// Coordinates for a three-word location label such as `army.monks.grapes`.
    pub async fn resolve_location(&self, label: &str) -> Result<Coordinate> {
        let url = format!("{}{}", self.base_url, location_path(label)?);
        let details: LocationDetails = self.get_json(&url).await?;
        Ok(Coordinate::new(details.coordinates.lng, details.coordinates.lat))
    }

    /// Boundary segments of every no-fly zone.
    pub async fn no_fly_perimeter(&self) -> Result<Perimeter> {
        let url = format!("{}/buildings/no-fly-zones.geojson", self.base_url);
        let body = self.get_text(&url).await?;
        parse_no_fly_zones(&body)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get_text(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "Catalog request");
        let http_error = |source| CatalogError::Http {
            url: url.to_string(),
            source,
        };
        self.client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(http_error)?
            .text()
            .await
            .map_err(http_error)
    }
}

/// Request path for a location label.
pub fn location_path(label: &str) -> Result<String> {
    let words: Vec<&str> = label.split('.').collect();
    match words.as_slice() {
        [first, second, third] if words.iter().all(|w| !w.is_empty()) => Ok(format!(
            "/words/{}/{}/{}/details.json",
            first, second, third
        )),
        _ => Err(CatalogError::MalformedLabel(label.to_string())),
    }
}
