use crate::sources::Geocoder;
use async_trait::async_trait;
use serde::Deserialize;

/// Geocoder backed by the public Nominatim search API, used as a fallback
/// when free-text input doesn't resolve to a node via the spatial index
/// directly (spec.md §4.3).
///
/// A missing match or any network/parse failure resolves to `None` rather
/// than being retried: the caller treats an unresolved location as a
/// rejected query, not a transient condition worth retrying forever.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lon: String,
    lat: String,
}

impl NominatimGeocoder {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new(), base_url: "https://nominatim.openstreetmap.org/search".to_string() }
    }

    #[cfg(test)]
    fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.into() }
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, text: &str) -> Option<(f64, f64)> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", text), ("format", "json"), ("limit", "1")])
            .header("User-Agent", "igo-route")
            .send()
            .await
            .ok()?;
        let results: Vec<NominatimResult> = response.json().await.ok()?;
        let first = results.into_iter().next()?;
        let lon: f64 = first.lon.parse().ok()?;
        let lat: f64 = first.lat.parse().ok()?;
        Some((lon, lat))
    }
}
