use crate::retry::retry_forever;
use crate::sources::{parse_road_graph, CongestionSource, HighwaySource, RoadGraphSource};
use async_trait::async_trait;
use igo_graph::RawGraph;

/// Default `RoadGraphSource`: fetches a JSON document from `{base_url}/graph?place=...`
/// and retries indefinitely on network or parse failure (spec.md §4.1).
///
/// Grounded on `butterfly-dl`'s `Downloader` (reqwest client reused across
/// calls, errors surfaced as strings for the retry wrapper to log).
pub struct HttpRoadGraphSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRoadGraphSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.into() }
    }

    async fn fetch_once(&self, place: &str) -> Result<RawGraph, String> {
        let url = format!("{}/graph", self.base_url);
        let text = self
            .client
            .get(&url)
            .query(&[("place", place)])
            .send()
            .await
            .map_err(|e| e.to_string())?
            .text()
            .await
            .map_err(|e| e.to_string())?;
        parse_road_graph(&text).map_err(|e| e.to_string())
    }
}

#[async_trait]
impl RoadGraphSource for HttpRoadGraphSource {
    async fn fetch(&self, place: &str) -> Result<RawGraph, String> {
        Ok(retry_forever("road graph fetch", || self.fetch_once(place)).await)
    }
}

/// Default `HighwaySource`/`CongestionSource`: fetches raw text from an
/// arbitrary URL and retries indefinitely on network failure, per
/// `igo.py::_download_highways` / `_download_congestions`.
pub struct HttpTextSource {
    client: reqwest::Client,
}

impl HttpTextSource {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }

    async fn fetch_once(&self, url: &str) -> Result<String, String> {
        self.client.get(url).send().await.map_err(|e| e.to_string())?.text().await.map_err(|e| e.to_string())
    }
}

impl Default for HttpTextSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HighwaySource for HttpTextSource {
    async fn fetch(&self, url: &str) -> Result<String, String> {
        Ok(retry_forever("highway feed fetch", || self.fetch_once(url)).await)
    }
}

#[async_trait]
impl CongestionSource for HttpTextSource {
    async fn fetch(&self, url: &str) -> Result<String, String> {
        Ok(retry_forever("congestion feed fetch", || self.fetch_once(url)).await)
    }
}
