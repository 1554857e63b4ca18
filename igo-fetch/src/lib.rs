//! Feed client (C1): fetches the road graph, highway directory, and
//! congestion feed, with indefinite retry on failure, plus a free-text
//! geocoder fallback.

pub mod geocoder;
pub mod http;
pub mod parse;
pub mod retry;
pub mod sources;

pub use geocoder::NominatimGeocoder;
pub use http::{HttpRoadGraphSource, HttpTextSource};
pub use retry::retry_forever;
pub use sources::{CongestionSource, Geocoder, HighwaySource, RoadGraphSource};
