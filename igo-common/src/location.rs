use serde::{Deserialize, Serialize};

/// A point in WGS-84 decimal degrees.
///
/// Boundary-only type: the core never stores a `Location` inside graph
/// state, it only accepts and returns them at the router's edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lon: f64,
    pub lat: f64,
}

impl Location {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Attempts to parse `"lon lat"` as two whitespace-separated decimals.
    ///
    /// This is the fast path `resolve_place` tries before falling back to a
    /// geocoder, mirroring `igo.py::get_location`'s `string.split(" ")`.
    pub fn parse_coords(text: &str) -> Option<Self> {
        let mut parts = text.split_whitespace();
        let lon: f64 = parts.next()?.parse().ok()?;
        let lat: f64 = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(lon, lat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_decimals() {
        assert_eq!(Location::parse_coords("2.17 41.38"), Some(Location::new(2.17, 41.38)));
    }

    #[test]
    fn rejects_free_text() {
        assert_eq!(Location::parse_coords("Plaça Catalunya"), None);
    }

    #[test]
    fn rejects_extra_tokens() {
        assert_eq!(Location::parse_coords("2.17 41.38 99.0"), None);
    }
}
