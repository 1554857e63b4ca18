use std::path::PathBuf;
use std::time::Duration;

/// Barcelona reference deployment defaults, matching `igo.py`'s module
/// constants (`PLACE`, `HIGHWAYS_URL`, `CONGESTIONS_URL`).
pub const DEFAULT_PLACE: &str = "Barcelona, Catalonia";
pub const DEFAULT_HIGHWAYS_URL: &str = "https://opendata-ajuntament.barcelona.cat/data/dataset/1090983a-1c40-4609-8620-14ad49aae3ab/resource/1d6c814c-70ef-4147-aa16-a49ddb952f72/download/transit_relacio_trams.csv";
pub const DEFAULT_CONGESTIONS_URL: &str = "https://opendata-ajuntament.barcelona.cat/data/dataset/8319c2b1-4c21-4962-9acd-6db4c5ff1148/resource/2d456eb5-4ea6-4f68-9794-2f3f1a58a933/download";
pub const DEFAULT_GRAPH_CACHE_PATH: &str = "barcelona.graph";
pub const DEFAULT_HIGHWAYS_CACHE_PATH: &str = "barcelona.highways";
pub const DEFAULT_REFRESH_SECS: u64 = 300;

/// Runtime configuration for one `Engine` instance (SPEC_FULL.md A3):
/// place name, feed URLs, cache paths, refresh interval, and the query
/// worker pool size. Loadable from environment variables with fallback to
/// the Barcelona reference defaults; `igo-route`'s CLI layers `clap`
/// flags on top by overriding individual fields after `from_env`.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub place: String,
    pub road_graph_base_url: String,
    pub highways_url: String,
    pub congestions_url: String,
    pub graph_cache_path: PathBuf,
    pub highways_cache_path: PathBuf,
    pub refresh_interval: Duration,
    pub workers: usize,
}

impl RuntimeConfig {
    /// Reads overrides from `IGO_*` environment variables, falling back to
    /// the Barcelona reference defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            place: env_or("IGO_PLACE", DEFAULT_PLACE),
            road_graph_base_url: env_or("IGO_ROAD_GRAPH_URL", "https://overpass.igo-route.invalid"),
            highways_url: env_or("IGO_HIGHWAYS_URL", DEFAULT_HIGHWAYS_URL),
            congestions_url: env_or("IGO_CONGESTIONS_URL", DEFAULT_CONGESTIONS_URL),
            graph_cache_path: PathBuf::from(env_or("IGO_GRAPH_CACHE", DEFAULT_GRAPH_CACHE_PATH)),
            highways_cache_path: PathBuf::from(env_or("IGO_HIGHWAYS_CACHE", DEFAULT_HIGHWAYS_CACHE_PATH)),
            refresh_interval: Duration::from_secs(
                std::env::var("IGO_REFRESH_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_REFRESH_SECS),
            ),
            workers: std::env::var("IGO_WORKERS").ok().and_then(|v| v.parse().ok()).unwrap_or_else(num_cpus::get),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
