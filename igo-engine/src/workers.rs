use crate::engine::SharedEngine;
use igo_common::Location;
use std::sync::mpsc;
use std::thread;

struct QueryRequest {
    src: Location,
    dst: Location,
    respond_to: mpsc::Sender<Option<Vec<Location>>>,
}

/// A pool of query-handler threads (spec.md §5): "a background refresher
/// and a pool (size >= 1) of query handlers." Router calls are
/// synchronous and short and never suspend, so each worker just pulls a
/// request off the shared channel and answers it against whatever
/// snapshot is currently published; no worker ever blocks another.
///
/// This is a plain `std::thread` + `mpsc` worker pool rather than a
/// `tokio` task pool, since nothing here needs to `.await` (the
/// publisher's read lock is held only long enough to clone an `Arc`).
pub struct QueryPool {
    sender: mpsc::Sender<QueryRequest>,
    _workers: Vec<thread::JoinHandle<()>>,
}

impl QueryPool {
    pub fn new(engine: SharedEngine, workers: usize) -> Self {
        let (sender, receiver) = mpsc::channel::<QueryRequest>();
        let receiver = std::sync::Arc::new(parking_lot::Mutex::new(receiver));

        let handles = (0..workers.max(1))
            .map(|_| {
                let engine = SharedEngine::clone(&engine);
                let receiver = std::sync::Arc::clone(&receiver);
                thread::spawn(move || loop {
                    let request = receiver.lock().recv();
                    let Ok(request) = request else { break };
                    let result = engine.shortest_path(request.src, request.dst);
                    let _ = request.respond_to.send(result);
                })
            })
            .collect();

        Self { sender, _workers: handles }
    }

    /// Submits a query and blocks the calling thread for the (short)
    /// reply. Returns `None` both when no path exists and when the pool
    /// has shut down.
    pub fn submit(&self, src: Location, dst: Location) -> Option<Vec<Location>> {
        let (respond_to, reply) = mpsc::channel();
        self.sender.send(QueryRequest { src, dst, respond_to }).ok()?;
        reply.recv().ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::fixtures::*;
    use crate::config::RuntimeConfig;
    use crate::engine::Engine;
    use std::sync::Arc;

    #[tokio::test]
    async fn pool_answers_concurrent_queries() {
        let dir = tempfile::tempdir().unwrap();
        let config = RuntimeConfig {
            place: "Test City".to_string(),
            road_graph_base_url: String::new(),
            highways_url: String::new(),
            congestions_url: String::new(),
            graph_cache_path: dir.path().join("graph.bin"),
            highways_cache_path: dir.path().join("highways.bin"),
            refresh_interval: std::time::Duration::from_secs(3600),
            workers: 2,
        };
        let sources = Sources {
            road_graph: Arc::new(FixedRoadGraph(chain_graph())),
            highways: Arc::new(FixedText("id,description,coordinates\n1,\"x\",\"0.0,0.0,1.0,0.0\"\n".to_string())),
            congestion: Arc::new(FixedText("1#1#1#1\n".to_string())),
            geocoder: Arc::new(NoGeocoder),
        };
        let engine = Arc::new(Engine::new(config, sources).await.unwrap());
        let pool = Arc::new(QueryPool::new(engine, 2));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    pool.submit(igo_common::Location::new(0.0, 0.0), igo_common::Location::new(3.0, 0.0))
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_some());
        }
    }
}
