//! Background layout computation unit.
//!
//! One worker task per mind-map instance. The render surface fires
//! requests and keeps drawing whatever geometry it last received; when a
//! response arrives it is swapped in only if its sequence number is newer
//! than the last applied one. There is no cancellation: superseded
//! requests are coalesced in the queue, and any stale response that still
//! gets through is discarded by [`GeometrySlot::apply`].

use serde_json::Value;
use tokio::sync::mpsc;

use super::{compute, Geometry, LayoutMode, PositionCache};

#[derive(Debug, Clone)]
pub struct LayoutRequest {
    pub seq: u64,
    /// Identifies the loaded tree. The worker clears its position cache
    /// when the epoch changes, so unrelated trees never share positions.
    pub epoch: u64,
    /// Detached snapshot of the tree document.
    pub tree: Value,
    pub mode: LayoutMode,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct LayoutResponse {
    pub seq: u64,
    pub geometry: Geometry,
}

/// Handle for the interactive side: request sender, response receiver and
/// the monotonic sequence counter.
pub struct LayoutWorker {
    tx: mpsc::UnboundedSender<LayoutRequest>,
    pub rx: mpsc::UnboundedReceiver<LayoutResponse>,
    next_seq: u64,
}

impl LayoutWorker {
    /// Spawn the worker task. It owns the position cache for its lifetime
    /// and exits when the handle is dropped.
    pub fn spawn() -> Self {
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();
        tokio::spawn(run(req_rx, resp_tx));
        Self {
            tx: req_tx,
            rx: resp_rx,
            next_seq: 0,
        }
    }

    /// Queue a layout request; returns its sequence number.
    pub fn request(
        &mut self,
        epoch: u64,
        tree: Value,
        mode: LayoutMode,
        width: f64,
        height: f64,
    ) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        let _ = self.tx.send(LayoutRequest {
            seq,
            epoch,
            tree,
            mode,
            width,
            height,
        });
        seq
    }
}

async fn run(
    mut rx: mpsc::UnboundedReceiver<LayoutRequest>,
    tx: mpsc::UnboundedSender<LayoutResponse>,
) {
    let mut cache = PositionCache::default();
    let mut epoch = 0;
    while let Some(mut request) = rx.recv().await {
        // Everything already queued is stale; only the newest matters.
        while let Ok(newer) = rx.try_recv() {
            request = newer;
        }
        if request.epoch != epoch {
            cache.clear();
            epoch = request.epoch;
        }
        let geometry = compute(
            &request.tree,
            request.mode,
            request.width,
            request.height,
            &mut cache,
        );
        if tx
            .send(LayoutResponse {
                seq: request.seq,
                geometry,
            })
            .is_err()
        {
            break;
        }
    }
}

/// The consumer-side slot holding the latest applied geometry.
#[derive(Debug, Default)]
pub struct GeometrySlot {
    geometry: Geometry,
    applied: Option<u64>,
}

impl GeometrySlot {
    /// Swap in `response` unless it is stale. Returns whether it applied.
    pub fn apply(&mut self, response: LayoutResponse) -> bool {
        if self.applied.is_some_and(|seq| response.seq <= seq) {
            return false;
        }
        self.applied = Some(response.seq);
        self.geometry = response.geometry;
        true
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub const fn applied_seq(&self) -> Option<u64> {
        self.applied
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn dogs() -> Value {
        json!({ "label": "Dogs", "children": [{ "label": "Breeds" }, { "label": "Care" }] })
    }

    #[tokio::test]
    async fn worker_round_trip_produces_geometry() {
        let mut worker = LayoutWorker::spawn();
        let seq = worker.request(0, dogs(), LayoutMode::Hierarchical, 600.0, 400.0);
        let response = worker.rx.recv().await.unwrap();
        assert_eq!(response.seq, seq);
        assert_eq!(response.geometry.nodes.len(), 3);
        assert_eq!(response.geometry.edges.len(), 2);
    }

    #[tokio::test]
    async fn unchanged_tree_yields_identical_geometry_once_warm() {
        let mut worker = LayoutWorker::spawn();
        worker.request(0, dogs(), LayoutMode::Hierarchical, 600.0, 400.0);
        let first = worker.rx.recv().await.unwrap();
        worker.request(0, dogs(), LayoutMode::Hierarchical, 600.0, 400.0);
        let second = worker.rx.recv().await.unwrap();
        assert_eq!(first.geometry, second.geometry);
    }

    #[tokio::test]
    async fn malformed_snapshot_degrades_to_empty_geometry() {
        let mut worker = LayoutWorker::spawn();
        let seq = worker.request(0, json!([1, 2, 3]), LayoutMode::Radial, 600.0, 400.0);
        let response = worker.rx.recv().await.unwrap();
        assert_eq!(response.seq, seq);
        assert!(response.geometry.nodes.is_empty());
        assert!(response.geometry.edges.is_empty());
    }

    #[tokio::test]
    async fn latest_request_wins() {
        let mut worker = LayoutWorker::spawn();
        worker.request(0, dogs(), LayoutMode::Hierarchical, 600.0, 400.0);
        let last = worker.request(0, dogs(), LayoutMode::Radial, 600.0, 400.0);
        let mut slot = GeometrySlot::default();
        // Depending on scheduling the first request may be coalesced away;
        // either way the slot must end up at the newest sequence.
        while slot.applied_seq() != Some(last) {
            let response = worker.rx.recv().await.unwrap();
            slot.apply(response);
        }
        assert_eq!(slot.geometry().nodes.len(), 3);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut slot = GeometrySlot::default();
        let newer = LayoutResponse {
            seq: 2,
            geometry: Geometry::default(),
        };
        let older = LayoutResponse {
            seq: 1,
            geometry: Geometry::default(),
        };
        assert!(slot.apply(newer));
        assert!(!slot.apply(older));
        assert_eq!(slot.applied_seq(), Some(2));
    }
}
