// ── Dataset storage ──
//
// Lock-free holder for the current tile dataset with push-based change
// notification.

mod dataset_store;

pub use dataset_store::DatasetStore;
