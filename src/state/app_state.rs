use std::sync::Arc;
use uuid::Uuid;

use airq_core::Dataset;

/// Shared handle to the loaded dataset. The dataset is read-only for the
/// whole process lifetime, so views share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub dataset_id: Uuid,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            dataset_id: Uuid::new_v4(),
        }
    }
}
