use std::sync::Arc;

use crate::domain::dedup::DedupService;

#[derive(Clone)]
pub struct AppState {
    pub dedup: Arc<DedupService>,
}

impl AppState {
    pub fn new(dedup: DedupService) -> Self {
        Self {
            dedup: Arc::new(dedup),
        }
    }
}
