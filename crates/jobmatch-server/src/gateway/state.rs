use std::sync::Arc;

use jobmatch::MatchEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MatchEngine>,

    /// Upper bound on a whole multipart request body.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(engine: Arc<MatchEngine>, max_upload_bytes: usize) -> Self {
        Self {
            engine,
            max_upload_bytes,
        }
    }
}
