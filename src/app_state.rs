use std::sync::Arc;

use tokio::sync::RwLock;

use crate::services::board_service::Board;
use crate::upstream::UpstreamClient;

#[derive(Clone)]
pub struct AppState {
    pub board: Arc<RwLock<Board>>,
    pub upstream: Arc<UpstreamClient>,
    pub departments: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(upstream: UpstreamClient, departments: Vec<String>) -> Self {
        Self {
            board: Arc::new(RwLock::new(Board::default())),
            upstream: Arc::new(upstream),
            departments: Arc::new(departments),
        }
    }
}
