use std::sync::Arc;

use ng_core::ArticleCollector;
use ng_jobs::JobOrchestrator;

pub struct AppState {
    pub orchestrator: JobOrchestrator,
    pub collector: Arc<dyn ArticleCollector>,
}
