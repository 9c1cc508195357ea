//! Shared application state.

use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::db::FormsDbManager;
use crate::glossary::GlossaryStore;

/// State shared across all request handlers.
pub struct AppState {
    pub config: AppConfig,
    pub forms_db: FormsDbManager,
    pub glossary: GlossaryStore,
    /// Serializes whole submissions so the read-max/allocate/persist ID
    /// sequence cannot race between concurrent callers.
    pub submission_lock: Mutex<()>,
}

impl AppState {
    pub fn new(config: AppConfig, forms_db: FormsDbManager, glossary: GlossaryStore) -> Self {
        Self {
            config,
            forms_db,
            glossary,
            submission_lock: Mutex::new(()),
        }
    }
}
