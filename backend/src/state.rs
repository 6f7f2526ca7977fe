use crate::ledger::LedgerProvider;
use std::sync::Arc;

/// Shared application state, registered once as `web::Data` and cloned into
/// every worker.
#[derive(Clone)]
pub struct AppState {
    /// Binds channels to their destination worksheets. Production uses the
    /// Google Sheets provider; tests swap in the in-memory one.
    pub ledgers: Arc<dyn LedgerProvider>,

    /// Upper bound on the buffered size of one uploaded file.
    pub max_upload_bytes: usize,
}
