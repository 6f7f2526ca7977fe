// ledger module - destination worksheets for synced leads
//
//   LedgerProvider (trait) -> binds a channel to its worksheet (auth + lookup)
//   Ledger (trait)         -> column read and batch append on one worksheet
//   google_sheets.rs       -> Sheets v4 implementation
//   credentials.rs         -> service account key + token exchange
//
// the sync core only sees the traits so tests can swap in memory.rs

mod credentials;
mod google_sheets;
#[cfg(test)]
pub mod memory;

pub use google_sheets::GoogleSheets;

use async_trait::async_trait;
use common::model::channel::Channel;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("failed to read credentials file {path}: {source}")]
    Credentials {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("token exchange failed: {0}")]
    Auth(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sheets API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("worksheet at position {0} not found")]
    WorksheetMissing(usize),

    #[error("invalid sheets API base url: {0}")]
    BaseUrl(String),
}

/// One append-only destination worksheet.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Every value of the zero-based column, top to bottom, header included.
    /// Trailing blank cells may be omitted.
    async fn read_column(&self, index: usize) -> Result<Vec<String>, LedgerError>;

    /// Appends `rows` after the last used row in one call and returns the
    /// number of rows written.
    async fn append_rows(&self, rows: Vec<Vec<String>>) -> Result<usize, LedgerError>;

    // name for logging
    fn name(&self) -> &str;
}

/// Opens the ledger bound to a channel. Called once per channel sync; nothing
/// is cached between calls.
#[async_trait]
pub trait LedgerProvider: Send + Sync {
    async fn open(&self, channel: Channel) -> Result<Box<dyn Ledger>, LedgerError>;
}
