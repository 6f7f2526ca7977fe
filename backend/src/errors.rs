//! Error taxonomy for uploads.
//!
//! [`SyncError`] rejects a whole request before any channel is touched and is
//! turned into a `4xx` response. [`ChannelError`] belongs to a single channel:
//! it is reported next to the sibling channel's result instead of aborting the
//! request.

use crate::ledger::LedgerError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::responses::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Missing columns: {0:?}")]
    Schema(Vec<&'static str>),

    #[error("Only .csv and .xlsx files are supported.")]
    UnsupportedFile,

    #[error("Failed to parse file: {0}")]
    Decode(String),

    #[error("Upload must contain a 'file' field")]
    MissingFile,

    #[error("Upload exceeds the limit of {0} bytes")]
    TooLarge(usize),
}

impl ResponseError for SyncError {
    fn status_code(&self) -> StatusCode {
        match self {
            SyncError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
        })
    }
}

impl From<csv::Error> for SyncError {
    fn from(e: csv::Error) -> Self {
        SyncError::Decode(e.to_string())
    }
}

impl From<calamine::XlsxError> for SyncError {
    fn from(e: calamine::XlsxError) -> Self {
        SyncError::Decode(e.to_string())
    }
}

/// A failed call to the spreadsheet service while syncing one channel.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to get most recent createdAt from {sheet}: {source}")]
    Watermark {
        sheet: &'static str,
        #[source]
        source: LedgerError,
    },

    #[error("Failed to append {channel} data to {sheet}: {source}")]
    Append {
        channel: &'static str,
        sheet: &'static str,
        #[source]
        source: LedgerError,
    },
}
