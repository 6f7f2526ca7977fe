use super::datetime;
use crate::ledger::{Ledger, LedgerError};
use chrono::NaiveDateTime;
use common::model::ledger::CREATED_AT_INDEX;
use log::debug;

/// Latest `createdAt` already recorded in `ledger`, or `None` when the column
/// holds nothing parseable. One column read per call.
pub async fn read_watermark(ledger: &dyn Ledger) -> Result<Option<NaiveDateTime>, LedgerError> {
    let values = ledger.read_column(CREATED_AT_INDEX).await?;
    debug!(
        "Found {} values in createdAt column of {}",
        values.len(),
        ledger.name()
    );
    Ok(latest_timestamp(&values))
}

/// Maximum parseable timestamp among `values`. Blank cells, the header and
/// malformed legacy values are skipped.
pub fn latest_timestamp(values: &[String]) -> Option<NaiveDateTime> {
    let mut latest: Option<NaiveDateTime> = None;
    let mut skipped = 0usize;

    for value in values.iter().filter(|v| !v.trim().is_empty()) {
        match datetime::parse(value) {
            Some(ts) if latest.map_or(true, |l| ts > l) => latest = Some(ts),
            Some(_) => {}
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} unparseable createdAt values", skipped);
    }
    latest
}
