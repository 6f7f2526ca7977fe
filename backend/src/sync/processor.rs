//! Per-channel sync pipeline.
//!
//! For one channel: keep its rows, read the worksheet watermark, keep rows
//! strictly newer than it, map them and append them in one batch. A channel
//! with nothing to send never touches its worksheet.

use super::datetime;
use super::filter::{has_pan, row_channel};
use super::mapping::to_ledger_record;
use super::watermark::read_watermark;
use crate::errors::ChannelError;
use crate::ledger::LedgerProvider;
use common::model::channel::Channel;
use common::model::lead::{LeadColumn, LeadTable};
use common::responses::{ChannelReport, UploadResponse};
use log::{debug, info};

/// Appends the new rows of `table` for `channel` and returns how many were
/// written. `table` is expected to have passed [`super::apply_filters`].
pub async fn sync_channel(
    table: &LeadTable,
    channel: Channel,
    ledgers: &dyn LedgerProvider,
) -> Result<usize, ChannelError> {
    let sheet = channel.sheet_name();
    info!("Processing {} data for {}", channel.id(), sheet);

    let candidates = table.filtered(|row| row_channel(row) == Some(channel) && has_pan(row));
    info!(
        "After filtering for {} and PAN: {} rows",
        channel.id(),
        candidates.len()
    );
    if candidates.is_empty() {
        info!("No {} rows to process", channel.id());
        return Ok(0);
    }

    let watermark_err = |source| ChannelError::Watermark { sheet, source };
    let ledger = ledgers.open(channel).await.map_err(watermark_err)?;
    let watermark = read_watermark(ledger.as_ref())
        .await
        .map_err(watermark_err)?;

    let fresh = match watermark {
        Some(mark) => {
            info!("Most recent createdAt in {}: {}", sheet, mark);
            let mut unparseable = 0usize;
            let newer = candidates.filtered(|row| {
                match datetime::parse(row.get(LeadColumn::CreatedTime)) {
                    Some(ts) => ts > mark,
                    None => {
                        unparseable += 1;
                        false
                    }
                }
            });
            if unparseable > 0 {
                debug!(
                    "Dropped {} {} rows with unparseable C.Created Time",
                    unparseable,
                    channel.id()
                );
            }
            info!(
                "After datetime filtering for {}: {} rows remaining",
                channel.id(),
                newer.len()
            );
            newer
        }
        None => {
            info!(
                "No existing createdAt found in {}, will append all {} filtered rows",
                sheet,
                channel.id()
            );
            candidates
        }
    };

    if fresh.is_empty() {
        info!("No {} rows to append after filtering.", channel.id());
        return Ok(0);
    }

    let rows: Vec<Vec<String>> = fresh
        .rows()
        .iter()
        .map(|row| to_ledger_record(row).into_values())
        .collect();

    let appended = ledger
        .append_rows(rows)
        .await
        .map_err(|source| ChannelError::Append {
            channel: channel.id(),
            sheet,
            source,
        })?;
    info!(
        "Successfully appended {} {} rows to {}.",
        appended,
        channel.id(),
        sheet
    );
    Ok(appended)
}

/// Builds the upload response from per-channel reports. Channels with zero
/// appended rows are left out of the message; failures are appended to it.
pub fn summarize(reports: Vec<ChannelReport>) -> UploadResponse {
    let parts: Vec<String> = reports
        .iter()
        .filter(|r| r.appended > 0)
        .map(|r| format!("{} {} rows to {}", r.appended, r.channel.label(), r.sheet))
        .collect();
    let failures: Vec<&str> = reports.iter().filter_map(|r| r.error.as_deref()).collect();

    let mut message = if !parts.is_empty() {
        format!("Successfully appended {}.", parts.join(" and "))
    } else if failures.is_empty() {
        "No rows matched the filters. Nothing appended.".to_string()
    } else {
        "Nothing appended.".to_string()
    };
    for failure in &failures {
        message.push(' ');
        message.push_str(failure);
    }

    UploadResponse {
        message,
        success: failures.is_empty(),
        channels: reports,
    }
}
