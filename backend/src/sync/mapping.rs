use super::datetime;
use common::model::lead::{LeadColumn, LeadRow};
use common::model::ledger::LedgerRecord;

/// Maps an input row onto the worksheet layout. `createdAt` is re-encoded
/// through the datetime codec (unparseable values become empty); every
/// other field is the trimmed cell text.
pub fn to_ledger_record(row: &LeadRow) -> LedgerRecord {
    let text = |column: LeadColumn| row.get(column).trim().to_string();

    LedgerRecord {
        source: text(LeadColumn::UtmSource),
        gpuid: text(LeadColumn::GpId),
        name: text(LeadColumn::NameOnPanCard),
        status: text(LeadColumn::PosStatus),
        created_at: datetime::format(datetime::parse(row.get(LeadColumn::CreatedTime))),
        mobile: text(LeadColumn::Mobile),
        pan: text(LeadColumn::PanNumber),
    }
}
