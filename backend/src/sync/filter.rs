use crate::errors::SyncError;
use common::model::channel::Channel;
use common::model::lead::{LeadColumn, LeadRow, LeadTable};
use log::{error, info};

/// Fails with [`SyncError::Schema`] when a required column is absent,
/// otherwise keeps the rows that carry a PAN and a recognised channel tag.
pub fn apply_filters(table: &LeadTable) -> Result<LeadTable, SyncError> {
    let missing = table.missing_required();
    if !missing.is_empty() {
        error!("Missing columns: {:?}", missing);
        return Err(SyncError::Schema(missing));
    }

    let with_pan = table.filtered(has_pan);
    let filtered = with_pan.filtered(|row| row_channel(row).is_some());
    info!(
        "Rows after PAN: {}, after utm: {}",
        with_pan.len(),
        filtered.len()
    );
    Ok(filtered)
}

/// PAN cell is non-empty once trimmed.
pub fn has_pan(row: &LeadRow) -> bool {
    !row.get(LeadColumn::PanNumber).trim().is_empty()
}

pub fn row_channel(row: &LeadRow) -> Option<Channel> {
    Channel::from_tag(row.get(LeadColumn::UtmSource))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::lead::REQUIRED_COLUMNS;

    fn lead(pan: &str, utm: &str) -> LeadRow {
        LeadRow::new()
            .with(LeadColumn::CreatedTime, "Jul 20, 2025 10:11 AM")
            .with(LeadColumn::PanNumber, pan)
            .with(LeadColumn::UtmSource, utm)
    }

    fn table(rows: Vec<LeadRow>) -> LeadTable {
        LeadTable::with_columns(&REQUIRED_COLUMNS, rows)
    }

    fn pans(table: &LeadTable) -> Vec<&str> {
        table.rows().iter().map(|r| r.get(LeadColumn::PanNumber)).collect()
    }

    #[test]
    fn all_filters_pass() {
        let out = apply_filters(&table(vec![lead("123", "google"), lead("456", "meta")])).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn blank_pan_is_dropped() {
        let out = apply_filters(&table(vec![
            lead("", "google"),
            lead(" ", "meta"),
            lead("  \t", "google"),
            lead("789", "google"),
        ]))
        .unwrap();
        assert_eq!(pans(&out), vec!["789"]);
    }

    #[test]
    fn unknown_channels_are_dropped() {
        let out = apply_filters(&table(vec![
            lead("123", "google"),
            lead("456", "Meta"),
            lead("789", "other"),
            lead("999", ""),
        ]))
        .unwrap();
        assert_eq!(pans(&out), vec!["123", "456"]);
    }

    #[test]
    fn survivors_keep_their_order() {
        let out = apply_filters(&table(vec![
            lead("c", "meta"),
            lead("", "meta"),
            lead("a", "GOOGLE"),
            lead("b", "meta"),
        ]))
        .unwrap();
        assert_eq!(pans(&out), vec!["c", "a", "b"]);
    }

    #[test]
    fn missing_columns_fail() {
        let headers = vec!["A".to_string(), "B".to_string()];
        let input = LeadTable::from_records(headers, vec![vec!["1".into(), "2".into()]]);
        match apply_filters(&input) {
            Err(SyncError::Schema(missing)) => assert_eq!(missing.len(), 3),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn one_missing_column_is_enough_to_fail() {
        let input = LeadTable::with_columns(
            &[LeadColumn::CreatedTime, LeadColumn::PanNumber],
            vec![lead("123", "google")],
        );
        assert!(matches!(
            apply_filters(&input),
            Err(SyncError::Schema(m)) if m == vec!["utm source"]
        ));
    }

    #[test]
    fn empty_table_with_columns_is_fine() {
        assert!(apply_filters(&table(vec![])).unwrap().is_empty());
    }
}
