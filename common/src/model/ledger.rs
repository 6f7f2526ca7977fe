/// Header row of every destination worksheet, in column order.
pub const LEDGER_HEADERS: [&str; 7] = [
    "Souce",
    "gpuid_Cal",
    "nameAtPanCard",
    "status",
    "createdAt",
    "Mob. No.",
    "PAN No",
];

/// Zero-based position of `createdAt` in a ledger row (column "E").
pub const CREATED_AT_INDEX: usize = 4;

/// One row of a destination worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerRecord {
    pub source: String,
    pub gpuid: String,
    pub name: String,
    pub status: String,
    pub created_at: String,
    pub mobile: String,
    pub pan: String,
}

impl LedgerRecord {
    /// Cell values in [`LEDGER_HEADERS`] order.
    pub fn into_values(self) -> Vec<String> {
        vec![
            self.source,
            self.gpuid,
            self.name,
            self.status,
            self.created_at,
            self.mobile,
            self.pan,
        ]
    }
}
