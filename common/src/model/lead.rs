use std::collections::HashMap;

/// The input columns the sync reads, keyed by their exact header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadColumn {
    CreatedTime,
    PanNumber,
    UtmSource,
    GpId,
    NameOnPanCard,
    PosStatus,
    Mobile,
}

/// Columns an upload must carry before any row is looked at.
pub const REQUIRED_COLUMNS: [LeadColumn; 3] = [
    LeadColumn::CreatedTime,
    LeadColumn::PanNumber,
    LeadColumn::UtmSource,
];

impl LeadColumn {
    pub const ALL: [LeadColumn; 7] = [
        LeadColumn::CreatedTime,
        LeadColumn::PanNumber,
        LeadColumn::UtmSource,
        LeadColumn::GpId,
        LeadColumn::NameOnPanCard,
        LeadColumn::PosStatus,
        LeadColumn::Mobile,
    ];

    /// Header text as exported by the CRM. Matching is case-sensitive.
    pub fn header(&self) -> &'static str {
        match self {
            LeadColumn::CreatedTime => "C.Created Time",
            LeadColumn::PanNumber => "C.POS PAN Number",
            LeadColumn::UtmSource => "utm source",
            LeadColumn::GpId => "C.GP ID",
            LeadColumn::NameOnPanCard => "C.POS Name on PAN Card",
            LeadColumn::PosStatus => "C.POS Status",
            LeadColumn::Mobile => "C.Mobile",
        }
    }

    pub fn from_header(header: &str) -> Option<LeadColumn> {
        LeadColumn::ALL.into_iter().find(|c| c.header() == header)
    }
}

/// One decoded row. Cells of unknown columns are not kept; a known column
/// missing from the upload reads as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadRow {
    cells: HashMap<LeadColumn, String>,
}

impl LeadRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: LeadColumn, value: impl Into<String>) -> Self {
        self.cells.insert(column, value.into());
        self
    }

    /// Raw cell value, untrimmed.
    pub fn get(&self, column: LeadColumn) -> &str {
        self.cells.get(&column).map(String::as_str).unwrap_or("")
    }
}

/// An uploaded sheet: the header row as found in the file plus its rows, in
/// file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadTable {
    headers: Vec<String>,
    rows: Vec<LeadRow>,
}

impl LeadTable {
    /// Builds a table from a header row and positional records. Short records
    /// are padded with empty cells; when a header repeats, its first
    /// occurrence wins.
    pub fn from_records<I>(headers: Vec<String>, records: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut positions: Vec<(LeadColumn, usize)> = Vec::new();
        for (idx, header) in headers.iter().enumerate() {
            if let Some(column) = LeadColumn::from_header(header) {
                if !positions.iter().any(|(c, _)| *c == column) {
                    positions.push((column, idx));
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|record| {
                let mut row = LeadRow::new();
                for (column, idx) in &positions {
                    let value = record.get(*idx).cloned().unwrap_or_default();
                    row = row.with(*column, value);
                }
                row
            })
            .collect();

        Self { headers, rows }
    }

    /// Builds a table whose header row is exactly the given columns.
    pub fn with_columns(columns: &[LeadColumn], rows: Vec<LeadRow>) -> Self {
        Self {
            headers: columns.iter().map(|c| c.header().to_string()).collect(),
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[LeadRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: LeadColumn) -> bool {
        self.headers.iter().any(|h| h == column.header())
    }

    /// Header names of required columns absent from this table, in
    /// [`REQUIRED_COLUMNS`] order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|c| !self.has_column(**c))
            .map(|c| c.header())
            .collect()
    }

    /// A new table with the same header row and only the rows matching
    /// `keep`, order preserved.
    pub fn filtered<F>(&self, mut keep: F) -> LeadTable
    where
        F: FnMut(&LeadRow) -> bool,
    {
        LeadTable {
            headers: self.headers.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}
