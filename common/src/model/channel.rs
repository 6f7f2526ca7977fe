use serde::{Deserialize, Serialize};

/// An acquisition source with its own destination worksheet.
///
/// The set is closed: every channel is bound to one worksheet of the
/// configured spreadsheet, by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Google,
    Meta,
}

impl Channel {
    /// Channels in the order they are synced.
    pub const ALL: [Channel; 2] = [Channel::Google, Channel::Meta];

    /// The lower-case tag found in the `utm source` column.
    pub fn id(&self) -> &'static str {
        match self {
            Channel::Google => "google",
            Channel::Meta => "meta",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Channel::Google => "Google",
            Channel::Meta => "Meta",
        }
    }

    /// Zero-based position of the bound worksheet inside the spreadsheet.
    pub fn worksheet_index(&self) -> usize {
        match self {
            Channel::Google => 0,
            Channel::Meta => 1,
        }
    }

    /// Name used for the bound worksheet in user-facing messages.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Channel::Google => "Sheet1",
            Channel::Meta => "Sheet2",
        }
    }

    /// Case-insensitive lookup from a raw tag. Surrounding whitespace is not
    /// stripped: `" google"` is not a recognised tag.
    pub fn from_tag(tag: &str) -> Option<Channel> {
        Channel::ALL
            .into_iter()
            .find(|channel| tag.to_lowercase() == channel.id())
    }
}
