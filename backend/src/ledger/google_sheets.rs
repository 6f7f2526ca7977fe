// google sheets v4 ledger
//
// every channel sync opens its own binding: key file read, token minted,
// worksheet title resolved by position. nothing survives between uploads.

use super::credentials::ServiceAccountKey;
use super::{Ledger, LedgerError, LedgerProvider};
use crate::config::Config;
use async_trait::async_trait;
use common::model::channel::Channel;
use log::debug;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;

#[derive(Clone)]
struct SheetsApi {
    http: Client,
    api_base: String,
    spreadsheet_id: String,
}

/// Provider binding channels to worksheets of one spreadsheet.
pub struct GoogleSheets {
    api: SheetsApi,
    credentials_file: PathBuf,
}

struct Worksheet {
    api: SheetsApi,
    token: String,
    title: String,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Deserialize)]
struct AppendResponse {
    updates: Option<AppendUpdates>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    updated_rows: Option<usize>,
}

impl GoogleSheets {
    pub fn new(config: &Config) -> Self {
        Self {
            api: SheetsApi {
                http: Client::new(),
                api_base: config.sheets_api_base.clone(),
                spreadsheet_id: config.spreadsheet_id.clone(),
            },
            credentials_file: config.credentials_file.clone(),
        }
    }
}

#[async_trait]
impl LedgerProvider for GoogleSheets {
    async fn open(&self, channel: Channel) -> Result<Box<dyn Ledger>, LedgerError> {
        let key = ServiceAccountKey::load(&self.credentials_file).await?;
        let token = key.access_token(&self.api.http).await?;
        let title = self
            .api
            .worksheet_title(&token, channel.worksheet_index())
            .await?;
        debug!("bound channel {} to worksheet '{}'", channel.id(), title);

        Ok(Box::new(Worksheet {
            api: self.api.clone(),
            token,
            title,
        }))
    }
}

impl SheetsApi {
    /// `{base}/v4/spreadsheets/{id}/{tail...}` with each tail entry encoded
    /// as one path segment.
    fn url(&self, tail: &[&str]) -> Result<Url, LedgerError> {
        let mut url =
            Url::parse(&self.api_base).map_err(|e| LedgerError::BaseUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| LedgerError::BaseUrl(self.api_base.clone()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str()])
            .extend(tail);
        Ok(url)
    }

    async fn worksheet_title(&self, token: &str, index: usize) -> Result<String, LedgerError> {
        let resp = self
            .http
            .get(self.url(&[])?)
            .query(&[("fields", "sheets.properties")])
            .bearer_auth(token)
            .send()
            .await?;
        let meta: SpreadsheetMeta = check(resp).await?.json().await?;

        meta.sheets
            .into_iter()
            .nth(index)
            .map(|s| s.properties.title)
            .ok_or(LedgerError::WorksheetMissing(index))
    }
}

#[async_trait]
impl Ledger for Worksheet {
    async fn read_column(&self, index: usize) -> Result<Vec<String>, LedgerError> {
        let column = column_letter(index);
        let range = format!("{}!{}:{}", quote_title(&self.title), column, column);
        let resp = self
            .api
            .http
            .get(self.api.url(&["values", range.as_str()])?)
            .query(&[("majorDimension", "COLUMNS")])
            .bearer_auth(&self.token)
            .send()
            .await?;
        let body: ValueRange = check(resp).await?.json().await?;

        Ok(body.values.into_iter().next().unwrap_or_default())
    }

    async fn append_rows(&self, rows: Vec<Vec<String>>) -> Result<usize, LedgerError> {
        if rows.is_empty() {
            return Ok(0);
        }
        let count = rows.len();
        let range = format!("{}:append", quote_title(&self.title));
        let resp = self
            .api
            .http
            .post(self.api.url(&["values", range.as_str()])?)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .bearer_auth(&self.token)
            .json(&json!({ "values": rows }))
            .send()
            .await?;
        let body: AppendResponse = check(resp).await?.json().await?;

        Ok(body
            .updates
            .and_then(|u| u.updated_rows)
            .unwrap_or(count))
    }

    fn name(&self) -> &str {
        &self.title
    }
}

async fn check(resp: Response) -> Result<Response, LedgerError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(LedgerError::Api {
        status: status.as_u16(),
        body,
    })
}

/// A1 column letters for a zero-based index: 0 -> "A", 4 -> "E", 26 -> "AA".
fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn quote_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> SheetsApi {
        SheetsApi {
            http: Client::new(),
            api_base: base.to_string(),
            spreadsheet_id: "sheet-id".to_string(),
        }
    }

    #[test]
    fn column_letters() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(4), "E");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
    }

    #[test]
    fn titles_are_quoted_for_a1_ranges() {
        assert_eq!(quote_title("Sheet1"), "'Sheet1'");
        assert_eq!(quote_title("Lead's"), "'Lead''s'");
    }

    #[test]
    fn value_urls_encode_the_range_as_one_segment() {
        let url = api("https://sheets.googleapis.com/")
            .url(&["values", "'Sheet 1'!E:E"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-id/values/'Sheet%201'!E:E"
        );
    }

    #[test]
    fn bad_base_url_is_reported() {
        assert!(matches!(
            api("not a url").url(&[]),
            Err(LedgerError::BaseUrl(_))
        ));
    }

    #[test]
    fn column_response_without_values_is_empty() {
        let body: ValueRange =
            serde_json::from_str(r#"{"range": "'Sheet1'!E1:E1000", "majorDimension": "COLUMNS"}"#)
                .unwrap();
        assert!(body.values.is_empty());
    }

    #[test]
    fn append_response_reports_updated_rows() {
        let body: AppendResponse = serde_json::from_str(
            r#"{"spreadsheetId": "x", "updates": {"updatedRange": "'Sheet1'!A5:G6", "updatedRows": 2}}"#,
        )
        .unwrap();
        assert_eq!(body.updates.and_then(|u| u.updated_rows), Some(2));
    }
}
