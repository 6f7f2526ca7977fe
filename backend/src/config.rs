use std::env;
use std::path::PathBuf;

/// Spreadsheet holding one worksheet per channel.
pub const DEFAULT_SPREADSHEET_ID: &str = "1CMU_8lXzLzijqVelZxxFOBj4408deFhP5Wf1PMPNIHs";
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub spreadsheet_id: String,
    pub credentials_file: PathBuf,
    pub sheets_api_base: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, falling back to defaults
    /// for absent or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("LEADSYNC_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("LEADSYNC_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            spreadsheet_id: lookup("LEADSYNC_SHEET_ID")
                .unwrap_or_else(|| DEFAULT_SPREADSHEET_ID.to_string()),
            credentials_file: lookup("GOOGLE_SERVICE_ACCOUNT_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("service_account.json")),
            sheets_api_base: lookup("LEADSYNC_SHEETS_API_BASE")
                .unwrap_or_else(|| DEFAULT_SHEETS_API_BASE.to_string()),
            max_upload_bytes: lookup("LEADSYNC_MAX_UPLOAD_MB")
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(10)
                * 1024
                * 1024,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.spreadsheet_id, DEFAULT_SPREADSHEET_ID);
        assert_eq!(config.credentials_file, PathBuf::from("service_account.json"));
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn credentials_path_is_overridable() {
        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_SERVICE_ACCOUNT_FILE", "/etc/leadsync/sa.json"),
            ("LEADSYNC_PORT", "9000"),
            ("LEADSYNC_MAX_UPLOAD_MB", "2"),
        ]));
        assert_eq!(config.credentials_file, PathBuf::from("/etc/leadsync/sa.json"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_upload_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn unparsable_port_falls_back() {
        let config = Config::from_lookup(lookup(&[("LEADSYNC_PORT", "http")]));
        assert_eq!(config.port, 8080);
    }
}
