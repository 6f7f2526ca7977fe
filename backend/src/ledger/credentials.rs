use super::LedgerError;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;

pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
];

/// The subset of a Google service account key file needed to mint tokens.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    /// Reads and parses the key file. The file is read on every call.
    pub async fn load(path: &Path) -> Result<Self, LedgerError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LedgerError::Credentials {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, LedgerError> {
        serde_json::from_str(raw).map_err(|e| LedgerError::InvalidCredentials(e.to_string()))
    }

    /// Signed RS256 assertion for the JWT bearer grant, issued at `now`
    /// (unix seconds).
    pub fn assertion(&self, now: i64) -> Result<String, LedgerError> {
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| LedgerError::InvalidCredentials(e.to_string()))?;
        let claims = Claims {
            iss: &self.client_email,
            scope: SCOPES.join(" "),
            aud: &self.token_uri,
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| LedgerError::InvalidCredentials(e.to_string()))
    }

    /// Exchanges a fresh assertion for an OAuth access token.
    pub async fn access_token(&self, http: &reqwest::Client) -> Result<String, LedgerError> {
        let assertion = self.assertion(chrono::Utc::now().timestamp())?;
        let resp = http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LedgerError::Auth(format!("{}: {}", status.as_u16(), body)));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| LedgerError::Auth(e.to_string()))?;
        Ok(token.access_token)
    }
}
