//! Credential records on disk
//!
//! Two file formats are handled here: the persisted authorized-user
//! record (written by us after a grant or refresh) and the OAuth client
//! secret file issued for the application, which is only read when
//! interactive consent has to run.

use crate::utils::error::AuthError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Refresh slightly before the server-side expiry to absorb clock skew.
const EXPIRY_LEEWAY_SECS: i64 = 60;

/// Persisted bearer token plus the refresh metadata needed to renew it
/// without repeating interactive consent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl StoredToken {
    /// A record with no recorded expiry is assumed usable; the API will
    /// reject it if not, and that shows up as an authorization error.
    pub fn is_expired(&self) -> bool {
        match self.expiry {
            Some(expiry) => expiry <= Utc::now() + Duration::seconds(EXPIRY_LEEWAY_SECS),
            None => false,
        }
    }

    /// Whether the record carries everything a refresh grant needs.
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some() && self.client_id.is_some() && self.client_secret.is_some()
    }

    /// Load the persisted record. Absence is not an error, and a record
    /// that no longer parses is treated the same way: both trigger the
    /// consent path upstream.
    pub fn load(path: &Path) -> Result<Option<Self>, AuthError> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path)?;
        match serde_json::from_str(&raw) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                warn!("ignoring unreadable credential record {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    /// Overwrite the credential file with this record.
    pub fn persist(&self, path: &Path) -> Result<(), AuthError> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}

/// OAuth application identity, as issued by the platform's developer
/// console ("installed app" JSON).
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

/// The console wraps the record in an `installed` (or `web`) object;
/// a bare record is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClientSecretsFile {
    Installed { installed: ClientSecrets },
    Web { web: ClientSecrets },
    Bare(ClientSecrets),
}

impl ClientSecrets {
    pub fn load(path: &Path) -> Result<Self, AuthError> {
        if !path.exists() {
            return Err(AuthError::MissingClientSecret(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let file: ClientSecretsFile = serde_json::from_str(&raw)?;
        Ok(match file {
            ClientSecretsFile::Installed { installed } => installed,
            ClientSecretsFile::Web { web } => web,
            ClientSecretsFile::Bare(secrets) => secrets,
        })
    }
}

pub(crate) fn default_auth_uri() -> String {
    "https://accounts.google.com/o/oauth2/auth".to_string()
}

pub(crate) fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}
