//! Credential provider
//!
//! Resolution order mirrors what operators expect from installed-app
//! tools: use the persisted record while it is valid, refresh it when it
//! has expired, and only fall back to interactive consent when neither
//! is possible. The record on disk is rewritten whenever a grant
//! produced a new token.

pub mod flow;
pub mod token;

pub use token::{ClientSecrets, StoredToken};

use crate::utils::error::AuthError;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub struct Authenticator {
    token_path: PathBuf,
    client_secrets_path: PathBuf,
}

impl Authenticator {
    pub fn new(token_path: PathBuf, client_secrets_path: PathBuf) -> Self {
        Self {
            token_path,
            client_secrets_path,
        }
    }

    /// Produce a usable credential record, persisting it if it changed.
    ///
    /// Fails only when every path to a valid credential is exhausted;
    /// that failure is fatal to the run.
    pub async fn obtain_credentials(&self) -> Result<StoredToken, AuthError> {
        let cached = StoredToken::load(&self.token_path)?;

        if let Some(token) = &cached {
            if !token.is_expired() {
                debug!("using cached credentials from {}", self.token_path.display());
                return Ok(token.clone());
            }
        }

        let token = match cached {
            Some(cached) if cached.can_refresh() => match flow::refresh(&cached).await {
                Ok(token) => {
                    info!("refreshed expired access token");
                    token
                }
                Err(e) => {
                    warn!("token refresh failed: {}; falling back to interactive consent", e);
                    self.consent().await?
                }
            },
            _ => self.consent().await?,
        };

        token.persist(&self.token_path)?;
        info!("credential record written to {}", self.token_path.display());
        Ok(token)
    }

    async fn consent(&self) -> Result<StoredToken, AuthError> {
        let secrets = ClientSecrets::load(&self.client_secrets_path)?;
        flow::interactive_consent(&secrets).await
    }
}
