use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::identity::{Identity, IdentityError};

/// Resolves bearer tokens against a GoTrue-style auth provider
/// (`GET {base}/auth/v1/user`). Invalid or expired tokens come back as
/// "no session", never as an error.
pub struct RemoteIdentity {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: Uuid,
}

impl RemoteIdentity {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> RemoteIdentity {
        RemoteIdentity {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }
}

#[async_trait]
impl Identity for RemoteIdentity {
    async fn current_account_id(&self, bearer: Option<&str>) -> Result<Option<Uuid>, IdentityError> {
        let Some(token) = bearer else {
            return Ok(None);
        };

        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityError::Malformed(format!(
                "provider returned {status}: {body}"
            )));
        }

        let user: ProviderUser = response
            .json()
            .await
            .map_err(|e| IdentityError::Malformed(e.to_string()))?;
        Ok(Some(user.id))
    }
}
