use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use tokio::sync::broadcast;
use url::Url;

use crate::config::{AUTH_HTTP_TIMEOUT, ProviderConfig};
use crate::provider::errors::ProviderError;
use crate::session::Identity;
use crate::storage::{
    AUTH_SESSION_KEY, SharedLocalStore, StorageError, delete_record, load_record, save_record,
};

use super::types::{AuthChange, IdentityProvider, ProviderKind, RealProvider};

/// Sessions this close to expiry are refreshed before being reported valid.
const EXPIRY_MARGIN_SECS: i64 = 10;

/// `refresh_if_expiring` renews sessions that expire within this window.
const REFRESH_WINDOW_SECS: i64 = 90;

/// Lifetime assumed when the backend omits both `expires_at` and `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

#[derive(Debug, Deserialize)]
struct BackendUser {
    id: String,
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BackendSession {
    access_token: String,
    refresh_token: String,
    expires_in: Option<i64>,
    expires_at: Option<i64>,
    user: BackendUser,
}

/// Sign-up answers with a session, or with a bare user while email
/// confirmation is pending.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(BackendSession),
    User(BackendUser),
}

#[derive(Debug, Default, Deserialize)]
struct BackendErrorBody {
    msg: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl BackendErrorBody {
    fn into_message(self) -> String {
        self.msg
            .or(self.error_description)
            .or(self.message)
            .or(self.error)
            .unwrap_or_default()
    }
}

/// Token session kept in the local store between process runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct StoredAuthSession {
    pub(crate) access_token: String,
    pub(crate) refresh_token: String,
    pub(crate) expires_at: DateTime<Utc>,
    pub(crate) user: Identity,
}

impl StoredAuthSession {
    fn expires_within(&self, secs: i64) -> bool {
        self.expires_at <= Utc::now() + ChronoDuration::seconds(secs)
    }
}

impl BackendUser {
    fn into_identity(self, display_name_hint: Option<&str>) -> Identity {
        let display_name = self
            .user_metadata
            .full_name
            .or_else(|| display_name_hint.map(str::to_string));
        Identity::new(self.id, self.email.unwrap_or_default(), display_name)
    }
}

impl BackendSession {
    fn into_stored(self, display_name_hint: Option<&str>) -> StoredAuthSession {
        let expires_at = self
            .expires_at
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .unwrap_or_else(|| {
                Utc::now()
                    + ChronoDuration::seconds(self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS))
            });
        StoredAuthSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into_identity(display_name_hint),
        }
    }
}

fn transport_error(err: reqwest::Error) -> ProviderError {
    tracing::error!("Identity backend request failed: {}", err);
    ProviderError::BackendUnavailable(err.to_string())
}

/// Decode a successful body, or classify the failure.
///
/// Server errors are reported as unavailability; anything else the backend
/// refuses goes through `on_reject` with the backend's own description.
async fn read_response<T: DeserializeOwned>(
    response: reqwest::Response,
    on_reject: fn(String) -> ProviderError,
) -> Result<T, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(transport_error);
    }

    let message = response
        .json::<BackendErrorBody>()
        .await
        .unwrap_or_default()
        .into_message();
    tracing::debug!("Identity backend answered {}: {}", status, message);

    if status.is_server_error() {
        let message = if message.is_empty() {
            status.to_string()
        } else {
            message
        };
        Err(ProviderError::BackendUnavailable(message))
    } else {
        Err(on_reject(message))
    }
}

impl RealProvider {
    pub fn new(config: ProviderConfig, store: SharedLocalStore) -> Result<Self, ProviderError> {
        let base_url = Url::parse(&format!("{}/", config.url.trim_end_matches('/')))
            .map_err(|e| ProviderError::Config(format!("Invalid backend URL: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(*AUTH_HTTP_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Config(e.to_string()))?;

        let (changes, _) = broadcast::channel(16);

        Ok(Self {
            base_url,
            anon_key: config.anon_key,
            client,
            store,
            changes,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        self.base_url
            .join(path)
            .map_err(|e| ProviderError::Config(e.to_string()))
    }

    fn post(&self, url: Url, bearer: Option<&str>) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer.unwrap_or(&self.anon_key))
    }

    fn notify(&self, change: AuthChange) {
        // No receivers is fine: nobody is listening yet
        let _ = self.changes.send(change);
    }

    async fn load_session(&self) -> Result<Option<StoredAuthSession>, ProviderError> {
        match load_record::<StoredAuthSession>(&self.store, AUTH_SESSION_KEY).await {
            Ok(session) => Ok(session),
            Err(StorageError::Serde(e)) => {
                tracing::warn!("Discarding malformed auth session record: {}", e);
                delete_record(&self.store, AUTH_SESSION_KEY).await?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, session: &StoredAuthSession) -> Result<(), ProviderError> {
        save_record(&self.store, AUTH_SESSION_KEY, session).await?;
        Ok(())
    }

    /// Exchange the refresh token for a new session and persist it.
    async fn refresh(&self, session: &StoredAuthSession) -> Result<Identity, ProviderError> {
        let url = self.endpoint("auth/v1/token")?;
        let response = self
            .post(url, None)
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": session.refresh_token }))
            .send()
            .await
            .map_err(transport_error)?;

        let refreshed: BackendSession =
            read_response(response, ProviderError::InvalidCredentials).await?;
        let stored = refreshed.into_stored(session.user.display_name.as_deref());
        self.persist(&stored).await?;

        tracing::debug!("Refreshed session for {}", stored.user.email);
        self.notify(AuthChange::TokenRefreshed(stored.user.clone()));
        Ok(stored.user)
    }

    /// Refresh, treating a rejected refresh token as a remote sign-out.
    async fn refresh_or_drop(
        &self,
        session: &StoredAuthSession,
    ) -> Result<Option<Identity>, ProviderError> {
        match self.refresh(session).await {
            Ok(identity) => Ok(Some(identity)),
            Err(ProviderError::InvalidCredentials(msg)) => {
                tracing::info!("Stored session can no longer be refreshed: {}", msg);
                delete_record(&self.store, AUTH_SESSION_KEY).await?;
                self.notify(AuthChange::SignedOut);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl IdentityProvider for RealProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Real
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        let url = self.endpoint("auth/v1/token")?;
        let response = self
            .post(url, None)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport_error)?;

        let session: BackendSession =
            read_response(response, ProviderError::InvalidCredentials).await?;
        let stored = session.into_stored(None);
        self.persist(&stored).await?;

        tracing::info!("Signed in {}", stored.user.email);
        self.notify(AuthChange::SignedIn(stored.user.clone()));
        Ok(stored.user)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Identity, ProviderError> {
        let url = self.endpoint("auth/v1/signup")?;
        let response = self
            .post(url, None)
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "full_name": display_name },
            }))
            .send()
            .await
            .map_err(transport_error)?;

        let answer: SignUpResponse =
            read_response(response, ProviderError::SignUpRejected).await?;
        match answer {
            SignUpResponse::Session(session) => {
                let stored = session.into_stored(Some(display_name));
                self.persist(&stored).await?;
                tracing::info!("Signed up {}", stored.user.email);
                self.notify(AuthChange::SignedIn(stored.user.clone()));
                Ok(stored.user)
            }
            SignUpResponse::User(user) => {
                let identity = user.into_identity(Some(display_name));
                tracing::info!("Signed up {} (confirmation pending)", identity.email);
                Ok(identity)
            }
        }
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let session = self.load_session().await?;

        let remote = match session {
            Some(session) => {
                let url = self.endpoint("auth/v1/logout")?;
                match self.post(url, Some(&session.access_token)).send().await {
                    Ok(response) if response.status().is_success() => Ok(()),
                    Ok(response) => Err(ProviderError::BackendUnavailable(format!(
                        "Sign out answered {}",
                        response.status()
                    ))),
                    Err(e) => Err(transport_error(e)),
                }
            }
            None => Ok(()),
        };

        // Local state goes regardless of what the backend said
        delete_record(&self.store, AUTH_SESSION_KEY).await?;
        self.notify(AuthChange::SignedOut);
        remote
    }

    async fn current_session(&self) -> Result<Option<Identity>, ProviderError> {
        let Some(session) = self.load_session().await? else {
            tracing::debug!("No stored auth session");
            return Ok(None);
        };

        if session.expires_within(EXPIRY_MARGIN_SECS) {
            tracing::debug!("Stored session expired, refreshing");
            return self.refresh_or_drop(&session).await;
        }

        Ok(Some(session.user))
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<AuthChange>> {
        Some(self.changes.subscribe())
    }

    async fn refresh_if_expiring(&self) -> Result<(), ProviderError> {
        if let Some(session) = self.load_session().await? {
            if session.expires_within(REFRESH_WINDOW_SECS) {
                self.refresh_or_drop(&session).await?;
            }
        }
        Ok(())
    }
}
