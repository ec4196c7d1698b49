use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, LoginPayload, RegisterPayload};
use crate::error::{Error, Result};
use crate::models::user::{Credential, User};
use crate::services::api_client::ApiClient;
use crate::storage::TokenStore;

/// Owns the authenticated session. It is the only component that writes
/// the credential; everything else borrows it through
/// [`SessionStore::current_credential`].
pub struct SessionStore {
    api: ApiClient,
    tokens: Arc<dyn TokenStore>,
    credential: Option<Credential>,
}

impl SessionStore {
    pub fn new(api: ApiClient, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            tokens,
            credential: None,
        }
    }

    /// Restores the session from a persisted token, checking it against
    /// `/api/auth/me`. A rejected token is removed from storage. A
    /// transport failure keeps the token for the next start but leaves the
    /// session unauthenticated.
    pub async fn hydrate(&mut self) -> Result<Option<Credential>> {
        self.credential = None;
        let Some(token) = self.tokens.load()? else {
            return Ok(None);
        };

        match self.api.get::<User>("api/auth/me", Some(&token)).await {
            Ok(user) => {
                info!(user_id = user.id, "Restored session for {}", user.username);
                let credential = Credential { token, user };
                self.credential = Some(credential.clone());
                Ok(Some(credential))
            }
            Err(err) if err.is_auth() || err.status().is_some() => {
                warn!("Stored token was rejected, clearing it: {}", err);
                self.tokens.clear()?;
                Ok(None)
            }
            Err(err) => {
                warn!("Could not validate stored token: {}", err);
                Err(err)
            }
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<Credential> {
        let payload = LoginPayload {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        payload.validate()?;

        let response: AuthResponse = self
            .api
            .post("api/auth/login", &payload, None)
            .await
            .map_err(rejected_as_auth)?;
        self.establish(response)
    }

    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Credential> {
        let payload = RegisterPayload {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        payload.validate()?;

        let response: AuthResponse = self
            .api
            .post("api/auth/register", &payload, None)
            .await
            .map_err(rejected_as_auth)?;
        self.establish(response)
    }

    pub fn logout(&mut self) -> Result<()> {
        if let Some(credential) = self.credential.take() {
            info!(user_id = credential.user.id, "Logged out {}", credential.user.username);
        }
        self.tokens.clear()
    }

    pub fn current_credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    fn establish(&mut self, response: AuthResponse) -> Result<Credential> {
        self.tokens.save(&response.token)?;
        let credential = Credential {
            token: response.token,
            user: response.user,
        };
        info!(user_id = credential.user.id, "Authenticated as {}", credential.user.username);
        self.credential = Some(credential.clone());
        Ok(credential)
    }
}

/// Any non-2xx answer to a login or register call means the credentials
/// were not accepted. Transport failures stay network errors.
fn rejected_as_auth(err: Error) -> Error {
    match err {
        Error::Network {
            status: Some(_),
            message,
        } => Error::Auth(message),
        other => other,
    }
}
