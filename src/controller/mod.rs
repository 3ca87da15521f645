//! User-intent entry points.
//!
//! Each method snapshots what it needs from the model, drops the locks,
//! performs the network call, and then re-checks the epoch and sequence
//! guards before publishing the result.

pub mod admin;
pub mod navigation;
pub mod playback;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use crate::error::ClientError;
use crate::model::api_client::{RegisterRequest, StreamingApi};
use crate::model::AppModel;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppController {
    pub model: AppModel,
    api: Arc<dyn StreamingApi>,
    session: SessionStore,
}

impl AppController {
    pub fn new(model: AppModel, api: Arc<dyn StreamingApi>, session: SessionStore) -> Self {
        Self {
            model,
            api,
            session,
        }
    }

    /// Exchanges credentials for a session. The identity is persisted only
    /// after the server accepts; a rejection leaves the store untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        tracing::info!(username, "logging in");
        match self.api.authenticate(username, password).await {
            Ok(identity) => {
                self.session.store(identity).await?;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "login failed");
                self.model.set_notice(err.to_string()).await;
                Err(err)
            }
        }
    }

    /// Creates an account. Local checks run before anything is sent.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ClientError> {
        if request.username.trim().is_empty()
            || request.email.trim().is_empty()
            || request.password.is_empty()
        {
            let err = ClientError::Validation("username, email and password are required".into());
            self.model.set_notice(err.to_string()).await;
            return Err(err);
        }
        tracing::info!(username = %request.username, "registering account");
        match self.api.register(request).await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(%err, "registration failed");
                self.model.set_notice(err.to_string()).await;
                Err(err)
            }
        }
    }

    /// Ends the session. Everything in flight when this runs will be
    /// discarded on landing.
    pub async fn logout(&self) -> Result<(), ClientError> {
        tracing::info!("logging out");
        self.session.clear().await?;
        self.model.invalidate_session().await;
        Ok(())
    }

    pub async fn current_identity(&self) -> Option<crate::model::types::Identity> {
        self.session.current_identity().await
    }
}
