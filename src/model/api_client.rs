//! The server's HTTP surface and its reqwest-backed client.
//!
//! Controllers depend on the [`StreamingApi`] trait rather than on a
//! concrete client, so tests can substitute a scripted backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::session::SessionStore;

use super::types::{Identity, LibraryStats, Playlist, Role, ScanReport, Track, TrackDraft};

/// Connection settings for the streaming server.
///
/// Timeouts are applied only when set; a timeout surfaces through the same
/// transport-error channel as any other network failure.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: None,
            connect_timeout: None,
        }
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    token: String,
    id: u64,
    username: String,
    role: Role,
}

/// Fields submitted at account registration.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Everything the backend exposes to this client.
#[async_trait]
pub trait StreamingApi: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, ClientError>;
    async fn register(&self, request: &RegisterRequest) -> Result<(), ClientError>;

    async fn search_tracks(&self, keyword: &str) -> Result<Vec<Track>, ClientError>;
    async fn top_tracks(&self) -> Result<Vec<Track>, ClientError>;
    async fn tracks_by_artist(&self, artist_id: u64) -> Result<Vec<Track>, ClientError>;
    async fn tracks_by_genre(&self, genre: &str) -> Result<Vec<Track>, ClientError>;
    async fn record_play(&self, track_id: u64) -> Result<(), ClientError>;

    async fn my_playlists(&self) -> Result<Vec<Playlist>, ClientError>;
    async fn public_playlists(&self) -> Result<Vec<Playlist>, ClientError>;

    async fn admin_list_tracks(&self) -> Result<Vec<Track>, ClientError>;
    async fn admin_stats(&self) -> Result<LibraryStats, ClientError>;
    async fn admin_create_track(&self, draft: &TrackDraft) -> Result<Track, ClientError>;
    async fn admin_update_track(&self, id: u64, draft: &TrackDraft) -> Result<Track, ClientError>;
    async fn admin_delete_track(&self, id: u64) -> Result<(), ClientError>;
    async fn trigger_library_scan(&self) -> Result<ScanReport, ClientError>;
}

/// HTTP client for the streaming server.
///
/// Reads the bearer token from the shared session store on every request,
/// so a logout immediately de-authorizes subsequent calls.
#[derive(Clone)]
pub struct HttpApiClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl HttpApiClient {
    pub fn new(config: ClientConfig, session: SessionStore) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::Transport(format!(
                "invalid server URL: {base_url}"
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn authorized(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = self.session.token().await {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ClientError::Catalog(format!("malformed response: {e}")))
        } else {
            Err(Self::error_for(response).await)
        }
    }

    async fn read_ack(response: Response) -> Result<(), ClientError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_for(response).await)
        }
    }

    /// Maps a non-success response onto the error taxonomy.
    async fn error_for(response: Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_message(status, &body);
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Auth(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            _ => ClientError::Catalog(message),
        }
    }
}

/// Pulls the `message` field out of a server error body when present.
fn extract_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    if body.is_empty() {
        status.to_string()
    } else {
        body.to_string()
    }
}

#[async_trait]
impl StreamingApi for HttpApiClient {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, ClientError> {
        tracing::debug!(username, "API: authenticate");
        let response = self
            .http
            .post(self.url("/auth/signin"))
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let auth: AuthResponse = response
                .json()
                .await
                .map_err(|e| ClientError::Auth(format!("malformed login response: {e}")))?;
            Ok(Identity {
                id: auth.id,
                username: auth.username,
                role: auth.role,
                token: auth.token,
            })
        } else if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Auth(extract_message(status, &body)))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Transport(extract_message(status, &body)))
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ClientError> {
        tracing::debug!(username = %request.username, "API: register");
        let response = self
            .http
            .post(self.url("/auth/signup"))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Validation(extract_message(status, &body)))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Transport(extract_message(status, &body)))
        }
    }

    async fn search_tracks(&self, keyword: &str) -> Result<Vec<Track>, ClientError> {
        tracing::debug!(keyword, "API: search_tracks");
        let response = self
            .authorized(Method::GET, "/songs/search")
            .await
            .query(&[("keyword", keyword)])
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn top_tracks(&self) -> Result<Vec<Track>, ClientError> {
        tracing::debug!("API: top_tracks");
        let response = self.authorized(Method::GET, "/songs/top").await.send().await?;
        Self::read_json(response).await
    }

    async fn tracks_by_artist(&self, artist_id: u64) -> Result<Vec<Track>, ClientError> {
        tracing::debug!(artist_id, "API: tracks_by_artist");
        let response = self
            .authorized(Method::GET, &format!("/songs/artist/{artist_id}"))
            .await
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn tracks_by_genre(&self, genre: &str) -> Result<Vec<Track>, ClientError> {
        tracing::debug!(genre, "API: tracks_by_genre");
        let response = self
            .authorized(Method::GET, &format!("/songs/genre/{genre}"))
            .await
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn record_play(&self, track_id: u64) -> Result<(), ClientError> {
        tracing::debug!(track_id, "API: record_play");
        let response = self
            .authorized(Method::POST, &format!("/songs/{track_id}/play"))
            .await
            .send()
            .await?;
        Self::read_ack(response).await
    }

    async fn my_playlists(&self) -> Result<Vec<Playlist>, ClientError> {
        tracing::debug!("API: my_playlists");
        let response = self
            .authorized(Method::GET, "/playlists/my")
            .await
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn public_playlists(&self) -> Result<Vec<Playlist>, ClientError> {
        tracing::debug!("API: public_playlists");
        let response = self
            .authorized(Method::GET, "/playlists/public")
            .await
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn admin_list_tracks(&self) -> Result<Vec<Track>, ClientError> {
        tracing::debug!("API: admin_list_tracks");
        let response = self
            .authorized(Method::GET, "/admin/songs")
            .await
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn admin_stats(&self) -> Result<LibraryStats, ClientError> {
        tracing::debug!("API: admin_stats");
        let response = self
            .authorized(Method::GET, "/admin/library/stats")
            .await
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn admin_create_track(&self, draft: &TrackDraft) -> Result<Track, ClientError> {
        tracing::debug!(title = %draft.title, "API: admin_create_track");
        let response = self
            .authorized(Method::POST, "/admin/songs")
            .await
            .json(draft)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn admin_update_track(&self, id: u64, draft: &TrackDraft) -> Result<Track, ClientError> {
        tracing::debug!(id, title = %draft.title, "API: admin_update_track");
        let response = self
            .authorized(Method::PUT, &format!("/admin/songs/{id}"))
            .await
            .json(draft)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn admin_delete_track(&self, id: u64) -> Result<(), ClientError> {
        tracing::debug!(id, "API: admin_delete_track");
        let response = self
            .authorized(Method::DELETE, &format!("/admin/songs/{id}"))
            .await
            .send()
            .await?;
        Self::read_ack(response).await
    }

    async fn trigger_library_scan(&self) -> Result<ScanReport, ClientError> {
        tracing::debug!("API: trigger_library_scan");
        let response = self
            .authorized(Method::POST, "/admin/library/scan")
            .await
            .send()
            .await?;
        Self::read_json(response).await
    }
}
