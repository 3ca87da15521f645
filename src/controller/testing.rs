//! Scripted backend and fixtures for controller tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::model::api_client::{RegisterRequest, StreamingApi};
use crate::model::types::{
    Identity, LibraryStats, Playlist, Role, ScanReport, Track, TrackDraft,
};
use crate::model::AppModel;
use crate::session::SessionStore;

use super::AppController;

pub(crate) fn track(id: u64, title: &str) -> Track {
    Track {
        id,
        title: title.to_string(),
        artist_name: "Artist".to_string(),
        artist_id: 1,
        album: "Album".to_string(),
        genre: "Rock".to_string(),
        duration: 200,
        play_count: 0,
        file_url: format!("/files/{id}.mp3"),
        cover_image_url: None,
    }
}

fn identity(role: Role) -> Identity {
    Identity {
        id: 1,
        username: "tester".to_string(),
        role,
        token: "test-token".to_string(),
    }
}

/// A backend whose responses and latencies tests control per call.
/// Unscripted list endpoints answer with empty lists; an unscripted scan
/// answers with a catalog error so failure paths are easy to exercise.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    search_responses: Mutex<HashMap<String, Vec<Track>>>,
    search_delays: Mutex<HashMap<String, Duration>>,
    top_tracks: Mutex<Vec<Track>>,
    scan_report: Mutex<Option<ScanReport>>,
    scan_delay: Mutex<Duration>,
    admin_tracks: Mutex<Vec<Track>>,
    forbid_admin: Mutex<bool>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub(crate) fn script_search(&self, keyword: &str, tracks: Vec<Track>, delay: Duration) {
        self.search_responses
            .lock()
            .unwrap()
            .insert(keyword.to_string(), tracks);
        self.search_delays
            .lock()
            .unwrap()
            .insert(keyword.to_string(), delay);
    }

    pub(crate) fn script_top_tracks(&self, tracks: Vec<Track>) {
        *self.top_tracks.lock().unwrap() = tracks;
    }

    pub(crate) fn script_scan(&self, report: ScanReport, delay: Duration) {
        *self.scan_report.lock().unwrap() = Some(report);
        *self.scan_delay.lock().unwrap() = delay;
    }

    pub(crate) fn forbid_admin(&self) {
        *self.forbid_admin.lock().unwrap() = true;
    }

    pub(crate) fn count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == name).count()
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }

    fn admin_gate(&self) -> Result<(), ClientError> {
        if *self.forbid_admin.lock().unwrap() {
            Err(ClientError::Forbidden("admin privileges required".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StreamingApi for ScriptedApi {
    async fn authenticate(&self, username: &str, _password: &str) -> Result<Identity, ClientError> {
        self.record("authenticate");
        Ok(Identity {
            id: 1,
            username: username.to_string(),
            role: Role::User,
            token: "test-token".to_string(),
        })
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<(), ClientError> {
        self.record("register");
        Ok(())
    }

    async fn search_tracks(&self, keyword: &str) -> Result<Vec<Track>, ClientError> {
        self.record("search_tracks");
        let delay = self
            .search_delays
            .lock()
            .unwrap()
            .get(keyword)
            .copied()
            .unwrap_or_default();
        tokio::time::sleep(delay).await;
        Ok(self
            .search_responses
            .lock()
            .unwrap()
            .get(keyword)
            .cloned()
            .unwrap_or_default())
    }

    async fn top_tracks(&self) -> Result<Vec<Track>, ClientError> {
        self.record("top_tracks");
        Ok(self.top_tracks.lock().unwrap().clone())
    }

    async fn tracks_by_artist(&self, _artist_id: u64) -> Result<Vec<Track>, ClientError> {
        self.record("tracks_by_artist");
        Ok(Vec::new())
    }

    async fn tracks_by_genre(&self, _genre: &str) -> Result<Vec<Track>, ClientError> {
        self.record("tracks_by_genre");
        Ok(Vec::new())
    }

    async fn record_play(&self, _track_id: u64) -> Result<(), ClientError> {
        self.record("record_play");
        Ok(())
    }

    async fn my_playlists(&self) -> Result<Vec<Playlist>, ClientError> {
        self.record("my_playlists");
        Ok(Vec::new())
    }

    async fn public_playlists(&self) -> Result<Vec<Playlist>, ClientError> {
        self.record("public_playlists");
        Ok(Vec::new())
    }

    async fn admin_list_tracks(&self) -> Result<Vec<Track>, ClientError> {
        self.record("admin_list_tracks");
        self.admin_gate()?;
        Ok(self.admin_tracks.lock().unwrap().clone())
    }

    async fn admin_stats(&self) -> Result<LibraryStats, ClientError> {
        self.record("admin_stats");
        self.admin_gate()?;
        Ok(LibraryStats::default())
    }

    async fn admin_create_track(&self, draft: &TrackDraft) -> Result<Track, ClientError> {
        self.record("admin_create_track");
        self.admin_gate()?;
        let mut created = track(100, &draft.title);
        created.genre = draft.genre.clone();
        self.admin_tracks.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn admin_update_track(&self, id: u64, draft: &TrackDraft) -> Result<Track, ClientError> {
        self.record("admin_update_track");
        self.admin_gate()?;
        Ok(track(id, &draft.title))
    }

    async fn admin_delete_track(&self, _id: u64) -> Result<(), ClientError> {
        self.record("admin_delete_track");
        self.admin_gate()?;
        Ok(())
    }

    async fn trigger_library_scan(&self) -> Result<ScanReport, ClientError> {
        self.record("trigger_library_scan");
        self.admin_gate()?;
        let delay = *self.scan_delay.lock().unwrap();
        tokio::time::sleep(delay).await;
        self.scan_report
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClientError::Catalog("library unavailable".into()))
    }
}

async fn build(role: Role) -> (AppController, Arc<ScriptedApi>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let session = SessionStore::open(dir.path().join("session.json"));
    session.store(identity(role)).await.unwrap();
    let api = Arc::new(ScriptedApi::default());
    let controller = AppController::new(AppModel::new(), api.clone(), session);
    (controller, api, dir)
}

/// A signed-in regular user against a fresh scripted backend.
pub(crate) async fn controller() -> (AppController, Arc<ScriptedApi>, tempfile::TempDir) {
    build(Role::User).await
}

/// A signed-in admin against a fresh scripted backend.
pub(crate) async fn admin_controller() -> (AppController, Arc<ScriptedApi>, tempfile::TempDir) {
    build(Role::Admin).await
}
