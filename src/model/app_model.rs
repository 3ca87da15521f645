//! Shared application state.
//!
//! [`AppModel`] is cheap to clone and safe to hand to background tasks.
//! Mutation goes through async methods that take the inner locks, so
//! callers never hold a lock across an await point themselves.
//!
//! Two atomics guard against stale async results landing in the model:
//! `epoch` advances on logout and invalidates every in-flight request,
//! while `search_seq` orders search submissions so only the latest one
//! may publish its results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use super::content::{AdminState, ContentState};
use super::playback::{PlaybackSession, PlayerState};
use super::types::{LibraryStats, Playlist, ScanReport, Track, TrackDraft, ViewState};

/// A transient user-facing message with its creation time, so stale
/// notices can be expired.
#[derive(Clone, Debug)]
pub struct Notice {
    pub message: String,
    pub at: Instant,
}

#[derive(Clone)]
pub struct AppModel {
    content: Arc<Mutex<ContentState>>,
    playback: Arc<Mutex<Option<PlaybackSession>>>,
    admin: Arc<Mutex<AdminState>>,
    notice: Arc<Mutex<Option<Notice>>>,
    epoch: Arc<AtomicU64>,
    search_seq: Arc<AtomicU64>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            content: Arc::new(Mutex::new(ContentState::default())),
            playback: Arc::new(Mutex::new(None)),
            admin: Arc::new(Mutex::new(AdminState::default())),
            notice: Arc::new(Mutex::new(None)),
            epoch: Arc::new(AtomicU64::new(0)),
            search_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Requests capture this before dispatch; responses carrying an older
    /// epoch are discarded.
    pub fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Claims the next search sequence number. Only the holder of the
    /// highest number may publish results.
    pub fn next_search_seq(&self) -> u64 {
        self.search_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Advances the epoch and wipes all per-session state. Everything
    /// in flight at this point will fail its epoch check on landing.
    pub async fn invalidate_session(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        *self.content.lock().await = ContentState::default();
        *self.playback.lock().await = None;
        *self.admin.lock().await = AdminState::default();
        *self.notice.lock().await = None;
    }

    pub async fn content_state(&self) -> ContentState {
        self.content.lock().await.clone()
    }

    pub async fn set_view(&self, view: ViewState) {
        self.content.lock().await.view = view;
    }

    pub async fn set_loading(&self, loading: bool) {
        self.content.lock().await.is_loading = loading;
    }

    /// Publishes search results if this is still the latest search and the
    /// session has not turned over. Returns whether the results landed.
    pub async fn apply_search_results(
        &self,
        seq: u64,
        epoch: u64,
        query: String,
        tracks: Vec<Track>,
    ) -> bool {
        let mut content = self.content.lock().await;
        if seq != self.search_seq.load(Ordering::SeqCst) || epoch != self.current_epoch() {
            return false;
        }
        content.tracks = tracks;
        content.active_query = Some(query);
        content.view = ViewState::Search;
        content.is_loading = false;
        true
    }

    /// Replaces the displayed track list for non-search fetches.
    pub async fn set_displayed_tracks(&self, epoch: u64, tracks: Vec<Track>) -> bool {
        let mut content = self.content.lock().await;
        if epoch != self.current_epoch() {
            return false;
        }
        content.tracks = tracks;
        content.active_query = None;
        content.is_loading = false;
        true
    }

    pub async fn set_playlists(&self, epoch: u64, playlists: Vec<Playlist>) -> bool {
        let mut content = self.content.lock().await;
        if epoch != self.current_epoch() {
            return false;
        }
        content.playlists = playlists;
        true
    }

    pub async fn displayed_tracks(&self) -> Vec<Track> {
        self.content.lock().await.tracks.clone()
    }

    pub async fn playback_session(&self) -> Option<PlaybackSession> {
        self.playback.lock().await.clone()
    }

    pub async fn player_state(&self) -> PlayerState {
        match self.playback.lock().await.as_ref() {
            Some(session) => session.state(),
            None => PlayerState::Idle,
        }
    }

    /// Loads a track into the player, replacing any existing session.
    pub async fn set_playback_session(&self, track: Track) {
        *self.playback.lock().await = Some(PlaybackSession::new(track));
    }

    /// Toggles play/pause. Returns false when nothing is loaded.
    pub async fn toggle_play(&self) -> bool {
        match self.playback.lock().await.as_mut() {
            Some(session) => {
                session.toggle();
                true
            }
            None => false,
        }
    }

    pub async fn clear_playback(&self) {
        *self.playback.lock().await = None;
    }

    pub async fn set_notice(&self, message: impl Into<String>) {
        *self.notice.lock().await = Some(Notice {
            message: message.into(),
            at: Instant::now(),
        });
    }

    pub async fn notice(&self) -> Option<Notice> {
        self.notice.lock().await.clone()
    }

    pub async fn clear_notice(&self) {
        *self.notice.lock().await = None;
    }

    /// Expires notices older than five seconds.
    pub async fn auto_clear_old_notices(&self) {
        let mut notice = self.notice.lock().await;
        if let Some(current) = notice.as_ref() {
            if current.at.elapsed().as_secs() > 5 {
                *notice = None;
            }
        }
    }

    pub async fn admin_state(&self) -> AdminState {
        self.admin.lock().await.clone()
    }

    /// Arms the scan guard. Returns the epoch the scan runs under, or
    /// `None` when a scan is already in progress. Reading the epoch while
    /// the guard is set keeps the pair consistent across a logout.
    pub async fn begin_scan(&self) -> Option<u64> {
        let mut admin = self.admin.lock().await;
        if admin.scan_in_progress {
            return None;
        }
        admin.scan_in_progress = true;
        admin.scan_report = None;
        Some(self.current_epoch())
    }

    /// Lands a finished scan. A report from a previous session is dropped
    /// without touching the state. Returns whether the report landed.
    pub async fn complete_scan(&self, epoch: u64, report: ScanReport) -> bool {
        let mut admin = self.admin.lock().await;
        if epoch != self.current_epoch() {
            return false;
        }
        admin.scan_in_progress = false;
        admin.scan_report = Some(report);
        true
    }

    pub async fn set_admin_snapshot(
        &self,
        epoch: u64,
        tracks: Vec<Track>,
        stats: LibraryStats,
    ) -> bool {
        let mut admin = self.admin.lock().await;
        if epoch != self.current_epoch() {
            return false;
        }
        admin.tracks = tracks;
        admin.stats = Some(stats);
        true
    }

    /// Drops a displayed report, for when the admin view is left. The
    /// scan guard is untouched so an in-flight scan still lands normally.
    pub async fn clear_scan_report(&self) {
        self.admin.lock().await.scan_report = None;
    }

    pub async fn reset_admin(&self) {
        *self.admin.lock().await = AdminState::default();
    }

    pub async fn open_track_form(&self, draft: TrackDraft, editing_id: Option<u64>) {
        let mut admin = self.admin.lock().await;
        admin.form_open = true;
        admin.draft = draft;
        admin.editing_id = editing_id;
    }

    pub async fn close_track_form(&self) {
        let mut admin = self.admin.lock().await;
        admin.form_open = false;
        admin.draft = TrackDraft::default();
        admin.editing_id = None;
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}
