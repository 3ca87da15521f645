//! View coordination state: the active view and the catalog data behind it.

use super::types::{LibraryStats, Playlist, ScanReport, Track, TrackDraft, ViewState};

/// State backing the main content area.
///
/// The displayed track list and the query it belongs to are always updated
/// together, under one lock acquisition.
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub view: ViewState,
    /// The currently displayed, server-ordered track list.
    pub tracks: Vec<Track>,
    pub playlists: Vec<Playlist>,
    /// The query whose results are displayed, when the list came from a search.
    pub active_query: Option<String>,
    pub is_loading: bool,
}

/// State behind the admin area: catalog snapshot, scan lifecycle, edit form.
#[derive(Clone, Debug, Default)]
pub struct AdminState {
    /// Guard for the at-most-one-concurrent-scan invariant. Set before the
    /// scan request is dispatched, cleared only after its response is
    /// processed.
    pub scan_in_progress: bool,
    pub scan_report: Option<ScanReport>,
    pub tracks: Vec<Track>,
    pub stats: Option<LibraryStats>,
    pub form_open: bool,
    pub draft: TrackDraft,
    /// Id of the song being edited; `None` while creating a new one.
    pub editing_id: Option<u64>,
}
