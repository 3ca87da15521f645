//! Browsing intents: search, home, artist and genre pages, playlists.

use futures::join;

use crate::error::ClientError;
use crate::model::types::{Track, ViewState};

use super::AppController;

impl AppController {
    /// Switches the active view. Leaving the admin view discards any
    /// displayed scan report.
    pub async fn set_view(&self, view: ViewState) {
        if view != ViewState::Library {
            self.model.clear_scan_report().await;
        }
        self.model.set_view(view).await;
    }

    /// Runs a catalog search. Whitespace-only input is dropped without a
    /// request. When several searches overlap, only the most recently
    /// submitted one may publish its results.
    pub async fn submit_search(&self, keyword: &str) -> Result<(), ClientError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(());
        }

        let seq = self.model.next_search_seq();
        let epoch = self.model.current_epoch();
        tracing::info!(keyword, seq, "searching catalog");
        self.model.set_loading(true).await;

        match self.api.search_tracks(keyword).await {
            Ok(tracks) => {
                if !self
                    .model
                    .apply_search_results(seq, epoch, keyword.to_string(), tracks)
                    .await
                {
                    tracing::debug!(keyword, seq, "discarding superseded search results");
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(keyword, %err, "search failed");
                self.model.set_loading(false).await;
                self.model.set_notice(err.to_string()).await;
                Err(err)
            }
        }
    }

    /// Loads the home screen: the most-played tracks alongside the user's
    /// playlists, fetched concurrently.
    pub async fn load_home(&self) -> Result<(), ClientError> {
        let epoch = self.model.current_epoch();
        self.model.set_loading(true).await;
        self.model.set_view(ViewState::Home).await;

        let (tracks, playlists) = join!(self.api.top_tracks(), self.api.my_playlists());

        let outcome = self.apply_track_fetch(epoch, tracks, "home").await;
        match playlists {
            Ok(playlists) => {
                self.model.set_playlists(epoch, playlists).await;
            }
            Err(err) => {
                tracing::warn!(%err, "could not load playlists");
            }
        }
        outcome
    }

    pub async fn browse_artist(&self, artist_id: u64) -> Result<(), ClientError> {
        let epoch = self.model.current_epoch();
        self.model.set_loading(true).await;
        let result = self.api.tracks_by_artist(artist_id).await;
        self.apply_track_fetch(epoch, result, "artist").await
    }

    pub async fn browse_genre(&self, genre: &str) -> Result<(), ClientError> {
        let epoch = self.model.current_epoch();
        self.model.set_loading(true).await;
        let result = self.api.tracks_by_genre(genre).await;
        self.apply_track_fetch(epoch, result, "genre").await
    }

    pub async fn load_playlists(&self, public: bool) -> Result<(), ClientError> {
        let epoch = self.model.current_epoch();
        let result = if public {
            self.api.public_playlists().await
        } else {
            self.api.my_playlists().await
        };
        match result {
            Ok(playlists) => {
                if !self.model.set_playlists(epoch, playlists).await {
                    tracing::debug!("discarding playlists from a previous session");
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "could not load playlists");
                self.model.set_notice(err.to_string()).await;
                Err(err)
            }
        }
    }

    async fn apply_track_fetch(
        &self,
        epoch: u64,
        result: Result<Vec<Track>, ClientError>,
        context: &str,
    ) -> Result<(), ClientError> {
        match result {
            Ok(tracks) => {
                if !self.model.set_displayed_tracks(epoch, tracks).await {
                    tracing::debug!(context, "discarding tracks from a previous session");
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(context, %err, "could not load tracks");
                self.model.set_loading(false).await;
                self.model.set_notice(err.to_string()).await;
                Err(err)
            }
        }
    }
}
