//! Library administration: catalog edits and filesystem scans.
//!
//! Every entry point checks the stored role first; a forbidden reply from
//! the server is treated the same way as a missing role, sending the user
//! back to the home view with the admin state wiped.

use futures::join;

use crate::error::ClientError;
use crate::model::types::{ScanReport, Track, TrackDraft, ViewState};

use super::AppController;

impl AppController {
    async fn require_admin(&self) -> Result<(), ClientError> {
        if self.session.is_admin().await {
            return Ok(());
        }
        let err = ClientError::Forbidden("admin privileges required".into());
        self.handle_forbidden(&err).await;
        Err(err)
    }

    async fn handle_forbidden(&self, err: &ClientError) {
        tracing::warn!(%err, "admin access refused");
        self.model.reset_admin().await;
        self.model.set_view(ViewState::Home).await;
        self.model.set_notice(err.to_string()).await;
    }

    /// Loads the admin library view: the full track list plus the
    /// library statistics, fetched concurrently.
    pub async fn load_admin_data(&self) -> Result<(), ClientError> {
        self.require_admin().await?;
        let epoch = self.model.current_epoch();
        self.model.set_view(ViewState::Library).await;
        self.refresh_admin_snapshot(epoch).await
    }

    async fn refresh_admin_snapshot(&self, epoch: u64) -> Result<(), ClientError> {
        let (tracks, stats) = join!(self.api.admin_list_tracks(), self.api.admin_stats());
        match (tracks, stats) {
            (Ok(tracks), Ok(stats)) => {
                if !self.model.set_admin_snapshot(epoch, tracks, stats).await {
                    tracing::debug!("discarding admin snapshot from a previous session");
                }
                Ok(())
            }
            (Err(err), _) | (_, Err(err)) => {
                if matches!(err, ClientError::Forbidden(_)) {
                    self.handle_forbidden(&err).await;
                } else {
                    tracing::warn!(%err, "could not load admin data");
                    self.model.set_notice(err.to_string()).await;
                }
                Err(err)
            }
        }
    }

    /// Kicks off a library scan. A second request while one is running is
    /// refused locally and never reaches the server. The report, success
    /// or failure, is shown exactly as the scan produced it.
    pub async fn trigger_scan(&self) -> Result<(), ClientError> {
        self.require_admin().await?;
        let Some(epoch) = self.model.begin_scan().await else {
            tracing::info!("scan already in progress, request ignored");
            return Ok(());
        };

        tracing::info!("starting library scan");
        let report = match self.api.trigger_library_scan().await {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(%err, "library scan failed");
                ScanReport::failed(err.to_string())
            }
        };
        if !self.model.complete_scan(epoch, report).await {
            tracing::debug!("discarding scan report from a previous session");
            return Ok(());
        }
        let _ = self.refresh_admin_snapshot(epoch).await;
        Ok(())
    }

    /// Creates a catalog entry. The draft is validated locally first; a
    /// rejected draft leaves the form open with its contents intact.
    pub async fn create_track(&self, draft: &TrackDraft) -> Result<(), ClientError> {
        self.require_admin().await?;
        if let Err(err) = draft.validate() {
            self.model.set_notice(err.to_string()).await;
            return Err(err);
        }
        let epoch = self.model.current_epoch();
        match self.api.admin_create_track(draft).await {
            Ok(created) => {
                tracing::info!(id = created.id, title = %created.title, "track created");
                self.model.close_track_form().await;
                self.refresh_admin_snapshot(epoch).await
            }
            Err(err) => {
                tracing::warn!(%err, "could not create track");
                self.model.set_notice(err.to_string()).await;
                Err(err)
            }
        }
    }

    /// Replaces a catalog entry with the draft's contents.
    pub async fn update_track(&self, id: u64, draft: &TrackDraft) -> Result<(), ClientError> {
        self.require_admin().await?;
        if let Err(err) = draft.validate() {
            self.model.set_notice(err.to_string()).await;
            return Err(err);
        }
        let epoch = self.model.current_epoch();
        match self.api.admin_update_track(id, draft).await {
            Ok(updated) => {
                tracing::info!(id = updated.id, "track updated");
                self.model.close_track_form().await;
                self.refresh_admin_snapshot(epoch).await
            }
            Err(err) => {
                tracing::warn!(id, %err, "could not update track");
                self.model.set_notice(err.to_string()).await;
                Err(err)
            }
        }
    }

    pub async fn delete_track(&self, id: u64) -> Result<(), ClientError> {
        self.require_admin().await?;
        let epoch = self.model.current_epoch();
        match self.api.admin_delete_track(id).await {
            Ok(()) => {
                tracing::info!(id, "track deleted");
                self.refresh_admin_snapshot(epoch).await
            }
            Err(err) => {
                tracing::warn!(id, %err, "could not delete track");
                self.model.set_notice(err.to_string()).await;
                Err(err)
            }
        }
    }

    /// Opens the track form, pre-filled from an existing entry when
    /// editing.
    pub async fn open_track_form(&self, editing: Option<&Track>) {
        let (draft, editing_id) = match editing {
            Some(track) => (TrackDraft::from_track(track), Some(track.id)),
            None => (TrackDraft::default(), None),
        };
        self.model.open_track_form(draft, editing_id).await;
    }

    pub async fn close_track_form(&self) {
        self.model.close_track_form().await;
    }
}
