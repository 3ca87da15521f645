//! Playback intents: selecting tracks, play/pause, skipping.

use crate::model::playback::PlayerState;
use crate::model::types::Track;

use super::AppController;

impl AppController {
    /// Loads a track into the player and reports the play in the
    /// background. A failed report never disturbs playback.
    pub async fn select_track(&self, track: Track) {
        tracing::info!(track_id = track.id, title = %track.title, "selecting track");
        let track_id = track.id;
        self.model.set_playback_session(track).await;

        let api = self.api.clone();
        tokio::spawn(async move {
            if let Err(err) = api.record_play(track_id).await {
                tracing::warn!(track_id, %err, "could not record play");
            }
        });
    }

    /// Toggles play/pause. Does nothing when no track is loaded.
    pub async fn toggle_play(&self) {
        if !self.model.toggle_play().await {
            tracing::debug!("toggle ignored, nothing loaded");
        }
    }

    pub async fn skip_next(&self) {
        self.skip(1).await;
    }

    pub async fn skip_previous(&self) {
        self.skip(-1).await;
    }

    /// Moves within the displayed list, clamped at both ends. Skipping
    /// past an edge stays on the current track and does not re-select it.
    async fn skip(&self, step: i64) {
        let Some(current) = self.model.playback_session().await else {
            return;
        };
        let tracks = self.model.displayed_tracks().await;
        let Some(position) = tracks.iter().position(|t| t.id == current.track.id) else {
            return;
        };
        let target = (position as i64 + step).clamp(0, tracks.len() as i64 - 1) as usize;
        if target != position {
            self.select_track(tracks[target].clone()).await;
        }
    }

    pub async fn player_state(&self) -> PlayerState {
        self.model.player_state().await
    }
}
