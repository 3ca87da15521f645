//! Core data types shared across the client.
//!
//! Wire shapes use camelCase field names to match the server's JSON.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Account role as reported by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "USER", alias = "ROLE_USER")]
    User,
    #[serde(rename = "ADMIN", alias = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// The authenticated user plus the credential token issued at login.
///
/// Created on successful login, destroyed on logout, immutable while held.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Identity {
    pub id: u64,
    pub username: String,
    pub role: Role,
    pub token: String,
}

/// Read-only catalog snapshot of a song. Never mutated by the client except
/// via explicit admin edit requests that replace the whole record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: u64,
    pub title: String,
    pub artist_name: String,
    pub artist_id: u64,
    pub album: String,
    pub genre: String,
    /// Track length in seconds.
    pub duration: u32,
    #[serde(default)]
    pub play_count: u64,
    pub file_url: String,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

/// A playlist as returned by the server.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(rename = "public", default)]
    pub is_public: bool,
    #[serde(default)]
    pub songs: Vec<Track>,
}

/// Library statistics from the admin stats endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStats {
    #[serde(default)]
    pub total_songs: u64,
    #[serde(default)]
    pub total_artists: u64,
    #[serde(default)]
    pub library_path: Option<String>,
    #[serde(default)]
    pub supported_formats: Vec<String>,
}

/// Outcome of a library scan. The server reports `"error"` for failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanStatus {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "error", alias = "failure")]
    Failure,
}

/// Aggregated result of one library-import operation.
///
/// Transient: created when a scan completes and discarded when a new scan
/// starts or the admin view is left.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub status: ScanStatus,
    #[serde(default)]
    pub scanned_files: u32,
    #[serde(default)]
    pub imported_songs: u32,
    #[serde(default)]
    pub skipped_files: u32,
    /// Per-file error messages, in scan order.
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ScanReport {
    /// A failure report carrying a human-readable message and zero counts.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: ScanStatus::Failure,
            scanned_files: 0,
            imported_songs: 0,
            skipped_files: 0,
            errors: Vec::new(),
            message: Some(message.into()),
        }
    }
}

/// The active view in the main content area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Home,
    Search,
    Library,
}

/// Editable values of the admin create/update song form.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDraft {
    pub title: String,
    pub artist_id: Option<u64>,
    pub album: String,
    pub duration: Option<u32>,
    pub genre: String,
    pub file_url: String,
    pub cover_image_url: Option<String>,
}

impl TrackDraft {
    /// Pre-populates the form for editing an existing song.
    pub fn from_track(track: &Track) -> Self {
        Self {
            title: track.title.clone(),
            artist_id: Some(track.artist_id),
            album: track.album.clone(),
            duration: Some(track.duration),
            genre: track.genre.clone(),
            file_url: track.file_url.clone(),
            cover_image_url: track.cover_image_url.clone(),
        }
    }

    /// Local required-field check, run before any request is dispatched.
    /// The cover image is the only optional field.
    pub fn validate(&self) -> Result<(), ClientError> {
        let missing = if self.title.trim().is_empty() {
            "title"
        } else if self.artist_id.is_none() {
            "artist"
        } else if self.album.trim().is_empty() {
            "album"
        } else if self.duration.is_none() {
            "duration"
        } else if self.genre.trim().is_empty() {
            "genre"
        } else if self.file_url.trim().is_empty() {
            "file URL"
        } else {
            return Ok(());
        };
        Err(ClientError::Validation(format!("{missing} is required")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> TrackDraft {
        TrackDraft {
            title: "Paranoid".into(),
            artist_id: Some(7),
            album: "Paranoid".into(),
            duration: Some(170),
            genre: "Metal".into(),
            file_url: "/media/paranoid.mp3".into(),
            cover_image_url: None,
        }
    }

    #[test]
    fn complete_draft_validates() {
        assert!(complete_draft().validate().is_ok());
    }

    #[test]
    fn each_required_field_is_checked() {
        let mut draft = complete_draft();
        draft.title = "  ".into();
        assert!(matches!(
            draft.validate(),
            Err(ClientError::Validation(m)) if m.contains("title")
        ));

        let mut draft = complete_draft();
        draft.artist_id = None;
        assert!(matches!(draft.validate(), Err(ClientError::Validation(_))));

        let mut draft = complete_draft();
        draft.file_url = String::new();
        assert!(matches!(
            draft.validate(),
            Err(ClientError::Validation(m)) if m.contains("file URL")
        ));
    }

    #[test]
    fn cover_image_is_optional() {
        let draft = complete_draft();
        assert!(draft.cover_image_url.is_none());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn scan_report_decodes_server_shape() {
        let json = r#"{
            "status": "success",
            "scannedFiles": 40,
            "importedSongs": 3,
            "skippedFiles": 37,
            "errors": ["broken.mp3: unreadable tag"]
        }"#;
        let report: ScanReport = serde_json::from_str(json).expect("valid report");
        assert_eq!(report.status, ScanStatus::Success);
        assert_eq!(report.scanned_files, 40);
        assert_eq!(report.imported_songs, 3);
        assert_eq!(report.skipped_files, 37);
        assert_eq!(report.errors, vec!["broken.mp3: unreadable tag"]);
        assert_eq!(report.message, None);
    }

    #[test]
    fn failure_report_has_message_and_zero_counts() {
        let json = r#"{"status": "error", "message": "Library path does not exist"}"#;
        let report: ScanReport = serde_json::from_str(json).expect("valid report");
        assert_eq!(report.status, ScanStatus::Failure);
        assert_eq!(report.scanned_files, 0);
        assert_eq!(
            report.message.as_deref(),
            Some("Library path does not exist")
        );
    }

    #[test]
    fn track_decodes_camel_case_fields() {
        let json = r#"{
            "id": 12,
            "title": "Bohemian Rhapsody",
            "artistName": "Queen",
            "artistId": 3,
            "album": "A Night at the Opera",
            "genre": "Rock",
            "duration": 354,
            "playCount": 99,
            "fileUrl": "/media/queen/bohemian.mp3",
            "coverImageUrl": null
        }"#;
        let track: Track = serde_json::from_str(json).expect("valid track");
        assert_eq!(track.artist_name, "Queen");
        assert_eq!(track.duration, 354);
        assert_eq!(track.cover_image_url, None);
    }
}
