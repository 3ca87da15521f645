pub mod api_client;
pub mod app_model;
pub mod content;
pub mod playback;
pub mod types;

pub use api_client::{ClientConfig, HttpApiClient, RegisterRequest, StreamingApi};
pub use app_model::{AppModel, Notice};
pub use content::{AdminState, ContentState};
pub use playback::{format_elapsed, PlaybackSession, PlayerState};
