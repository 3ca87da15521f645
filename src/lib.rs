//! Client-side session and playback orchestration for a music streaming
//! server.
//!
//! The crate is split the way the screens are: [`model`] holds the shared
//! state and the HTTP client, [`controller`] exposes the user intents that
//! drive it, and [`session`] persists the sign-in between runs. A UI layer
//! owns an [`AppController`] and renders from the model snapshots.

pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod session;

pub use controller::AppController;
pub use error::ClientError;
pub use model::api_client::{ClientConfig, HttpApiClient, RegisterRequest, StreamingApi};
pub use model::app_model::AppModel;
pub use model::content::{AdminState, ContentState};
pub use model::playback::{format_elapsed, PlaybackSession, PlayerState};
pub use model::types;
pub use session::SessionStore;
