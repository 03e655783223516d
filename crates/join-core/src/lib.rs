//! Huddle Join Core Library
//!
//! Client-side orchestration for joining a room: permission checks, name
//! collection, token acquisition and the responsive video-layout decision.
//! The media transport itself is an external collaborator; once the join
//! state machine reaches `Connected` it hands over an opaque
//! `(server_url, token)` pair and steps aside.
//!
//! # Modules
//!
//! - `session` - Session-scoped display-name store, keyed by room
//! - `permission` - Camera permission states and the observation seam
//! - `token_client` - HTTP client for the gateway's `/token` endpoint
//! - `directory` - HTTP client for the gateway's `/rooms` endpoint
//! - `join` - The join state machine
//! - `layout` - Deterministic video-layout selection
//! - `errors` - Error taxonomy shared by the clients and the machine

pub mod directory;
pub mod errors;
pub mod join;
pub mod layout;
pub mod permission;
pub mod session;
pub mod token_client;

pub use directory::RoomDirectoryClient;
pub use errors::JoinError;
pub use join::{ConnectionDetails, JoinOptions, JoinState, JoinStateMachine};
pub use layout::{select_layout, Fit, Layout, LayoutOptions, Orientation, OverlayCorner, VideoFeed};
pub use permission::{PermissionSource, PermissionState, WatchPermissionSource};
pub use session::SessionStore;
pub use token_client::{JoinCredential, TokenClient, TokenIssuer};
