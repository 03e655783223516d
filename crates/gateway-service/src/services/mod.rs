//! Provider-facing services: access-token signing and the room-service
//! client.

pub mod access_token;
pub mod room_service;

pub use access_token::AccessTokenSigner;
pub use room_service::RoomServiceClient;
