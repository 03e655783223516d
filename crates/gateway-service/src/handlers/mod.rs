//! HTTP request handlers.

mod health;
mod rooms;
mod tokens;

pub use health::health_check;
pub use rooms::list_rooms;
pub use tokens::issue_token;
