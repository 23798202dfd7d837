// Types and constants shared between the browser-state model and the server
pub mod common;

// Browser-side login state model and JSON API client
pub mod client;
mod error;

pub use client::{BrowserStorage, LoginState, MemoryStorage, Navigation, Settings, SiteClient};
pub use common::{AuthStatus, UserProfile};
pub use error::AuthError;

// Server modules (public for binary, internal for library)
#[cfg(feature = "server")]
pub mod server;
