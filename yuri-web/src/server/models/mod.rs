mod discord;
mod requests;
mod session;

pub use discord::DiscordUser;
pub use requests::*;
pub use session::{PendingLogin, UserSession};
