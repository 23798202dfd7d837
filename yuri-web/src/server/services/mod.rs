pub mod discord_client;
pub mod oauth_client;
pub mod session_store;

pub use discord_client::DiscordClient;
pub use oauth_client::OAuthClient;
pub use session_store::SessionStore;

use base64::Engine;
use rand::Rng;

/// `len` random bytes, base64url-encoded without padding
pub fn random_token(len: usize) -> String {
    let mut rng = rand::rng();
    let random_bytes: Vec<u8> = (0..len).map(|_| rng.random()).collect();
    base64::prelude::BASE64_URL_SAFE_NO_PAD.encode(&random_bytes)
}
