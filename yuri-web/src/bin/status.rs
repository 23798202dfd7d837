//! Ask a running site whether a session is logged in.
//!
//! ```text
//! yuri-web-status [SESSION_ID] [--logout]
//! ```
//!
//! The site URL comes from `client.toml` or `YURI_WEB__SERVER_URL`.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut session_id = None;
    let mut logout = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--logout" => logout = true,
            _ => session_id = Some(arg),
        }
    }

    let mut client = yuri_web::client::connect()?;
    if let Some(session_id) = session_id {
        client = client.with_session(session_id)?;
    }

    let status = client.check_auth().await?;
    println!("{}", serde_json::to_string_pretty(&status)?);

    if logout && status.logged_in {
        client.logout().await?;
        tracing::info!("Session ended");
    }

    Ok(())
}
