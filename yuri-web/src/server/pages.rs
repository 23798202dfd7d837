//! Server-rendered HTML: the login bootstrap page and the error pages.

use serde::Serialize;

use crate::common::{escape_html, storage_keys, UserProfile};

const LAYOUT: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{TITLE}</title>
    <style>
        body {
            background: #000;
            color: #fff;
            font-family: 'Roboto', sans-serif;
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
            margin: 0;
            text-align: center;
        }
        .container {
            background: rgba(15, 10, 45, 0.9);
            padding: 40px;
            border-radius: 20px;
            border: 2px solid {BORDER};
            max-width: 500px;
        }
        .icon {
            font-size: 80px;
            margin-bottom: 20px;
        }
        .error h1, .error .icon {
            color: #ff6b6b;
        }
        .ok h1, .ok .icon {
            color: #a78bfa;
        }
        a {
            color: #a78bfa;
            text-decoration: none;
            font-weight: bold;
        }
        a:hover {
            text-decoration: underline;
        }
        .loader {
            width: 50px;
            height: 50px;
            border: 5px solid rgba(168, 85, 247, 0.3);
            border-top: 5px solid #a78bfa;
            border-radius: 50%;
            animation: spin 1s linear infinite;
            margin: 20px auto;
        }
        @keyframes spin {
            0% { transform: rotate(0deg); }
            100% { transform: rotate(360deg); }
        }
    </style>
</head>
<body>
{BODY}
</body>
</html>"#;

const PURPLE: &str = "rgba(168, 85, 247, 0.5)";
const RED: &str = "rgba(255, 107, 107, 0.5)";

fn layout(title: &str, border: &str, body: &str) -> String {
    // Body goes in last so its content is never scanned for placeholders
    LAYOUT
        .replacen("{TITLE}", title, 1)
        .replacen("{BORDER}", border, 1)
        .replacen("{BODY}", body, 1)
}

/// Serialise `value` as a JSON literal that is safe inside a `<script>` element
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}

/// Page returned by a successful callback.
///
/// Mirrors the login into browser storage, then navigates to `redirect`
/// after one second.
pub fn login_success_page(user: &UserProfile, redirect: &str) -> Result<String, serde_json::Error> {
    let user_json = script_json(user)?;
    let redirect_json = script_json(redirect)?;

    let body = format!(
        r#"    <div class="container ok">
        <div class="icon">✓</div>
        <h1>Login Successful!</h1>
        <p>Welcome, <strong>{username}</strong>!</p>
        <p>Redirecting you to YURI BOT...</p>
        <div class="loader"></div>
    </div>
    <script>
        const userData = {user_json};
        localStorage.setItem("{logged_in_key}", "true");
        localStorage.setItem("{user_data_key}", JSON.stringify(userData));
        localStorage.setItem("{login_time_key}", Date.now().toString());
        setTimeout(() => {{
            window.location.href = {redirect_json};
        }}, 1000);
    </script>"#,
        username = escape_html(&user.username),
        logged_in_key = storage_keys::USER_LOGGED_IN,
        user_data_key = storage_keys::USER_DATA,
        login_time_key = storage_keys::LOGIN_TIME,
    );

    Ok(layout("Login Success - YURI BOT", PURPLE, &body))
}

/// 400 page for a missing or mismatched OAuth state
pub fn auth_error_page() -> String {
    let body = r#"    <div class="container error">
        <div class="icon">⚠️</div>
        <h1>Authentication Error</h1>
        <p>State mismatch or session expired.</p>
        <p><a href="/login">Please login again</a></p>
    </div>
    <script>
        setTimeout(() => window.location.href = "/login", 3000);
    </script>"#;

    layout("Authentication Error - YURI BOT", RED, body)
}

/// 500 page for a failed token exchange or profile fetch
pub fn login_error_page(message: &str) -> String {
    let body = format!(
        r#"    <div class="container error">
        <div class="icon">❌</div>
        <h1>Login Error</h1>
        <p>{}</p>
        <p><a href="/login">Try again</a></p>
    </div>"#,
        escape_html(message)
    );

    layout("Login Error - YURI BOT", RED, &body)
}

pub fn not_found_page() -> String {
    layout(
        "404 - Page Not Found",
        PURPLE,
        r#"    <div class="container ok">
        <h1>404 - Page Not Found</h1>
        <p>The page you are looking for does not exist.</p>
        <p><a href="/">Go to Home</a></p>
    </div>"#,
    )
}

pub fn server_error_page() -> String {
    layout(
        "500 - Internal Server Error",
        RED,
        r#"    <div class="container error">
        <h1>500 - Internal Server Error</h1>
        <p>Something went wrong on our server.</p>
        <p><a href="/">Go to Home</a></p>
    </div>"#,
    )
}
