//! Crate and API version information.

/// Current crate version.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// API version segment prefixed to every request path.
pub const API_VERSION: &str = "v3";

/// Build the default User-Agent string.
pub fn build_user_agent(suffix: Option<&str>) -> String {
    let mut ua = format!(
        "Feedly-Rust/{} ({}; {})",
        SDK_VERSION,
        std::env::consts::OS,
        std::env::consts::ARCH
    );

    if let Some(s) = suffix {
        ua.push(' ');
        ua.push_str(s);
    }

    ua
}
