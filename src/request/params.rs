//! Fixed query parameters present on every request.

use crate::config::ClientConfig;
use crate::identity::DeviceIdentity;

/// Per-call timestamp format (`gts`), e.g. `2024-05-01+10:11:12`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d+%H:%M:%S";

/// User id reported before a session exists.
pub const ANONYMOUS_USER_ID: &str = "-1";

/// Current local time in the `gts` format.
pub fn request_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Process-start timestamp in milliseconds, truncated to whole seconds.
pub fn last_used_time() -> String {
    (chrono::Utc::now().timestamp() * 1000).to_string()
}

/// Client, device and locale parameters attached to every request.
///
/// These overwrite same-named parameters already present on the URL.
pub fn fixed_params(
    config: &ClientConfig,
    identity: &DeviceIdentity,
    last_used_time: &str,
    user_id: &str,
    timestamp: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("gsm", "md5".to_string()),
        ("gft", "json".to_string()),
        ("gak", config.api_key.clone()),
        ("gat", String::new()),
        ("gui", user_id.to_string()),
        ("gts", timestamp.to_string()),
        ("gut", "0".to_string()),
        ("gem", "1".to_string()),
        ("gaui", user_id.to_string()),
        ("gln", String::new()),
        ("gcy", config.country.to_uppercase()),
        ("gle", config.language.clone()),
        ("gcl", config.client_tag.clone()),
        ("gos", "1".to_string()),
        ("gov", config.os_version.clone()),
        ("gav", config.app_version.clone()),
        ("gdi", identity.primary_id().to_string()),
        ("gfcl", config.client_tag.clone()),
        ("gfut", last_used_time.to_string()),
        ("glut", last_used_time.to_string()),
        ("gpt", config.package_name.clone()),
        ("gciso", config.country.to_lowercase()),
        ("glot", String::new()),
        ("glat", String::new()),
        ("gflot", String::new()),
        ("gflat", String::new()),
        ("glbsaut", "0".to_string()),
        ("gac", String::new()),
        ("gcut", config.timezone.clone()),
        ("gfcc", String::new()),
        ("gflg", String::new()),
        ("glcn", String::new()),
        ("glcc", String::new()),
        ("gflcc", String::new()),
    ]
}
