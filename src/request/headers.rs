//! Device-context headers sent with every request.

use serde_json::json;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::identity::DeviceIdentity;

/// Headers describing the synthetic device, in send order.
pub fn device_headers(
    config: &ClientConfig,
    identity: &DeviceIdentity,
    last_used_time: &str,
    user_id: &str,
    request_id: Uuid,
) -> Vec<(&'static str, String)> {
    let yqci = json!({
        "at": -1,
        "av": config.app_version,
        "ciso": config.country.to_lowercase(),
        "cl": config.client_tag,
        "cy": config.country.to_uppercase(),
        "di": identity.primary_id(),
        "dm": config.device_model,
        "fcl": config.client_tag,
        "ft": "mhr",
        "fut": last_used_time,
        "installation": config.client_tag,
        "le": config.language,
        "ln": "",
        "lut": last_used_time,
        "nt": 3,
        "os": 1,
        "ov": config.os_version,
        "pt": config.package_name,
        "rn": config.resolution,
        "st": 0,
    });
    let yqpp = json!({
        "ciso": config.country.to_lowercase(),
        "laut": "0",
        "lot": "",
        "lat": "",
        "cut": config.timezone,
        "fcc": "",
        "flg": "",
        "lcc": "",
        "lcn": "",
        "flcc": "",
        "flot": "",
        "flat": "",
        "ac": "",
    });

    vec![
        ("X-Yq-Yqci", yqci.to_string()),
        ("X-Yq-Key", user_id.to_string()),
        ("yq_is_anonymous", "1".to_string()),
        ("x-request-id", request_id.to_string()),
        ("X-Yq-Yqpp", yqpp.to_string()),
        ("User-Agent", config.user_agent.clone()),
    ]
}
