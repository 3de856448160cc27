// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Network-level overrides: forwarded addresses and device-info synthesis

use serde_json::{json, Value};

/// Addresses used to appear to come from a supported country
pub const BYPASS_SERVER_IPS: [(&str, &str); 5] = [
    ("br", "169.150.198.66"),
    ("jp", "138.199.21.239"),
    ("kr", "121.125.60.151"),
    ("pl", "45.134.212.66"),
    ("us", "143.244.47.65"),
];

/// Forwarded address for a `server.bypassRestriction` value, if any
pub fn bypass_ip(code: &str) -> Option<&'static str> {
    BYPASS_SERVER_IPS
        .iter()
        .find(|(country, _)| *country == code)
        .map(|(_, ip)| *ip)
}

/// OS name the service associates with the requested resolution
pub fn os_name_from_resolution(resolution: &str) -> &'static str {
    match resolution {
        "1080p-hq" => "tizen",
        "1080p" => "windows",
        _ => "android",
    }
}

/// `x-ms-device-info` document claiming to be `os_name`
pub fn ms_device_info(os_name: &str) -> Value {
    let (width, height) = match os_name {
        "android" => (1280, 720),
        _ => (1920, 1080),
    };
    let platform = match os_name {
        "windows" => "desktop",
        "tizen" => "tv",
        _ => "android",
    };

    json!({
        "appInfo": {
            "env": {
                "clientAppId": "www.xbox.com",
                "clientAppType": "browser",
                "clientAppVersion": "26.1.97",
                "clientSdkVersion": "10.3.7",
                "httpEnvironment": "prod",
                "sdkInstallId": ""
            }
        },
        "dev": {
            "hw": {
                "make": "Microsoft",
                "model": "unknown",
                "sdktype": "web"
            },
            "os": {
                "name": os_name,
                "ver": "22631.2715",
                "platform": platform
            },
            "displayInfo": {
                "dimensions": {
                    "widthInPixels": width,
                    "heightInPixels": height
                },
                "pixelDensity": {
                    "dpiX": 1,
                    "dpiY": 1
                }
            },
            "browser": {
                "browserName": "chrome",
                "browserVersion": "130.0"
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bypass_table() {
        assert_eq!(bypass_ip("us"), Some("143.244.47.65"));
        assert_eq!(bypass_ip("br"), Some("169.150.198.66"));
        assert_eq!(bypass_ip("off"), None);
        assert_eq!(bypass_ip("xx"), None);
    }

    #[test]
    fn test_os_name_from_resolution() {
        assert_eq!(os_name_from_resolution("1080p-hq"), "tizen");
        assert_eq!(os_name_from_resolution("1080p"), "windows");
        assert_eq!(os_name_from_resolution("720p"), "android");
    }

    #[test]
    fn test_device_info_names_os() {
        let info = ms_device_info("windows");
        assert_eq!(info["dev"]["os"]["name"], "windows");
        assert_eq!(info["dev"]["displayInfo"]["dimensions"]["heightInPixels"], 1080);
    }
}
