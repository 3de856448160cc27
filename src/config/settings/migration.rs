// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde_json::Value;

/// Profile names written by older clients
const LEGACY_PROFILE_NAMES: [(&str, &str); 2] = [("default", "pc"), ("handheld", "android")];

/// Bring an older settings document up to the current shape.
pub(super) fn migrate_on_load(mut value: Value) -> Value {
    if let Some(profile) = value.pointer_mut("/preferences/performance.profile") {
        if let Some(current) = profile.as_str() {
            if let Some((_, renamed)) = LEGACY_PROFILE_NAMES
                .iter()
                .find(|(legacy, _)| *legacy == current)
            {
                tracing::debug!(from = current, to = renamed, "migrating performance profile");
                *profile = Value::from(*renamed);
            }
        }
    }
    value
}

/// Deep-merge two JSON values.
/// `base` is existing file content, `overlay` is serialized current struct.
/// Overlay values take priority.
pub(super) fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_val) => deep_merge(base_val, overlay_val),
                    None => overlay_val,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_base, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_profile_names_are_renamed() {
        let migrated = migrate_on_load(json!({
            "preferences": {"performance.profile": "handheld", "server.region": "EASTUS"}
        }));
        assert_eq!(migrated["preferences"]["performance.profile"], "android");
        assert_eq!(migrated["preferences"]["server.region"], "EASTUS");
    }

    #[test]
    fn test_current_documents_are_untouched() {
        let doc = json!({"preferences": {"performance.profile": "auto"}});
        assert_eq!(migrate_on_load(doc.clone()), doc);
        assert_eq!(migrate_on_load(json!({})), json!({}));
    }

    #[test]
    fn test_deep_merge_overlay_wins() {
        let merged = deep_merge(
            json!({"a": {"b": 1, "c": 2}, "d": 3}),
            json!({"a": {"b": 10}, "e": 4}),
        );
        assert_eq!(merged, json!({"a": {"b": 10, "c": 2}, "d": 3, "e": 4}));
    }
}
