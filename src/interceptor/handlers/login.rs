// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use chrono::Utc;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::Result;
use crate::events::{ScriptEvent, ServerStatus};
use crate::interceptor::http::{HttpRequest, HttpResponse};
use crate::interceptor::network::bypass_ip;
use crate::interceptor::regions::{normalize_regions, ServerRegion};
use crate::interceptor::XcloudInterceptor;
use crate::prefs::GlobalPref;

const REGIONS_POINTER: &str = "/offeringSettings/regions";

impl XcloudInterceptor {
    /// Login: learn the region table and token, optionally pin a region.
    pub(crate) async fn handle_login(&self, mut request: HttpRequest) -> Result<HttpResponse> {
        let bypass = self
            .prefs
            .get_text(GlobalPref::ServerBypassRestriction.into());
        if bypass != "off" {
            match bypass_ip(&bypass) {
                Some(ip) => request.set_header("X-Forwarded-For", ip)?,
                None => tracing::debug!(code = %bypass, "no bypass address for country"),
            }
        }

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Login request failed: {}", e);
                self.events.emit_script(ScriptEvent::XcloudServer {
                    status: ServerStatus::Error,
                });
                return Err(e);
            }
        };

        if response.status != StatusCode::OK {
            tracing::debug!(status = %response.status, "login rejected");
            if self.session.read().server_regions.is_empty() {
                self.events.emit_script(ScriptEvent::XcloudServer {
                    status: ServerStatus::Unavailable,
                });
            }
            return Ok(response);
        }

        let mut body = response.json()?;
        let gs_token = body
            .get("gsToken")
            .and_then(Value::as_str)
            .map(str::to_string);

        let advertised: Vec<ServerRegion> = match body.pointer(REGIONS_POINTER) {
            Some(regions) => serde_json::from_value(regions.clone())?,
            None => Vec::new(),
        };
        let normalized = normalize_regions(&advertised, self.config.debug);
        let mut selected = normalized.selected;

        // Labelled records go back in the order the server listed them.
        let mut rewritten: Vec<&ServerRegion> = advertised
            .iter()
            .filter_map(|region| normalized.table.get(&region.name))
            .collect();

        let preferred = self.prefs.get_text(GlobalPref::ServerRegion.into());
        let mut pinned_region = None;
        if preferred != "default" {
            match normalized.table.get(&preferred) {
                Some(region) => {
                    let mut region = region.clone();
                    region.is_default = true;
                    tracing::debug!(region = %region.key(), "pinned preferred region");
                    pinned_region = Some(region);
                }
                None => {
                    tracing::debug!(region = %preferred, "preferred region not advertised");
                }
            }
        }

        if let Some(region) = &pinned_region {
            rewritten = vec![region];
        }
        if let Some(slot) = body.pointer_mut(REGIONS_POINTER) {
            *slot = serde_json::to_value(&rewritten)?;
        }
        if pinned_region.is_some() {
            selected = pinned_region;
        }

        {
            let mut session = self.session.write();
            session.gs_token = gs_token;
            session.server_regions = normalized.table;
            session.selected_region = selected;
            session.logged_in_at = Some(Utc::now());
        }

        self.events.emit_script(ScriptEvent::XcloudServer {
            status: ServerStatus::Ready,
        });

        response.with_json_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ApiError, BoltError};
    use crate::events::{ScriptEvent, ServerStatus};
    use crate::interceptor::handlers::test_support::fixture;
    use crate::interceptor::{HttpRequest, HttpResponse, MockTransport};
    use crate::prefs::{ChangeOrigin, GlobalPref, PrefStore};
    use reqwest::StatusCode;
    use serde_json::json;

    const LOGIN_URL: &str = "https://xgpuweb.gssv-play-prod.xboxlive.com/v2/login/user";

    fn login_body() -> serde_json::Value {
        json!({
            "gsToken": "token-123",
            "offeringSettings": {
                "allowRegionSelection": true,
                "regions": [
                    {"name": "WestUS2", "baseUri": "https://wus2.core.gssv-play-prod.xboxlive.com", "isDefault": false},
                    {"name": "UnknownRegion", "baseUri": "https://unk.core.gssv-play-prod.xboxlive.com", "isDefault": false},
                    {"name": "EastUS", "baseUri": "https://eus.core.gssv-play-prod.xboxlive.com", "isDefault": true}
                ]
            }
        })
    }

    fn login_request() -> HttpRequest {
        HttpRequest::post(LOGIN_URL).unwrap()
    }

    #[tokio::test]
    async fn test_login_builds_region_table() {
        let transport = MockTransport::new()
            .with_response(HttpResponse::json_value(StatusCode::OK, &login_body()));
        let f = fixture(transport);
        let mut script = f.events.subscribe_script();

        let response = f.interceptor.handle(login_request()).await.unwrap();

        let session = f.interceptor.session().snapshot();
        assert_eq!(
            session.server_regions.keys(),
            vec!["EASTUS", "WESTUS2", "UNKNOWNREGION"]
        );
        assert_eq!(session.gs_token.as_deref(), Some("token-123"));
        assert_eq!(session.selected_region.unwrap().key(), "EASTUS");
        assert!(session.logged_in_at.is_some());
        let body = response.json().unwrap();
        assert_eq!(body["gsToken"], "token-123");
        assert_eq!(body["offeringSettings"]["regions"].as_array().unwrap().len(), 3);
        assert_eq!(
            script.drain(),
            vec![ScriptEvent::XcloudServer {
                status: ServerStatus::Ready
            }]
        );
    }

    #[tokio::test]
    async fn test_preferred_region_is_pinned() {
        let transport = MockTransport::new()
            .with_response(HttpResponse::json_value(StatusCode::OK, &login_body()));
        let f = fixture(transport);
        f.prefs.set(
            GlobalPref::ServerRegion.into(),
            "westus2".into(),
            ChangeOrigin::Direct,
        );

        let response = f.interceptor.handle(login_request()).await.unwrap();
        let body = response.json().unwrap();
        let regions = body["offeringSettings"]["regions"].as_array().unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0]["name"], "WestUS2");
        assert_eq!(regions[0]["isDefault"], true);
        assert_eq!(regions[0]["shortName"], "🇺🇸 WUS2");
        assert_eq!(body["offeringSettings"]["allowRegionSelection"], true);

        let session = f.interceptor.session().snapshot();
        assert_eq!(session.selected_region.unwrap().key(), "WESTUS2");
        assert_eq!(session.server_regions.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_preferred_region_applies_no_override() {
        let transport = MockTransport::new()
            .with_response(HttpResponse::json_value(StatusCode::OK, &login_body()));
        let f = fixture(transport);
        f.prefs.set(
            GlobalPref::ServerRegion.into(),
            "JAPANEAST".into(),
            ChangeOrigin::Direct,
        );

        let response = f.interceptor.handle(login_request()).await.unwrap();
        let body = response.json().unwrap();
        let regions = body["offeringSettings"]["regions"].as_array().unwrap();
        assert_eq!(regions.len(), 3);
        assert_eq!(regions[2]["isDefault"], true);
        let session = f.interceptor.session().snapshot();
        assert_eq!(session.selected_region.unwrap().key(), "EASTUS");
    }

    #[tokio::test]
    async fn test_unpinned_login_returns_labelled_regions() {
        let transport = MockTransport::new()
            .with_response(HttpResponse::json_value(StatusCode::OK, &login_body()));
        let f = fixture(transport);

        let response = f.interceptor.handle(login_request()).await.unwrap();
        let body = response.json().unwrap();
        let regions = body["offeringSettings"]["regions"].as_array().unwrap();

        let names: Vec<&str> = regions.iter().filter_map(|r| r["name"].as_str()).collect();
        assert_eq!(names, vec!["WestUS2", "UnknownRegion", "EastUS"]);
        assert_eq!(regions[0]["shortName"], "🇺🇸 WUS2");
        assert_eq!(regions[0]["displayName"], "West US 2");
        assert_eq!(regions[0]["continent"], "america-north");
        assert_eq!(regions[1]["shortName"], "UNK");
        assert_eq!(regions[1]["continent"], "other");
        assert_eq!(regions[2]["isDefault"], true);
        assert_eq!(body["offeringSettings"]["allowRegionSelection"], true);
    }

    #[tokio::test]
    async fn test_bypass_sets_forwarded_for() {
        let transport = MockTransport::new()
            .with_response(HttpResponse::json_value(StatusCode::OK, &login_body()));
        let f = fixture(transport);
        f.prefs.set(
            GlobalPref::ServerBypassRestriction.into(),
            "jp".into(),
            ChangeOrigin::Direct,
        );

        f.interceptor.handle(login_request()).await.unwrap();
        let sent = f.transport.last_request().unwrap();
        assert_eq!(sent.header("x-forwarded-for"), Some("138.199.21.239"));
    }

    #[tokio::test]
    async fn test_no_bypass_header_when_off() {
        let transport = MockTransport::new()
            .with_response(HttpResponse::json_value(StatusCode::OK, &login_body()));
        let f = fixture(transport);

        f.interceptor.handle(login_request()).await.unwrap();
        assert!(f.transport.last_request().unwrap().header("x-forwarded-for").is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_emits_error() {
        let f = fixture(MockTransport::new().with_network_error("connection reset"));
        let mut script = f.events.subscribe_script();

        let result = f.interceptor.handle(login_request()).await;
        assert!(matches!(result, Err(BoltError::Api(ApiError::Network(_)))));
        assert_eq!(
            script.drain(),
            vec![ScriptEvent::XcloudServer {
                status: ServerStatus::Error
            }]
        );
        assert_eq!(f.transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_only_without_cached_table() {
        let transport = MockTransport::new()
            .with_response(HttpResponse::new(StatusCode::FORBIDDEN, "blocked"));
        let f = fixture(transport);
        let mut script = f.events.subscribe_script();

        let response = f.interceptor.handle(login_request()).await.unwrap();
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.body, "blocked");
        assert_eq!(
            script.drain(),
            vec![ScriptEvent::XcloudServer {
                status: ServerStatus::Unavailable
            }]
        );
    }

    #[tokio::test]
    async fn test_rejection_after_successful_login_is_silent() {
        let transport = MockTransport::new()
            .with_response(HttpResponse::json_value(StatusCode::OK, &login_body()))
            .with_response(HttpResponse::new(StatusCode::FORBIDDEN, ""));
        let f = fixture(transport);

        f.interceptor.handle(login_request()).await.unwrap();
        let mut script = f.events.subscribe_script();
        f.interceptor.handle(login_request()).await.unwrap();

        assert!(script.drain().is_empty());
    }

    #[tokio::test]
    async fn test_stale_regions_are_dropped() {
        let second = json!({
            "gsToken": "token-456",
            "offeringSettings": {"regions": [
                {"name": "UKSouth", "baseUri": "https://uks.core.gssv-play-prod.xboxlive.com", "isDefault": true}
            ]}
        });
        let transport = MockTransport::new()
            .with_response(HttpResponse::json_value(StatusCode::OK, &login_body()))
            .with_response(HttpResponse::json_value(StatusCode::OK, &second));
        let f = fixture(transport);

        f.interceptor.handle(login_request()).await.unwrap();
        f.interceptor.handle(login_request()).await.unwrap();

        let session = f.interceptor.session().snapshot();
        assert_eq!(session.server_regions.keys(), vec!["UKSOUTH"]);
        assert_eq!(session.gs_token.as_deref(), Some("token-456"));
    }
}
