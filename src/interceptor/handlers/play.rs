// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde_json::Value;

use crate::error::Result;
use crate::events::StreamEvent;
use crate::interceptor::http::{ensure_object, HttpRequest, HttpResponse};
use crate::interceptor::network::{ms_device_info, os_name_from_resolution};
use crate::interceptor::XcloudInterceptor;
use crate::prefs::GlobalPref;

impl XcloudInterceptor {
    /// Session start: label the region badge and apply resolution/locale
    /// overrides to the request.
    pub(crate) async fn handle_play(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.events.emit_stream(StreamEvent::Loading);

        let resolution = self.prefs.get_text(GlobalPref::StreamResolution.into());
        let locale = self.prefs.get_text(GlobalPref::StreamPreferredLocale.into());

        let badge = self.badge_region(&request);
        self.session.write().badge_region = Some(badge.clone());
        self.events
            .emit_stream(StreamEvent::RegionBadge { region: badge });

        let force_resolution = resolution != "auto";
        let override_locale = locale != "default";
        if !force_resolution && !override_locale {
            return self.transport.send(request).await;
        }

        let mut body = request.json()?;
        let mut rewritten = request;
        {
            let settings = ensure_object(&mut body, "settings")?;

            if force_resolution {
                let os_name = os_name_from_resolution(&resolution);
                rewritten.set_header("x-ms-device-info", &ms_device_info(os_name).to_string())?;
                settings.insert("osName".to_string(), Value::from(os_name));
            }

            if override_locale {
                settings.insert("locale".to_string(), Value::from(locale));
            }
        }

        let rewritten = rewritten.with_json_body(&body)?;
        self.transport.send(rewritten).await
    }

    /// Advertised name of the region whose base URI is the request origin,
    /// else the first host label
    fn badge_region(&self, request: &HttpRequest) -> String {
        let origin = request.origin();
        let session = self.session.read();
        session
            .server_regions
            .find_by_origin(&origin)
            .map(|region| region.name.clone())
            .or_else(|| request.host_label().map(str::to_string))
            .unwrap_or_default()
    }
}
