// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Outbound transport used by every handler

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::http::{HttpRequest, HttpResponse};
use crate::error::{ApiError, BoltError, Result};

/// Performs the real network call for a request description.
///
/// Non-success statuses are returned as responses; only failures to obtain
/// a response at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Transport backed by `reqwest`
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

fn map_send_error(error: reqwest::Error) -> BoltError {
    if error.is_timeout() {
        ApiError::Timeout.into()
    } else {
        ApiError::Network(error.to_string()).into()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_send_error)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(map_send_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
