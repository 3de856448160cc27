// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Mock transport for testing
//!
//! Records every request it is given and answers from a queue of canned
//! replies, so handlers can be exercised without a network.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::http::{HttpRequest, HttpResponse};
use super::transport::Transport;
use crate::error::{ApiError, Result};

/// A canned reply
#[derive(Debug, Clone)]
pub enum MockReply {
    Response(HttpResponse),
    /// Fail as if the network were unreachable
    NetworkError(String),
}

/// Transport that replays queued replies in order, repeating the last one
#[derive(Clone)]
pub struct MockTransport {
    replies: Arc<Mutex<Vec<MockReply>>>,
    call_count: Arc<AtomicUsize>,
    recorded_requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("Mock transport lock was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

impl MockTransport {
    /// Create a transport that answers every request with an empty 200
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(vec![])),
            call_count: Arc::new(AtomicUsize::new(0)),
            recorded_requests: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn with_response(self, response: HttpResponse) -> Self {
        lock(&self.replies).push(MockReply::Response(response));
        self
    }

    pub fn with_network_error(self, message: impl Into<String>) -> Self {
        lock(&self.replies).push(MockReply::NetworkError(message.into()));
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        lock(&self.recorded_requests).clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.recorded_requests).last().cloned()
    }

    fn next_reply(&self) -> MockReply {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst);
        let replies = lock(&self.replies);
        if replies.is_empty() {
            MockReply::Response(HttpResponse::ok(""))
        } else {
            replies[count.min(replies.len() - 1)].clone()
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        lock(&self.recorded_requests).push(request);
        match self.next_reply() {
            MockReply::Response(response) => Ok(response),
            MockReply::NetworkError(message) => Err(ApiError::Network(message).into()),
        }
    }
}
