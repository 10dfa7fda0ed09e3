//! Scripted fetch implementation for handler tests.
//!
//! Records how many times the network was contacted so tests can assert
//! that cache hits never fetch.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use precache_core::Error;
use reqwest::{StatusCode, Url, header};

use super::{Fetch, FetchResponse};

enum Scripted {
    Respond { status: u16, body: Vec<u8> },
    Fail(String),
}

pub(crate) struct MockFetch {
    routes: HashMap<String, Scripted>,
    calls: AtomicUsize,
}

impl MockFetch {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), calls: AtomicUsize::new(0) }
    }

    /// Script a response for an exact canonical URL.
    pub fn respond(mut self, url: &str, status: u16, body: &[u8]) -> Self {
        self.routes
            .insert(url.to_string(), Scripted::Respond { status, body: body.to_vec() });
        self
    }

    /// Script a network-level failure for an exact canonical URL.
    pub fn fail(mut self, url: &str, reason: &str) -> Self {
        self.routes.insert(url.to_string(), Scripted::Fail(reason.to_string()));
        self
    }

    /// Number of fetch calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Fetch for MockFetch {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.routes.get(url.as_str()) {
            Some(Scripted::Respond { status, body }) => Ok(FetchResponse {
                url: url.clone(),
                final_url: url.clone(),
                status: StatusCode::from_u16(*status).unwrap(),
                bytes: Bytes::from(body.clone()),
                headers: header::HeaderMap::new(),
                fetch_ms: 0,
            }),
            Some(Scripted::Fail(reason)) => Err(Error::HttpError(reason.clone())),
            None => Err(Error::HttpError(format!("no scripted response for {url}"))),
        }
    }
}
