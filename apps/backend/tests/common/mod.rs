//! Common test utilities and fixtures for integration tests.
//!
//! The router under test is the real one from `build_router`; only the
//! vision model is replaced by a [`StaticExtractor`] so no network access or
//! API key is needed.

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;

use woordjes_backend::config::Config;
use woordjes_backend::services::vision::{ImageUpload, VisionError, WordListExtractor};
use woordjes_backend::{build_router, AppState};

pub const FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Extractor that answers every photo with the same text.
pub struct StaticExtractor {
    answer: String,
    calls: AtomicUsize,
}

impl StaticExtractor {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WordListExtractor for StaticExtractor {
    async fn extract(&self, _image: &ImageUpload) -> Result<String, VisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer.clone())
    }
}

/// Test context holding the router and the stub behind it.
pub struct TestContext {
    pub extractor: Option<Arc<StaticExtractor>>,
    app: Router,
}

impl TestContext {
    /// Context whose vision model answers with `answer`.
    pub fn with_model_answer(answer: impl Into<String>) -> Self {
        let extractor = Arc::new(StaticExtractor::new(answer));
        let state = AppState::new(
            Config::default(),
            Some(extractor.clone() as Arc<dyn WordListExtractor>),
        );

        Self {
            extractor: Some(extractor),
            app: build_router(state),
        }
    }

    /// Context without a vision API key.
    pub fn without_api_key() -> Self {
        Self {
            extractor: None,
            app: build_router(AppState::new(Config::default(), None)),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Number of times the stubbed model was called.
    pub fn model_calls(&self) -> usize {
        self.extractor.as_ref().map_or(0, |e| e.calls())
    }

    /// Header value identifying a client behind a proxy.
    pub fn client_ip(ip: &str) -> HeaderValue {
        HeaderValue::from_str(ip).expect("valid header value")
    }
}
