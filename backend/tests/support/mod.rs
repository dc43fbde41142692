#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use reframe_relay::api::DistortionClassification;
use reframe_relay::services::{Classifier, ClassifierError, Generator, GeneratorError};

#[cfg(feature = "http-server")]
pub use app::TestApp;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

// =============================================================================
// Fake external services
// =============================================================================

/// Classifier that labels every sentence from a fixed table, or fails.
pub struct FakeClassifier {
    pub calls: Mutex<Vec<Vec<String>>>,
    labels: Vec<(&'static str, f64)>,
    fail: bool,
}

impl FakeClassifier {
    /// Labels sentences round-robin from `labels`.
    pub fn labelling(labels: Vec<(&'static str, f64)>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            labels,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            labels: Vec::new(),
            fail: true,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Classifier for FakeClassifier {
    async fn classify(
        &self,
        inputs: &[String],
    ) -> Result<Vec<DistortionClassification>, ClassifierError> {
        self.calls.lock().unwrap().push(inputs.to_vec());
        if self.fail {
            return Err(ClassifierError::Status {
                status: 401,
                body: "invalid api token".to_string(),
            });
        }

        Ok(inputs
            .iter()
            .zip(self.labels.iter().cycle())
            .map(|(sentence, (label, confidence))| DistortionClassification {
                sentence: sentence.clone(),
                predicted_distortion: label.to_string(),
                confidence: *confidence,
            })
            .collect())
    }
}

/// Generator that returns canned text, or fails.
pub struct FakeGenerator {
    pub prompts: Mutex<Vec<String>>,
    reply: Option<String>,
}

impl FakeGenerator {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            reply: Some(text.into()),
        }
    }

    pub fn failing() -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            reply: None,
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or(GeneratorError::Status {
            status: 503,
            body: "overloaded".to_string(),
        })
    }
}

// =============================================================================
// App harness
// =============================================================================

#[cfg(feature = "http-server")]
mod app {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;

    use reframe_relay::db::LocalRepository;
    use reframe_relay::http::{create_router, AppState};

    use super::{FakeClassifier, FakeGenerator};

    pub struct TestApp {
        pub classifier: Arc<FakeClassifier>,
        pub generator: Arc<FakeGenerator>,
        pub repository: LocalRepository,
        pub state: AppState,
    }

    impl TestApp {
        pub fn new(classifier: FakeClassifier, generator: FakeGenerator) -> Self {
            let classifier = Arc::new(classifier);
            let generator = Arc::new(generator);
            let repository = LocalRepository::new();
            let state = AppState::new(
                classifier.clone(),
                generator.clone(),
                Arc::new(repository.clone()),
            );
            Self {
                classifier,
                generator,
                repository,
                state,
            }
        }

        /// App whose fakes succeed with generic output.
        pub fn default_fakes() -> Self {
            Self::new(
                FakeClassifier::labelling(vec![("Labeling", 0.9)]),
                FakeGenerator::replying("{}"),
            )
        }

        pub fn router(&self) -> Router {
            create_router(self.state.clone())
        }

        pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
            self.send(Method::POST, uri, Some(body.to_string())).await
        }

        pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
            self.send(Method::POST, uri, Some(body.to_string())).await
        }

        pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
            self.send(Method::GET, uri, None).await
        }

        async fn send(
            &self,
            method: Method,
            uri: &str,
            body: Option<String>,
        ) -> (StatusCode, Value) {
            let builder = Request::builder().method(method).uri(uri);
            let request = match body {
                Some(text) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(text)),
                None => builder.body(Body::empty()),
            }
            .expect("valid request");

            let response = self.router().oneshot(request).await.expect("infallible router");
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("readable body");
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("JSON response body")
            };
            (status, value)
        }
    }
}
