//! Per-request outcome records.
//!
//! Every handler finishes by building one [`RequestOutcome`] and passing it to
//! an [`OutcomeReporter`]. The default reporter turns outcomes into `tracing`
//! events; tests swap in a reporter that captures them.

use axum::http::StatusCode;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    pub uri: String,
    pub client: String,
    pub code: StatusCode,
    pub error: Option<String>,
    pub name: Option<String>,
    /// Set when the failure came from the cluster API.
    pub cluster: bool,
}

impl RequestOutcome {
    pub fn new(uri: impl Into<String>, client: impl Into<String>, code: StatusCode) -> Self {
        Self {
            uri: uri.into(),
            client: client.into(),
            code,
            error: None,
            name: None,
            cluster: false,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn from_cluster(mut self) -> Self {
        self.cluster = true;
        self
    }

    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }
}

pub trait OutcomeReporter: Send + Sync {
    fn report(&self, outcome: &RequestOutcome);
}

/// Logs successes at info level and failures at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl OutcomeReporter for TracingReporter {
    fn report(&self, outcome: &RequestOutcome) {
        let code = outcome.code.as_u16();
        let name = outcome.name.as_deref();

        if outcome.is_success() {
            info!(uri = %outcome.uri, client = %outcome.client, code, name, "success");
            return;
        }

        let error = outcome.error.as_deref().unwrap_or_default();
        if outcome.cluster {
            warn!(uri = %outcome.uri, client = %outcome.client, code, error, name, "k8s client error");
        } else {
            warn!(uri = %outcome.uri, client = %outcome.client, code, error, name, "failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Capture(Mutex<Vec<RequestOutcome>>);

    impl OutcomeReporter for Capture {
        fn report(&self, outcome: &RequestOutcome) {
            self.0.lock().unwrap().push(outcome.clone());
        }
    }

    #[test]
    fn test_outcome_builder() {
        let outcome = RequestOutcome::new(
            "/deployment/restart/web",
            "10.0.0.7:5123",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_error("forbidden")
        .with_name("web")
        .from_cluster();

        assert!(!outcome.is_success());
        assert_eq!(outcome.error.as_deref(), Some("forbidden"));
        assert_eq!(outcome.name.as_deref(), Some("web"));
        assert!(outcome.cluster);
    }

    #[test]
    fn test_success_has_no_optional_fields() {
        let outcome = RequestOutcome::new("/health", "-", StatusCode::OK);
        assert!(outcome.is_success());
        assert!(outcome.error.is_none());
        assert!(outcome.name.is_none());
    }

    #[test]
    fn test_reporter_is_object_safe() {
        let capture = Capture::default();
        let reporter: &dyn OutcomeReporter = &capture;
        reporter.report(&RequestOutcome::new("/env", "-", StatusCode::OK));
        TracingReporter.report(&RequestOutcome::new("/env", "-", StatusCode::OK));

        assert_eq!(capture.0.lock().unwrap().len(), 1);
    }
}
