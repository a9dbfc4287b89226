//! What a failure may tell the caller, and what only operators get to see.

use std::sync::Mutex;
use tracing::error;

use super::dispatcher::Rule;
use super::failure::Failure;

/// How much of a failure's own description reaches the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disclosure {
    /// Description comes from trusted application or framework code
    Verbatim,
    /// Raw content is replaced by the generic description
    Generic,
}

impl Rule {
    pub fn disclosure(self) -> Disclosure {
        match self {
            Rule::Downstream | Rule::CatchAll => Disclosure::Generic,
            _ => Disclosure::Verbatim,
        }
    }

    /// Server-fault rules are recorded in the internal log at error severity
    pub fn is_logged(self) -> bool {
        matches!(
            self,
            Rule::InternalServerError | Rule::Downstream | Rule::CatchAll
        )
    }
}

/// Internal record of a server-fault failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub rule: Rule,
    pub request_url: String,
    pub summary: &'static str,
    pub detail: String,
}

impl Diagnostic {
    pub fn describe(rule: Rule, request_url: &str, failure: &Failure) -> Self {
        let (summary, detail) = match failure {
            Failure::Application(err) => ("Handled internal server error", err.to_string()),
            Failure::Downstream(downstream) => (
                "Downstream call failed",
                format!(
                    "Downstream call to {} failed with status: {} and response: {}",
                    downstream.url(),
                    downstream.status(),
                    downstream.body()
                ),
            ),
            Failure::Framework(condition) => (
                "Framework condition",
                condition.detail().unwrap_or_default().to_string(),
            ),
            Failure::Unclassified(err) => ("Unexpected error handled", format!("{:#}", err)),
        };
        Self {
            rule,
            request_url: request_url.to_string(),
            summary,
            detail,
        }
    }
}

/// Destination of the internal diagnostic log. Must accept concurrent writes.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, diagnostic: &Diagnostic);
}

/// Writes diagnostics through `tracing` at error level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: &Diagnostic) {
        error!(
            rule = %diagnostic.rule,
            url = %diagnostic.request_url,
            detail = %diagnostic.detail,
            "{}",
            diagnostic.summary
        );
    }
}

/// Keeps diagnostics in memory, for tests
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, diagnostic: &Diagnostic) {
        if let Ok(mut records) = self.records.lock() {
            records.push(diagnostic.clone());
        }
    }
}
