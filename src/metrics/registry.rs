use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

use crate::errors::Rule;

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total HTTP requests",
        &["method", "route", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "route"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    // Error translation metrics
    pub static ref ERROR_RESPONSES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "error_responses_total",
        "Failures translated into error responses",
        &["rule", "status"]
    )
    .unwrap();

    // Downstream metrics
    pub static ref DOWNSTREAM_CALLS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "downstream_calls_total",
        "Outbound calls to downstream services",
        &["outcome"]  // outcome: success, failure, transport_error
    )
    .unwrap();
}

/// Initialize all metrics (called on startup)
pub fn init_metrics() {
    // Force lazy_static initialization
    lazy_static::initialize(&HTTP_REQUESTS_TOTAL);
    lazy_static::initialize(&HTTP_REQUEST_DURATION_SECONDS);
    lazy_static::initialize(&ERROR_RESPONSES_TOTAL);
    lazy_static::initialize(&DOWNSTREAM_CALLS_TOTAL);

    // Export a zero series for every rule so rates work before the first failure
    for rule in Rule::ORDER {
        ERROR_RESPONSES_TOTAL.with_label_values(&[rule.as_str(), rule.status_code().as_str()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_rule_has_an_error_series() {
        init_metrics();

        let family = prometheus::gather()
            .into_iter()
            .find(|family| family.get_name() == "error_responses_total")
            .expect("error_responses_total registered");

        // One rule never maps to two statuses, so there is exactly one series per rule
        assert_eq!(family.get_metric().len(), Rule::ORDER.len());
    }
}
