//! Prometheus metrics for monitoring the service.

use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

use crate::errors::AppError;

/// Application metrics collectors
#[derive(Clone)]
pub struct AppMetrics {
    /// Total short links created
    pub links_created: IntCounter,
    /// Total redirects served
    pub redirects: IntCounter,
    /// Link password verifications, labelled by result
    pub password_verifications: IntCounterVec,
    /// Bearer token validations, labelled by result
    pub token_validations: IntCounterVec,
}

impl AppMetrics {
    /// Create the collectors and register them with the given registry
    pub fn new(registry: &Registry) -> Result<Self, AppError> {
        let links_created = IntCounter::with_opts(
            Opts::new("links_created_total", "Total short links created")
                .namespace("shortlink"),
        )
        .map_err(|e| AppError::internal(format!("Failed to create metric: {}", e)))?;

        let redirects = IntCounter::with_opts(
            Opts::new("redirects_total", "Total redirects served").namespace("shortlink"),
        )
        .map_err(|e| AppError::internal(format!("Failed to create metric: {}", e)))?;

        let password_verifications = IntCounterVec::new(
            Opts::new(
                "password_verifications_total",
                "Link password verification attempts",
            )
            .namespace("shortlink"),
            &["result"],
        )
        .map_err(|e| AppError::internal(format!("Failed to create metric: {}", e)))?;

        let token_validations = IntCounterVec::new(
            Opts::new("token_validations_total", "Bearer token validation attempts")
                .namespace("shortlink"),
            &["result"],
        )
        .map_err(|e| AppError::internal(format!("Failed to create metric: {}", e)))?;

        for collector in [
            Box::new(links_created.clone()) as Box<dyn prometheus::core::Collector>,
            Box::new(redirects.clone()),
            Box::new(password_verifications.clone()),
            Box::new(token_validations.clone()),
        ] {
            registry
                .register(collector)
                .map_err(|e| AppError::internal(format!("Failed to register metric: {}", e)))?;
        }

        Ok(Self {
            links_created,
            redirects,
            password_verifications,
            token_validations,
        })
    }

    pub fn record_link_created(&self) {
        self.links_created.inc();
    }

    pub fn record_redirect(&self) {
        self.redirects.inc();
    }

    pub fn record_password_verification(&self, success: bool) {
        let result = if success { "success" } else { "failure" };
        self.password_verifications.with_label_values(&[result]).inc();
    }

    pub fn record_token_validation(&self, success: bool) {
        let result = if success { "success" } else { "failure" };
        self.token_validations.with_label_values(&[result]).inc();
    }
}

/// Render all registered metrics in the Prometheus text format
pub fn render(registry: &Registry) -> Result<String, AppError> {
    use prometheus::Encoder;

    let encoder = prometheus::TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&registry.gather(), &mut buffer)
        .map_err(|e| AppError::internal(format!("Failed to encode metrics: {}", e)))?;

    String::from_utf8(buffer)
        .map_err(|e| AppError::internal(format!("Metrics output was not UTF-8: {}", e)))
}
