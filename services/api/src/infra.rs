use abitur_risk::RiskEngine;
use chrono::{Local, NaiveDate};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Engine shared by every request; evaluation is read-only.
pub(crate) type SharedEngine = Arc<RiskEngine>;

pub(crate) fn standard_engine() -> SharedEngine {
    Arc::new(RiskEngine::standard())
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
