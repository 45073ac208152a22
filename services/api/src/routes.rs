use crate::infra::{today, AppState, SharedEngine};
use abitur_risk::error::AppError;
use abitur_risk::profile::validate_profile;
use abitur_risk::{Jurisdiction, RiskReport, Severity, StateRuleset, UserInputProfile};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
pub(crate) struct RiskReportResponse {
    pub(crate) evaluated_on: NaiveDate,
    pub(crate) report: RiskReport,
}

/// Risk endpoints plus the operational probes, sharing one engine.
pub(crate) fn with_risk_routes(engine: SharedEngine) -> Router {
    risk_router(engine)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) fn risk_router(engine: SharedEngine) -> Router {
    Router::new()
        .route("/api/v1/risk/report", post(risk_report_endpoint))
        .route(
            "/api/v1/risk/rulesets/:jurisdiction",
            get(ruleset_endpoint),
        )
        .with_state(engine)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn risk_report_endpoint(
    State(engine): State<SharedEngine>,
    Json(profile): Json<UserInputProfile>,
) -> Result<Json<RiskReportResponse>, AppError> {
    validate_profile(&profile)?;

    let report = engine.evaluate(&profile);
    if report.has_hard_stop() {
        let blocked_by: Vec<&str> = report
            .findings_with(Severity::HardStop)
            .map(|finding| finding.message_key.as_str())
            .collect();
        warn!(
            jurisdiction = report.jurisdiction.label(),
            hard_stops = report.summary.hard_stops,
            ?blocked_by,
            "profile blocked from admission"
        );
    } else {
        info!(
            jurisdiction = report.jurisdiction.label(),
            overall = report.overall_severity.label(),
            "risk report served"
        );
    }

    Ok(Json(RiskReportResponse {
        evaluated_on: today(),
        report,
    }))
}

pub(crate) async fn ruleset_endpoint(Path(jurisdiction): Path<String>) -> Response {
    match Jurisdiction::parse(&jurisdiction).and_then(StateRuleset::fixed) {
        Some(ruleset) => (StatusCode::OK, Json(ruleset)).into_response(),
        None => {
            let payload = json!({
                "error": format!("no fixed ruleset for jurisdiction '{jurisdiction}'"),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}
