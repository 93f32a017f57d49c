use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::aggregate::{RunnerUpCount, WinCount};
use crate::config::ServerConfig;
use crate::dashboard::Dashboard;
use crate::export::{WORKBOOK_FILENAME, finals_workbook};
use crate::figure::ChoroplethFigure;
use crate::finals::FinalsRecord;
use crate::lookup::{YEAR_NOT_FOUND, country_message, year_message};

pub type SharedDashboard = Arc<Dashboard>;

#[derive(Debug, Deserialize)]
pub struct CountryQuery {
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct WinsSummary<'a> {
    pub wins: &'a [WinCount],
    pub runners_up: &'a [RunnerUpCount],
    pub loaded_at: String,
}

pub fn router(dashboard: SharedDashboard) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/country", get(country_handler))
        .route("/api/year", get(year_handler))
        .route("/api/figure", get(figure_handler))
        .route("/api/wins", get(wins_handler))
        .route("/export/finals.xlsx", get(export_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(dashboard)
}

/// Serves until Ctrl-C / SIGTERM.
pub async fn serve(config: &ServerConfig, dashboard: SharedDashboard) -> Result<()> {
    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!("dashboard listening on http://{addr}");
    axum::serve(listener, router(dashboard))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn index_handler(State(dashboard): State<SharedDashboard>) -> Html<String> {
    Html(dashboard.page.clone())
}

async fn country_handler(
    State(dashboard): State<SharedDashboard>,
    Query(query): Query<CountryQuery>,
) -> Json<LookupResponse> {
    Json(LookupResponse {
        text: country_message(&dashboard.eligible, query.country.as_deref()),
    })
}

async fn year_handler(
    State(dashboard): State<SharedDashboard>,
    Query(query): Query<YearQuery>,
) -> Json<LookupResponse> {
    Json(LookupResponse {
        text: year_text(&dashboard.finals, query.year.as_deref()),
    })
}

async fn figure_handler(State(dashboard): State<SharedDashboard>) -> Json<ChoroplethFigure> {
    Json(dashboard.figure.clone())
}

async fn wins_handler(State(dashboard): State<SharedDashboard>) -> Response {
    Json(WinsSummary {
        wins: &dashboard.wins,
        runners_up: &dashboard.runner_ups,
        loaded_at: dashboard.loaded_at.to_rfc3339(),
    })
    .into_response()
}

async fn export_handler(State(dashboard): State<SharedDashboard>) -> Response {
    match finals_workbook(&dashboard) {
        Ok((bytes, report)) => {
            info!(
                finals = report.finals,
                winners = report.winners,
                runners_up = report.runners_up,
                "exported workbook"
            );
            (
                [
                    (
                        header::CONTENT_TYPE,
                        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
                            .to_string(),
                    ),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{WORKBOOK_FILENAME}\""),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "workbook export failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "export failed").into_response()
        }
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Empty means nothing selected; a value that is not a year simply has no
/// final recorded for it.
fn year_text(finals: &[FinalsRecord], raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => year_message(finals, None),
        Some(raw) => match raw.parse::<i32>() {
            Ok(year) => year_message(finals, Some(year)),
            Err(_) => YEAR_NOT_FOUND.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::year_text;
    use crate::finals::FinalsRecord;
    use crate::lookup::{YEAR_NOT_FOUND, YEAR_PLACEHOLDER};

    #[test]
    fn raw_year_selection() {
        let finals = vec![FinalsRecord {
            year: 1966,
            winner: "England".to_string(),
            runner_up: "Germany".to_string(),
        }];
        assert_eq!(year_text(&finals, None), YEAR_PLACEHOLDER);
        assert_eq!(year_text(&finals, Some(" ")), YEAR_PLACEHOLDER);
        assert_eq!(
            year_text(&finals, Some("1966")),
            "In 1966, England won the World Cup against Germany"
        );
        assert_eq!(year_text(&finals, Some("abc")), YEAR_NOT_FOUND);
    }
}
