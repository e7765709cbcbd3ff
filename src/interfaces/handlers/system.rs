use std::{
    sync::RwLock,
    time::{Duration, Instant},
};

use actix_web::{get, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use humantime::format_duration;
use once_cell::sync::Lazy;
use serde::Serialize;
use sysinfo::System;

use crate::{
    constants::{HEALTH_CACHE_SECS, START_TIME},
    AppState,
};

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct DatabaseHealth {
    reachable: bool,
    latency_ms: u128,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct HealthCheckResponse {
    status: &'static str,
    version: &'static str,
    uptime: String,
    started_at: DateTime<Utc>,
    checked_at: DateTime<Utc>,
    database: DatabaseHealth,
    memory_usage_mb: Option<f64>,
    cpu_count: usize,
}

/// Last report and the unix second it was built.
static LAST_REPORT: Lazy<RwLock<Option<(i64, HealthCheckResponse)>>> = Lazy::new(|| RwLock::new(None));

async fn check_database(state: &AppState) -> DatabaseHealth {
    let started = Instant::now();
    let reachable = match state.project_handler.project_repo.check_connection().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    DatabaseHealth { reachable, latency_ms: started.elapsed().as_millis() }
}

async fn build_report(state: &AppState) -> HealthCheckResponse {
    let checked_at = Utc::now();
    let uptime_secs = checked_at.signed_duration_since(*START_TIME).num_seconds().max(0) as u64;

    let database = check_database(state).await;

    let sys = System::new_all();
    let memory_usage_mb = sysinfo::get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map(|p| (p.memory() as f64 / 1024.0 / 1024.0 * 100.0).round() / 100.0);

    HealthCheckResponse {
        status: if database.reachable { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime: format_duration(Duration::from_secs(uptime_secs)).to_string(),
        started_at: *START_TIME,
        checked_at,
        database,
        memory_usage_mb,
        cpu_count: sys.cpus().len(),
    }
}

/// Liveness and database reachability, rebuilt at most every
/// `HEALTH_CACHE_SECS` seconds.
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now().timestamp();

    let cached = match LAST_REPORT.read() {
        Ok(guard) => guard
            .as_ref()
            .filter(|(built_at, _)| now - built_at <= HEALTH_CACHE_SECS)
            .map(|(_, report)| report.clone()),
        Err(e) => {
            tracing::warn!("Health report cache lock poisoned: {}", e);
            None
        }
    };

    let report = match cached {
        Some(report) => report,
        None => {
            let report = build_report(&state).await;
            if let Ok(mut guard) = LAST_REPORT.write() {
                *guard = Some((now, report.clone()));
            }
            report
        }
    };

    HttpResponse::Ok().json(report)
}
