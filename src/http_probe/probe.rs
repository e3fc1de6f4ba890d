use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use reqwest::Client;

use super::prelude::*;
use super::report;

/// Transport settings shared by every prober.
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Pause between publishing an observation and starting the next probe.
    pub period: Duration,
    pub timeout: Duration,
    pub accept_invalid_certs: bool,
    pub user_agent: String,
}

/// What a probe learned before building its observation.
struct Measurement {
    status: u16,
    latency_ms: u64,
    content_ok: bool,
    reason: Option<String>,
}

fn build_client(options: &ProbeOptions) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(options.timeout)
        .danger_accept_invalid_certs(options.accept_invalid_certs)
        .user_agent(options.user_agent.as_str())
        .pool_max_idle_per_host(0)
        .build()
}

async fn measure(target: &Target, options: &ProbeOptions) -> Result<Measurement, String> {
    // A fresh client per probe, dropped with this future on every exit path.
    let client = build_client(options).map_err(|e| report(&e))?;

    let start = Instant::now();
    let response = client
        .get(target.url())
        .send()
        .await
        .map_err(|e| report(&e))?;
    let latency_ms = (start.elapsed().as_secs_f64() * 1000.0).round() as u64;

    let status = response.status();
    let reason = status.canonical_reason().map(str::to_string);

    // error responses are checked against an empty body
    let body = if status.is_client_error() || status.is_server_error() {
        String::new()
    } else {
        let bytes = response.bytes().await.map_err(|e| report(&e))?;
        String::from_utf8(bytes.to_vec()).map_err(|e| format!("invalid response body: {e}"))?
    };
    let content_ok = target.content_matches(&body).map_err(|e| report(&e))?;

    Ok(Measurement {
        status: status.as_u16(),
        latency_ms,
        content_ok,
        reason,
    })
}

/// Run a single probe cycle against `target`. Every failure is turned into a
/// failed observation, this never returns an error.
pub async fn probe_target(target: &Arc<Target>, options: &ProbeOptions) -> Observation {
    let measurement = measure(target, options).await;
    let check_time = Utc::now();

    match measurement {
        Ok(m) => Observation::completed(
            Arc::clone(target),
            check_time,
            m.status,
            m.latency_ms,
            Some(m.content_ok),
            m.reason,
        ),
        Err(reason) => Observation::failed(Arc::clone(target), check_time, reason),
    }
}
