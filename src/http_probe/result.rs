use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::target::Target;

const CHECK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const ABSENT: &str = "None";

/// The outcome of one probe cycle.
///
/// `status` and `latency_ms` are either both present (the request completed)
/// or both absent (the request failed and `reason` says why). A completed
/// probe always carries `content_ok`; error statuses are matched against an
/// empty body.
#[derive(Debug, Clone)]
pub struct Observation {
    check_time: DateTime<Utc>,
    target: Arc<Target>,
    status: Option<u16>,
    latency_ms: Option<u64>,
    content_ok: Option<bool>,
    reason: Option<String>,
}

impl Observation {
    pub fn completed(
        target: Arc<Target>,
        check_time: DateTime<Utc>,
        status: u16,
        latency_ms: u64,
        content_ok: Option<bool>,
        reason: Option<String>,
    ) -> Self {
        Observation {
            check_time,
            target,
            status: Some(status),
            latency_ms: Some(latency_ms),
            content_ok,
            reason,
        }
    }

    pub fn failed(target: Arc<Target>, check_time: DateTime<Utc>, reason: impl Into<String>) -> Self {
        Observation {
            check_time,
            target,
            status: None,
            latency_ms: None,
            content_ok: None,
            reason: Some(reason.into()),
        }
    }

    pub fn check_time(&self) -> DateTime<Utc> {
        self.check_time
    }

    pub fn target(&self) -> &Arc<Target> {
        &self.target
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn latency_ms(&self) -> Option<u64> {
        self.latency_ms
    }

    pub fn content_ok(&self) -> Option<bool> {
        self.content_ok
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// A completed request with a non-error status and a matching body.
    pub fn is_healthy(&self) -> bool {
        matches!(self.status, Some(code) if code < 400) && self.content_ok == Some(true)
    }

    /// The row appended to the log file, newline included.
    pub fn log_line(&self) -> String {
        format!("{self}\n")
    }
}

fn or_absent<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| ABSENT.to_string(), |v| v.to_string())
}

/// `<check_time> <url> <status> <latency_ms> <content_ok> <reason>`, with
/// `None` for every absent field.
impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let content_ok = self
            .content_ok
            .map(|ok| if ok { "True" } else { "False" });
        // a reason may never break the one-row-per-observation layout
        let reason = self.reason.as_deref().map(|r| r.replace(['\r', '\n'], " "));

        write!(
            f,
            "{} {} {} {} {} {}",
            self.check_time.format(CHECK_TIME_FORMAT),
            self.target.url(),
            or_absent(self.status),
            or_absent(self.latency_ms),
            or_absent(content_ok),
            or_absent(reason),
        )
    }
}
