use std::sync::Arc;

use unicode_truncate::UnicodeTruncateStr;

use crate::http_probe::prelude::*;

const MAX_LABEL_WIDTH: usize = 60;

fn to_fixed_width(input: &str, width: usize) -> String {
    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}

/// Human readable diagnostics next to the data log. Constructed once by the
/// supervisor and handed to the components that report through it.
#[derive(Debug, Clone)]
pub struct Console {
    label_width: usize,
}

impl Console {
    /// Size the URL column after the longest configured URL.
    pub fn for_targets(targets: &[Arc<Target>]) -> Self {
        let label_width = targets
            .iter()
            .map(|t| t.url().len())
            .max()
            .unwrap_or(10)
            .min(MAX_LABEL_WIDTH);
        Console { label_width }
    }

    pub fn label(&self, url: &str) -> String {
        to_fixed_width(url, self.label_width)
    }

    pub fn observation(&self, observation: &Observation) {
        let label = self.label(observation.target().url());
        if observation.is_healthy() {
            log::info!(
                "[{label}] ✅ Status: {}, Elapsed: {}ms",
                observation.status().unwrap_or_default(),
                observation.latency_ms().unwrap_or_default(),
            );
        } else if let Some(status) = observation.status() {
            log::warn!(
                "[{label}] ❌ Status: {status}, Content OK: {:?}, Reason: {}",
                observation.content_ok(),
                observation.reason().unwrap_or("-"),
            );
        } else {
            log::warn!(
                "[{label}] ❌ Probe error: {}",
                observation.reason().unwrap_or("-")
            );
        }
    }
}
