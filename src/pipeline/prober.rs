use std::convert::Infallible;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::time::sleep;

use crate::error::MonitorError;
use crate::http_probe::prelude::*;

/// Probes one target forever, publishing one observation per cycle.
pub struct Prober {
    target: Arc<Target>,
    sender: UnboundedSender<Observation>,
    options: ProbeOptions,
}

impl Prober {
    pub fn new(
        target: Arc<Target>,
        sender: UnboundedSender<Observation>,
        options: ProbeOptions,
    ) -> Self {
        Prober {
            target,
            sender,
            options,
        }
    }

    /// Only returns when the recorder is gone and observations can no longer
    /// be delivered. The next probe starts `period` after the previous
    /// observation was published, so probes of one target never overlap.
    pub async fn run(self) -> Result<Infallible, MonitorError> {
        log::debug!(
            "Probing {} for {:?} every {:?}",
            self.target.url(),
            self.target.content_pattern(),
            self.options.period
        );

        loop {
            let observation = probe_target(&self.target, &self.options).await;

            self.sender
                .send(observation)
                .map_err(|_| MonitorError::ChannelClosed {
                    url: self.target.url().to_string(),
                })?;

            sleep(self.options.period).await;
        }
    }
}
