use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::console::Console;
use crate::error::MonitorError;
use crate::http_probe::prelude::*;

use super::prober::Prober;
use super::recorder::Recorder;

/// Owns every prober and the recorder. They run as one group: the first
/// failure stops all of them.
pub struct Supervisor {
    targets: Vec<Arc<Target>>,
    options: ProbeOptions,
    log_filename: PathBuf,
    console: Console,
}

impl Supervisor {
    pub fn new(
        targets: Vec<Arc<Target>>,
        options: ProbeOptions,
        log_filename: impl Into<PathBuf>,
        console: Console,
    ) -> Self {
        Supervisor {
            targets,
            options,
            log_filename: log_filename.into(),
            console,
        }
    }

    /// Run until `shutdown` resolves or a task fails.
    ///
    /// On shutdown the probers are cancelled and the recorder drains what was
    /// already enqueued; the number of recorded observations is returned.
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> Result<u64, MonitorError> {
        let (sender, receiver) = mpsc::unbounded_channel();

        let mut probers = JoinSet::new();
        for target in self.targets {
            let prober = Prober::new(target, sender.clone(), self.options.clone());
            probers.spawn(prober.run());
        }
        // only the probers hold senders, the recorder ends once they are gone
        drop(sender);

        let mut recorder =
            tokio::spawn(Recorder::new(receiver, self.log_filename, self.console).run());

        log::info!("Started {} prober(s) and the recorder", probers.len());

        tokio::pin!(shutdown);
        tokio::select! {
            biased;

            result = &mut recorder => {
                probers.shutdown().await;
                let err = match result {
                    Ok(Ok(_)) => MonitorError::RecorderStopped,
                    Ok(Err(e)) => e,
                    Err(e) => MonitorError::TaskFailed(e),
                };
                log::error!("Recorder failed: {err}");
                Err(err)
            }
            Some(result) = probers.join_next() => {
                probers.shutdown().await;
                recorder.abort();
                let err = match result {
                    Ok(Err(e)) => e,
                    Ok(Ok(never)) => match never {},
                    Err(e) => MonitorError::TaskFailed(e),
                };
                log::error!("Prober failed: {err}");
                Err(err)
            }
            _ = &mut shutdown => {
                log::info!("Shutting down, draining pending observations");
                probers.shutdown().await;
                recorder.await?
            }
        }
    }
}
