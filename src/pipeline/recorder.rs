use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::console::Console;
use crate::error::MonitorError;
use crate::http_probe::prelude::*;

/// The single consumer of the result channel. Writes every observation as one
/// row of the log file, in the order they were enqueued.
pub struct Recorder {
    receiver: UnboundedReceiver<Observation>,
    log_filename: PathBuf,
    console: Console,
}

impl Recorder {
    pub fn new(
        receiver: UnboundedReceiver<Observation>,
        log_filename: impl Into<PathBuf>,
        console: Console,
    ) -> Self {
        Recorder {
            receiver,
            log_filename: log_filename.into(),
            console,
        }
    }

    /// Consume until every sender is dropped and the channel is drained.
    /// Returns the number of rows written. A failed write stops the recorder.
    pub async fn run(mut self) -> Result<u64, MonitorError> {
        log::info!("Recording observations to {}", self.log_filename.display());

        let mut written = 0;
        while let Some(observation) = self.receiver.recv().await {
            append_row(&self.log_filename, &observation.log_line()).await?;
            self.console.observation(&observation);
            written += 1;
        }

        log::info!("Result channel drained, {written} observation(s) recorded");
        Ok(written)
    }
}

/// Opens the file per row; the file is created if missing and never truncated.
async fn append_row(path: &Path, row: &str) -> Result<(), MonitorError> {
    let write = async {
        let mut file = OpenOptions::new().create(true).append(true).open(path).await?;
        file.write_all(row.as_bytes()).await?;
        file.flush().await
    };

    write.await.map_err(|source| MonitorError::Write {
        path: path.to_path_buf(),
        source,
    })
}
