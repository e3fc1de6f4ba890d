use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating the configuration file.
/// All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Faults that stop the monitor. Failed probes are never represented here,
/// they are recorded as observations instead.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("failed to append to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("result channel closed, prober for {url} cannot publish")]
    ChannelClosed { url: String },

    #[error("recorder stopped while probers were still running")]
    RecorderStopped,

    #[error("supervised task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}
