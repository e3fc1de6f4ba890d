pub mod app_config;
pub mod probe_config;
