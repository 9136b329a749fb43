//! Configuration: a JSON file plus defaults, mirroring the teacher's
//! file-plus-defaults layering at a much smaller scale.

use crate::constants::{
    DEFAULT_HTTP_HOST, DEFAULT_HTTP_PORT, DEFAULT_MAX_LOOP_ITERATIONS, DEFAULT_STEP_TIMEOUT_SECS,
};
use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    DEFAULT_HTTP_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_HTTP_PORT
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LogConfig {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitsConfig {
    #[serde(default = "default_step_timeout")]
    pub default_step_timeout_secs: u64,
    #[serde(default = "default_max_iterations")]
    pub max_loop_iterations: u32,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_vision_poll_interval")]
    pub vision_poll_interval_ms: u64,
}

fn default_step_timeout() -> u64 {
    DEFAULT_STEP_TIMEOUT_SECS
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_LOOP_ITERATIONS
}

fn default_poll_interval() -> u64 {
    100
}

fn default_vision_poll_interval() -> u64 {
    200
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            default_step_timeout_secs: default_step_timeout(),
            max_loop_iterations: default_max_iterations(),
            poll_interval_ms: default_poll_interval(),
            vision_poll_interval_ms: default_vision_poll_interval(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub log: Option<LogConfig>,
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Load from an optional JSON file, falling back to defaults for any
    /// field the file doesn't set (and entirely when `path` is `None`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        Ok(config)
    }
}

#[cfg(test)]
mod config_test;
