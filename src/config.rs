//! Runtime configuration for the `serve` command

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{SimError, SimResult};
use crate::sink::{FileSink, Rotation};

/// Server and emission loop settings
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Host to bind to (default: 127.0.0.1)
    pub host: String,
    /// Port to listen on (default: 5000)
    pub port: u16,
    /// Directory holding the per-category log files (default: logs)
    pub log_dir: PathBuf,
    /// File naming policy (default: never rotate)
    pub rotation: Rotation,
    /// Pause after a pass with nothing to emit, in milliseconds (default: 100)
    pub idle_interval_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            log_dir: PathBuf::from("logs"),
            rotation: Rotation::Never,
            idle_interval_ms: 100,
        }
    }
}

impl SimConfig {
    pub fn bind_addr(&self) -> SimResult<SocketAddr> {
        if self.host.trim().is_empty() {
            return Err(SimError::config("host must not be empty"));
        }
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| {
                SimError::config(format!("invalid bind address {}:{}: {e}", self.host, self.port))
            })?
            .next()
            .ok_or_else(|| SimError::config(format!("no address for {}:{}", self.host, self.port)))
    }

    pub fn idle_interval(&self) -> SimResult<Duration> {
        if self.idle_interval_ms == 0 {
            return Err(SimError::config("idle interval must be at least 1 ms"));
        }
        Ok(Duration::from_millis(self.idle_interval_ms))
    }

    pub fn file_sink(&self) -> FileSink {
        FileSink::new(&self.log_dir, self.rotation)
    }
}
