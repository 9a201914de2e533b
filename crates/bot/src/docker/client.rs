//! Docker client — the bollard handle and the adapter error type.
//!
//! Container calls live in `container.rs`, which adds an `impl DockerClient` block.

use bollard::{Docker, API_DEFAULT_VERSION};
use thiserror::Error;

/// Seconds bollard waits on a single request over the unix socket.
const SOCKET_TIMEOUT_SECS: u64 = 120;

#[derive(Error, Debug)]
pub enum DockerError {
    #[error("cannot reach Docker daemon: {0}")]
    Connect(String),
    #[error("no such container: {0}")]
    NoSuchContainer(String),
    #[error("Docker API error: {0}")]
    Api(#[from] bollard::errors::Error),
}

#[derive(Debug, Clone)]
pub struct DockerClient {
    /// Cheap to clone and safe to share between tasks.
    pub(super) client: Docker,
}

impl DockerClient {
    /// Build a client for `socket_path`, or for the environment defaults
    /// (`DOCKER_HOST`, then the local socket) when the path is empty.
    ///
    /// bollard connects lazily; an unreachable daemon shows up on the first call.
    pub fn new(socket_path: &str) -> Result<Self, DockerError> {
        let socket = socket_path.trim();
        let client = match socket {
            "" => Docker::connect_with_defaults(),
            path => Docker::connect_with_socket(
                path.trim_start_matches("unix://"),
                SOCKET_TIMEOUT_SECS,
                &API_DEFAULT_VERSION,
            ),
        }
        .map_err(|e| DockerError::Connect(e.to_string()))?;
        Ok(Self { client })
    }
}
