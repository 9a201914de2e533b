//! Live — implements `RuntimeOps` on top of the bollard-backed `DockerClient`.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::client::error::RuntimeError;
use crate::client::runtime::RuntimeOps;
use crate::docker::client::DockerClient;
use crate::docker::error_map::map_docker_error;
use crate::docker::inventory::{ContainerHandle, ContainerSummary};

/// Docker-backed runtime facade.
#[derive(Debug, Clone)]
pub struct DockerRuntime {
    docker: DockerClient,
    /// Grace period for stop/restart; `None` leaves it to the daemon.
    stop_timeout_secs: Option<u32>,
}

impl DockerRuntime {
    pub fn new(docker: DockerClient, stop_timeout_secs: Option<u32>) -> Self {
        Self { docker, stop_timeout_secs }
    }
}

impl RuntimeOps for DockerRuntime {
    fn list_containers(
        &self,
        include_stopped: bool,
    ) -> BoxFuture<'_, Result<Vec<ContainerSummary>, RuntimeError>> {
        async move {
            self.docker
                .list_summaries(include_stopped)
                .await
                .map_err(map_docker_error)
        }
        .boxed()
    }

    fn get_container<'a>(
        &'a self,
        name_or_id: &'a str,
    ) -> BoxFuture<'a, Result<ContainerHandle, RuntimeError>> {
        async move {
            self.docker
                .resolve_container(name_or_id)
                .await
                .map_err(map_docker_error)
        }
        .boxed()
    }

    fn restart<'a>(&'a self, handle: &'a ContainerHandle) -> BoxFuture<'a, Result<(), RuntimeError>> {
        async move {
            tracing::info!(container = %handle.name, id = %handle.id, "Restarting container");
            self.docker
                .restart_container(&handle.id, self.stop_timeout_secs)
                .await
                .map_err(map_docker_error)
        }
        .boxed()
    }

    fn stop<'a>(&'a self, handle: &'a ContainerHandle) -> BoxFuture<'a, Result<(), RuntimeError>> {
        async move {
            tracing::info!(container = %handle.name, id = %handle.id, "Stopping container");
            self.docker
                .stop_container(&handle.id, self.stop_timeout_secs)
                .await
                .map_err(map_docker_error)
        }
        .boxed()
    }
}
