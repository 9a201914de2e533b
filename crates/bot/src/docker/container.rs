//! Container domain — list, resolve, and lifecycle actions.

use super::client::{DockerClient, DockerError};
use super::inventory::{ContainerHandle, ContainerSummary};

use bollard::query_parameters::{
    ListContainersOptions, RestartContainerOptions, StopContainerOptions,
};

fn grace(secs: u32) -> i32 {
    i32::try_from(secs).unwrap_or(i32::MAX)
}

/// Turn a daemon 404 into `NoSuchContainer` for the name the caller used.
fn not_found_or(target: &str, e: bollard::errors::Error) -> DockerError {
    match e {
        bollard::errors::Error::DockerResponseServerError { status_code: 404, .. } => {
            DockerError::NoSuchContainer(target.to_string())
        }
        other => DockerError::Api(other),
    }
}

impl DockerClient {
    /// Enumerate containers in daemon order. `include_stopped = false` returns running ones only.
    pub async fn list_summaries(
        &self,
        include_stopped: bool,
    ) -> Result<Vec<ContainerSummary>, DockerError> {
        let options = Some(ListContainersOptions {
            all: include_stopped,
            ..Default::default()
        });
        let containers = self.client.list_containers(options).await?;
        Ok(containers.into_iter().map(ContainerSummary::from).collect())
    }

    /// Resolve a container by name or (possibly abbreviated) id.
    pub async fn resolve_container(&self, name_or_id: &str) -> Result<ContainerHandle, DockerError> {
        let details = self.client
            .inspect_container(name_or_id, None)
            .await
            .map_err(|e| not_found_or(name_or_id, e))?;
        Ok(ContainerHandle::from(details))
    }

    /// Restart `id`, giving it `grace_secs` to exit before it is killed.
    pub async fn restart_container(&self, id: &str, grace_secs: Option<u32>) -> Result<(), DockerError> {
        let options = RestartContainerOptions { t: grace_secs.map(grace), ..Default::default() };
        self.client
            .restart_container(id, Some(options))
            .await
            .map_err(|e| not_found_or(id, e))
    }

    pub async fn stop_container(&self, id: &str, grace_secs: Option<u32>) -> Result<(), DockerError> {
        let options = StopContainerOptions { t: grace_secs.map(grace), ..Default::default() };
        self.client
            .stop_container(id, Some(options))
            .await
            .map_err(|e| not_found_or(id, e))
    }
}
