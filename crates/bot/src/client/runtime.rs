//! Runtime trait — abstract interface over the container runtime.
//!
//! The dispatcher and the periodic reporter only ever see this trait.

use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::client::error::RuntimeError;
use crate::docker::inventory::{ContainerHandle, ContainerSummary};

/// Async interface over the container runtime.
///
/// Object-safe thanks to boxed futures. Implementations must be `Send + Sync`
/// because the command loop and the reporter task call them concurrently;
/// no call may rely on state left behind by a previous one.
pub trait RuntimeOps: Send + Sync {
    /// Enumerate containers in runtime order. `false` returns running containers only.
    fn list_containers(
        &self,
        include_stopped: bool,
    ) -> BoxFuture<'_, Result<Vec<ContainerSummary>, RuntimeError>>;

    fn get_container<'a>(
        &'a self,
        name_or_id: &'a str,
    ) -> BoxFuture<'a, Result<ContainerHandle, RuntimeError>>;

    /// Single best-effort call. No retry, no check that the container actually transitioned.
    fn restart<'a>(&'a self, handle: &'a ContainerHandle) -> BoxFuture<'a, Result<(), RuntimeError>>;

    /// Single best-effort call. No retry, no check that the container actually transitioned.
    fn stop<'a>(&'a self, handle: &'a ContainerHandle) -> BoxFuture<'a, Result<(), RuntimeError>>;
}

pub type SharedRuntime = Arc<dyn RuntimeOps>;
