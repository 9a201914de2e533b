//! Client module — the runtime facade the core talks to.
//!
//! `runtime.rs` defines the trait, `live.rs` backs it with bollard,
//! `fake.rs` provides an in-memory double for tests.

pub mod runtime;
pub mod error;
pub mod live;
pub mod fake;

pub use error::RuntimeError;
pub use runtime::{RuntimeOps, SharedRuntime};
