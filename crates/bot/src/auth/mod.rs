//! Auth module — allow list parsing and the authorization gate.

pub mod gate;

pub use gate::{AllowList, AuthorizationGate, Identity};
