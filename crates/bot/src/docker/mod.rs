//! Docker module — bollard-backed client, container inventory model, error mapping.

pub mod client;
pub mod container;
pub mod inventory;
pub mod error_map;
