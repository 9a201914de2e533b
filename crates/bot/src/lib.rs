// Domain-driven module structure for the Docker chat bot.

// Core infrastructure
pub mod docker;
pub mod client;
pub mod state;

// Domain modules
pub mod auth;
pub mod conf;
pub mod report;
pub mod command;
pub mod transport;
pub mod job;
pub mod runtime;
