//! Docker error → runtime error mapping.
//!
//! Single place where adapter failures are folded into the three
//! [`RuntimeError`] kinds the dispatcher and reporter understand.

use super::client::DockerError;
use crate::client::error::RuntimeError;

/// Map a [`DockerError`] to a [`RuntimeError`].
///
/// Mapping rules:
/// - `NoSuchContainer` or an HTTP 404 → `NotFound`
/// - any other daemon response → `OperationFailed` with the daemon's message
/// - connection and transport failures → `Unavailable`
pub fn map_docker_error(err: DockerError) -> RuntimeError {
    match err {
        DockerError::NoSuchContainer(name) => RuntimeError::NotFound(name),
        DockerError::Connect(msg) => RuntimeError::Unavailable(msg),
        DockerError::Api(bollard::errors::Error::DockerResponseServerError {
            status_code: 404,
            message,
        }) => RuntimeError::NotFound(message),
        DockerError::Api(bollard::errors::Error::DockerResponseServerError {
            message,
            ..
        }) => RuntimeError::OperationFailed(message),
        DockerError::Api(other) => RuntimeError::Unavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error(status_code: u16, message: &str) -> DockerError {
        DockerError::Api(bollard::errors::Error::DockerResponseServerError {
            status_code,
            message: message.to_string(),
        })
    }

    #[test]
    fn test_map_container_not_found() {
        let err = map_docker_error(DockerError::NoSuchContainer("web".to_string()));
        assert_eq!(err, RuntimeError::NotFound("web".to_string()));
    }

    #[test]
    fn test_map_connection_failed() {
        let err = map_docker_error(DockerError::Connect("socket gone".to_string()));
        assert!(matches!(err, RuntimeError::Unavailable(ref msg) if msg.contains("socket gone")));
    }

    #[test]
    fn test_map_http_404() {
        let err = map_docker_error(server_error(404, "No such container: web"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_map_server_rejection() {
        let err = map_docker_error(server_error(409, "container is paused"));
        assert_eq!(err, RuntimeError::OperationFailed("container is paused".to_string()));
    }

    #[test]
    fn test_map_internal_server_error() {
        let err = map_docker_error(server_error(500, "driver failed"));
        assert!(matches!(err, RuntimeError::OperationFailed(_)));
    }

    #[test]
    fn test_map_transport_failure() {
        let err = map_docker_error(DockerError::Api(
            bollard::errors::Error::RequestTimeoutError,
        ));
        assert!(err.is_unavailable());
    }
}
