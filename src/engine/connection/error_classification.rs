//! Error classification for client construction failures.
//!
//! Bollard checks that a Unix socket exists when the client is built, so a
//! missing or inaccessible socket surfaces before any request is sent. Those
//! failures mean the daemon cannot be reached and are reported as such; every
//! other construction failure is a client initialisation error.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::EngineError;

/// Extract the filesystem path from a socket URI.
///
/// Strips the scheme prefix (`unix://`, `npipe://`) to get the raw path.
/// Network addresses have no filesystem path and return `None`.
pub(super) fn extract_socket_path(host: &str) -> Option<&Path> {
    host.strip_prefix("unix://")
        .or_else(|| host.strip_prefix("npipe://"))
        .or_else(|| host.starts_with('/').then_some(host))
        .map(Path::new)
}

/// Describe an I/O failure on a socket path, if the kind is one that means
/// the daemon is unreachable.
fn describe_socket_io_error(kind: ErrorKind, socket_path: &Path) -> Option<String> {
    match kind {
        ErrorKind::NotFound => Some(format!(
            "socket not found: {}. Is the Docker daemon running?",
            socket_path.display()
        )),
        ErrorKind::PermissionDenied => Some(format!(
            "permission denied accessing socket: {}",
            socket_path.display()
        )),
        ErrorKind::ConnectionRefused => Some(format!(
            "connection refused on socket: {}",
            socket_path.display()
        )),
        _ => None,
    }
}

/// Classify a `Bollard` construction error into an `EngineError`.
///
/// Socket-level failures become `DaemonUnreachable`; anything else becomes
/// `ClientInit` carrying Bollard's message.
pub(super) fn classify_connection_error(
    bollard_error: &bollard::errors::Error,
    host: &str,
) -> EngineError {
    let unreachable = |message: String| EngineError::DaemonUnreachable {
        host: String::from(host),
        message,
    };

    if let Some(path) = extract_socket_path(host) {
        let kind = match bollard_error {
            bollard::errors::Error::SocketNotFoundError(_) => Some(ErrorKind::NotFound),
            bollard::errors::Error::IOError { err } => {
                Some(io_error_kind_in_chain(err).unwrap_or_else(|| err.kind()))
            }
            _ => io_error_kind_in_chain(bollard_error),
        };
        if let Some(message) = kind.and_then(|k| describe_socket_io_error(k, path)) {
            return unreachable(message);
        }
    }

    EngineError::ClientInit {
        message: bollard_error.to_string(),
    }
}

/// Walk the error source chain looking for an `io::Error` kind.
fn io_error_kind_in_chain(error: &dyn std::error::Error) -> Option<ErrorKind> {
    let mut current: Option<&(dyn std::error::Error + 'static)> = error.source();
    while let Some(err) = current {
        if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
            return Some(io_err.kind());
        }
        current = err.source();
    }
    None
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use rstest::rstest;

    use super::*;

    #[derive(Debug)]
    struct Wrapper {
        source: std::io::Error,
    }

    impl fmt::Display for Wrapper {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "transport wrapper")
        }
    }

    impl std::error::Error for Wrapper {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.source)
        }
    }

    #[derive(Debug)]
    struct Outer {
        source: Wrapper,
    }

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "request failed")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.source)
        }
    }

    #[rstest]
    fn io_error_kind_in_chain_finds_nested_kind() {
        let error = Outer {
            source: Wrapper {
                source: std::io::Error::new(ErrorKind::PermissionDenied, "denied"),
            },
        };
        assert_eq!(
            io_error_kind_in_chain(&error),
            Some(ErrorKind::PermissionDenied)
        );
    }

    #[rstest]
    #[case::unix("unix:///var/run/docker.sock", Some("/var/run/docker.sock"))]
    #[case::npipe("npipe:////./pipe/docker_engine", Some("//./pipe/docker_engine"))]
    #[case::bare("/run/docker.sock", Some("/run/docker.sock"))]
    #[case::tcp("tcp://localhost:2375", None)]
    fn socket_path_is_extracted_from_socket_hosts(
        #[case] host: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(extract_socket_path(host), expected.map(Path::new));
    }

    #[rstest]
    fn missing_socket_is_daemon_unreachable() {
        let error = bollard::errors::Error::SocketNotFoundError(String::from(
            "/nonexistent/docker.sock",
        ));
        let classified = classify_connection_error(&error, "unix:///nonexistent/docker.sock");
        assert!(
            matches!(
                classified,
                EngineError::DaemonUnreachable { ref host, ref message }
                    if host == "unix:///nonexistent/docker.sock"
                        && message.contains("/nonexistent/docker.sock")
            ),
            "expected DaemonUnreachable, got {classified:?}"
        );
    }

    #[rstest]
    fn permission_denied_socket_is_daemon_unreachable() {
        let error = bollard::errors::Error::IOError {
            err: std::io::Error::new(ErrorKind::PermissionDenied, "denied"),
        };
        let classified = classify_connection_error(&error, "unix:///var/run/docker.sock");
        assert!(
            matches!(classified, EngineError::DaemonUnreachable { ref message, .. }
                if message.contains("permission denied")),
            "expected DaemonUnreachable, got {classified:?}"
        );
    }

    #[rstest]
    fn network_host_errors_are_client_init() {
        let error = bollard::errors::Error::IOError {
            err: std::io::Error::new(ErrorKind::InvalidInput, "bad certificate"),
        };
        let classified = classify_connection_error(&error, "tcp://docker:2376");
        assert!(
            matches!(classified, EngineError::ClientInit { .. }),
            "expected ClientInit, got {classified:?}"
        );
    }
}
