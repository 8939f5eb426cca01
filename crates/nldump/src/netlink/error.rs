//! Error types for dump operations.

use std::io;

/// Result type for dump operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the kernel routing socket.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The OS refused to create (or bind) the netlink socket.
    #[error("failed to open netlink socket")]
    Socket(#[source] io::Error),

    /// Transmitting a request failed.
    #[error("failed to send request")]
    Send(#[source] io::Error),

    /// The socket accepted fewer bytes than the request frame holds.
    #[error("short send: wrote {actual} of {expected} bytes")]
    ShortSend {
        /// Frame length.
        expected: usize,
        /// Bytes the socket accepted.
        actual: usize,
    },

    /// Receiving a datagram failed.
    #[error("failed to receive response")]
    Receive(#[source] io::Error),

    /// The client was closed, explicitly or by an earlier fatal error.
    #[error("client is closed")]
    Closed,

    /// Kernel returned an error code.
    #[error("kernel error: {message} (errno {errno})")]
    Kernel {
        /// The errno value from the kernel.
        errno: i32,
        /// Human-readable error message.
        message: String,
    },

    /// Message was truncated.
    #[error("message truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Expected message length.
        expected: usize,
        /// Actual bytes available.
        actual: usize,
    },

    /// Invalid message format.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

impl Error {
    /// Create a kernel error from the (negative) errno carried by `NLMSG_ERROR`.
    pub fn from_errno(errno: i32) -> Self {
        let message = io::Error::from_raw_os_error(-errno).to_string();
        Self::Kernel {
            errno: -errno,
            message,
        }
    }

    /// Whether this error, returned from a [`DumpClient`](super::DumpClient)
    /// call, means that call tore the session down.
    ///
    /// Every client error except [`Error::Closed`] closes the socket before it
    /// is returned; `Closed` is what later calls see once the session is gone.
    /// Framing errors yielded by [`ResponseBuffer::messages`](super::ResponseBuffer::messages)
    /// come from an already completed dump and leave the client untouched.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Check if this is a permission error (EPERM, EACCES).
    pub fn is_permission_denied(&self) -> bool {
        matches!(self.errno(), Some(libc::EPERM | libc::EACCES))
    }

    /// Get the errno value, from the kernel or from the underlying I/O error.
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::Kernel { errno, .. } => Some(*errno),
            Self::Socket(e) | Self::Send(e) | Self::Receive(e) => e.raw_os_error(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_errno() {
        let err = Error::from_errno(-libc::EPERM);
        assert!(err.is_permission_denied());
        assert_eq!(err.errno(), Some(libc::EPERM));
        assert!(err.to_string().contains("Operation not permitted"));
    }

    #[test]
    fn test_socket_permission_denied() {
        let err = Error::Socket(io::Error::from_raw_os_error(libc::EACCES));
        assert!(err.is_permission_denied());
        assert_eq!(err.to_string(), "failed to open netlink socket");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), io::Error::from_raw_os_error(libc::EACCES).to_string());

        let err = Error::Receive(io::Error::from_raw_os_error(libc::EBADF));
        assert!(!err.is_permission_denied());
        assert_eq!(err.errno(), Some(libc::EBADF));
    }

    #[test]
    fn test_is_fatal() {
        assert!(Error::Send(io::Error::other("gone")).is_fatal());
        assert!(
            Error::ShortSend {
                expected: 20,
                actual: 12
            }
            .is_fatal()
        );
        assert!(!Error::Closed.is_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::ShortSend {
            expected: 20,
            actual: 12,
        };
        assert_eq!(err.to_string(), "short send: wrote 12 of 20 bytes");

        assert_eq!(Error::Closed.to_string(), "client is closed");

        let err = Error::Truncated {
            expected: 16,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "message truncated: expected 16 bytes, got 3"
        );
    }
}
