//! Low-level blocking netlink socket operations.

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

use bytes::BytesMut;
use netlink_sys::{Socket, SocketAddr, protocols};

/// How the socket gets its local port ID.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BindMode {
    /// No explicit bind; the kernel auto-binds on the first send. Requests
    /// carry the process ID as their sender pid.
    #[default]
    Auto,
    /// Bind to a kernel-assigned port ID up front and stamp requests with it.
    Kernel,
}

/// Datagram transport between the dump client and the kernel.
///
/// [`NetlinkSocket`] is the real implementation; tests substitute a
/// scripted one.
pub trait Transport {
    /// Send one frame to the kernel, returning the number of bytes written.
    fn send(&mut self, frame: &[u8]) -> io::Result<usize>;

    /// Receive one datagram into the spare capacity of `buf`, blocking until
    /// one arrives.
    ///
    /// Returns the full length of the datagram. When that exceeds the spare
    /// capacity only the leading bytes are stored in `buf` and the rest is
    /// discarded, so callers detect truncation by comparing the returned
    /// length with `buf.len()`.
    fn recv(&mut self, buf: &mut BytesMut) -> io::Result<usize>;

    /// Port ID to put in the `nlmsg_pid` field of outgoing requests.
    fn port_id(&self) -> u32;
}

/// Blocking `NETLINK_ROUTE` socket.
pub struct NetlinkSocket {
    socket: Socket,
    /// Port ID stamped on requests.
    pid: u32,
}

impl NetlinkSocket {
    /// Open a routing socket.
    pub fn new(bind: BindMode) -> io::Result<Self> {
        let mut socket = Socket::new(protocols::NETLINK_ROUTE)?;

        let pid = match bind {
            BindMode::Auto => std::process::id(),
            BindMode::Kernel => {
                let mut addr = SocketAddr::new(0, 0);
                socket.bind(&addr)?;
                socket.get_address(&mut addr)?;
                addr.port_number()
            }
        };

        Ok(Self { socket, pid })
    }
}

impl Transport for NetlinkSocket {
    fn send(&mut self, frame: &[u8]) -> io::Result<usize> {
        // Port 0 is the kernel.
        let kernel = SocketAddr::new(0, 0);
        self.socket.send_to(frame, &kernel, 0)
    }

    fn recv(&mut self, buf: &mut BytesMut) -> io::Result<usize> {
        let spare = buf.spare_capacity_mut();
        // SAFETY: the pointer and length describe the spare capacity of
        // `buf`, which stays borrowed for the duration of the call. With
        // MSG_TRUNC the kernel still writes at most `spare.len()` bytes but
        // reports the full datagram length.
        let ret = unsafe {
            libc::recv(
                self.as_raw_fd(),
                spare.as_mut_ptr().cast(),
                spare.len(),
                libc::MSG_TRUNC,
            )
        };
        if ret < 0 {
            return Err(io::Error::last_os_error());
        }

        let len = ret as usize;
        let copied = len.min(spare.len());
        // SAFETY: the kernel initialized the first `copied` bytes of the
        // spare capacity.
        unsafe { buf.set_len(buf.len() + copied) };
        Ok(len)
    }

    fn port_id(&self) -> u32 {
        self.pid
    }
}

impl AsRawFd for NetlinkSocket {
    fn as_raw_fd(&self) -> RawFd {
        self.socket.as_raw_fd()
    }
}

impl std::fmt::Debug for NetlinkSocket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetlinkSocket")
            .field("fd", &self.as_raw_fd())
            .field("pid", &self.pid)
            .finish()
    }
}
