// Reusable listener module
// Binds the action server's TCP listener through socket2

use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::error::ServerError;

/// Pending connection queue length handed to `listen(2)`
const BACKLOG: i32 = 128;

/// Create a `TcpListener` with `SO_REUSEADDR` (and `SO_REUSEPORT` on Unix).
///
/// Reuse lets a restarted server bind while old sockets of the previous
/// process are still in `TIME_WAIT`.
///
/// # Errors
///
/// `ServerError::Bind` carrying the address when any socket call fails.
pub fn create_reusable_listener(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    bind(addr).map_err(|source| ServerError::Bind { addr, source })
}

fn bind(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;

    // Tokio requires non-blocking sockets
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        assert!(addr.port() > 0);
    }

    #[tokio::test]
    async fn test_bind_error_carries_address() {
        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();

        // Plain std bind without SO_REUSEPORT holds the port exclusively
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let taken_addr = taken.local_addr().unwrap();
        match create_reusable_listener(taken_addr) {
            Err(ServerError::Bind { addr: failed, .. }) => assert_eq!(failed, taken_addr),
            Ok(_) => panic!("expected bind failure on {taken_addr}"),
            Err(other) => panic!("unexpected error: {other}"),
        }
        drop(listener);
        assert_ne!(addr, taken_addr);
    }
}
