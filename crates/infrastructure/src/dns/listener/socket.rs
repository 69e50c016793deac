use ferrous_doh_domain::DomainError;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use tokio::net::{TcpListener, UdpSocket};

const UDP_KERNEL_RECV_BUFFER: usize = 512 * 1024;
const UDP_KERNEL_SEND_BUFFER: usize = 512 * 1024;
const TCP_BACKLOG: i32 = 1024;

/// Binds the service UDP socket. Must be called inside a tokio runtime.
pub fn bind_udp(socket_addr: SocketAddr) -> Result<UdpSocket, DomainError> {
    create_udp_socket(socket_addr).map_err(|e| bind_error(socket_addr, "UDP", e))
}

/// Binds the service TCP listener. Must be called inside a tokio runtime.
pub fn bind_tcp(socket_addr: SocketAddr) -> Result<TcpListener, DomainError> {
    create_tcp_listener(socket_addr).map_err(|e| bind_error(socket_addr, "TCP", e))
}

fn create_udp_socket(socket_addr: SocketAddr) -> io::Result<UdpSocket> {
    let socket = Socket::new(domain_for(socket_addr), Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(UDP_KERNEL_RECV_BUFFER)?;
    socket.set_send_buffer_size(UDP_KERNEL_SEND_BUFFER)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}

fn create_tcp_listener(socket_addr: SocketAddr) -> io::Result<TcpListener> {
    let socket = Socket::new(domain_for(socket_addr), Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(TCP_BACKLOG)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

fn domain_for(socket_addr: SocketAddr) -> Domain {
    if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    }
}

fn bind_error(socket_addr: SocketAddr, proto: &str, e: io::Error) -> DomainError {
    let reason = if e.kind() == io::ErrorKind::PermissionDenied {
        format!(
            "{} bind refused ({}); ports below 1024 need root or CAP_NET_BIND_SERVICE",
            proto, e
        )
    } else {
        format!("{} bind failed: {}", proto, e)
    };

    DomainError::Bind {
        addr: socket_addr.to_string(),
        reason,
    }
}
