//! DHCP socket module.

use std::io;
use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;

use dhcp_protocol::{Packet, SIZE_PACKET_MAXIMUM};

/// A UDP socket configured for DHCP traffic.
///
/// The underlying socket has `SO_REUSEADDR` set so a restarting server
/// can rebind port 67 immediately, and `SO_BROADCAST` so responses can
/// reach clients that do not have an address yet.
pub struct DhcpFramed {
    socket: UdpSocket,
}

impl DhcpFramed {
    /// Binds to `addr`. Must be called from within a tokio runtime.
    pub fn bind(addr: SocketAddr) -> io::Result<Self> {
        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
        socket.set_reuse_address(true)?;
        socket.set_broadcast(true)?;
        socket.set_nonblocking(true)?;
        socket.bind(&addr.into())?;
        let socket = UdpSocket::from_std(socket.into())?;
        Ok(DhcpFramed { socket })
    }

    /// Receives one datagram. The buffer is sized to the protocol
    /// maximum, a larger datagram is truncated by the kernel and will be
    /// rejected downstream by the decoder.
    pub async fn recv(&self) -> io::Result<(Vec<u8>, SocketAddr)> {
        let mut buffer = vec![0u8; SIZE_PACKET_MAXIMUM];
        let (amount, source) = self.socket.recv_from(&mut buffer).await?;
        buffer.truncate(amount);
        log::trace!("received {} bytes from {}", amount, source);
        Ok((buffer, source))
    }

    /// Serializes `packet` with the default size bounds and sends it.
    /// A codec failure surfaces as [`io::ErrorKind::InvalidData`].
    pub async fn send(&self, packet: &Packet, destination: SocketAddr) -> io::Result<usize> {
        let data = packet
            .to_bytes()
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
        self.send_raw(&data, destination).await
    }

    pub async fn send_raw(&self, data: &[u8], destination: SocketAddr) -> io::Result<usize> {
        let amount = self.socket.send_to(data, destination).await?;
        log::trace!("sent {} bytes to {}", amount, destination);
        Ok(amount)
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}
