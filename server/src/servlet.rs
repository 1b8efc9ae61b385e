//! Servlet module.
//!
//! A servlet holds the address-assignment policy. The server core only
//! moves datagrams; everything the reply contains comes from a servlet
//! implementation, usually built with the response factory in
//! [`crate::builder`].

use std::net::SocketAddr;

use dhcp_protocol::{MessageType, OperationCode, Packet};

use crate::config::ServerConfig;
use crate::error::Result;

/// Per-message-type request handler.
///
/// Every handler returns the full reply packet or `None` to stay
/// silent. The default implementation answers nothing.
pub trait DhcpServlet: Send + Sync {
    /// Called once before the server starts serving. The configuration
    /// is mutable here so a servlet can publish derived properties.
    fn init(&mut self, _config: &mut ServerConfig) {}

    fn discover(&self, _request: &Packet) -> Option<Packet> {
        None
    }

    fn request(&self, _request: &Packet) -> Option<Packet> {
        None
    }

    fn inform(&self, _request: &Packet) -> Option<Packet> {
        None
    }

    fn decline(&self, _request: &Packet) -> Option<Packet> {
        None
    }

    fn release(&self, _request: &Packet) -> Option<Packet> {
        None
    }

    /// Called with the serialized request and response just before the
    /// response is sent. Returning an error suppresses the send.
    fn post_process(&self, _request: &[u8], _response: &[u8]) -> Result<()> {
        Ok(())
    }
}

/// Routes a decoded request to the servlet handler for its message
/// type. Packets a server has no business answering (BOOTP without a
/// message type, inbound replies, client-side message types) are
/// dropped here.
pub fn service(servlet: &dyn DhcpServlet, request: &Packet) -> Option<Packet> {
    match OperationCode::from(request.op) {
        OperationCode::BootRequest => {}
        OperationCode::BootReply => {
            log::debug!("ignoring inbound BOOTREPLY");
            return None;
        }
        OperationCode::Undefined => {
            log::debug!("ignoring packet with opcode {}", request.op);
            return None;
        }
    }

    let message_type = match request.message_type() {
        Some(message_type) if request.is_dhcp => message_type,
        _ => {
            log::debug!("ignoring BOOTP request without a DHCP message type");
            return None;
        }
    };

    match message_type {
        MessageType::DhcpDiscover => servlet.discover(request),
        MessageType::DhcpRequest => servlet.request(request),
        MessageType::DhcpInform => servlet.inform(request),
        MessageType::DhcpDecline => servlet.decline(request),
        MessageType::DhcpRelease => servlet.release(request),
        other => {
            log::debug!("ignoring request with message type {}", other);
            None
        }
    }
}

/// The full per-datagram pipeline: strict decode, dispatch, encode,
/// destination lookup and the post-process gate.
///
/// `Ok(None)` means the datagram needs no reply; an error means it was
/// unanswerable (malformed, or the servlet vetoed the send).
pub fn service_datagram(
    servlet: &dyn DhcpServlet,
    data: &[u8],
    source: SocketAddr,
) -> Result<Option<(Vec<u8>, SocketAddr)>> {
    let request = Packet::from_datagram(data, source, true)?;
    log::trace!("request from {}:\n{}", source, request);

    let response = match service(servlet, &request) {
        Some(response) => response,
        None => return Ok(None),
    };
    let destination = match response.address {
        Some(destination) => destination,
        None => {
            log::warn!("response to {} has no destination, dropping", source);
            return Ok(None);
        }
    };

    let bytes = response.to_bytes()?;
    servlet.post_process(data, &bytes)?;
    log::trace!("response to {}:\n{}", destination, response);
    Ok(Some((bytes, destination)))
}
