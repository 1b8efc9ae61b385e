//! DHCP response factory module.
//!
//! Pure constructors for the three server-side reply kinds. Each copies
//! the client-identifying fields from the request, fills the reply
//! specific fields, resolves configured options against the request
//! (see [`DhcpOption::apply`]) and pre-computes the destination address
//! per RFC 2131 §4.1.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use dhcp_protocol::{
    DhcpOption, MessageType, OptionTag, Packet, DHCP_PORT_CLIENT, DHCP_PORT_SERVER,
};

use crate::error::{Error, Result};

/// Builds a DHCPOFFER answering a DISCOVER.
///
/// # Errors
/// [`Error::BadRequest`] for a BOOTP request or a non-DISCOVER message.
pub fn make_offer(
    request: &Packet,
    offered: Ipv4Addr,
    lease_time: u32,
    server_id: Ipv4Addr,
    message: Option<&str>,
    extra: &[DhcpOption],
) -> Result<Packet> {
    check_request(request, &[MessageType::DhcpDiscover])?;

    let mut response = reply_skeleton(request)?;
    response.yiaddr = offered;
    response.set_message_type(MessageType::DhcpOffer)?;
    response.set_option_u32(OptionTag::AddressTime as u8, lease_time)?;
    response.set_option_ipv4(OptionTag::DhcpServerId as u8, server_id)?;
    finish(&mut response, request, message, extra)?;
    Ok(response)
}

/// Builds a DHCPACK answering a REQUEST or an INFORM. An INFORM only
/// carries configuration parameters, so the assigned address and lease
/// time are attached for REQUEST alone.
pub fn make_ack(
    request: &Packet,
    assigned: Ipv4Addr,
    lease_time: u32,
    server_id: Ipv4Addr,
    message: Option<&str>,
    extra: &[DhcpOption],
) -> Result<Packet> {
    check_request(request, &[MessageType::DhcpRequest, MessageType::DhcpInform])?;

    let mut response = reply_skeleton(request)?;
    response.ciaddr = request.ciaddr;
    if request.message_type() == Some(MessageType::DhcpRequest) {
        response.yiaddr = assigned;
        response.set_option_u32(OptionTag::AddressTime as u8, lease_time)?;
    }
    response.set_message_type(MessageType::DhcpAck)?;
    response.set_option_ipv4(OptionTag::DhcpServerId as u8, server_id)?;
    finish(&mut response, request, message, extra)?;
    Ok(response)
}

/// Builds a DHCPNAK refusing a REQUEST. Carries no address fields.
pub fn make_nak(
    request: &Packet,
    server_id: Ipv4Addr,
    message: Option<&str>,
) -> Result<Packet> {
    check_request(request, &[MessageType::DhcpRequest])?;

    let mut response = reply_skeleton(request)?;
    response.set_message_type(MessageType::DhcpNak)?;
    response.set_option_ipv4(OptionTag::DhcpServerId as u8, server_id)?;
    finish(&mut response, request, message, &[])?;
    Ok(response)
}

/// Where a reply should be sent (RFC 2131 §4.1):
/// - a relayed request (`giaddr` set) goes back through the relay on the
///   server port;
/// - OFFER and ACK go to `ciaddr` on the client port when the client has
///   an address, otherwise to the limited broadcast;
/// - NAK is always broadcast, the client cannot be assumed reachable at
///   any unicast address.
///
/// # Errors
/// [`Error::InvalidArgument`] for a response type a server never sends.
pub fn default_socket_address(
    request: &Packet,
    response_type: MessageType,
) -> Result<SocketAddr> {
    let relayed = !request.giaddr.is_unspecified();
    let destination = match response_type {
        MessageType::DhcpOffer | MessageType::DhcpAck => {
            if relayed {
                SocketAddrV4::new(request.giaddr, DHCP_PORT_SERVER)
            } else if !request.ciaddr.is_unspecified() {
                SocketAddrV4::new(request.ciaddr, DHCP_PORT_CLIENT)
            } else {
                SocketAddrV4::new(Ipv4Addr::BROADCAST, DHCP_PORT_CLIENT)
            }
        }
        MessageType::DhcpNak => {
            if relayed {
                SocketAddrV4::new(request.giaddr, DHCP_PORT_SERVER)
            } else {
                SocketAddrV4::new(Ipv4Addr::BROADCAST, DHCP_PORT_CLIENT)
            }
        }
        _ => {
            return Err(Error::InvalidArgument(
                "destination is defined for OFFER, ACK and NAK only",
            ))
        }
    };
    Ok(SocketAddr::V4(destination))
}

fn check_request(request: &Packet, allowed: &[MessageType]) -> Result<()> {
    if !request.is_dhcp {
        return Err(Error::BadRequest("cannot answer a plain BOOTP request"));
    }
    match request.message_type() {
        Some(message_type) if allowed.contains(&message_type) => Ok(()),
        _ => Err(Error::BadRequest("unexpected request message type")),
    }
}

/// The fields every reply copies from the request.
fn reply_skeleton(request: &Packet) -> Result<Packet> {
    let mut response = Packet::new();
    response.htype = request.htype;
    response.hlen = request.hlen;
    response.xid = request.xid;
    response.flags = request.flags;
    response.giaddr = request.giaddr;
    response
        .set_chaddr(request.chaddr())
        .map_err(Error::Protocol)?;
    Ok(response)
}

fn finish(
    response: &mut Packet,
    request: &Packet,
    message: Option<&str>,
    extra: &[DhcpOption],
) -> Result<()> {
    if let Some(message) = message {
        response.set_option_str(OptionTag::DhcpMessage as u8, message)?;
    }
    for option in extra {
        response.set_option(option.apply(request).clone());
    }
    let response_type = response
        .message_type()
        .ok_or(Error::InvalidArgument("response carries no message type"))?;
    response.address = Some(default_socket_address(request, response_type)?);
    Ok(())
}
