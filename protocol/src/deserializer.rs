//! DHCP packet deserialization.
//!
//! Decoding is zero-allocation-per-field over a byte slice cursor. The
//! lenient mode keeps whatever was parsed before the buffer ran out and
//! marks the packet truncated; strict mode turns that condition into an
//! error. A buffer without the magic cookie decodes as plain BOOTP with
//! no option parsing.

use std::net::{Ipv4Addr, SocketAddr};

use bytes::Buf;

use crate::constants::{MAGIC_COOKIE, SIZE_PACKET_MAXIMUM, SIZE_PACKET_MINIMUM};
use crate::error::Error;
use crate::options::{DhcpOption, OptionTag};
use crate::packet::Packet;

impl Packet {
    /// Decodes a packet from raw bytes.
    ///
    /// In lenient mode (`strict == false`) a buffer that ends before the
    /// END option still yields a packet, flagged via
    /// [`Packet::is_truncated`]. Strict mode rejects it with
    /// [`Error::TruncatedOptions`].
    ///
    /// # Errors
    /// [`Error::PacketTooSmall`] below 236 bytes,
    /// [`Error::PacketTooBig`] above 1500 bytes.
    pub fn from_bytes(data: &[u8], strict: bool) -> Result<Packet, Error> {
        if data.len() < SIZE_PACKET_MINIMUM {
            return Err(Error::PacketTooSmall(data.len()));
        }
        if data.len() > SIZE_PACKET_MAXIMUM {
            return Err(Error::PacketTooBig(data.len()));
        }

        let mut cursor = data;
        let mut packet = Packet::new();

        packet.op = cursor.get_u8();
        packet.htype = cursor.get_u8();
        packet.hlen = cursor.get_u8();
        packet.hops = cursor.get_u8();
        packet.xid = cursor.get_u32();
        packet.secs = cursor.get_u16();
        packet.flags = cursor.get_u16();
        packet.ciaddr = Ipv4Addr::from(cursor.get_u32());
        packet.yiaddr = Ipv4Addr::from(cursor.get_u32());
        packet.siaddr = Ipv4Addr::from(cursor.get_u32());
        packet.giaddr = Ipv4Addr::from(cursor.get_u32());
        cursor.copy_to_slice(packet.chaddr_mut());
        cursor.copy_to_slice(packet.sname_mut());
        cursor.copy_to_slice(packet.file_mut());

        if cursor.remaining() >= MAGIC_COOKIE.len() && cursor[..4] == MAGIC_COOKIE {
            cursor.advance(MAGIC_COOKIE.len());
            parse_options(&mut cursor, &mut packet)?;
            if packet.is_truncated() && strict {
                return Err(Error::TruncatedOptions);
            }
        } else {
            // Plain BOOTP. The vendor field is opaque, keep it verbatim.
            packet.is_dhcp = false;
            packet.padding = cursor.to_vec();
        }

        Ok(packet)
    }

    /// Decodes a packet received from `source`, recording the peer
    /// address for the response path.
    pub fn from_datagram(data: &[u8], source: SocketAddr, strict: bool) -> Result<Packet, Error> {
        let mut packet = Self::from_bytes(data, strict)?;
        packet.address = Some(source);
        Ok(packet)
    }
}

/// Walks the `[code][len][value]` sequence until END or end of buffer.
/// A declared length reaching past the buffer is clamped to what is
/// there. A duplicate code overwrites the earlier value in place.
fn parse_options(cursor: &mut &[u8], packet: &mut Packet) -> Result<(), Error> {
    while cursor.has_remaining() {
        let code = cursor.get_u8();
        if code == OptionTag::Pad as u8 {
            continue;
        }
        if code == OptionTag::End as u8 {
            packet.padding = cursor.to_vec();
            return Ok(());
        }
        if !cursor.has_remaining() {
            break;
        }
        let declared = cursor.get_u8() as usize;
        let available = declared.min(cursor.remaining());
        let value = cursor[..available].to_vec();
        cursor.advance(available);
        if !value.is_empty() {
            packet.set_option(DhcpOption::new(code, value)?);
        }
        if available < declared {
            break;
        }
    }
    packet.mark_truncated();
    Ok(())
}
