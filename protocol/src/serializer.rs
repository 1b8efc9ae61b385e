//! DHCP packet serialization.

use bytes::BufMut;

use crate::constants::{
    MAGIC_COOKIE, SIZE_PACKET_DEFAULT_MAX, SIZE_PACKET_MAXIMUM, SIZE_PACKET_MINIMUM,
    SIZE_VENDOR_FIELD,
};
use crate::error::Error;
use crate::options::OptionTag;
use crate::packet::Packet;

impl Packet {
    /// Serializes with the conventional bounds: padded to at least the
    /// fixed header plus the 64 byte vendor field for DHCP, and capped at
    /// the 576 byte default client maximum.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let min_size = if self.is_dhcp {
            SIZE_PACKET_MINIMUM + SIZE_VENDOR_FIELD
        } else {
            SIZE_PACKET_MINIMUM
        };
        self.to_bytes_bounded(min_size, SIZE_PACKET_DEFAULT_MAX)
    }

    /// Serializes with explicit bounds. The result is zero-filled up to
    /// `min_size`; a result over `min(max_size, 1500)` is an error, as
    /// the peer would not accept it.
    ///
    /// # Errors
    /// [`Error::OptionTooLong`] for an option value over 255 bytes,
    /// [`Error::PacketTooBig`] when the encoding exceeds the bound.
    pub fn to_bytes_bounded(&self, min_size: usize, max_size: usize) -> Result<Vec<u8>, Error> {
        let mut buffer = Vec::with_capacity(min_size.max(SIZE_PACKET_MINIMUM));

        buffer.put_u8(self.op);
        buffer.put_u8(self.htype);
        buffer.put_u8(self.hlen);
        buffer.put_u8(self.hops);
        buffer.put_u32(self.xid);
        buffer.put_u16(self.secs);
        buffer.put_u16(self.flags);
        buffer.put_u32(u32::from(self.ciaddr));
        buffer.put_u32(u32::from(self.yiaddr));
        buffer.put_u32(u32::from(self.siaddr));
        buffer.put_u32(u32::from(self.giaddr));
        buffer.put_slice(self.chaddr());
        buffer.put_slice(self.sname_raw());
        buffer.put_slice(self.file_raw());

        if self.is_dhcp {
            buffer.put_slice(&MAGIC_COOKIE);
            for option in self.options() {
                if option.value().len() > u8::MAX as usize {
                    return Err(Error::OptionTooLong(option.code()));
                }
                buffer.put_u8(option.code());
                buffer.put_u8(option.value().len() as u8);
                buffer.put_slice(option.value());
            }
            buffer.put_u8(OptionTag::End as u8);
        }
        buffer.put_slice(&self.padding);

        if buffer.len() < min_size {
            buffer.resize(min_size, 0);
        }
        let limit = max_size.min(SIZE_PACKET_MAXIMUM);
        if buffer.len() > limit {
            return Err(Error::PacketTooBig(buffer.len()));
        }

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{DhcpOption, MessageType};
    use std::net::Ipv4Addr;

    fn offer() -> Packet {
        let mut packet = Packet::new();
        packet.xid = 0x2144_3322;
        packet.yiaddr = Ipv4Addr::new(192, 168, 0, 99);
        packet.set_message_type(MessageType::DhcpOffer).unwrap();
        packet.set_option_u32(51, 86400).unwrap();
        packet.set_option_ipv4(54, Ipv4Addr::new(192, 168, 0, 1)).unwrap();
        packet
    }

    #[test]
    fn pads_to_the_conventional_minimum() {
        let bytes = offer().to_bytes().unwrap();
        assert_eq!(bytes.len(), SIZE_PACKET_MINIMUM + SIZE_VENDOR_FIELD);
        assert_eq!(&bytes[236..240], &MAGIC_COOKIE);
        // fill after END is zero
        assert!(bytes[bytes.len() - 8..].iter().all(|&byte| byte == 0));
    }

    #[test]
    fn options_are_emitted_in_insertion_order() {
        let bytes = offer().to_bytes().unwrap();
        let mut codes = Vec::new();
        let mut index = 240;
        while bytes[index] != 255 {
            codes.push(bytes[index]);
            index += 2 + bytes[index + 1] as usize;
        }
        assert_eq!(codes, vec![53, 51, 54]);
    }

    #[test]
    fn bootp_has_no_cookie() {
        let mut packet = Packet::new();
        packet.is_dhcp = false;
        let bytes = packet.to_bytes().unwrap();
        assert_eq!(bytes.len(), SIZE_PACKET_MINIMUM);
    }

    #[test]
    fn oversize_option_is_rejected() {
        let mut packet = Packet::new();
        packet.set_option(DhcpOption::new(43, vec![0u8; 300]).unwrap());
        assert!(matches!(
            packet.to_bytes(),
            Err(Error::OptionTooLong(43))
        ));
    }

    #[test]
    fn max_size_is_a_hard_bound() {
        let mut packet = offer();
        packet.set_option(DhcpOption::new(43, vec![0u8; 255]).unwrap());
        packet.set_option(DhcpOption::new(224, vec![0u8; 255]).unwrap());

        assert!(matches!(
            packet.to_bytes_bounded(SIZE_PACKET_MINIMUM, 576),
            Err(Error::PacketTooBig(_))
        ));
        assert!(packet
            .to_bytes_bounded(SIZE_PACKET_MINIMUM, SIZE_PACKET_MAXIMUM)
            .is_ok());
    }

    #[test]
    fn round_trip_preserves_the_packet() {
        let original = offer();
        let bytes = original.to_bytes().unwrap();
        let decoded = Packet::from_bytes(&bytes, true).unwrap();
        // zero-fill after END decodes back into padding
        assert_eq!(decoded.options(), original.options());
        assert_eq!(decoded.xid, original.xid);
        assert_eq!(decoded.yiaddr, original.yiaddr);
        assert!(decoded.is_dhcp);
    }
}
