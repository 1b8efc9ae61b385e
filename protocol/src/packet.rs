//! DHCP packet module.
//!
//! A mutable in-memory model of one BOOTP/DHCP message. The fixed header
//! fields are plain public fields; the hardware address, server name and
//! boot filename are kept behind accessors that enforce the wire field
//! sizes, and options live in an insertion-ordered list so serialization
//! reproduces the order in which they were set.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};

use eui48::MacAddress;

use crate::constants::{SIZE_BOOT_FILENAME, SIZE_HARDWARE_ADDRESS, SIZE_SERVER_NAME};
use crate::error::Error;
use crate::hardware_type::HardwareType;
use crate::operation_code::OperationCode;
use crate::options::{DhcpOption, MessageType, OptionTag};

/// One BOOTP/DHCP message.
#[derive(Debug)]
pub struct Packet {
    /// Message opcode, see [`OperationCode`].
    pub op: u8,
    /// Hardware address type, see [`HardwareType`].
    pub htype: u8,
    /// Hardware address length.
    pub hlen: u8,
    /// Relay hop count.
    pub hops: u8,
    /// Transaction identifier chosen by the client.
    pub xid: u32,
    /// Seconds elapsed since the client began acquisition.
    pub secs: u16,
    /// Flags field, bit 15 is the broadcast flag.
    pub flags: u16,
    /// Client's current address.
    pub ciaddr: Ipv4Addr,
    /// Address the server assigns to the client.
    pub yiaddr: Ipv4Addr,
    /// Next bootstrap server address.
    pub siaddr: Ipv4Addr,
    /// Relay agent address.
    pub giaddr: Ipv4Addr,
    chaddr: [u8; SIZE_HARDWARE_ADDRESS],
    sname: [u8; SIZE_SERVER_NAME],
    file: [u8; SIZE_BOOT_FILENAME],
    /// `false` for a plain BOOTP packet without the magic cookie.
    pub is_dhcp: bool,
    /// Bytes found after the END option on decode, re-emitted verbatim
    /// on encode.
    pub padding: Vec<u8>,
    /// Peer address, set on decode from a datagram and read by the
    /// server when sending a response.
    pub address: Option<SocketAddr>,

    options: Vec<DhcpOption>,
    truncated: bool,
}

impl Default for Packet {
    fn default() -> Self {
        Packet {
            op: OperationCode::BootReply as u8,
            htype: HardwareType::Ethernet as u8,
            hlen: 6,
            hops: 0,
            xid: 0,
            secs: 0,
            flags: 0,
            ciaddr: Ipv4Addr::UNSPECIFIED,
            yiaddr: Ipv4Addr::UNSPECIFIED,
            siaddr: Ipv4Addr::UNSPECIFIED,
            giaddr: Ipv4Addr::UNSPECIFIED,
            chaddr: [0u8; SIZE_HARDWARE_ADDRESS],
            sname: [0u8; SIZE_SERVER_NAME],
            file: [0u8; SIZE_BOOT_FILENAME],
            is_dhcp: true,
            padding: Vec::new(),
            address: None,
            options: Vec::new(),
            truncated: false,
        }
    }
}

impl Packet {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // options

    /// Looks up an option by code.
    pub fn option(&self, code: u8) -> Option<&DhcpOption> {
        self.options.iter().find(|option| option.code() == code)
    }

    /// All options in insertion order.
    pub fn options(&self) -> &[DhcpOption] {
        &self.options
    }

    /// Inserts or replaces an option. Replacing keeps the original list
    /// position. An empty value removes the option instead.
    pub fn set_option(&mut self, option: DhcpOption) {
        if option.value().is_empty() {
            self.remove_option(option.code());
            return;
        }
        match self
            .options
            .iter_mut()
            .find(|existing| existing.code() == option.code())
        {
            Some(existing) => *existing = option,
            None => self.options.push(option),
        }
    }

    /// Sets an option from raw bytes. An empty value removes the option.
    ///
    /// # Errors
    /// [`Error::ReservedOptionCode`] for PAD and END.
    pub fn set_option_value(&mut self, code: u8, value: Vec<u8>) -> Result<(), Error> {
        if value.is_empty() {
            if code == OptionTag::Pad as u8 || code == OptionTag::End as u8 {
                return Err(Error::ReservedOptionCode(code));
            }
            self.remove_option(code);
            return Ok(());
        }
        self.set_option(DhcpOption::new(code, value)?);
        Ok(())
    }

    pub fn remove_option(&mut self, code: u8) {
        self.options.retain(|option| option.code() != code);
    }

    pub fn clear_options(&mut self) {
        self.options.clear();
    }

    pub fn set_option_u8(&mut self, code: u8, value: u8) -> Result<(), Error> {
        self.set_option(DhcpOption::new_u8(code, value)?);
        Ok(())
    }

    pub fn set_option_u16(&mut self, code: u8, value: u16) -> Result<(), Error> {
        self.set_option(DhcpOption::new_u16(code, value)?);
        Ok(())
    }

    pub fn set_option_u32(&mut self, code: u8, value: u32) -> Result<(), Error> {
        self.set_option(DhcpOption::new_u32(code, value)?);
        Ok(())
    }

    pub fn set_option_ipv4(&mut self, code: u8, value: Ipv4Addr) -> Result<(), Error> {
        self.set_option(DhcpOption::new_ipv4(code, value)?);
        Ok(())
    }

    pub fn set_option_ipv4s(&mut self, code: u8, value: &[Ipv4Addr]) -> Result<(), Error> {
        self.set_option(DhcpOption::new_ipv4s(code, value)?);
        Ok(())
    }

    pub fn set_option_str(&mut self, code: u8, value: &str) -> Result<(), Error> {
        self.set_option(DhcpOption::new_str(code, value)?);
        Ok(())
    }

    /// The DHCP message type, `None` when the option is absent or not a
    /// single byte.
    pub fn message_type(&self) -> Option<MessageType> {
        let option = self.option(OptionTag::DhcpMessageType as u8)?;
        match option.value() {
            [value] => Some(MessageType::from(*value)),
            _ => None,
        }
    }

    pub fn set_message_type(&mut self, message_type: MessageType) -> Result<(), Error> {
        self.set_option_value(
            OptionTag::DhcpMessageType as u8,
            vec![message_type as u8],
        )
    }

    // ------------------------------------------------------------------
    // fixed-size fields

    /// The full 16 byte `chaddr` field.
    pub fn chaddr(&self) -> &[u8; SIZE_HARDWARE_ADDRESS] {
        &self.chaddr
    }

    /// The significant hardware address bytes, `hlen` clamped to the
    /// field size.
    pub fn hardware_address(&self) -> &[u8] {
        let len = (self.hlen as usize).min(SIZE_HARDWARE_ADDRESS);
        &self.chaddr[..len]
    }

    /// The client MAC address, only meaningful for Ethernet.
    pub fn chaddr_mac(&self) -> Option<MacAddress> {
        if self.htype == HardwareType::Ethernet as u8 && self.hlen == 6 {
            MacAddress::from_bytes(&self.chaddr[..6]).ok()
        } else {
            None
        }
    }

    /// Copies a hardware address into `chaddr`, zero-filling the rest.
    /// Does not touch `htype` or `hlen`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if longer than 16 bytes.
    pub fn set_chaddr(&mut self, address: &[u8]) -> Result<(), Error> {
        if address.len() > SIZE_HARDWARE_ADDRESS {
            return Err(Error::InvalidArgument("hardware address longer than 16 bytes"));
        }
        self.chaddr = [0u8; SIZE_HARDWARE_ADDRESS];
        self.chaddr[..address.len()].copy_from_slice(address);
        Ok(())
    }

    /// Sets `htype`, `hlen` and `chaddr` from an Ethernet MAC address.
    pub fn set_chaddr_mac(&mut self, address: MacAddress) {
        self.htype = HardwareType::Ethernet as u8;
        self.hlen = 6;
        self.chaddr = [0u8; SIZE_HARDWARE_ADDRESS];
        self.chaddr[..6].copy_from_slice(address.as_bytes());
    }

    pub(crate) fn chaddr_mut(&mut self) -> &mut [u8; SIZE_HARDWARE_ADDRESS] {
        &mut self.chaddr
    }

    /// The server host name, bytes up to the first NUL.
    pub fn sname_str(&self) -> String {
        field_to_string(&self.sname)
    }

    /// # Errors
    /// [`Error::InvalidArgument`] for non-ASCII input or more than 64
    /// characters.
    pub fn set_sname(&mut self, sname: &str) -> Result<(), Error> {
        string_to_field(sname, &mut self.sname)
            .map_err(|_| Error::InvalidArgument("sname must be ASCII, at most 64 characters"))
    }

    pub(crate) fn sname_mut(&mut self) -> &mut [u8; SIZE_SERVER_NAME] {
        &mut self.sname
    }

    /// The boot file name, bytes up to the first NUL.
    pub fn file_str(&self) -> String {
        field_to_string(&self.file)
    }

    /// # Errors
    /// [`Error::InvalidArgument`] for non-ASCII input or more than 128
    /// characters.
    pub fn set_file(&mut self, file: &str) -> Result<(), Error> {
        string_to_field(file, &mut self.file)
            .map_err(|_| Error::InvalidArgument("file must be ASCII, at most 128 characters"))
    }

    pub(crate) fn file_mut(&mut self) -> &mut [u8; SIZE_BOOT_FILENAME] {
        &mut self.file
    }

    pub(crate) fn sname_raw(&self) -> &[u8; SIZE_SERVER_NAME] {
        &self.sname
    }

    pub(crate) fn file_raw(&self) -> &[u8; SIZE_BOOT_FILENAME] {
        &self.file
    }

    // ------------------------------------------------------------------
    // decode state

    /// `true` when decoding hit the end of the buffer before the END
    /// option. The fields parsed so far are still usable.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub(crate) fn mark_truncated(&mut self) {
        self.truncated = true;
    }
}

/// Clones everything except the truncated flag, which describes the
/// buffer the original was decoded from, not the copy.
impl Clone for Packet {
    fn clone(&self) -> Self {
        Packet {
            op: self.op,
            htype: self.htype,
            hlen: self.hlen,
            hops: self.hops,
            xid: self.xid,
            secs: self.secs,
            flags: self.flags,
            ciaddr: self.ciaddr,
            yiaddr: self.yiaddr,
            siaddr: self.siaddr,
            giaddr: self.giaddr,
            chaddr: self.chaddr,
            sname: self.sname,
            file: self.file,
            is_dhcp: self.is_dhcp,
            padding: self.padding.clone(),
            address: self.address,
            options: self.options.clone(),
            truncated: false,
        }
    }
}

/// Semantic equality: two packets that serialize identically are equal.
/// The truncated flag and the peer address are transport metadata and do
/// not participate.
impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.op == other.op
            && self.htype == other.htype
            && self.hlen == other.hlen
            && self.hops == other.hops
            && self.xid == other.xid
            && self.secs == other.secs
            && self.flags == other.flags
            && self.ciaddr == other.ciaddr
            && self.yiaddr == other.yiaddr
            && self.siaddr == other.siaddr
            && self.giaddr == other.giaddr
            && self.chaddr == other.chaddr
            && self.sname[..] == other.sname[..]
            && self.file[..] == other.file[..]
            && self.is_dhcp == other.is_dhcp
            && self.padding == other.padding
            && self.options == other.options
    }
}

impl Eq for Packet {}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.message_type() {
            Some(message_type) => writeln!(f, "{}", message_type)?,
            None => writeln!(f, "{}", if self.is_dhcp { "DHCP" } else { "BOOTP" })?,
        }
        writeln!(
            f,
            "op      {} ({})",
            OperationCode::from(self.op),
            self.op
        )?;
        writeln!(
            f,
            "htype   {} ({})",
            HardwareType::from(self.htype),
            self.htype
        )?;
        writeln!(f, "hlen    {}", self.hlen)?;
        writeln!(f, "hops    {}", self.hops)?;
        writeln!(f, "xid     {:#010x}", self.xid)?;
        writeln!(f, "secs    {}", self.secs)?;
        writeln!(f, "flags   {:#06x}", self.flags)?;
        writeln!(f, "ciaddr  {}", self.ciaddr)?;
        writeln!(f, "yiaddr  {}", self.yiaddr)?;
        writeln!(f, "siaddr  {}", self.siaddr)?;
        writeln!(f, "giaddr  {}", self.giaddr)?;
        write!(f, "chaddr  0x")?;
        for byte in self.hardware_address() {
            write!(f, "{:02x}", byte)?;
        }
        writeln!(f)?;
        writeln!(f, "sname   {}", self.sname_str())?;
        writeln!(f, "file    {}", self.file_str())?;
        writeln!(f, "options:")?;
        for option in &self.options {
            writeln!(f, "    {}", option)?;
        }
        Ok(())
    }
}

fn field_to_string(field: &[u8]) -> String {
    field
        .iter()
        .take_while(|&&byte| byte != 0)
        .map(|&byte| byte as char)
        .collect()
}

fn string_to_field(value: &str, field: &mut [u8]) -> Result<(), ()> {
    if !value.is_ascii() || value.len() > field.len() {
        return Err(());
    }
    for byte in field.iter_mut() {
        *byte = 0;
    }
    field[..value.len()].copy_from_slice(value.as_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_an_empty_reply() {
        let packet = Packet::new();
        assert_eq!(packet.op, OperationCode::BootReply as u8);
        assert_eq!(packet.htype, HardwareType::Ethernet as u8);
        assert_eq!(packet.hlen, 6);
        assert!(packet.is_dhcp);
        assert!(packet.options().is_empty());
        assert!(!packet.is_truncated());
    }

    #[test]
    fn replacing_an_option_keeps_its_position() {
        let mut packet = Packet::new();
        packet.set_option_u32(51, 100).unwrap();
        packet.set_option_ipv4(54, Ipv4Addr::new(10, 0, 0, 1)).unwrap();
        packet.set_option_u32(51, 200).unwrap();

        let codes: Vec<u8> = packet.options().iter().map(|o| o.code()).collect();
        assert_eq!(codes, vec![51, 54]);
        assert_eq!(packet.option(51).unwrap().value_as_u32().unwrap(), 200);
    }

    #[test]
    fn empty_value_removes_the_option() {
        let mut packet = Packet::new();
        packet.set_option_u32(51, 100).unwrap();
        packet.set_option_value(51, Vec::new()).unwrap();
        assert!(packet.option(51).is_none());
    }

    #[test]
    fn message_type_round_trip() {
        let mut packet = Packet::new();
        assert_eq!(packet.message_type(), None);
        packet.set_message_type(MessageType::DhcpOffer).unwrap();
        assert_eq!(packet.message_type(), Some(MessageType::DhcpOffer));
    }

    #[test]
    fn chaddr_mac_requires_ethernet() {
        let mut packet = Packet::new();
        let mac = MacAddress::from_bytes(&[0, 11, 22, 33, 44, 55]).unwrap();
        packet.set_chaddr_mac(mac);
        assert_eq!(packet.chaddr_mac(), Some(mac));
        assert_eq!(packet.hardware_address(), &[0, 11, 22, 33, 44, 55]);

        packet.htype = HardwareType::Fddi as u8;
        assert_eq!(packet.chaddr_mac(), None);
    }

    #[test]
    fn sname_and_file_are_bounded() {
        let mut packet = Packet::new();
        packet.set_sname("dhcp.example.org").unwrap();
        assert_eq!(packet.sname_str(), "dhcp.example.org");

        let too_long = "x".repeat(65);
        assert!(packet.set_sname(&too_long).is_err());

        packet.set_file("pxelinux.0").unwrap();
        assert_eq!(packet.file_str(), "pxelinux.0");
        assert!(packet.set_file(&"y".repeat(129)).is_err());
    }

    #[test]
    fn clone_clears_the_truncated_flag() {
        let mut packet = Packet::new();
        packet.mark_truncated();
        assert!(packet.is_truncated());
        assert!(!packet.clone().is_truncated());
    }

    #[test]
    fn equality_ignores_transport_metadata() {
        let mut left = Packet::new();
        left.set_option_u32(51, 3600).unwrap();
        let mut right = left.clone();
        right.address = Some("127.0.0.1:68".parse().unwrap());
        right.mark_truncated();
        assert_eq!(left, right);

        right.xid = 1;
        assert_ne!(left, right);
    }
}
