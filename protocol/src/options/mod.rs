//! DHCP option module.
//!
//! An option is an immutable `(code, value)` pair with typed accessors
//! gated by the format registry in [`format`]. The server-side `mirror`
//! flag marks an option whose value should be echoed from the client's
//! request when present, falling back to the configured default.

pub mod format;
pub mod message_type;
pub mod option_tag;

use std::fmt;
use std::net::Ipv4Addr;

use crate::error::Error;
use crate::packet::Packet;

pub use self::format::{format_of, OptionFormat};
pub use self::message_type::MessageType;
pub use self::option_tag::OptionTag;

/// A single DHCP option. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpOption {
    code: u8,
    value: Vec<u8>,
    mirror: bool,
}

/// Checks that the registry maps `code` to `format`, the precondition of
/// every typed constructor and accessor.
fn check_format(code: u8, requested: OptionFormat) -> Result<(), Error> {
    if format_of(code) == Some(requested) {
        Ok(())
    } else {
        Err(Error::WrongOptionFormat {
            code,
            requested: match requested {
                OptionFormat::Inet => "inet",
                OptionFormat::Inets => "inets",
                OptionFormat::Int => "int",
                OptionFormat::Short => "short",
                OptionFormat::Shorts => "shorts",
                OptionFormat::Byte => "byte",
                OptionFormat::Bytes => "bytes",
                OptionFormat::Str => "string",
            },
        })
    }
}

impl DhcpOption {
    /// Creates an option from raw bytes. The value must not be prefixed
    /// with a length byte, the codec adds it.
    ///
    /// # Errors
    /// [`Error::ReservedOptionCode`] for PAD (0) and END (255).
    pub fn new(code: u8, value: Vec<u8>) -> Result<Self, Error> {
        if code == OptionTag::Pad as u8 || code == OptionTag::End as u8 {
            return Err(Error::ReservedOptionCode(code));
        }
        Ok(DhcpOption {
            code,
            value,
            mirror: false,
        })
    }

    /// Creates a mirror option: a server using it echoes the client's
    /// value for this code when the request carries one, otherwise falls
    /// back to `value`. See [`DhcpOption::apply`].
    pub fn with_mirror(code: u8, value: Vec<u8>) -> Result<Self, Error> {
        let mut option = Self::new(code, value)?;
        option.mirror = true;
        Ok(option)
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    /// The raw value bytes.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn is_mirror(&self) -> bool {
        self.mirror
    }

    /// Resolves the option against a client request per the mirror rule:
    /// a non-mirror option is returned unchanged, a mirror option yields
    /// the client's option of the same code when present, else itself.
    pub fn apply<'a>(&'a self, request: &'a Packet) -> &'a DhcpOption {
        if self.mirror {
            request.option(self.code).unwrap_or(self)
        } else {
            self
        }
    }

    // ------------------------------------------------------------------
    // typed constructors

    pub fn new_u8(code: u8, value: u8) -> Result<Self, Error> {
        check_format(code, OptionFormat::Byte)?;
        Self::new(code, vec![value])
    }

    pub fn new_u16(code: u8, value: u16) -> Result<Self, Error> {
        check_format(code, OptionFormat::Short)?;
        Self::new(code, value.to_be_bytes().to_vec())
    }

    pub fn new_u32(code: u8, value: u32) -> Result<Self, Error> {
        check_format(code, OptionFormat::Int)?;
        Self::new(code, value.to_be_bytes().to_vec())
    }

    pub fn new_ipv4(code: u8, value: Ipv4Addr) -> Result<Self, Error> {
        if format_of(code) != Some(OptionFormat::Inets) {
            check_format(code, OptionFormat::Inet)?;
        }
        Self::new(code, value.octets().to_vec())
    }

    pub fn new_ipv4s(code: u8, value: &[Ipv4Addr]) -> Result<Self, Error> {
        check_format(code, OptionFormat::Inets)?;
        let mut buf = Vec::with_capacity(value.len() * 4);
        for address in value {
            buf.extend_from_slice(&address.octets());
        }
        Self::new(code, buf)
    }

    pub fn new_u16s(code: u8, value: &[u16]) -> Result<Self, Error> {
        check_format(code, OptionFormat::Shorts)?;
        let mut buf = Vec::with_capacity(value.len() * 2);
        for element in value {
            buf.extend_from_slice(&element.to_be_bytes());
        }
        Self::new(code, buf)
    }

    pub fn new_str(code: u8, value: &str) -> Result<Self, Error> {
        check_format(code, OptionFormat::Str)?;
        if !value.is_ascii() {
            return Err(Error::InvalidArgument("string options must be ASCII"));
        }
        Self::new(code, value.as_bytes().to_vec())
    }

    pub fn new_bytes(code: u8, value: Vec<u8>) -> Result<Self, Error> {
        check_format(code, OptionFormat::Bytes)?;
        Self::new(code, value)
    }

    // ------------------------------------------------------------------
    // typed accessors

    /// # Errors
    /// [`Error::WrongOptionFormat`] if the code is not registered as BYTE,
    /// [`Error::BadOptionSize`] if the stored value is not one byte.
    pub fn value_as_u8(&self) -> Result<u8, Error> {
        check_format(self.code, OptionFormat::Byte)?;
        if self.value.len() != 1 {
            return Err(self.bad_size("1"));
        }
        Ok(self.value[0])
    }

    pub fn value_as_u16(&self) -> Result<u16, Error> {
        check_format(self.code, OptionFormat::Short)?;
        match self.value.as_slice() {
            [hi, lo] => Ok(u16::from_be_bytes([*hi, *lo])),
            _ => Err(self.bad_size("2")),
        }
    }

    pub fn value_as_u32(&self) -> Result<u32, Error> {
        check_format(self.code, OptionFormat::Int)?;
        match self.value.as_slice() {
            [a, b, c, d] => Ok(u32::from_be_bytes([*a, *b, *c, *d])),
            _ => Err(self.bad_size("4")),
        }
    }

    pub fn value_as_ipv4(&self) -> Result<Ipv4Addr, Error> {
        check_format(self.code, OptionFormat::Inet)?;
        match self.value.as_slice() {
            [a, b, c, d] => Ok(Ipv4Addr::new(*a, *b, *c, *d)),
            _ => Err(self.bad_size("4")),
        }
    }

    pub fn value_as_ipv4s(&self) -> Result<Vec<Ipv4Addr>, Error> {
        check_format(self.code, OptionFormat::Inets)?;
        if self.value.len() % 4 != 0 {
            return Err(self.bad_size("4*n"));
        }
        Ok(self
            .value
            .chunks_exact(4)
            .map(|octets| Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]))
            .collect())
    }

    pub fn value_as_u16s(&self) -> Result<Vec<u16>, Error> {
        check_format(self.code, OptionFormat::Shorts)?;
        if self.value.len() % 2 != 0 {
            return Err(self.bad_size("2*n"));
        }
        Ok(self
            .value
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect())
    }

    /// One byte per character, no multi-byte decoding.
    pub fn value_as_str(&self) -> Result<String, Error> {
        check_format(self.code, OptionFormat::Str)?;
        Ok(self.value.iter().map(|&byte| byte as char).collect())
    }

    pub fn value_as_bytes(&self) -> Result<&[u8], Error> {
        check_format(self.code, OptionFormat::Bytes)?;
        Ok(&self.value)
    }

    fn bad_size(&self, expected: &'static str) -> Error {
        Error::BadOptionSize {
            code: self.code,
            len: self.value.len(),
            expected,
        }
    }
}

impl fmt::Display for DhcpOption {
    /// `NAME(code)=value`, the value rendered per its registered format.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::OptionFormat::*;

        let tag = OptionTag::from(self.code);
        if tag != OptionTag::Unknown {
            write!(f, "{}", tag)?;
        }
        write!(f, "({})=", self.code)?;
        if self.mirror {
            write!(f, "<mirror>")?;
        }

        if self.code == OptionTag::DhcpMessageType as u8 && self.value.len() == 1 {
            return write!(f, "{}", MessageType::from(self.value[0]));
        }

        match format_of(self.code) {
            Some(Inet) => match self.value_as_ipv4() {
                Ok(address) => write!(f, "{}", address),
                Err(_) => self.fmt_hex(f),
            },
            Some(Inets) => match self.value_as_ipv4s() {
                Ok(addresses) => {
                    for address in addresses {
                        write!(f, "{} ", address)?;
                    }
                    Ok(())
                }
                Err(_) => self.fmt_hex(f),
            },
            Some(Int) => match self.value_as_u32() {
                Ok(value) => write!(f, "{}", value),
                Err(_) => self.fmt_hex(f),
            },
            Some(Short) => match self.value_as_u16() {
                Ok(value) => write!(f, "{}", value),
                Err(_) => self.fmt_hex(f),
            },
            Some(Shorts) => match self.value_as_u16s() {
                Ok(values) => {
                    for value in values {
                        write!(f, "{} ", value)?;
                    }
                    Ok(())
                }
                Err(_) => self.fmt_hex(f),
            },
            Some(Byte) => match self.value_as_u8() {
                Ok(value) => write!(f, "{}", value),
                Err(_) => self.fmt_hex(f),
            },
            Some(Str) => write!(
                f,
                "\"{}\"",
                self.value.iter().map(|&b| b as char).collect::<String>()
            ),
            Some(Bytes) | None => self.fmt_hex(f),
        }
    }
}

impl DhcpOption {
    fn fmt_hex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.value {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBNET_MASK: u8 = 1;
    const LEASE_TIME: u8 = 51;
    const MESSAGE_TYPE: u8 = 53;

    #[test]
    fn reserved_codes_are_rejected() {
        assert!(matches!(
            DhcpOption::new(0, vec![1]),
            Err(Error::ReservedOptionCode(0))
        ));
        assert!(matches!(
            DhcpOption::new(255, vec![1]),
            Err(Error::ReservedOptionCode(255))
        ));
    }

    #[test]
    fn typed_accessor_requires_matching_format() {
        // SUBNET_MASK is INET, not INT
        let mask = DhcpOption::new(SUBNET_MASK, vec![255, 255, 255, 0]).unwrap();
        let error = mask.value_as_u32().unwrap_err();
        assert!(!error.is_malformed());

        // LEASE_TIME is INT, not INET
        let lease = DhcpOption::new_u32(LEASE_TIME, 3600).unwrap();
        let error = lease.value_as_ipv4().unwrap_err();
        assert!(!error.is_malformed());
    }

    #[test]
    fn wrong_value_length_is_malformed() {
        let lease = DhcpOption::new(LEASE_TIME, vec![0, 14, 16]).unwrap();
        let error = lease.value_as_u32().unwrap_err();
        assert!(error.is_malformed());
        assert!(matches!(error, Error::BadOptionSize { code: 51, len: 3, .. }));
    }

    #[test]
    fn numeric_values_are_big_endian() {
        let lease = DhcpOption::new_u32(LEASE_TIME, 0x01020304).unwrap();
        assert_eq!(lease.value(), &[1, 2, 3, 4]);
        assert_eq!(lease.value_as_u32().unwrap(), 0x01020304);

        let size = DhcpOption::new_u16(57, 1500).unwrap();
        assert_eq!(size.value(), &[0x05, 0xdc]);
        assert_eq!(size.value_as_u16().unwrap(), 1500);
    }

    #[test]
    fn address_lists_must_be_whole_addresses() {
        let servers = DhcpOption::new(6, vec![8, 8, 8, 8, 8, 8]).unwrap();
        assert!(servers.value_as_ipv4s().unwrap_err().is_malformed());

        let servers = DhcpOption::new_ipv4s(
            6,
            &[Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(8, 8, 4, 4)],
        )
        .unwrap();
        assert_eq!(
            servers.value_as_ipv4s().unwrap(),
            vec![Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(8, 8, 4, 4)]
        );
    }

    #[test]
    fn mirror_echoes_the_request_value() {
        let mut request = Packet::new();
        request.set_option(DhcpOption::new_u8(MESSAGE_TYPE, 1).unwrap());

        let configured = DhcpOption::with_mirror(MESSAGE_TYPE, vec![9]).unwrap();
        assert_eq!(configured.apply(&request).value(), &[1]);
    }

    #[test]
    fn mirror_falls_back_to_the_default() {
        let request = Packet::new();
        let configured = DhcpOption::with_mirror(MESSAGE_TYPE, vec![9]).unwrap();
        assert_eq!(configured.apply(&request).value(), &[9]);
    }

    #[test]
    fn plain_option_ignores_the_request() {
        let mut request = Packet::new();
        request.set_option(DhcpOption::new_u8(MESSAGE_TYPE, 1).unwrap());

        let configured = DhcpOption::new_u8(MESSAGE_TYPE, 9).unwrap();
        assert_eq!(configured.apply(&request).value(), &[9]);
    }
}
