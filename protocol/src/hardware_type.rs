//! Hardware type module.

use std::fmt;

/// Hardware address type of the `htype` field. The packet keeps the raw
/// byte; this enum only names the values a DHCP server commonly sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareType {
    Undefined = 0,
    Ethernet = 1,
    Ieee802 = 6,
    Fddi = 8,
    // RFC 2855
    Ieee1394 = 24,
}

impl From<u8> for HardwareType {
    fn from(value: u8) -> Self {
        use self::HardwareType::*;
        match value {
            1 => Ethernet,
            6 => Ieee802,
            8 => Fddi,
            24 => Ieee1394,

            _ => Undefined,
        }
    }
}

impl fmt::Display for HardwareType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::HardwareType::*;
        match self {
            Ethernet => write!(f, "HTYPE_ETHER"),
            Ieee802 => write!(f, "HTYPE_IEEE802"),
            Fddi => write!(f, "HTYPE_FDDI"),
            Ieee1394 => write!(f, "HTYPE_IEEE1394"),

            Undefined => write!(f, "UNDEFINED"),
        }
    }
}
