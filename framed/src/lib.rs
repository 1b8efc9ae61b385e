//! UDP framing for DHCP packets.

mod socket;

pub use self::socket::DhcpFramed;
