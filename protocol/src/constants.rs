//! Wire format constants (RFC 2131/2132).

/// Size of the fixed BOOTP header, which is also the absolute
/// minimum length of a valid packet.
pub const SIZE_PACKET_MINIMUM: usize = 236;
/// Maximum packet length accepted or produced (Ethernet MTU).
pub const SIZE_PACKET_MAXIMUM: usize = 1500;
/// Default maximum a client must accept without explicit signaling
/// (RFC 2131 §2).
pub const SIZE_PACKET_DEFAULT_MAX: usize = 576;
/// Most DHCP stacks pad the BOOTP `vend` field to at least 64 bytes,
/// so the default serialization does too.
pub const SIZE_VENDOR_FIELD: usize = 64;

pub const SIZE_HARDWARE_ADDRESS: usize = 16;
pub const SIZE_SERVER_NAME: usize = 64;
pub const SIZE_BOOT_FILENAME: usize = 128;

/// Distinguishes a DHCP packet from plain BOOTP.
pub const MAGIC_COOKIE: [u8; 4] = [0x63, 0x82, 0x53, 0x63];

pub const DHCP_PORT_SERVER: u16 = 67;
pub const DHCP_PORT_CLIENT: u16 = 68;

/// The broadcast bit of the `flags` field.
pub const FLAG_BROADCAST: u16 = 0x8000;
