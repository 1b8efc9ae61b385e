//! The option code to value format registry.
//!
//! A fixed, compiled-in table: each registered code maps to exactly one
//! format kind, and typed accessors are only valid for a matching kind.
//! Codes absent from the table (vendor specific, client identifier, any
//! site-local code) have no enforced format and are treated as opaque
//! bytes.

use std::fmt;

/// Value format of a DHCP option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFormat {
    /// One IPv4 address, 4 bytes.
    Inet,
    /// List of IPv4 addresses, 4*n bytes.
    Inets,
    /// Big-endian 32 bit integer.
    Int,
    /// Big-endian 16 bit integer.
    Short,
    /// List of big-endian 16 bit integers, 2*n bytes.
    Shorts,
    /// Single byte.
    Byte,
    /// Opaque byte list.
    Bytes,
    /// ASCII string, one byte per character, no NUL terminator.
    Str,
}

impl fmt::Display for OptionFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::OptionFormat::*;
        match self {
            Inet => write!(f, "inet"),
            Inets => write!(f, "inets"),
            Int => write!(f, "int"),
            Short => write!(f, "short"),
            Shorts => write!(f, "shorts"),
            Byte => write!(f, "byte"),
            Bytes => write!(f, "bytes"),
            Str => write!(f, "string"),
        }
    }
}

/// Returns the registered format for an option code, `None` if the code
/// carries opaque bytes.
pub fn format_of(code: u8) -> Option<OptionFormat> {
    use self::OptionFormat::*;
    let format = match code {
        1 => Inet,    // SUBNET_MASK
        2 => Int,     // TIME_OFFSET
        3..=11 => Inets, // ROUTERS .. RESOURCE_LOCATION_SERVERS
        12 => Str,    // HOST_NAME
        13 => Short,  // BOOT_SIZE
        14 | 15 => Str, // MERIT_DUMP, DOMAIN_NAME
        16 => Inet,   // SWAP_SERVER
        17 | 18 => Str, // ROOT_PATH, EXTENSIONS_PATH
        19 | 20 => Byte, // IP_FORWARDING, NON_LOCAL_SOURCE_ROUTING
        21 => Inets,  // POLICY_FILTER
        22 => Short,  // MAX_DGRAM_REASSEMBLY
        23 => Byte,   // DEFAULT_IP_TTL
        24 => Int,    // PATH_MTU_AGING_TIMEOUT
        25 => Shorts, // PATH_MTU_PLATEAU_TABLE
        26 => Short,  // INTERFACE_MTU
        27 => Byte,   // ALL_SUBNETS_LOCAL
        28 => Inet,   // BROADCAST_ADDRESS
        29..=31 => Byte, // PERFORM_MASK_DISCOVERY .. ROUTER_DISCOVERY
        32 => Inet,   // ROUTER_SOLICITATION_ADDRESS
        33 => Inets,  // STATIC_ROUTES
        34 => Byte,   // TRAILER_ENCAPSULATION
        35 => Int,    // ARP_CACHE_TIMEOUT
        36 | 37 => Byte, // IEEE802_3_ENCAPSULATION, DEFAULT_TCP_TTL
        38 => Int,    // TCP_KEEPALIVE_INTERVAL
        39 => Byte,   // TCP_KEEPALIVE_GARBAGE
        41 | 42 => Inets, // NIS_SERVERS, NTP_SERVERS
        44 | 45 => Inets, // NETBIOS_NAME_SERVERS, NETBIOS_DD_SERVER
        46 => Byte,   // NETBIOS_NODE_TYPE
        47 => Str,    // NETBIOS_SCOPE
        48 | 49 => Inets, // FONT_SERVERS, X_DISPLAY_MANAGER
        50 => Inet,   // DHCP_REQUESTED_ADDRESS
        51 => Int,    // DHCP_LEASE_TIME
        52 | 53 => Byte, // DHCP_OPTION_OVERLOAD, DHCP_MESSAGE_TYPE
        54 => Inet,   // DHCP_SERVER_IDENTIFIER
        55 => Bytes,  // DHCP_PARAMETER_REQUEST_LIST
        56 => Str,    // DHCP_MESSAGE
        57 => Short,  // DHCP_MAX_MESSAGE_SIZE
        58 | 59 => Int, // DHCP_RENEWAL_TIME, DHCP_REBINDING_TIME
        60 => Str,    // VENDOR_CLASS_IDENTIFIER
        62 => Str,    // NWIP_DOMAIN_NAME
        64..=67 => Str, // NISPLUS_DOMAIN .. BOOTFILE
        68..=76 => Inets, // MOBILE_IP_HOME_AGENT .. STDA_SERVER
        85 => Inets,  // NDS_SERVERS
        86 | 87 => Str, // NDS_TREE_NAME, NDS_CONTEXT
        91 => Int,    // CLIENT_LAST_TRANSACTION_TIME
        92 => Inets,  // ASSOCIATED_IP
        98 => Str,    // USER_AUTHENTICATION_PROTOCOL
        116 => Byte,  // AUTO_CONFIGURE
        117 => Shorts, // NAME_SERVICE_SEARCH
        118 => Inet,  // SUBNET_SELECTION
        119 => Str,   // DOMAIN_SEARCH

        _ => return None,
    };
    Some(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_codes() {
        assert_eq!(format_of(1), Some(OptionFormat::Inet));
        assert_eq!(format_of(6), Some(OptionFormat::Inets));
        assert_eq!(format_of(51), Some(OptionFormat::Int));
        assert_eq!(format_of(53), Some(OptionFormat::Byte));
        assert_eq!(format_of(55), Some(OptionFormat::Bytes));
        assert_eq!(format_of(56), Some(OptionFormat::Str));
        assert_eq!(format_of(57), Some(OptionFormat::Short));
        assert_eq!(format_of(117), Some(OptionFormat::Shorts));
    }

    #[test]
    fn unregistered_codes_are_opaque() {
        // vendor specific, client identifier, site-local
        assert_eq!(format_of(43), None);
        assert_eq!(format_of(61), None);
        assert_eq!(format_of(224), None);
        // PAD and END never carry a value
        assert_eq!(format_of(0), None);
        assert_eq!(format_of(255), None);
    }
}
