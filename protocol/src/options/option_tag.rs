//! DHCP option tags module.

use std::fmt;

/// DHCP option codes with a registered meaning.
///
/// Codes outside this registry are carried as opaque bytes by the codec;
/// the enum exists for classification and display, the packet itself is
/// keyed on the raw code byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionTag {
    Unknown = -1,
    Pad = 0,

    // RFC 1497 Vendor Extensions (RFC 2132 §3)
    SubnetMask,
    TimeOffset,
    Routers,
    TimeServers,
    NameServers,
    DomainNameServers,
    LogServers,
    QuotesServers,
    LprServers,
    ImpressServers,
    RlpServers,
    Hostname,
    BootFileSize,
    MeritDumpFile,
    DomainName,
    SwapServer,
    RootPath,
    ExtensionsPath,
    // IP Layer Parameters per Host (RFC 2132 §4)
    ForwardOnOff,
    NonLocalSourceRouteOnOff,
    PolicyFilters,
    MaxDatagramReassemblySize,
    DefaultIpTtl,
    MtuTimeout,
    MtuPlateau,
    // IP Layer Parameters per Interface (RFC 2132 §5)
    MtuInterface,
    MtuSubnet,
    BroadcastAddress,
    MaskRecovery,
    MaskSupplier,
    PerformRouterDiscovery,
    RouterSolicitationAddress,
    StaticRoutes,
    // Link Layer Parameters per Interface (RFC 2132 §6)
    TrailerEncapsulation,
    ArpTimeout,
    EthernetEncapsulation,
    // TCP Parameters (RFC 2132 §7)
    DefaultTcpTtl,
    KeepaliveTime,
    KeepaliveData,
    // Application and Service Parameters (RFC 2132 §8)
    NisDomain,
    NisServers,
    NtpServers,
    VendorSpecific,
    NetbiosNameServers,
    NetbiosDistributionServers,
    NetbiosNodeType,
    NetbiosScope,
    XWindowFontServers,
    XWindowManagerServers,
    // DHCP Extensions (RFC 2132 §9)
    AddressRequest,
    AddressTime,
    Overload,
    DhcpMessageType,
    DhcpServerId,
    ParameterList,
    DhcpMessage,
    DhcpMaxMessageSize,
    RenewalTime,
    RebindingTime,
    ClassId,
    ClientId,

    // RFC 2242
    NetwareIpDomain,
    NetwareIpOption,

    // Application and Service Parameters (RFC 2132 §8, continuation)
    NisDomainName,
    NisServerAddress,
    TftpServerName,
    BootfileName,
    HomeAgentAddresses,
    SmtpServers,
    Pop3Servers,
    NntpServers,
    WwwServers,
    FingerServers,
    IrcServers,
    StreetTalkServers,
    StdaServers,

    // RFC 3004
    UserClass = 77,
    // RFC 4702
    Fqdn = 81,
    // RFC 3046
    AgentOptions = 82,
    // RFC 2241
    NdsServers = 85,
    NdsTreeName = 86,
    NdsContext = 87,
    // RFC 4388
    LastTransactionTime = 91,
    AssociatedIp = 92,
    UserAuthentication = 98,
    AutoConfigure = 116,
    // RFC 2937
    NameServiceSearch = 117,
    // RFC 3011
    SubnetSelection = 118,
    // RFC 3397
    DomainSearch = 119,

    End = 255,
}

impl From<u8> for OptionTag {
    fn from(value: u8) -> Self {
        use self::OptionTag::*;
        match value {
            0 => Pad,
            1 => SubnetMask,
            2 => TimeOffset,
            3 => Routers,
            4 => TimeServers,
            5 => NameServers,
            6 => DomainNameServers,
            7 => LogServers,
            8 => QuotesServers,
            9 => LprServers,
            10 => ImpressServers,
            11 => RlpServers,
            12 => Hostname,
            13 => BootFileSize,
            14 => MeritDumpFile,
            15 => DomainName,
            16 => SwapServer,
            17 => RootPath,
            18 => ExtensionsPath,
            19 => ForwardOnOff,
            20 => NonLocalSourceRouteOnOff,
            21 => PolicyFilters,
            22 => MaxDatagramReassemblySize,
            23 => DefaultIpTtl,
            24 => MtuTimeout,
            25 => MtuPlateau,
            26 => MtuInterface,
            27 => MtuSubnet,
            28 => BroadcastAddress,
            29 => MaskRecovery,
            30 => MaskSupplier,
            31 => PerformRouterDiscovery,
            32 => RouterSolicitationAddress,
            33 => StaticRoutes,
            34 => TrailerEncapsulation,
            35 => ArpTimeout,
            36 => EthernetEncapsulation,
            37 => DefaultTcpTtl,
            38 => KeepaliveTime,
            39 => KeepaliveData,
            40 => NisDomain,
            41 => NisServers,
            42 => NtpServers,
            43 => VendorSpecific,
            44 => NetbiosNameServers,
            45 => NetbiosDistributionServers,
            46 => NetbiosNodeType,
            47 => NetbiosScope,
            48 => XWindowFontServers,
            49 => XWindowManagerServers,
            50 => AddressRequest,
            51 => AddressTime,
            52 => Overload,
            53 => DhcpMessageType,
            54 => DhcpServerId,
            55 => ParameterList,
            56 => DhcpMessage,
            57 => DhcpMaxMessageSize,
            58 => RenewalTime,
            59 => RebindingTime,
            60 => ClassId,
            61 => ClientId,
            62 => NetwareIpDomain,
            63 => NetwareIpOption,
            64 => NisDomainName,
            65 => NisServerAddress,
            66 => TftpServerName,
            67 => BootfileName,
            68 => HomeAgentAddresses,
            69 => SmtpServers,
            70 => Pop3Servers,
            71 => NntpServers,
            72 => WwwServers,
            73 => FingerServers,
            74 => IrcServers,
            75 => StreetTalkServers,
            76 => StdaServers,
            77 => UserClass,
            81 => Fqdn,
            82 => AgentOptions,
            85 => NdsServers,
            86 => NdsTreeName,
            87 => NdsContext,
            91 => LastTransactionTime,
            92 => AssociatedIp,
            98 => UserAuthentication,
            116 => AutoConfigure,
            117 => NameServiceSearch,
            118 => SubnetSelection,
            119 => DomainSearch,
            255 => End,

            _ => Unknown,
        }
    }
}

impl fmt::Display for OptionTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::OptionTag::*;
        let name = match self {
            Unknown => "UNKNOWN",
            Pad => "PAD",
            SubnetMask => "SUBNET_MASK",
            TimeOffset => "TIME_OFFSET",
            Routers => "ROUTERS",
            TimeServers => "TIME_SERVERS",
            NameServers => "NAME_SERVERS",
            DomainNameServers => "DOMAIN_NAME_SERVERS",
            LogServers => "LOG_SERVERS",
            QuotesServers => "COOKIE_SERVERS",
            LprServers => "LPR_SERVERS",
            ImpressServers => "IMPRESS_SERVERS",
            RlpServers => "RESOURCE_LOCATION_SERVERS",
            Hostname => "HOST_NAME",
            BootFileSize => "BOOT_SIZE",
            MeritDumpFile => "MERIT_DUMP",
            DomainName => "DOMAIN_NAME",
            SwapServer => "SWAP_SERVER",
            RootPath => "ROOT_PATH",
            ExtensionsPath => "EXTENSIONS_PATH",
            ForwardOnOff => "IP_FORWARDING",
            NonLocalSourceRouteOnOff => "NON_LOCAL_SOURCE_ROUTING",
            PolicyFilters => "POLICY_FILTER",
            MaxDatagramReassemblySize => "MAX_DGRAM_REASSEMBLY",
            DefaultIpTtl => "DEFAULT_IP_TTL",
            MtuTimeout => "PATH_MTU_AGING_TIMEOUT",
            MtuPlateau => "PATH_MTU_PLATEAU_TABLE",
            MtuInterface => "INTERFACE_MTU",
            MtuSubnet => "ALL_SUBNETS_LOCAL",
            BroadcastAddress => "BROADCAST_ADDRESS",
            MaskRecovery => "PERFORM_MASK_DISCOVERY",
            MaskSupplier => "MASK_SUPPLIER",
            PerformRouterDiscovery => "ROUTER_DISCOVERY",
            RouterSolicitationAddress => "ROUTER_SOLICITATION_ADDRESS",
            StaticRoutes => "STATIC_ROUTES",
            TrailerEncapsulation => "TRAILER_ENCAPSULATION",
            ArpTimeout => "ARP_CACHE_TIMEOUT",
            EthernetEncapsulation => "IEEE802_3_ENCAPSULATION",
            DefaultTcpTtl => "DEFAULT_TCP_TTL",
            KeepaliveTime => "TCP_KEEPALIVE_INTERVAL",
            KeepaliveData => "TCP_KEEPALIVE_GARBAGE",
            NisDomain => "NIS_DOMAIN",
            NisServers => "NIS_SERVERS",
            NtpServers => "NTP_SERVERS",
            VendorSpecific => "VENDOR_ENCAPSULATED_OPTIONS",
            NetbiosNameServers => "NETBIOS_NAME_SERVERS",
            NetbiosDistributionServers => "NETBIOS_DD_SERVER",
            NetbiosNodeType => "NETBIOS_NODE_TYPE",
            NetbiosScope => "NETBIOS_SCOPE",
            XWindowFontServers => "FONT_SERVERS",
            XWindowManagerServers => "X_DISPLAY_MANAGER",
            AddressRequest => "DHCP_REQUESTED_ADDRESS",
            AddressTime => "DHCP_LEASE_TIME",
            Overload => "DHCP_OPTION_OVERLOAD",
            DhcpMessageType => "DHCP_MESSAGE_TYPE",
            DhcpServerId => "DHCP_SERVER_IDENTIFIER",
            ParameterList => "DHCP_PARAMETER_REQUEST_LIST",
            DhcpMessage => "DHCP_MESSAGE",
            DhcpMaxMessageSize => "DHCP_MAX_MESSAGE_SIZE",
            RenewalTime => "DHCP_RENEWAL_TIME",
            RebindingTime => "DHCP_REBINDING_TIME",
            ClassId => "VENDOR_CLASS_IDENTIFIER",
            ClientId => "DHCP_CLIENT_IDENTIFIER",
            NetwareIpDomain => "NWIP_DOMAIN_NAME",
            NetwareIpOption => "NWIP_SUBOPTIONS",
            NisDomainName => "NISPLUS_DOMAIN",
            NisServerAddress => "NISPLUS_SERVER",
            TftpServerName => "TFTP_SERVER",
            BootfileName => "BOOTFILE",
            HomeAgentAddresses => "MOBILE_IP_HOME_AGENT",
            SmtpServers => "SMTP_SERVER",
            Pop3Servers => "POP3_SERVER",
            NntpServers => "NNTP_SERVER",
            WwwServers => "WWW_SERVER",
            FingerServers => "FINGER_SERVER",
            IrcServers => "IRC_SERVER",
            StreetTalkServers => "STREETTALK_SERVER",
            StdaServers => "STDA_SERVER",
            UserClass => "USER_CLASS",
            Fqdn => "FQDN",
            AgentOptions => "DHCP_AGENT_OPTIONS",
            NdsServers => "NDS_SERVERS",
            NdsTreeName => "NDS_TREE_NAME",
            NdsContext => "NDS_CONTEXT",
            LastTransactionTime => "CLIENT_LAST_TRANSACTION_TIME",
            AssociatedIp => "ASSOCIATED_IP",
            UserAuthentication => "USER_AUTHENTICATION_PROTOCOL",
            AutoConfigure => "AUTO_CONFIGURE",
            NameServiceSearch => "NAME_SERVICE_SEARCH",
            SubnetSelection => "SUBNET_SELECTION",
            DomainSearch => "DOMAIN_SEARCH",
            End => "END",
        };
        write!(f, "{}", name)
    }
}
