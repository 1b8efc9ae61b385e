use std::net::Ipv4Addr;

use proptest::prelude::*;

use dhcp_protocol::{DhcpOption, MessageType, Packet, MAGIC_COOKIE, SIZE_PACKET_MINIMUM};

fn valid_header() -> Vec<u8> {
    let mut data = vec![0u8; SIZE_PACKET_MINIMUM];
    data[0] = 1;
    data[1] = 1;
    data[2] = 6;
    data.extend_from_slice(&MAGIC_COOKIE);
    data
}

#[test]
fn constructed_packet_survives_a_round_trip() {
    let mut packet = Packet::new();
    packet.op = 1;
    packet.xid = 0xdead_beef;
    packet.secs = 4;
    packet.flags = 0x8000;
    packet.ciaddr = Ipv4Addr::new(192, 168, 0, 42);
    packet.giaddr = Ipv4Addr::new(10, 0, 0, 254);
    packet.set_chaddr(&[0, 11, 22, 33, 44, 55]).unwrap();
    packet.set_sname("boot.example.org").unwrap();
    packet.set_file("pxelinux.0").unwrap();
    packet.set_message_type(MessageType::DhcpRequest).unwrap();
    packet.set_option_ipv4(50, Ipv4Addr::new(192, 168, 0, 42)).unwrap();
    packet
        .set_option_ipv4s(6, &[Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(8, 8, 4, 4)])
        .unwrap();
    packet.set_option_str(12, "workstation-7").unwrap();
    packet.set_option(DhcpOption::new(61, vec![1, 0, 11, 22, 33, 44, 55]).unwrap());

    let bytes = packet.to_bytes().unwrap();
    let decoded = Packet::from_bytes(&bytes, true).unwrap();

    // padding differs by the zero-fill top-up, everything else is equal
    let mut expected = packet.clone();
    expected.padding = decoded.padding.clone();
    assert_eq!(decoded, expected);
    assert_eq!(decoded.sname_str(), "boot.example.org");
    assert_eq!(decoded.file_str(), "pxelinux.0");
}

proptest! {
    #[test]
    fn decode_never_panics_on_arbitrary_bytes(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let _ = Packet::from_bytes(&data, false);
        let _ = Packet::from_bytes(&data, true);
    }

    #[test]
    fn decode_never_panics_on_random_options(
        options_data in prop::collection::vec(any::<u8>(), 0..512)
    ) {
        let mut data = valid_header();
        data.extend_from_slice(&options_data);
        let _ = Packet::from_bytes(&data, false);
    }

    #[test]
    fn decode_never_panics_on_random_option_lengths(
        code in 1u8..=254,
        declared in any::<u8>(),
        value in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        let mut data = valid_header();
        data.push(code);
        data.push(declared);
        data.extend_from_slice(&value);
        data.push(255);
        if data.len() <= 1500 {
            let _ = Packet::from_bytes(&data, false);
        }
    }

    #[test]
    fn lenient_decode_of_a_well_sized_buffer_re_encodes(
        xid in any::<u32>(),
        secs in any::<u16>(),
        flags in any::<u16>(),
        chaddr in any::<[u8; 16]>(),
    ) {
        let mut data = valid_header();
        data[4..8].copy_from_slice(&xid.to_be_bytes());
        data[8..10].copy_from_slice(&secs.to_be_bytes());
        data[10..12].copy_from_slice(&flags.to_be_bytes());
        data[28..44].copy_from_slice(&chaddr);
        data.push(255);

        let decoded = Packet::from_bytes(&data, true).unwrap();
        prop_assert_eq!(decoded.xid, xid);
        prop_assert_eq!(decoded.secs, secs);
        prop_assert_eq!(decoded.flags, flags);
        prop_assert_eq!(decoded.chaddr(), &chaddr);

        let re_encoded = decoded.to_bytes().unwrap();
        let mut re_decoded = Packet::from_bytes(&re_encoded, true).unwrap();
        // re-encoding zero-fills to the minimum size, drop that top-up
        re_decoded.padding.clear();
        prop_assert_eq!(re_decoded, decoded);
    }

    #[test]
    fn short_buffers_are_always_rejected(
        data in prop::collection::vec(any::<u8>(), 0..236)
    ) {
        prop_assert!(Packet::from_bytes(&data, false).is_err());
    }
}
