use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::UdpSocket;

use dhcp_protocol::{MessageType, Packet};
use dhcp_server::{make_offer, DhcpServer, DhcpServlet, ServerConfig, SERVER_ADDRESS};

const OFFERED: Ipv4Addr = Ipv4Addr::new(192, 168, 0, 50);
const SERVER_ID: Ipv4Addr = Ipv4Addr::new(192, 168, 0, 1);

struct LoopbackServlet;

impl DhcpServlet for LoopbackServlet {
    fn discover(&self, request: &Packet) -> Option<Packet> {
        let mut offer = make_offer(request, OFFERED, 3600, SERVER_ID, None, &[]).ok()?;
        // a broadcast would not reach the test client on loopback,
        // answer the source directly
        offer.address = request.address;
        Some(offer)
    }
}

#[tokio::test]
async fn discover_yields_an_offer() {
    let mut overrides = ServerConfig::new();
    overrides.set(SERVER_ADDRESS, "127.0.0.1:0");

    let server = Arc::new(DhcpServer::init(Box::new(LoopbackServlet), Some(overrides)).unwrap());
    let server_address = server.local_addr().unwrap();
    let handle = {
        let server = Arc::clone(&server);
        tokio::spawn(async move { server.run().await })
    };

    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let mut discover = Packet::new();
    discover.op = 1;
    discover.xid = 0x0ddba11;
    discover.set_chaddr(&[0, 11, 22, 33, 44, 55]).unwrap();
    discover.set_message_type(MessageType::DhcpDiscover).unwrap();
    client
        .send_to(&discover.to_bytes().unwrap(), server_address)
        .await
        .unwrap();

    let mut buffer = [0u8; 1500];
    let (amount, from) = tokio::time::timeout(Duration::from_secs(5), client.recv_from(&mut buffer))
        .await
        .expect("no offer within five seconds")
        .unwrap();
    assert_eq!(from, server_address);

    let offer = Packet::from_bytes(&buffer[..amount], true).unwrap();
    assert_eq!(offer.message_type(), Some(MessageType::DhcpOffer));
    assert_eq!(offer.xid, discover.xid);
    assert_eq!(offer.yiaddr, OFFERED);
    assert_eq!(offer.option(54).unwrap().value_as_ipv4().unwrap(), SERVER_ID);
    assert_eq!(offer.chaddr(), discover.chaddr());

    server.stop();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn malformed_and_foreign_datagrams_are_ignored() {
    let mut overrides = ServerConfig::new();
    overrides.set(SERVER_ADDRESS, "127.0.0.1:0");

    let server = Arc::new(DhcpServer::init(Box::new(LoopbackServlet), Some(overrides)).unwrap());
    let server_address = server.local_addr().unwrap();
    let handle = {
        let server = Arc::clone(&server);
        tokio::spawn(async move { server.run().await })
    };

    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    // far too short
    client.send_to(&[1, 2, 3], server_address).await.unwrap();
    // valid but not a DISCOVER, the servlet stays silent
    let mut release = Packet::new();
    release.op = 1;
    release.set_message_type(MessageType::DhcpRelease).unwrap();
    client
        .send_to(&release.to_bytes().unwrap(), server_address)
        .await
        .unwrap();

    // the server is still alive and answers a proper DISCOVER
    let mut discover = Packet::new();
    discover.op = 1;
    discover.xid = 7;
    discover.set_message_type(MessageType::DhcpDiscover).unwrap();
    client
        .send_to(&discover.to_bytes().unwrap(), server_address)
        .await
        .unwrap();

    let mut buffer = [0u8; 1500];
    let (amount, _) = tokio::time::timeout(Duration::from_secs(5), client.recv_from(&mut buffer))
        .await
        .expect("no offer within five seconds")
        .unwrap();
    let offer = Packet::from_bytes(&buffer[..amount], true).unwrap();
    assert_eq!(offer.xid, 7);

    server.stop();
    let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
}
