//! A toy server handing the same address to every client.
//!
//! ```text
//! RUST_LOG=dhcp_server=debug,dhcp_framed=trace cargo run --example server
//! ```

use std::net::Ipv4Addr;

use dhcp_protocol::{DhcpOption, OptionTag, Packet};
use dhcp_server::{
    make_ack, make_offer, DhcpServer, DhcpServlet, ServerConfig, SERVER_ADDRESS,
};

const LEASE_TIME: u32 = 86_400;

struct StaticServlet {
    address: Ipv4Addr,
    server_id: Ipv4Addr,
    options: Vec<DhcpOption>,
    sname: String,
}

impl StaticServlet {
    fn ack(&self, request: &Packet) -> Option<Packet> {
        let mut ack = match make_ack(
            request,
            self.address,
            LEASE_TIME,
            self.server_id,
            None,
            &self.options,
        ) {
            Ok(ack) => ack,
            Err(error) => {
                log::warn!("cannot build ACK: {}", error);
                return None;
            }
        };
        if ack.set_sname(&self.sname).is_err() {
            log::warn!("host name {:?} does not fit the sname field", self.sname);
        }
        Some(ack)
    }
}

impl DhcpServlet for StaticServlet {
    fn init(&mut self, _config: &mut ServerConfig) {
        log::info!(
            "serving {} with lease time {}s, server id {}",
            self.address,
            LEASE_TIME,
            self.server_id
        );
    }

    fn discover(&self, request: &Packet) -> Option<Packet> {
        match make_offer(
            request,
            self.address,
            LEASE_TIME,
            self.server_id,
            None,
            &self.options,
        ) {
            Ok(offer) => Some(offer),
            Err(error) => {
                log::warn!("cannot build offer: {}", error);
                None
            }
        }
    }

    fn request(&self, request: &Packet) -> Option<Packet> {
        self.ack(request)
    }

    fn inform(&self, request: &Packet) -> Option<Packet> {
        self.ack(request)
    }

    fn release(&self, request: &Packet) -> Option<Packet> {
        log::info!("client {:?} released its address", request.chaddr_mac());
        None
    }
}

#[tokio::main]
async fn main() -> dhcp_server::Result<()> {
    env_logger::init();

    let sname = hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_default();

    let servlet = StaticServlet {
        address: Ipv4Addr::new(192, 168, 0, 50),
        server_id: Ipv4Addr::new(192, 168, 0, 1),
        options: vec![
            DhcpOption::new_ipv4(OptionTag::SubnetMask as u8, Ipv4Addr::new(255, 255, 255, 0))?,
            DhcpOption::new_ipv4s(
                OptionTag::DomainNameServers as u8,
                &[Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(8, 8, 4, 4)],
            )?,
            DhcpOption::with_mirror(OptionTag::Hostname as u8, Vec::new())?,
        ],
        sname,
    };

    let mut overrides = ServerConfig::new();
    overrides.set(SERVER_ADDRESS, "0.0.0.0:67");

    let server = DhcpServer::init(Box::new(servlet), Some(overrides))?;
    server.run().await
}
