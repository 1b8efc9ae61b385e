//! A minimal DHCP server core: socket handling, a bounded work queue
//! with an elastic worker pool, and per-message-type dispatch into a
//! user-supplied [`DhcpServlet`]. Address-assignment policy lives
//! entirely in the servlet; replies are typically assembled with the
//! response factory in [`builder`].

pub mod builder;

mod config;
mod error;
mod server;
mod servlet;

pub use self::builder::{default_socket_address, make_ack, make_nak, make_offer};
pub use self::config::{
    ServerConfig, SERVER_ADDRESS, SERVER_THREADS, SERVER_THREADS_KEEPALIVE, SERVER_THREADS_MAX,
};
pub use self::error::{Error, Result};
pub use self::server::{DhcpServer, BOUNDED_QUEUE_SIZE};
pub use self::servlet::{service, service_datagram, DhcpServlet};
