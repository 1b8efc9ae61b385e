//! DHCP server module.
//!
//! One acceptor task owns the socket receive side and feeds a bounded
//! queue; a pool of worker tasks drains the queue, runs the servlet
//! pipeline and sends replies on the shared socket. The pool keeps a
//! fixed number of permanent workers and grows with transient workers
//! under load, which retire after an idle keepalive period.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::{Mutex, Notify};

use dhcp_framed::DhcpFramed;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::servlet::{self, DhcpServlet};

/// Capacity of the datagram queue between the acceptor and the workers.
/// When the queue is full and the pool is at its maximum, further
/// datagrams are dropped; DHCP clients retransmit.
pub const BOUNDED_QUEUE_SIZE: usize = 20;

const CONFIG_FILE: &str = "dhcpd.json";

type Datagram = (Vec<u8>, SocketAddr);

pub struct DhcpServer {
    socket: Arc<DhcpFramed>,
    servlet: Arc<dyn DhcpServlet>,
    config: ServerConfig,
    stopping: Arc<AtomicBool>,
    wakeup: Arc<Notify>,
}

impl DhcpServer {
    /// Merges the configuration sources, binds the socket and runs the
    /// servlet's `init` hook. Must be called from within a tokio
    /// runtime. A bind failure is fatal, nothing else here is.
    pub fn init(
        mut servlet: Box<dyn DhcpServlet>,
        overrides: Option<ServerConfig>,
    ) -> Result<Self> {
        let mut config = ServerConfig::load(CONFIG_FILE)?;
        if let Some(overrides) = overrides {
            config.extend(&overrides);
        }

        let address = config.socket_address()?;
        let socket = DhcpFramed::bind(address)?;
        log::info!("listening on {}", socket.local_addr()?);

        servlet.init(&mut config);

        Ok(DhcpServer {
            socket: Arc::new(socket),
            servlet: Arc::from(servlet),
            config,
            stopping: Arc::new(AtomicBool::new(false)),
            wakeup: Arc::new(Notify::new()),
        })
    }

    /// The address the server is bound to, useful when the configured
    /// port was 0.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Serves until [`DhcpServer::stop`] is called. Per-datagram
    /// failures (malformed packets, servlet vetoes, send errors) are
    /// logged and never terminate the loop. On stop, the queue is
    /// drained and every worker is awaited before returning.
    pub async fn run(&self) -> Result<()> {
        let threads = self.config.threads()?;
        let threads_max = self.config.threads_max()?.max(threads);
        let keepalive = self.config.keepalive()?;

        let (sender, receiver) = mpsc::channel::<Datagram>(BOUNDED_QUEUE_SIZE);
        let receiver = Arc::new(Mutex::new(receiver));

        let mut workers = Vec::with_capacity(threads);
        let mut spawned = 0;
        for index in 0..threads {
            spawned += 1;
            workers.push(tokio::spawn(worker(
                index,
                None,
                Arc::clone(&receiver),
                Arc::clone(&self.socket),
                Arc::clone(&self.servlet),
            )));
        }
        log::info!(
            "started {} workers, scaling up to {} with {:?} keepalive",
            threads,
            threads_max,
            keepalive
        );

        while !self.stopping.load(Ordering::SeqCst) {
            let datagram = tokio::select! {
                _ = self.wakeup.notified() => continue,
                received = self.socket.recv() => match received {
                    Ok(datagram) => datagram,
                    Err(error) => {
                        log::warn!("receive error: {}", error);
                        continue;
                    }
                },
            };

            let datagram = match sender.try_send(datagram) {
                Ok(()) => continue,
                Err(TrySendError::Full(datagram)) => datagram,
                Err(TrySendError::Closed(_)) => break,
            };

            // queue full, grow the pool or shed load; retired transient
            // workers free their slot here
            workers.retain(|worker| !worker.is_finished());
            if workers.len() < threads_max {
                let index = spawned;
                spawned += 1;
                workers.push(tokio::spawn(worker(
                    index,
                    Some(keepalive),
                    Arc::clone(&receiver),
                    Arc::clone(&self.socket),
                    Arc::clone(&self.servlet),
                )));
                log::debug!("queue full, started transient worker {}", index);
                if let Err(error) = sender.send(datagram).await {
                    let (_, source) = error.0;
                    log::warn!("queue closed, dropping datagram from {}", source);
                    break;
                }
            } else {
                let (_, source) = datagram;
                log::warn!("queue full at {} workers, dropping datagram from {}", workers.len(), source);
            }
        }

        // closing the channel lets the workers drain the queue and exit
        drop(sender);
        join_all(workers).await;
        log::info!("server stopped");
        Ok(())
    }

    /// Requests shutdown. Safe to call from any task; `run` returns
    /// after the in-flight datagrams are processed.
    pub fn stop(&self) {
        self.stopping.store(true, Ordering::SeqCst);
        self.wakeup.notify_one();
    }
}

/// One worker task. Permanent workers (`keepalive == None`) live until
/// the queue closes; transient workers also exit after sitting idle for
/// the keepalive period.
async fn worker(
    index: usize,
    keepalive: Option<Duration>,
    receiver: Arc<Mutex<mpsc::Receiver<Datagram>>>,
    socket: Arc<DhcpFramed>,
    servlet: Arc<dyn DhcpServlet>,
) {
    log::debug!("worker {} started", index);
    loop {
        let received = {
            let mut receiver = receiver.lock().await;
            match keepalive {
                None => receiver.recv().await,
                Some(keepalive) => match tokio::time::timeout(keepalive, receiver.recv()).await {
                    Ok(received) => received,
                    Err(_) => {
                        log::debug!("worker {} idle, retiring", index);
                        return;
                    }
                },
            }
        };
        let (data, source) = match received {
            Some(datagram) => datagram,
            None => break,
        };

        match servlet::service_datagram(servlet.as_ref(), &data, source) {
            Ok(Some((bytes, destination))) => {
                if let Err(error) = socket.send_raw(&bytes, destination).await {
                    log::warn!("worker {}: send to {} failed: {}", index, destination, error);
                }
            }
            Ok(None) => {}
            Err(error) => {
                log::warn!("worker {}: dropping datagram from {}: {}", index, source, error);
            }
        }
    }
    log::debug!("worker {} finished", index);
}
