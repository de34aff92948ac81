use std::io::Write;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use thiserror::Error;

use crate::detection::domain::facing::FacingState;
use crate::reporting::domain::commander_link::CommanderLink;

#[derive(Error, Debug)]
pub enum CommanderError {
    #[error("could not resolve commander address {address}: {source}")]
    Resolve {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to connect to commander at {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Persistent TCP link carrying one ASCII byte per report: `1` facing,
/// `0` not facing. No framing and no acknowledgement.
///
/// The connection is made once. A failed write is logged and counted; the
/// link does not reconnect, so once the peer is gone every later report
/// fails the same way.
pub struct TcpCommanderLink {
    stream: TcpStream,
    peer: SocketAddr,
    sent: u64,
    failed: u64,
}

impl TcpCommanderLink {
    pub fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self, CommanderError> {
        let address = format!("{host}:{port}");
        let addrs: Vec<SocketAddr> = address
            .to_socket_addrs()
            .map_err(|e| CommanderError::Resolve {
                address: address.clone(),
                source: e,
            })?
            .collect();

        let mut last_error = std::io::Error::new(
            std::io::ErrorKind::AddrNotAvailable,
            "no addresses resolved",
        );
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => {
                    if let Err(e) = stream.set_nodelay(true) {
                        log::warn!("Could not disable Nagle on commander link: {e}");
                    }
                    log::info!("Connected to commander at {addr}");
                    return Ok(Self {
                        stream,
                        peer: addr,
                        sent: 0,
                        failed: 0,
                    });
                }
                Err(e) => last_error = e,
            }
        }

        Err(CommanderError::Connect {
            address,
            source: last_error,
        })
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }
}

impl CommanderLink for TcpCommanderLink {
    fn report(&mut self, state: FacingState) {
        match self.stream.write_all(&[state.symbol()]) {
            Ok(()) => self.sent += 1,
            Err(e) => {
                self.failed += 1;
                log::warn!("Commander send to {} failed: {e}", self.peer);
            }
        }
    }
}
