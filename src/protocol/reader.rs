//! Blocking TCP client for the RFID reader module.
//!
//! One exchange per call: connect, write the framed inventory command,
//! take a single bounded read, disconnect. The reader module answers
//! each command with one reply, so there is no session state to keep.
//! Connection parameters are injected — no process-wide socket.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use log::trace;

use crate::error::ProtocolError;
use crate::protocol::codec;

/// Reply budget per exchange. The reader's longest inventory reply is
/// far below this.
const MAX_REPLY_BYTES: usize = 64;

/// Connection parameters for one reader endpoint.
#[derive(Debug, Clone)]
pub struct ReaderEndpoint {
    pub addr: SocketAddr,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl ReaderEndpoint {
    pub fn new(addr: SocketAddr, connect_timeout: Duration, read_timeout: Duration) -> Self {
        Self {
            addr,
            connect_timeout,
            read_timeout,
        }
    }
}

/// Stateless reader client: endpoint config plus the inventory command
/// it frames on every poll.
#[derive(Debug, Clone)]
pub struct ReaderClient {
    endpoint: ReaderEndpoint,
    command: Vec<u8>,
}

impl ReaderClient {
    pub fn new(endpoint: ReaderEndpoint, command: Vec<u8>) -> Self {
        Self { endpoint, command }
    }

    /// Send the framed inventory command and return the raw reply.
    ///
    /// Every I/O failure — connect or read timeout, reset, empty read —
    /// maps to a [`ProtocolError`]; callers classify that as a fault
    /// rather than aborting the scan loop.
    pub fn exchange(&self) -> Result<Vec<u8>, ProtocolError> {
        let mut stream = TcpStream::connect_timeout(
            &self.endpoint.addr,
            self.endpoint.connect_timeout,
        )
        .map_err(ProtocolError::Connect)?;
        stream
            .set_read_timeout(Some(self.endpoint.read_timeout))
            .map_err(ProtocolError::Connect)?;

        let framed = codec::frame(&self.command);
        stream.write_all(&framed).map_err(ProtocolError::Write)?;

        let mut buf = [0u8; MAX_REPLY_BYTES];
        let n = stream.read(&mut buf).map_err(ProtocolError::Read)?;
        if n == 0 {
            return Err(ProtocolError::Read(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "reader closed connection without replying",
            )));
        }

        trace!("reader exchange: {} bytes in", n);
        Ok(buf[..n].to_vec())
    }

    /// One poll: exchange + classify.
    pub fn poll(&self) -> codec::Classification {
        codec::classify(&self.exchange())
    }
}

impl crate::app::ports::TagScanner for ReaderClient {
    fn poll(&mut self) -> codec::Classification {
        ReaderClient::poll(self)
    }
}
