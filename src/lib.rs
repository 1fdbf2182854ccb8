use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::debug;

pub mod data;
pub mod packet;
pub mod status;

pub use crate::{
    data::{bytes_used, decode_varint, encode_varint, varint_len, DataReader, DataWriter},
    packet::{Field, Packet},
    status::{build_handshake, ping, query},
};


#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("stream ended after {received} of {expected} bytes")]
    TruncatedStream { expected: usize, received: usize },
    #[error("varint does not fit in 5 bytes / 32 bits")]
    MalformedVarInt,
    #[error("write to transport failed: {0}")]
    TransportWrite(#[source] io::Error),
    #[error("read from transport failed: {0}")]
    TransportRead(#[source] io::Error),
    #[error("string of {actual} units exceeds maximum of {max}")]
    StringTooLong { max: usize, actual: usize },
    #[error("packet of {len} bytes exceeds maximum of {max}")]
    PacketTooLarge { len: usize, max: usize },
    #[error("string is not valid utf-8")]
    StringParse,
    #[error("expected packet {expected:#04x}, got {actual:#04x}")]
    UnexpectedPacket { expected: u32, actual: u32 },
    #[error("pong payload {received} does not match ping payload {sent}")]
    PingMismatch { sent: i64, received: i64 },
    #[error("address did not resolve")]
    AddressParse,
    #[error("connection failed: {0}")]
    StreamConnect(#[source] io::Error),
}

/// Server List Ping connection over any duplex stream
///
/// The connection never closes the stream itself, dropping it (or the value
/// returned by [`SlpConnection::into_inner`]) does.
#[derive(Debug)]
pub struct SlpConnection<T: Read + Write> {
    stream: T,
}

pub type SlpConnTcp = SlpConnection<TcpStream>;

impl<T: Read + Write> SlpConnection<T> {
    /// Wrap already connected stream
    pub fn new(stream: T) -> SlpConnection<T> {
        SlpConnection { stream }
    }

    /// Query server status, `host` and `port` are advertised in the handshake
    pub fn query_status(&mut self, host: &str, port: u16) -> Result<String, ProtocolError> {
        status::query(&mut self.stream, host, port)
    }

    /// Ping server after a status query, returns the echoed payload
    pub fn ping(&mut self, payload: i64) -> Result<i64, ProtocolError> {
        status::ping(&mut self.stream, payload)
    }

    /// Get immutable reference to stream
    pub fn get_ref(&self) -> &T {
        &self.stream
    }

    /// Get mutable reference to stream
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.stream
    }

    /// Get inner stream back, e.g. to shut it down
    pub fn into_inner(self) -> T {
        self.stream
    }
}

impl SlpConnTcp {
    /// Resolve `addr` and connect to the first address that accepts
    ///
    /// `timeout` bounds the connect and every later read and write.
    pub fn connect<A: ToSocketAddrs>(
        addr: A,
        timeout: Option<Duration>,
    ) -> Result<SlpConnTcp, ProtocolError> {
        let addrs = addr.to_socket_addrs().map_err(|_| ProtocolError::AddressParse)?;

        let mut last_error = None;
        for addr in addrs {
            let connected = match timeout {
                Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
                None => TcpStream::connect(addr),
            };

            match connected {
                Ok(stream) => {
                    debug!("connected to {addr}");
                    stream
                        .set_read_timeout(timeout)
                        .map_err(ProtocolError::StreamConnect)?;
                    stream
                        .set_write_timeout(timeout)
                        .map_err(ProtocolError::StreamConnect)?;
                    return Ok(SlpConnection::new(stream));
                }
                Err(e) => {
                    debug!("connecting to {addr} failed: {e}");
                    last_error = Some(e);
                }
            }
        }

        Err(match last_error {
            Some(e) => ProtocolError::StreamConnect(e),
            None => ProtocolError::AddressParse,
        })
    }
}
