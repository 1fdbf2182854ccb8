//! Server List Ping exchange: handshake, status request, status response and ping

use crate::data::{DataReader, DataWriter};
use crate::packet::{Field, Packet};
use crate::ProtocolError;
use log::{debug, trace};
use std::io::{Read, Write};

/// Protocol version advertised in the handshake
pub const PROTOCOL_VERSION: u32 = 760;
/// Handshake packet id
pub const HANDSHAKE_ID: u32 = 0x00;
/// Status request and status response packet id
pub const STATUS_ID: u32 = 0x00;
/// Ping and pong packet id
pub const PING_ID: u32 = 0x01;
/// Handshake next state asking for status rather than login
pub const NEXT_STATE_STATUS: u32 = 1;
/// Longest server address the handshake accepts, in UTF-16 code units
pub const MAX_ADDRESS_LEN: usize = 255;

/// Status request frame: length 1, packet id 0
pub const STATUS_REQUEST: [u8; 2] = [0x01, 0x00];

/// Build handshake frame asking `address:port` for its status
pub fn build_handshake(address: &str, port: u16) -> Result<Vec<u8>, ProtocolError> {
    let units = address.encode_utf16().count();
    if units > MAX_ADDRESS_LEN {
        return Err(ProtocolError::StringTooLong {
            max: MAX_ADDRESS_LEN,
            actual: units,
        });
    }

    let mut packet = Packet::empty(HANDSHAKE_ID);
    packet
        .append(Field::VarInt(PROTOCOL_VERSION))
        .append(Field::VarInt(address.len() as u32))
        .append(Field::RawBytes(address.as_bytes()))
        .append(Field::unsigned_short(port))
        .append(Field::VarInt(NEXT_STATE_STATUS));

    packet.into_frame()
}

/// Build ping frame carrying `payload`
pub fn build_ping(payload: i64) -> Result<Vec<u8>, ProtocolError> {
    Packet::build(PING_ID, |packet| packet.write_long(payload))?.into_frame()
}

/// Send handshake packet
pub fn send_handshake<T: Write>(
    transport: &mut T,
    address: &str,
    port: u16,
) -> Result<(), ProtocolError> {
    let frame = build_handshake(address, port)?;

    debug!("sending handshake for {address}:{port} ({} bytes)", frame.len());
    trace!("handshake frame: {frame:02x?}");

    transport.write_bytes(&frame)
}

/// Send status request packet
pub fn send_status_request<T: Write>(transport: &mut T) -> Result<(), ProtocolError> {
    transport.write_bytes(&STATUS_REQUEST)
}

/// Read status response packet and return its JSON string
pub fn read_status_response<T: Read>(transport: &mut T) -> Result<String, ProtocolError> {
    let bytes = read_status_bytes(transport)?;

    match String::from_utf8(bytes) {
        Ok(i) => Ok(i),
        Err(_) => Err(ProtocolError::StringParse),
    }
}

/// Read status response packet and return the raw JSON bytes
pub fn read_status_bytes<T: Read>(transport: &mut T) -> Result<Vec<u8>, ProtocolError> {
    let length = transport.read_varint()?;
    let packet_id = transport.read_byte()?;
    if u32::from(packet_id) != STATUS_ID {
        debug!("status response has packet id {packet_id:#04x}, reading it anyway");
    }

    let size = transport.read_varint()?;
    debug!("status response: length {length}, json {size} bytes");

    transport.read_bytes(size as usize)
}

/// Query server status over an already connected transport
///
/// Sends the handshake and status request, then blocks until the response
/// has been read in full. Any failure aborts the query, nothing is retried.
pub fn query<T: Read + Write>(
    transport: &mut T,
    address: &str,
    port: u16,
) -> Result<String, ProtocolError> {
    send_handshake(transport, address, port)?;
    send_status_request(transport)?;
    read_status_response(transport)
}

/// Send ping and wait for the pong echoing the same payload
///
/// Only valid after the status response has been read on the same transport.
pub fn ping<T: Read + Write>(transport: &mut T, payload: i64) -> Result<i64, ProtocolError> {
    transport.write_bytes(&build_ping(payload)?)?;

    let length = transport.read_varint()?;
    let packet_id = transport.read_varint()?;
    if packet_id != PING_ID {
        return Err(ProtocolError::UnexpectedPacket {
            expected: PING_ID,
            actual: packet_id,
        });
    }

    let received = transport.read_long()?;
    trace!("pong: length {length}, payload {received}");

    if received != payload {
        return Err(ProtocolError::PingMismatch {
            sent: payload,
            received,
        });
    }

    Ok(received)
}
