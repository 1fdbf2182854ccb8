use crate::{data::varint::encode_varint, ProtocolError};
use std::io::Write;

/// Packet data writer trait
pub trait DataWriter {
    /// Write bytes
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ProtocolError>;

    /// Write byte
    fn write_byte(&mut self, byte: u8) -> Result<(), ProtocolError> {
        self.write_bytes(&[byte])
    }
    /// Write String with VarInt byte length prefix
    fn write_string(&mut self, val: &str) -> Result<(), ProtocolError> {
        let bytes = val.as_bytes();
        let len = u32::try_from(bytes.len()).map_err(|_| ProtocolError::StringTooLong {
            max: u32::MAX as usize,
            actual: bytes.len(),
        })?;
        self.write_varint(len)?;
        self.write_bytes(bytes)
    }
    /// Write Unsigned Short as u16
    fn write_unsigned_short(&mut self, val: u16) -> Result<(), ProtocolError> {
        self.write_bytes(&val.to_be_bytes())
    }
    /// Write Long as i64
    fn write_long(&mut self, val: i64) -> Result<(), ProtocolError> {
        self.write_bytes(&val.to_be_bytes())
    }

    /// Write VarInt as u32
    fn write_varint(&mut self, val: u32) -> Result<(), ProtocolError> {
        self.write_bytes(&encode_varint(val))
    }
}

impl<W: Write> DataWriter for W {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ProtocolError> {
        self.write_all(bytes).map_err(ProtocolError::TransportWrite)
    }
}
