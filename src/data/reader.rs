use crate::{data::varint::decode_varint, ProtocolError};
use std::io::Read;

// Upper bound on the initial allocation for a single read, the rest grows as bytes arrive
const READ_CHUNK: usize = 8192;

/// Packet data reader trait
pub trait DataReader {
    /// Read exactly `size` bytes
    fn read_bytes(&mut self, size: usize) -> Result<Vec<u8>, ProtocolError>;

    /// Read byte
    fn read_byte(&mut self) -> Result<u8, ProtocolError> {
        Ok(self.read_bytes(1)?[0])
    }
    /// Read String
    fn read_string(&mut self) -> Result<String, ProtocolError> {
        let size = self.read_varint()? as usize;
        match String::from_utf8(self.read_bytes(size)?) {
            Ok(i) => Ok(i),
            Err(_) => Err(ProtocolError::StringParse),
        }
    }
    /// Read Unsigned Short as u16
    fn read_unsigned_short(&mut self) -> Result<u16, ProtocolError> {
        let mut bytes = [0; 2];
        bytes.copy_from_slice(&self.read_bytes(2)?);
        Ok(u16::from_be_bytes(bytes))
    }
    /// Read Long as i64
    fn read_long(&mut self) -> Result<i64, ProtocolError> {
        let mut bytes = [0; 8];
        bytes.copy_from_slice(&self.read_bytes(8)?);
        Ok(i64::from_be_bytes(bytes))
    }

    /// Read VarInt as u32 with size in bytes (varint, size)
    fn read_varint_size(&mut self) -> Result<(u32, usize), ProtocolError> {
        decode_varint(self)
    }
    /// Read VarInt as u32
    fn read_varint(&mut self) -> Result<u32, ProtocolError> {
        Ok(self.read_varint_size()?.0)
    }
}

impl<R: Read> DataReader for R {
    fn read_bytes(&mut self, size: usize) -> Result<Vec<u8>, ProtocolError> {
        let mut buf = Vec::with_capacity(size.min(READ_CHUNK));

        let received = self
            .by_ref()
            .take(size as u64)
            .read_to_end(&mut buf)
            .map_err(ProtocolError::TransportRead)?;

        if received < size {
            return Err(ProtocolError::TruncatedStream {
                expected: size,
                received,
            });
        }

        Ok(buf)
    }
}
