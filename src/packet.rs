//! Minecraft packet struct and field framing

use crate::data::{bytes_used, encode_varint, varint_len, DataWriter};
use crate::ProtocolError;
use bytebuffer::ByteBuffer;

/// Largest packet length the protocol's 3 byte length prefix can carry
pub const MAX_PACKET_SIZE: usize = 2_097_151;

/// One field of a packet body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    /// VarInt encoded integer
    VarInt(u32),
    /// Big-endian integer written as exactly `width` bytes
    FixedWidth { value: u64, width: u8 },
    /// Bytes copied verbatim, no length prefix or terminator
    RawBytes(&'a [u8]),
}

impl<'a> Field<'a> {
    /// Fixed width field using as few bytes as the value needs
    pub fn minimal(value: u32) -> Field<'a> {
        Field::FixedWidth {
            value: value.into(),
            width: bytes_used(value),
        }
    }

    /// Unsigned Short field
    pub fn unsigned_short(value: u16) -> Field<'a> {
        Field::FixedWidth {
            value: value.into(),
            width: 2,
        }
    }

    /// Size of field on the wire
    pub fn encoded_len(&self) -> usize {
        match self {
            Field::VarInt(value) => varint_len(*value),
            Field::FixedWidth { width, .. } => *width as usize,
            Field::RawBytes(bytes) => bytes.len(),
        }
    }

    /// Append field bytes to buffer
    ///
    /// A fixed width value wider than `width` keeps only its low `width` bytes,
    /// a width above 8 is padded with leading zeros.
    pub fn write_to(&self, buffer: &mut ByteBuffer) {
        match self {
            Field::VarInt(value) => buffer.write_bytes(&encode_varint(*value)),
            Field::FixedWidth { value, width } => {
                let width = *width as usize;
                let be = value.to_be_bytes();
                if width > be.len() {
                    buffer.write_bytes(&vec![0; width - be.len()]);
                    buffer.write_bytes(&be);
                } else {
                    buffer.write_bytes(&be[be.len() - width..]);
                }
            }
            Field::RawBytes(bytes) => buffer.write_bytes(bytes),
        }
    }
}

/// Outgoing Minecraft packet: VarInt id followed by its fields
#[derive(Debug)]
pub struct Packet {
    id: u32,
    buffer: ByteBuffer,
}

impl Packet {
    /// Create new packet with id and no fields
    pub fn empty(id: u32) -> Packet {
        let mut buffer = ByteBuffer::new();
        Field::VarInt(id).write_to(&mut buffer);

        Packet { id, buffer }
    }

    /// Build packet with lambda
    pub fn build<F>(id: u32, builder: F) -> Result<Packet, ProtocolError>
    where
        F: FnOnce(&mut Packet) -> Result<(), ProtocolError>,
    {
        let mut packet = Self::empty(id);
        builder(&mut packet)?;
        Ok(packet)
    }

    /// Append field after the ones already written
    pub fn append(&mut self, field: Field<'_>) -> &mut Self {
        field.write_to(&mut self.buffer);
        self
    }

    /// Get packet id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Bytes after the length prefix (id and fields)
    pub fn payload_len(&self) -> usize {
        self.buffer.len()
    }

    /// Get payload bytes (id and fields)
    pub fn payload(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Consume packet into a wire frame: VarInt payload length, then the payload
    pub fn into_frame(self) -> Result<Vec<u8>, ProtocolError> {
        let payload_len = self.payload_len();
        if payload_len > MAX_PACKET_SIZE {
            return Err(ProtocolError::PacketTooLarge {
                len: payload_len,
                max: MAX_PACKET_SIZE,
            });
        }

        let mut frame = encode_varint(payload_len as u32);
        frame.extend_from_slice(self.payload());

        debug_assert_eq!(frame.len(), varint_len(payload_len as u32) + payload_len);

        Ok(frame)
    }
}

impl DataWriter for Packet {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ProtocolError> {
        self.buffer.write_bytes(bytes);
        Ok(())
    }
}
