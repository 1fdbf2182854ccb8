//! VarInt codec: 7 payload bits per byte, least significant group first,
//! high bit set on every byte except the last

use crate::{data::DataReader, ProtocolError};

/// Largest encoded size of a 32 bit VarInt
pub const MAX_VARINT_SIZE: usize = 5;

const SEGMENT_BITS: u8 = 0b01111111;
const CONTINUE_BIT: u8 = 0b10000000;

/// Encode u32 as VarInt bytes
pub fn encode_varint(value: u32) -> Vec<u8> {
    let mut value = value;
    let mut bytes = Vec::with_capacity(MAX_VARINT_SIZE);

    loop {
        let next = (value & SEGMENT_BITS as u32) as u8;
        value >>= 7;

        if value == 0 {
            bytes.push(next);
            return bytes;
        }

        bytes.push(next | CONTINUE_BIT);
    }
}

/// Size of encoded VarInt in bytes
pub fn varint_len(value: u32) -> usize {
    match value {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1F_FFFF => 3,
        0x20_0000..=0x0FFF_FFFF => 4,
        _ => 5,
    }
}

/// Decode VarInt from reader (varint, size)
pub fn decode_varint<R: DataReader + ?Sized>(reader: &mut R) -> Result<(u32, usize), ProtocolError> {
    let mut decoded: u32 = 0;

    for index in 0..MAX_VARINT_SIZE {
        let next = reader.read_byte()?;
        let bits = (next & SEGMENT_BITS) as u32;

        // last group only has room for the top 4 bits of a u32
        if index == MAX_VARINT_SIZE - 1 && bits > 0x0F {
            return Err(ProtocolError::MalformedVarInt);
        }

        decoded |= bits << (7 * index);

        if next & CONTINUE_BIT == 0 {
            return Ok((decoded, index + 1));
        }
    }

    Err(ProtocolError::MalformedVarInt)
}
