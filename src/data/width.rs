/// Count of bytes `value` occupies as a big-endian integer, ignoring leading
/// zero bytes. Zero still takes one byte on the wire.
pub fn bytes_used(value: u32) -> u8 {
    match value.to_be_bytes().iter().position(|b| *b != 0) {
        Some(i) => (4 - i) as u8,
        None => 1,
    }
}
