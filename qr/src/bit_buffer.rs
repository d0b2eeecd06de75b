//! Append-only bit writer, most significant bit first.

/// Accumulates bits into a byte-aligned backing buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    buffer: Vec<u8>,
    length: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bit `index`, counting from the most significant bit of byte 0.
    pub fn get(&self, index: usize) -> bool {
        let byte = self.buffer[index / 8];
        (byte >> (7 - index % 8)) & 1 == 1
    }

    /// Append the low `length` bits of `num`, most significant first.
    pub fn put(&mut self, num: u32, length: usize) {
        for i in (0..length).rev() {
            self.put_bit((num >> i) & 1 == 1);
        }
    }

    pub fn put_bit(&mut self, bit: bool) {
        let byte_index = self.length / 8;
        if self.buffer.len() <= byte_index {
            self.buffer.push(0);
        }

        if bit {
            self.buffer[byte_index] |= 0x80 >> (self.length % 8);
        }

        self.length += 1;
    }

    /// Number of bits written.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Backing bytes; the last one is zero-padded if `len()` is not a
    /// multiple of 8.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}
