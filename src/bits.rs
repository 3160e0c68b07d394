use bitvec::prelude::*;

use crate::{
    code::Code,
    error::{Error, Result},
};

/// packs bits most-significant first, eight to a byte
#[derive(Debug, Default)]
pub struct BitWriter {
    bits: BitVec<u8, Msb0>,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// reserve room for `bit_count` more bits
    pub fn with_capacity(bit_count: usize) -> Self {
        BitWriter {
            bits: BitVec::with_capacity(bit_count),
        }
    }

    pub fn write_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn write_code(&mut self, code: &Code) {
        self.bits.extend_from_bitslice(code.bits());
    }

    /// number of bits written so far
    pub fn bit_count(&self) -> u64 {
        self.bits.len() as u64
    }

    /// packed bytes and the number of meaningful bits in them.
    /// the unused low bits of the last byte are zero
    pub fn finish(mut self) -> (Vec<u8>, u64) {
        let bit_count = self.bit_count();
        self.bits.set_uninitialized(false);
        (self.bits.into_vec(), bit_count)
    }
}

/// yields the first `bit_count` bits of a byte buffer, most-significant first
#[derive(Debug)]
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    position: usize,
}

impl<'a> BitReader<'a> {
    /// fails when `bytes` holds fewer than `bit_count` bits
    pub fn new(bytes: &'a [u8], bit_count: u64) -> Result<Self> {
        let available = bytes.len() as u64 * 8;
        if bit_count > available {
            return Err(Error::malformed(format!(
                "{} bits declared but only {} stored",
                bit_count, available
            )));
        }
        Ok(BitReader {
            bits: &BitSlice::from_slice(bytes)[..bit_count as usize],
            position: 0,
        })
    }

    pub fn read_bit(&mut self) -> Option<bool> {
        let bit = *self.bits.get(self.position)?;
        self.position += 1;
        Some(bit)
    }

    /// next eight bits as one byte, None when fewer remain.
    /// decoding walks the tree bit by bit through `read_bit` instead
    pub fn read_byte(&mut self) -> Option<u8> {
        if self.remaining() < 8 {
            return None;
        }
        let byte = self.bits[self.position..self.position + 8]
            .iter()
            .by_vals()
            .fold(0u8, |acc, bit| (acc << 1) | bit as u8);
        self.position += 8;
        Some(byte)
    }

    pub fn remaining(&self) -> usize {
        self.bits.len() - self.position
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit()
    }
}
