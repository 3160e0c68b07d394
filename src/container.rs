//! container layout, all integers little-endian:
//!
//! | field         | size            |                                     |
//! |---------------|-----------------|-------------------------------------|
//! | symbol count  | 4               | distinct symbols, 1..=256           |
//! | symbols       | count           | strictly ascending byte values      |
//! | frequencies   | 4 * count       | parallel to symbols, each non-zero  |
//! | bit count     | 8               | encoded bits in the payload         |
//! | payload       | ceil(bits / 8)  | codes packed MSB first, zero padded |

use std::io::{self, Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    error::{Error, Result},
    frequency::FrequencyTable,
};

/// everything the decoder needs to rebuild the tree and bound the payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub symbols: Vec<u8>,
    pub frequencies: Vec<u32>,
    pub bit_count: u64,
}

impl Header {
    /// header for an input counted into `table` whose payload holds `bit_count` bits
    pub fn new(table: &FrequencyTable, bit_count: u64) -> Result<Self> {
        let mut symbols = Vec::with_capacity(table.distinct());
        let mut frequencies = Vec::with_capacity(table.distinct());
        for (symbol, count) in table.present() {
            let count = u32::try_from(count).map_err(|_| {
                Error::TooLarge(format!(
                    "byte {:#04x} occurs {} times, more than a 32-bit frequency holds",
                    symbol, count
                ))
            })?;
            symbols.push(symbol);
            frequencies.push(count);
        }
        Ok(Header {
            symbols,
            frequencies,
            bit_count,
        })
    }

    /// frequencies widened for tree building
    pub fn weights(&self) -> Vec<u64> {
        self.frequencies.iter().map(|&f| f as u64).collect()
    }

    /// number of bytes the payload decodes to
    pub fn total(&self) -> u64 {
        self.frequencies.iter().map(|&f| f as u64).sum()
    }

    /// payload bytes implied by the bit count
    pub fn payload_len(&self) -> u64 {
        self.bit_count / 8 + u64::from(self.bit_count % 8 != 0)
    }

    /// serialized size of the header itself
    pub fn encoded_len(&self) -> usize {
        4 + self.symbols.len() * 5 + 8
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self.symbols.len() as u32)?;
        writer.write_all(&self.symbols)?;
        for &frequency in &self.frequencies {
            writer.write_u32::<LittleEndian>(frequency)?;
        }
        writer.write_u64::<LittleEndian>(self.bit_count)?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let size = reader.read_u32::<LittleEndian>().map_err(truncated)? as usize;
        if size == 0 || size > 256 {
            return Err(Error::malformed(format!(
                "symbol count {} outside 1..=256",
                size
            )));
        }

        let mut symbols = vec![0u8; size];
        reader.read_exact(&mut symbols).map_err(truncated)?;
        if symbols.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(Error::malformed("symbols are not strictly ascending"));
        }

        let mut frequencies = Vec::with_capacity(size);
        for &symbol in &symbols {
            let frequency = reader.read_u32::<LittleEndian>().map_err(truncated)?;
            if frequency == 0 {
                return Err(Error::malformed(format!(
                    "symbol {:#04x} has frequency 0",
                    symbol
                )));
            }
            frequencies.push(frequency);
        }

        let bit_count = reader.read_u64::<LittleEndian>().map_err(truncated)?;

        Ok(Header {
            symbols,
            frequencies,
            bit_count,
        })
    }

    /// split a whole container into its header and payload,
    /// checking that the payload is exactly as long as the bit count says
    pub fn parse(container: &[u8]) -> Result<(Self, &[u8])> {
        let mut cursor = Cursor::new(container);
        let header = Self::read_from(&mut cursor)?;
        let payload = &container[cursor.position() as usize..];
        if payload.len() as u64 != header.payload_len() {
            return Err(Error::malformed(format!(
                "payload is {} bytes but {} bits need {}",
                payload.len(),
                header.bit_count,
                header.payload_len()
            )));
        }
        Ok((header, payload))
    }
}

fn truncated(err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::UnexpectedEof => Error::malformed("header is truncated"),
        _ => Error::Read(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Header {
        Header::new(&FrequencyTable::from_bytes(b"aaaabbbccd"), 19).unwrap()
    }

    #[test]
    fn layout_is_little_endian() {
        let mut bytes = Vec::new();
        sample().write_to(&mut bytes).unwrap();
        assert_eq!(
            bytes,
            vec![
                4, 0, 0, 0, // symbol count
                b'a', b'b', b'c', b'd', // symbols
                4, 0, 0, 0, 3, 0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, // frequencies
                19, 0, 0, 0, 0, 0, 0, 0, // bit count
            ]
        );
        assert_eq!(bytes.len(), sample().encoded_len());
    }

    #[test]
    fn parse_splits_payload() {
        let header = sample();
        let mut bytes = Vec::new();
        header.write_to(&mut bytes).unwrap();
        bytes.extend_from_slice(&[0x5E, 0xDB, 0x80]);

        let (parsed, payload) = Header::parse(&bytes).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(parsed.total(), 10);
        assert_eq!(payload, &[0x5E, 0xDB, 0x80]);
    }

    #[test]
    fn rejects_wrong_payload_length() {
        let mut bytes = Vec::new();
        sample().write_to(&mut bytes).unwrap();
        bytes.extend_from_slice(&[0x00, 0x00]);
        assert!(matches!(
            Header::parse(&bytes),
            Err(Error::MalformedContainer(_))
        ));
    }

    #[test]
    fn rejects_huge_bit_count() {
        let header = Header {
            symbols: vec![b'a'],
            frequencies: vec![1],
            bit_count: u64::MAX,
        };
        assert_eq!(header.payload_len(), u64::MAX / 8 + 1);

        let mut bytes = Vec::new();
        header.write_to(&mut bytes).unwrap();
        assert!(matches!(
            Header::parse(&bytes),
            Err(Error::MalformedContainer(_))
        ));
    }

    #[test]
    fn rejects_truncated_header() {
        let mut bytes = Vec::new();
        sample().write_to(&mut bytes).unwrap();
        for len in [0, 3, 6, 10, 27] {
            assert!(matches!(
                Header::parse(&bytes[..len]),
                Err(Error::MalformedContainer(_))
            ));
        }
    }

    #[test]
    fn rejects_bad_symbol_lists() {
        let zero_count = [0u8, 0, 0, 0];
        assert!(matches!(
            Header::parse(&zero_count),
            Err(Error::MalformedContainer(_))
        ));

        let too_many = 257u32.to_le_bytes();
        assert!(matches!(
            Header::parse(&too_many),
            Err(Error::MalformedContainer(_))
        ));

        let mut unordered = Header {
            symbols: vec![b'b', b'a'],
            frequencies: vec![1, 1],
            bit_count: 2,
        };
        let mut bytes = Vec::new();
        unordered.write_to(&mut bytes).unwrap();
        bytes.push(0);
        assert!(matches!(
            Header::parse(&bytes),
            Err(Error::MalformedContainer(_))
        ));

        unordered.symbols = vec![b'a', b'b'];
        unordered.frequencies = vec![1, 0];
        bytes.clear();
        unordered.write_to(&mut bytes).unwrap();
        bytes.push(0);
        assert!(matches!(
            Header::parse(&bytes),
            Err(Error::MalformedContainer(_))
        ));
    }
}
