//! # huffpack
//!
//! Lossless byte compression with a classical Huffman code.
//!
//! The input is counted once to get per-byte frequencies, a code tree is built
//! from them, and the input is encoded again as a packed bitstream. Only the
//! frequencies are stored; the decoder rebuilds the identical tree from them.
//!
//! ```
//! let container = huffpack::compress(b"aaaabbbccd")?;
//! assert_eq!(huffpack::decompress(&container)?, b"aaaabbbccd");
//!
//! let table = huffpack::code_table(b"aaaabbbccd")?;
//! assert_eq!(huffpack::lookup_code(&table, b'a')?.to_string(), "0");
//! # Ok::<(), huffpack::Error>(())
//! ```

pub mod bits;
pub mod code;
pub mod codec;
pub mod container;
pub mod error;
pub mod frequency;
pub mod heap;
pub mod tree;

pub use code::{Code, CodeTable};
pub use codec::{
    code_table, compress, compress_file, decompress, decompress_file, lookup_code,
    lookup_code_in_file, read_file, write_file,
};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use tree::CodeTree;
