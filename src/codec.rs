use std::{
    fs::{self, File},
    io::{Read, Write},
    path::Path,
};

use tracing::{debug, info, warn};

use crate::{
    bits::{BitReader, BitWriter},
    code::{Code, CodeTable},
    container::Header,
    error::{Error, Result},
    frequency::FrequencyTable,
    tree::{CodeTree, Node},
};

/// compress `input` into a self-describing container
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }

    let frequencies = FrequencyTable::from_bytes(input);
    let tree = CodeTree::from_frequencies(&frequencies)?;
    let table = CodeTable::generate(&tree);
    let bit_count = table.encoded_bits(&frequencies);
    let header = Header::new(&frequencies, bit_count)?;
    debug!(
        symbols = table.len(),
        depth = tree.depth(),
        bits = bit_count,
        "built code table"
    );

    let mut writer = BitWriter::with_capacity(bit_count as usize);
    for &byte in input {
        writer.write_code(table.lookup(byte)?);
    }
    let (payload, written) = writer.finish();
    debug_assert_eq!(written, bit_count);

    let mut container = Vec::with_capacity(header.encoded_len() + payload.len());
    header.write_to(&mut container).map_err(Error::Write)?;
    container.extend_from_slice(&payload);
    debug!(
        input = input.len(),
        output = container.len(),
        "compressed"
    );
    Ok(container)
}

/// restore the bytes a container was compressed from
pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    let (header, payload) = Header::parse(container)?;
    let tree = CodeTree::build(&header.symbols, &header.weights())?;
    let reader = BitReader::new(payload, header.bit_count)?;
    let expected = header.total();
    debug!(
        symbols = header.symbols.len(),
        bits = header.bit_count,
        expected,
        "rebuilt code tree"
    );

    // every decoded byte consumes at least one bit
    let mut output = Vec::with_capacity(expected.min(header.bit_count) as usize);
    let root = tree.root();
    match *tree.node(root) {
        Node::Leaf { symbol, .. } => {
            for bit in reader {
                if bit {
                    return Err(Error::malformed("set bit in a single-symbol payload"));
                }
                output.push(symbol);
            }
        }
        Node::Internal { .. } => {
            let mut current = root;
            for bit in reader {
                current = tree
                    .child(current, bit)
                    .ok_or_else(|| Error::malformed("walked past a leaf"))?;
                if let Node::Leaf { symbol, .. } = *tree.node(current) {
                    output.push(symbol);
                    current = root;
                }
            }
            if current != root {
                return Err(Error::malformed("payload ends inside a code"));
            }
        }
    }

    if output.len() as u64 != expected {
        return Err(Error::malformed(format!(
            "decoded {} bytes but frequencies sum to {}",
            output.len(),
            expected
        )));
    }
    Ok(output)
}

/// code table `input` would be compressed with
pub fn code_table(input: &[u8]) -> Result<CodeTable> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }
    let tree = CodeTree::from_frequencies(&FrequencyTable::from_bytes(input))?;
    Ok(CodeTable::generate(&tree))
}

/// code of one symbol
pub fn lookup_code(table: &CodeTable, symbol: u8) -> Result<&Code> {
    table.lookup(symbol)
}

/// read a whole file
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(Error::Read)?;
    Ok(bytes)
}

/// write `bytes` to `path`, removing the file again if the write fails
///
/// only regular files are removed; a device or pipe given as `path` is left alone.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    if let Err(err) = file.write_all(bytes).and_then(|()| file.flush()) {
        drop(file);
        let regular = fs::metadata(path).map_or(false, |meta| meta.is_file());
        if regular {
            if let Err(cleanup) = fs::remove_file(path) {
                warn!(path = %path.display(), %cleanup, "could not remove partial output");
            }
        }
        return Err(Error::Write(err));
    }
    Ok(())
}

/// compress the file at `input` into `output`
///
/// nothing is created at `output` unless compression succeeds.
pub fn compress_file(input: &Path, output: &Path) -> Result<()> {
    let data = read_file(input)?;
    let container = compress(&data)?;
    write_file(output, &container)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        from = data.len(),
        to = container.len(),
        "file compressed"
    );
    Ok(())
}

/// decompress the container at `input` into `output`
///
/// nothing is created at `output` unless the container decodes cleanly.
pub fn decompress_file(input: &Path, output: &Path) -> Result<()> {
    let container = read_file(input)?;
    let data = decompress(&container)?;
    write_file(output, &data)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        from = container.len(),
        to = data.len(),
        "file decompressed"
    );
    Ok(())
}

/// code `symbol` would get when compressing the file at `input`
pub fn lookup_code_in_file(input: &Path, symbol: u8) -> Result<Code> {
    let data = read_file(input)?;
    let table = code_table(&data)?;
    lookup_code(&table, symbol).map(Code::clone)
}
