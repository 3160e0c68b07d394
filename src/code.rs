use std::{collections::BTreeMap, fmt};

use bitvec::prelude::*;

use crate::{
    error::{Error, Result},
    frequency::FrequencyTable,
    tree::{CodeTree, Node},
};

/// root-to-leaf path of one symbol, `0` for left and `1` for right
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Code(BitVec<u8, Msb0>);

impl Code {
    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// whether `self` is a proper or equal prefix of `other`
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other
            .0
            .get(..self.len())
            .map_or(false, |head| head == self.0.as_bitslice())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for bit in self.0.iter().by_vals() {
            write!(f, "{}", if bit { 1 } else { 0 })?;
        }
        Ok(())
    }
}

impl FromIterator<bool> for Code {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Code(iter.into_iter().collect())
    }
}

/// code of every symbol present in a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// walk `tree` depth first and record the path to each leaf
    ///
    /// a tree whose root is a leaf gives its only symbol the one-bit code `0`.
    pub fn generate(tree: &CodeTree) -> Self {
        let mut codes = BTreeMap::new();
        if let Node::Leaf { symbol, .. } = *tree.node(tree.root()) {
            codes.insert(symbol, Code(bitvec![u8, Msb0; 0]));
            return CodeTable { codes };
        }

        let mut stack = vec![(tree.root(), BitVec::<u8, Msb0>::new())];
        while let Some((id, path)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, .. } => {
                    codes.insert(symbol, Code(path));
                }
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((right, right_path));
                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((left, left_path));
                }
            }
        }
        CodeTable { codes }
    }

    /// code of `symbol`, or SymbolNotFound when it never occurred
    pub fn lookup(&self, symbol: u8) -> Result<&Code> {
        self.codes.get(&symbol).ok_or(Error::SymbolNotFound(symbol))
    }

    /// code length of `symbol`, 0 when absent
    pub fn code_len(&self, symbol: u8) -> usize {
        self.codes.get(&symbol).map_or(0, Code::len)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// symbols and codes, ascending by symbol
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// payload size in bits when encoding the input `frequencies` was counted from
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .present()
            .map(|(symbol, count)| count * self.code_len(symbol) as u64)
            .sum()
    }

    /// format the table with each symbol and its code, tab separated and
    /// newline terminated, symbols escaped like byte string literals
    pub fn format_codebook(&self) -> String {
        let mut result = String::new();
        for (symbol, code) in self.iter() {
            result.push_str(&format!("{}\t{}\n", std::ascii::escape_default(symbol), code));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_for(bytes: &[u8]) -> CodeTable {
        let tree = CodeTree::from_frequencies(&FrequencyTable::from_bytes(bytes)).unwrap();
        CodeTable::generate(&tree)
    }

    fn assert_prefix_free(table: &CodeTable) {
        for (a, code_a) in table.iter() {
            for (b, code_b) in table.iter() {
                if a != b {
                    assert!(
                        !code_a.is_prefix_of(code_b),
                        "{} ({}) is a prefix of {} ({})",
                        a,
                        code_a,
                        b,
                        code_b
                    );
                }
            }
        }
    }

    #[test]
    fn frequent_symbols_get_short_codes() {
        let table = table_for(b"aaaabbbccd");
        assert_eq!(table.lookup(b'a').unwrap().to_string(), "0");
        assert_eq!(table.lookup(b'b').unwrap().to_string(), "10");
        assert_eq!(table.lookup(b'd').unwrap().to_string(), "110");
        assert_eq!(table.lookup(b'c').unwrap().to_string(), "111");
        assert!(table.code_len(b'a') < table.code_len(b'c'));
        assert!(table.code_len(b'b') < table.code_len(b'd'));
        assert_prefix_free(&table);
    }

    #[test]
    fn encoded_bits_match_weighted_lengths() {
        let input = b"aaaabbbccd";
        let table = table_for(input);
        // 4*1 + 3*2 + 2*3 + 1*3
        assert_eq!(table.encoded_bits(&FrequencyTable::from_bytes(input)), 19);
    }

    #[test]
    fn all_bytes_prefix_free() {
        let input: Vec<u8> = (0..=255u8)
            .flat_map(|b| std::iter::repeat(b).take(1 + (b as usize % 17) * (b as usize % 5)))
            .collect();
        let table = table_for(&input);
        assert_eq!(table.len(), 256);
        assert_prefix_free(&table);
    }

    #[test]
    fn single_symbol_gets_one_bit() {
        let table = table_for(&[b'A'; 1000]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(b'A').unwrap().to_string(), "0");
    }

    #[test]
    fn absent_symbol_not_found() {
        let table = table_for(b"abc");
        assert!(matches!(table.lookup(b'z'), Err(Error::SymbolNotFound(b'z'))));
        assert_eq!(table.code_len(b'z'), 0);
    }

    #[test]
    fn codebook_lists_each_symbol() {
        let table = table_for(b"aaaabbbccd\n");
        let codebook = table.format_codebook();
        let lines: Vec<&str> = codebook.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("\\n\t"));
        assert!(lines[1].starts_with("a\t"));
    }
}
