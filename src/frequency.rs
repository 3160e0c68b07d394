/// occurrences of each of the 256 byte values in one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: Box<[u64; 256]>,
}

impl FrequencyTable {
    /// count occurrences of each byte
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut counts = Box::new([0u64; 256]);
        for &byte in bytes {
            counts[byte as usize] += 1;
        }
        FrequencyTable { counts }
    }

    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// number of distinct bytes that occur at least once
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// number of bytes scanned
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// present symbols with their counts, ascending by symbol value
    pub fn present(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    /// split present entries into the parallel symbol and weight lists
    pub fn to_parallel(&self) -> (Vec<u8>, Vec<u64>) {
        self.present().unzip()
    }
}
