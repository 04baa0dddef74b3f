use std::{collections::{BTreeMap, HashMap}, fmt};

use super::{FrequencyTable, HuffmanNode, K_MAX_CODE_BITS};

/// A bitstring of up to [`K_MAX_CODE_BITS`] bits, first bit most significant.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u128,
    len: u8,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this code extended by one bit.
    #[inline(always)]
    pub fn with_bit(self, bit: bool) -> Self {
        debug_assert!(
            (self.len as usize) < K_MAX_CODE_BITS,
            "code longer than {K_MAX_CODE_BITS} bits"
        );
        Self {
            bits: (self.bits << 1) | bit as u128,
            len: self.len + 1,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The raw bits, right-aligned.
    #[inline(always)]
    pub fn bits(&self) -> u128 {
        self.bits
    }

    /// Whether `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.is_empty() {
            return true;
        }
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len).rev() {
            write!(f, "{}", (self.bits >> i) & 1)?;
        }
        Ok(())
    }
}

/// Symbol to code bijection, with the reverse mapping used by the decoder.
#[derive(Clone, Default, Debug)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
    reverse: HashMap<Code, u8>,
    max_len: usize,
}

impl CodeTable {
    /// Walks the tree assigning `0` to left edges and `1` to right edges. A
    /// root that is itself a leaf gets the one-bit code `0`.
    pub fn from_tree(root: Option<&HuffmanNode>) -> Self {
        let mut table = Self::default();

        match root {
            None => {}
            Some(HuffmanNode::Leaf { symbol, .. }) => {
                table.assign(*symbol, Code::new().with_bit(false))
            }
            Some(node) => table.walk(node, Code::new()),
        }

        table
    }

    fn walk(&mut self, node: &HuffmanNode, prefix: Code) {
        match node {
            HuffmanNode::Leaf { symbol, .. } => self.assign(*symbol, prefix),
            HuffmanNode::Internal { left, right, .. } => {
                self.walk(left, prefix.with_bit(false));
                self.walk(right, prefix.with_bit(true));
            }
        }
    }

    fn assign(&mut self, symbol: u8, code: Code) {
        self.max_len = self.max_len.max(code.len());
        self.codes.insert(symbol, code);
        self.reverse.insert(code, symbol);
    }

    #[inline(always)]
    pub fn code(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    #[inline(always)]
    pub fn symbol(&self, code: &Code) -> Option<u8> {
        self.reverse.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// `Σ freq[s] * len(code[s])`, or `None` on overflow or when `freqs`
    /// holds a symbol without a code.
    pub fn encoded_bits(&self, freqs: &FrequencyTable) -> Option<u64> {
        freqs.iter().try_fold(0u64, |acc, (symbol, freq)| {
            let len = self.code(symbol)?.len() as u64;
            acc.checked_add(freq.checked_mul(len)?)
        })
    }
}
