pub mod frequency;
pub mod tree;
pub mod code_table;

pub use frequency::FrequencyTable;
pub use tree::{build_tree, HuffmanNode};
pub use code_table::{Code, CodeTable};

/// Number of distinct byte values.
pub const K_NUM_SYMBOLS: usize = 256;

/// Longest code the [`Code`] value type can hold. Any table whose total count
/// fits in a `u64` yields codes well below this.
pub const K_MAX_CODE_BITS: usize = 128;

#[cfg(test)]
mod tests;
