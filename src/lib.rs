//! # Huffman code tables
//!
//! `huffman-table` computes optimal prefix-free codes for a finite alphabet
//! of symbols with known probabilities, using
//! [Huffman's](https://en.wikipedia.org/wiki/Huffman_coding) greedy
//! construction, and answers "which bits encode this symbol?".
//!
//! The builder keeps a collection of trees, one per not-yet-merged
//! probability mass, and repeatedly joins the two least probable ones under
//! a new node until a single tree is left. Each node records the branch bit
//! leading to it from its parent: the more probable of two merged trees gets
//! `1`, the other `0` (on a tie the older tree gets `0`). A symbol's code is
//! the sequence of those bits on the way from the root down to its leaf.
//!
//! ```
//! use bitvec::prelude::*;
//!
//! let table = huffman_table::build(vec![
//!     ("a1", 0.15),
//!     ("a2", 0.04),
//!     ("a3", 0.26),
//!     ("a4", 0.05),
//!     ("a5", 0.5),
//! ])
//! .unwrap();
//! assert_eq!(huffman_table::code_for(&table, "a5").unwrap(), bitvec![0]);
//! assert_eq!(huffman_table::code_for(&table, "a2").unwrap(), bitvec![1, 0, 0, 0]);
//! ```
//!
//! ## References
//!
//! * _Huffman, D.A., 1952. A method for the construction of minimum-redundancy codes. Proceedings of the IRE, 40(9), pp.1098-1101._

use bitvec::prelude::*;

pub mod alphabet;
pub mod builder;
pub mod error;
pub mod forest;
pub mod node;
pub mod stats;
pub mod table;

pub use alphabet::{Alphabet, Symbol};
pub use builder::{ForestBuilder, Strategy};
pub use error::{Error, Result};
pub use forest::{Forest, Tree};
pub use node::{Node, NodeId};
pub use table::CodeTable;

/// An encoded symbol is represented as
/// a [`bitvec::vec::BitVec`](https://docs.rs/bitvec/1/bitvec/vec/struct.BitVec.html),
/// `false` standing for `0` and `true` for `1`.
pub type Encoded = BitVec;
/// Every symbol of a table mapped to its [`Encoded`] representation.
pub type Codebook = std::collections::HashMap<String, Encoded>;

pub(crate) const ZERO: bool = false;
pub(crate) const ONE: bool = true;

/// Builds the code table of an alphabet given as `(symbol, probability)`
/// pairs.
///
/// # Errors
///
/// Fails with [`Error::EmptyAlphabet`], [`Error::InvalidProbability`],
/// [`Error::ProbabilitySum`] or [`Error::AmbiguousSymbolKey`] when the pairs
/// do not form a valid [`Alphabet`].
///
/// ```
/// use huffman_table::Error;
///
/// assert_eq!(
///     huffman_table::build(Vec::<(&str, f64)>::new()).unwrap_err(),
///     Error::EmptyAlphabet
/// );
/// ```
pub fn build<I, S>(alphabet: I) -> Result<CodeTable>
where
    I: IntoIterator<Item = (S, f64)>,
    S: Into<String>,
{
    CodeTable::build(&Alphabet::new(alphabet)?)
}

/// The code of `symbol` in `table`; see [`CodeTable::code_for`].
pub fn code_for(table: &CodeTable, symbol: &str) -> Result<Encoded> {
    table.code_for(symbol)
}
