//! Figures of merit of a code: entropy, average length, Kraft sum.

use crate::alphabet::Alphabet;
use crate::error::Result;
use crate::table::CodeTable;

/// Shannon entropy of the alphabet, `-Σ p log2(p)`, in bits per symbol.
pub fn entropy(alphabet: &Alphabet) -> f64 {
    -alphabet
        .iter()
        .map(|s| s.probability * s.probability.log2())
        .sum::<f64>()
}

/// Probability-weighted average code length of the alphabet's symbols.
///
/// For a Huffman code this lies in `[entropy, entropy + 1)`.
///
/// # Examples
///
/// ```
/// use huffman_table::{stats, Alphabet, CodeTable};
///
/// let alphabet = Alphabet::new(vec![("a", 0.5), ("b", 0.25), ("c", 0.25)]).unwrap();
/// let table = CodeTable::build(&alphabet).unwrap();
/// assert_eq!(stats::average_length(&table, &alphabet).unwrap(), 1.5);
/// assert_eq!(stats::entropy(&alphabet), 1.5);
/// ```
pub fn average_length(table: &CodeTable, alphabet: &Alphabet) -> Result<f64> {
    let mut total = 0.0;
    for symbol in alphabet {
        total += symbol.probability * table.code_for(&symbol.id)?.len() as f64;
    }
    Ok(total)
}

/// `Σ 2^-len` over all codes. Exactly one for a complete tree of two or more
/// symbols.
pub fn kraft_sum(table: &CodeTable) -> f64 {
    table
        .codes()
        .values()
        .map(|code| 0.5f64.powi(code.len() as i32))
        .sum()
}
