//! The validated input of the builder: an ordered list of symbols and their
//! probabilities.

use std::collections::{HashMap, HashSet};

use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, Result};

/// A symbol of the alphabet together with its probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub id: String,
    pub probability: f64,
}

/// An ordered, non-empty set of symbols whose probabilities are positive and
/// sum to one.
///
/// The order matters: it is the insertion order the builder starts from, and
/// it decides which of several equally probable trees gets merged first.
#[derive(Debug, Clone, PartialEq)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
}

impl Alphabet {
    /// How far the sum of the probabilities may drift from one.
    pub const TOLERANCE: f64 = 1e-6;

    /// Validates a list of `(symbol, probability)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use huffman_table::{Alphabet, Error};
    ///
    /// let alphabet = Alphabet::new(vec![("a", 0.75), ("b", 0.25)]).unwrap();
    /// assert_eq!(alphabet.len(), 2);
    ///
    /// assert_eq!(
    ///     Alphabet::new(vec![("a", 0.5), ("a", 0.5)]),
    ///     Err(Error::AmbiguousSymbolKey("a".to_string()))
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::EmptyAlphabet`] for no symbols, [`Error::InvalidProbability`]
    /// for a probability that is not a positive finite number,
    /// [`Error::ProbabilitySum`] when the sum is not one and
    /// [`Error::AmbiguousSymbolKey`] for a repeated identifier.
    pub fn new<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let symbols = Self::collect(pairs)?;
        let total: f64 = symbols.iter().map(|s| s.probability).sum();
        if (total - 1.0).abs() > Self::TOLERANCE {
            return Err(Error::ProbabilitySum(total));
        }
        Ok(Alphabet { symbols })
    }

    /// Builds an alphabet from positive weights (counts, scores, ...) by
    /// dividing each one by their total.
    pub fn from_weights<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut symbols = Self::collect(pairs)?;
        let total: f64 = symbols.iter().map(|s| s.probability).sum();
        if !total.is_finite() {
            return Err(Error::ProbabilitySum(total));
        }
        for s in symbols.iter_mut() {
            s.probability /= total;
        }
        Ok(Alphabet { symbols })
    }

    /// Builds an alphabet from the relative frequencies of the
    /// [grapheme clusters](http://www.unicode.org/reports/tr29/#Grapheme_Cluster_Boundaries)
    /// of `s`, most frequent first.
    ///
    /// # Examples
    ///
    /// ```
    /// let alphabet = huffman_table::Alphabet::from_text("huffman").unwrap();
    /// let mut iter = alphabet.iter();
    ///
    /// assert_eq!(iter.next().map(|s| s.id.as_str()), Some("f"));
    /// assert_eq!(iter.next().map(|s| s.id.as_str()), Some("a"));
    /// assert_eq!(alphabet.len(), 6);
    /// ```
    pub fn from_text(s: &str) -> Result<Self> {
        let mut counts = HashMap::new();
        for g in UnicodeSegmentation::graphemes(s, true) {
            *counts.entry(g).or_insert(0usize) += 1;
        }
        let mut counts = counts.into_iter().collect::<Vec<(&str, usize)>>();
        // Ties are ordered by grapheme so the result does not depend on the
        // hash map's iteration order.
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        Self::from_weights(counts.into_iter().map(|(g, n)| (g, n as f64)))
    }

    fn collect<I, S>(pairs: I) -> Result<Vec<Symbol>>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut symbols = Vec::new();
        for (id, probability) in pairs {
            let id = id.into();
            if !probability.is_finite() || probability <= 0.0 {
                return Err(Error::InvalidProbability {
                    symbol: id,
                    probability,
                });
            }
            if !seen.insert(id.clone()) {
                return Err(Error::AmbiguousSymbolKey(id));
            }
            symbols.push(Symbol { id, probability });
        }
        if symbols.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        Ok(symbols)
    }

    /// Number of symbols; never zero.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`: construction rejects an empty alphabet.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.symbols.get(index)
    }

    /// Position of the symbol `id` in the alphabet.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s.id == id)
    }
}

impl<'a> IntoIterator for &'a Alphabet {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}
