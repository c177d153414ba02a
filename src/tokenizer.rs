//! Reversible SMILES tokenizer.

use compact_str::CompactString;
use fancy_regex::Regex;
use rayon::prelude::*;

use crate::constants::{
    Tokens, BEGIN_TOKEN, BRACKETS_PATTERN, BRCL_PATTERN, END_TOKEN, TWO_RING_NUMS_PATTERN,
};
use crate::utils::split_by;

/// Classes of multi-character tokens, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternCategory {
    /// `[...]`, kept whole whatever its contents
    Brackets,
    /// `%NN`
    TwoRingNums,
    /// `Br` and `Cl`
    BrCl,
}

impl PatternCategory {
    /// All categories, highest precedence first.
    pub const ALL: [PatternCategory; 3] = [
        PatternCategory::Brackets,
        PatternCategory::TwoRingNums,
        PatternCategory::BrCl,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PatternCategory::Brackets => "brackets",
            PatternCategory::TwoRingNums => "2_ring_nums",
            PatternCategory::BrCl => "brcl",
        }
    }

    pub fn pattern(self) -> &'static str {
        match self {
            PatternCategory::Brackets => BRACKETS_PATTERN,
            PatternCategory::TwoRingNums => TWO_RING_NUMS_PATTERN,
            PatternCategory::BrCl => BRCL_PATTERN,
        }
    }
}

/// Converts SMILES strings to token sequences and back.
///
/// The tokenizer holds nothing but its compiled patterns, so a single
/// instance can be shared between threads.
#[derive(Debug, Clone)]
pub struct SmilesTokenizer {
    /// Compiled patterns, in [`PatternCategory::ALL`] order
    compiled_patterns: Vec<Regex>,
}

impl Default for SmilesTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SmilesTokenizer {
    pub fn new() -> Self {
        let compiled_patterns = PatternCategory::ALL
            .iter()
            .map(|c| Regex::new(c.pattern()).expect("Invalid SMILES pattern"))
            .collect();
        Self { compiled_patterns }
    }

    /// Tokenize a SMILES string.
    ///
    /// With `with_begin_and_end` the sequence is framed by `^` and `$`.
    /// Never fails: anything not covered by a pattern category is split
    /// into single characters.
    pub fn tokenize(&self, smiles: &str, with_begin_and_end: bool) -> Tokens {
        let mut tokens = Vec::with_capacity(smiles.len() + 2);
        if with_begin_and_end {
            tokens.push(CompactString::from(BEGIN_TOKEN));
        }
        split_by(smiles, &self.compiled_patterns, &mut tokens);
        if with_begin_and_end {
            tokens.push(CompactString::from(END_TOKEN));
        }
        tokens
    }

    /// Join tokens back into a SMILES string.
    ///
    /// `^` tokens are skipped wherever they appear; the first `$` ends the
    /// string and everything after it is dropped.
    pub fn untokenize<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        let mut smi = String::new();
        for token in tokens {
            let token = token.as_ref();
            if token == END_TOKEN {
                break;
            }
            if token != BEGIN_TOKEN {
                smi.push_str(token);
            }
        }
        smi
    }

    /// Tokenize many SMILES strings in parallel. Output order matches input order.
    pub fn tokenize_batch<S: AsRef<str> + Sync>(
        &self,
        smiles: &[S],
        with_begin_and_end: bool,
    ) -> Vec<Tokens> {
        log::info!("Tokenizing {} SMILES", smiles.len());
        smiles
            .par_iter()
            .map(|smi| self.tokenize(smi.as_ref(), with_begin_and_end))
            .collect()
    }
}
