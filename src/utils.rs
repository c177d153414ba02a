//! Utility functions for SMILES segmentation.

use compact_str::CompactString;
use fancy_regex::Regex;

/// Split `smiles` by an ordered list of patterns.
///
/// Text matched by `patterns[0]` becomes one token and is never looked at
/// again. Text between matches is split by the remaining patterns, and once
/// no pattern is left every character becomes its own token.
pub(crate) fn split_by(smiles: &str, patterns: &[Regex], tokens: &mut Vec<CompactString>) {
    let Some((pattern, rest)) = patterns.split_first() else {
        let mut buf = [0u8; 4];
        tokens.extend(smiles.chars().map(|c| CompactString::from(&*c.encode_utf8(&mut buf))));
        return;
    };

    let mut last = 0;
    for m in pattern.find_iter(smiles).flatten() {
        split_by(&smiles[last..m.start()], rest, tokens);
        tokens.push(CompactString::from(m.as_str()));
        last = m.end();
    }
    split_by(&smiles[last..], rest, tokens);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BRACKETS_PATTERN, BRCL_PATTERN, TWO_RING_NUMS_PATTERN};

    fn patterns() -> Vec<Regex> {
        [BRACKETS_PATTERN, TWO_RING_NUMS_PATTERN, BRCL_PATTERN]
            .iter()
            .map(|p| Regex::new(p).unwrap())
            .collect()
    }

    fn split(smiles: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        split_by(smiles, &patterns(), &mut tokens);
        tokens.into_iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_split_by_no_patterns() {
        let mut tokens = Vec::new();
        split_by("CCO", &[], &mut tokens);
        assert_eq!(
            tokens,
            vec![
                CompactString::from("C"),
                CompactString::from("C"),
                CompactString::from("O")
            ]
        );
    }

    #[test]
    fn test_split_by_empty() {
        assert!(split("").is_empty());
    }

    #[test]
    fn test_bracket_content_not_resplit() {
        // Cl inside a bracket stays part of the bracket token
        assert_eq!(split("[Cl-]Br"), vec!["[Cl-]", "Br"]);
        assert_eq!(split("[%12]"), vec!["[%12]"]);
    }

    #[test]
    fn test_adjacent_matches() {
        assert_eq!(split("BrCl%11%22"), vec!["Br", "Cl", "%11", "%22"]);
    }

    #[test]
    fn test_single_digit_percent_falls_back() {
        assert_eq!(split("C%1"), vec!["C", "%", "1"]);
    }

    #[test]
    fn test_unclosed_bracket_falls_back() {
        assert_eq!(split("[NH"), vec!["[", "N", "H"]);
    }

    #[test]
    fn test_multibyte_characters() {
        assert_eq!(split("Cé"), vec!["C", "é"]);
    }
}
