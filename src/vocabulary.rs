//! Token vocabulary for the sequence model's embedding layer.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

use ahash::{AHashMap, AHashSet};
use compact_str::CompactString;
use rayon::prelude::*;

use crate::constants::{BEGIN_TOKEN, END_TOKEN};
use crate::error::VocabularyError;
use crate::padding::{pad_sequences, PaddedBatch};
use crate::tokenizer::SmilesTokenizer;

/// Bidirectional token/id mapping.
///
/// A vocabulary built with [`Vocabulary::from_smiles`] always holds `$` at
/// id 0 and `^` at id 1.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    token_to_id: AHashMap<CompactString, u32>,
    id_to_token: Vec<CompactString>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from every token appearing in `smiles`.
    ///
    /// Sentinels come first, then all other tokens sorted.
    pub fn from_smiles<S: AsRef<str> + Sync>(smiles: &[S], tokenizer: &SmilesTokenizer) -> Self {
        let tokens: AHashSet<CompactString> = smiles
            .par_iter()
            .map(|smi| {
                tokenizer
                    .tokenize(smi.as_ref(), false)
                    .into_iter()
                    .collect::<AHashSet<_>>()
            })
            .reduce(AHashSet::new, |mut acc, set| {
                acc.extend(set);
                acc
            });

        let mut sorted: Vec<_> = tokens.into_iter().collect();
        sorted.sort();

        let mut vocabulary = Self::new();
        vocabulary.update([END_TOKEN, BEGIN_TOKEN]);
        vocabulary.update(sorted);

        log::info!(
            "Built vocabulary of {} tokens from {} SMILES",
            vocabulary.len(),
            smiles.len()
        );
        vocabulary
    }

    /// Add a token, returning its id. Existing tokens keep their id.
    pub fn add(&mut self, token: &str) -> u32 {
        if let Some(&id) = self.token_to_id.get(token) {
            return id;
        }
        let id = self.id_to_token.len() as u32;
        let token = CompactString::from(token);
        self.token_to_id.insert(token.clone(), id);
        self.id_to_token.push(token);
        id
    }

    pub fn update<I, S>(&mut self, tokens: I) -> Vec<u32>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens.into_iter().map(|t| self.add(t.as_ref())).collect()
    }

    pub fn len(&self) -> usize {
        self.id_to_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_token.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.token_to_id.contains_key(token)
    }

    /// All tokens in id order.
    pub fn tokens(&self) -> &[CompactString] {
        &self.id_to_token
    }

    pub fn token_to_id(&self, token: &str) -> Result<u32, VocabularyError> {
        self.token_to_id
            .get(token)
            .copied()
            .ok_or_else(|| VocabularyError::UnknownToken(token.to_string()))
    }

    pub fn id_to_token(&self, id: u32) -> Result<&str, VocabularyError> {
        self.id_to_token
            .get(id as usize)
            .map(|t| t.as_str())
            .ok_or(VocabularyError::UnknownId(id))
    }

    pub fn encode<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<u32>, VocabularyError> {
        tokens
            .iter()
            .map(|t| self.token_to_id(t.as_ref()))
            .collect()
    }

    pub fn decode(&self, ids: &[u32]) -> Result<Vec<CompactString>, VocabularyError> {
        ids.iter()
            .map(|&id| self.id_to_token(id).map(CompactString::from))
            .collect()
    }

    /// Pad encoded sequences with this vocabulary's end token id.
    pub fn pad_batch(
        &self,
        sequences: Vec<Vec<u32>>,
        max_length: Option<usize>,
    ) -> Result<PaddedBatch, VocabularyError> {
        let pad_id = self.token_to_id(END_TOKEN)?;
        Ok(pad_sequences(sequences, pad_id, max_length))
    }

    /// Save one token per line, in id order.
    ///
    /// Tokens that are empty or contain a line break cannot be read back
    /// with their ids intact and are rejected before the file is created.
    pub fn save(&self, path: &str) -> Result<(), VocabularyError> {
        let io_err = |source: std::io::Error| VocabularyError::Io {
            path: path.to_string(),
            source,
        };
        if let Some((id, token)) = self
            .id_to_token
            .iter()
            .enumerate()
            .find(|(_, t)| t.is_empty() || t.contains(['\n', '\r']))
        {
            return Err(VocabularyError::InvalidFile {
                path: path.to_string(),
                reason: format!("token {:?} with id {} cannot be stored on one line", token, id),
            });
        }
        let mut file = BufWriter::new(File::create(path).map_err(io_err)?);
        for token in &self.id_to_token {
            writeln!(file, "{}", token).map_err(io_err)?;
        }
        file.flush().map_err(io_err)?;
        Ok(())
    }

    /// Load a file written by [`Vocabulary::save`].
    pub fn load(path: &str) -> Result<Self, VocabularyError> {
        let io_err = |source: std::io::Error| VocabularyError::Io {
            path: path.to_string(),
            source,
        };
        let reader = BufReader::new(File::open(path).map_err(io_err)?);

        let mut vocabulary = Self::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line.map_err(io_err)?;
            if line.is_empty() {
                continue;
            }
            if vocabulary.contains(&line) {
                return Err(VocabularyError::InvalidFile {
                    path: path.to_string(),
                    reason: format!("duplicate token '{}' on line {}", line, lineno + 1),
                });
            }
            vocabulary.add(&line);
        }

        log::info!("Loaded vocabulary of {} tokens", vocabulary.len());
        Ok(vocabulary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BEGIN_TOKEN_ID, END_TOKEN_ID};

    #[test]
    fn test_from_smiles() {
        let tok = SmilesTokenizer::new();
        let vocab = Vocabulary::from_smiles(&["CCl", "c1ccccc1Br", "C[NH3+]"], &tok);

        assert_eq!(vocab.token_to_id(END_TOKEN).unwrap(), END_TOKEN_ID);
        assert_eq!(vocab.token_to_id(BEGIN_TOKEN).unwrap(), BEGIN_TOKEN_ID);
        let rest: Vec<&str> = vocab.tokens()[2..].iter().map(|t| t.as_str()).collect();
        assert_eq!(rest, vec!["1", "Br", "C", "Cl", "[NH3+]", "c"]);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut vocab = Vocabulary::new();
        assert_eq!(vocab.add("C"), 0);
        assert_eq!(vocab.add("O"), 1);
        assert_eq!(vocab.add("C"), 0);
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn test_encode_decode() {
        let tok = SmilesTokenizer::new();
        let vocab = Vocabulary::from_smiles(&["CCO"], &tok);
        let tokens = tok.tokenize("OCC", true);
        let ids = vocab.encode(&tokens).unwrap();
        assert_eq!(ids.first(), Some(&BEGIN_TOKEN_ID));
        assert_eq!(ids.last(), Some(&END_TOKEN_ID));
        assert_eq!(vocab.decode(&ids).unwrap(), tokens);
    }

    #[test]
    fn test_unknown_lookups() {
        let vocab = Vocabulary::from_smiles(&["C"], &SmilesTokenizer::new());
        assert!(matches!(
            vocab.encode(&["N"]),
            Err(VocabularyError::UnknownToken(t)) if t == "N"
        ));
        assert!(matches!(
            vocab.decode(&[99]),
            Err(VocabularyError::UnknownId(99))
        ));
    }

    #[test]
    fn test_pad_batch_uses_end_token() {
        let vocab = Vocabulary::from_smiles(&["C"], &SmilesTokenizer::new());
        let batch = vocab.pad_batch(vec![vec![1, 2, 0], vec![1, 0]], None).unwrap();
        assert_eq!(batch.input_ids, vec![vec![1, 2, 0], vec![1, 0, END_TOKEN_ID]]);
    }

    #[test]
    fn test_pad_batch_follows_end_token_position() {
        let mut vocab = Vocabulary::new();
        vocab.add("C");
        vocab.add(BEGIN_TOKEN);
        vocab.add(END_TOKEN);
        let batch = vocab.pad_batch(vec![vec![1, 0, 2], vec![1, 2]], None).unwrap();
        assert_eq!(batch.input_ids, vec![vec![1, 0, 2], vec![1, 2, 2]]);

        let mut bare = Vocabulary::new();
        bare.add("C");
        assert!(matches!(
            bare.pad_batch(vec![vec![0]], None),
            Err(VocabularyError::UnknownToken(t)) if t == END_TOKEN
        ));
    }
}
