use std::fs;

use molreward::{SmilesTokenizer, Vocabulary, VocabularyError};
use tempfile::tempdir;

const SMILES: [&str; 4] = [
    "CC(=O)Oc1ccccc1C(=O)O",
    "Clc1ccc(Br)cc1",
    "C[C@@H](N)C(=O)O",
    "C1CC%10CC1%10",
];

#[test]
fn save_and_load_preserve_ids() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vocab.txt");
    let path = path.to_str().unwrap();

    let tok = SmilesTokenizer::new();
    let vocab = Vocabulary::from_smiles(&SMILES, &tok);
    vocab.save(path).unwrap();

    let loaded = Vocabulary::load(path).unwrap();
    assert_eq!(loaded.tokens(), vocab.tokens());

    for smi in SMILES {
        let tokens = tok.tokenize(smi, true);
        let ids = loaded.encode(&tokens).unwrap();
        assert_eq!(ids, vocab.encode(&tokens).unwrap());
        assert_eq!(tok.untokenize(&loaded.decode(&ids).unwrap()), smi);
    }
}

#[test]
fn load_rejects_duplicate_tokens() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dup.txt");
    fs::write(&path, "$\n^\nC\nC\n").unwrap();

    let err = Vocabulary::load(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, VocabularyError::InvalidFile { .. }));
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.txt");
    let err = Vocabulary::load(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, VocabularyError::Io { .. }));
}

#[test]
fn encoded_batch_pads_with_end_token() {
    let tok = SmilesTokenizer::new();
    let vocab = Vocabulary::from_smiles(&SMILES, &tok);

    let encoded: Vec<Vec<u32>> = tok
        .tokenize_batch(&SMILES, true)
        .iter()
        .map(|t| vocab.encode(t).unwrap())
        .collect();
    let longest = encoded.iter().map(Vec::len).max().unwrap();
    let batch = vocab.pad_batch(encoded.clone(), None).unwrap();

    for (ids, (padded, mask)) in encoded
        .iter()
        .zip(batch.input_ids.iter().zip(&batch.attention_mask))
    {
        assert_eq!(padded.len(), longest);
        assert_eq!(&padded[..ids.len()], &ids[..]);
        assert!(padded[ids.len()..].iter().all(|&id| id == 0));
        assert_eq!(mask.iter().filter(|&&m| m == 1).count(), ids.len());
    }
}

#[test]
fn hand_written_file_pads_with_its_own_end_token() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reordered.txt");
    fs::write(&path, "C\nO\n^\n$\n").unwrap();

    let vocab = Vocabulary::load(path.to_str().unwrap()).unwrap();
    let tok = SmilesTokenizer::new();
    let encoded: Vec<Vec<u32>> = ["CO", "C"]
        .iter()
        .map(|s| vocab.encode(&tok.tokenize(s, true)).unwrap())
        .collect();
    let batch = vocab.pad_batch(encoded, None).unwrap();

    assert_eq!(batch.input_ids[1], vec![2, 0, 3, 3]);
    assert_eq!(batch.attention_mask[1], vec![1, 1, 1, 0]);
}

#[test]
fn save_rejects_tokens_that_break_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("newline.txt");

    let tok = SmilesTokenizer::new();
    let vocab = Vocabulary::from_smiles(&["C\nO", "C\r\nN"], &tok);
    assert!(vocab.contains("\n"));

    let err = vocab.save(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, VocabularyError::InvalidFile { .. }));
    assert!(!path.exists());
}
