//! Batch padding of encoded token sequences.

/// A right-padded batch, ready to be stacked into a tensor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaddedBatch {
    pub input_ids: Vec<Vec<u32>>,
    /// 1 for real tokens, 0 for padding
    pub attention_mask: Vec<Vec<u32>>,
}

/// Pad a batch of token sequences to the same length.
///
/// # Arguments
/// * `sequences` - Token id sequences to pad
/// * `pad_token_id` - Id appended to shorter sequences
/// * `max_length` - Pad (and truncate) to exactly this length; `None` pads to
///   the longest sequence
pub fn pad_sequences(
    sequences: Vec<Vec<u32>>,
    pad_token_id: u32,
    max_length: Option<usize>,
) -> PaddedBatch {
    let longest = sequences.iter().map(|s| s.len()).max().unwrap_or(0);
    let target_len = max_length.unwrap_or(longest);

    let mut batch = PaddedBatch {
        input_ids: Vec::with_capacity(sequences.len()),
        attention_mask: Vec::with_capacity(sequences.len()),
    };

    for mut seq in sequences {
        seq.truncate(target_len);
        let current_len = seq.len();
        let pad_count = target_len - current_len;

        seq.extend(std::iter::repeat(pad_token_id).take(pad_count));

        let mut mask = vec![1u32; current_len];
        mask.extend(std::iter::repeat(0u32).take(pad_count));

        batch.input_ids.push(seq);
        batch.attention_mask.push(mask);
    }

    batch
}
