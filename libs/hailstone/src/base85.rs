//! Base85 block codec.
//!
//! Bytes are grouped into big-endian 32-bit words and each word is written as
//! five digits, most significant first. A trailing partial word is zero-filled
//! before encoding and the surplus characters are trimmed afterwards; decoding
//! pads the missing characters with the largest digit and trims the surplus
//! bytes. Frames are always 8 or 16 bytes, so identifiers never take the
//! partial path.

use tracing::trace;

use crate::alphabet::{self, MAX_DIGIT, RADIX};
use crate::HailstoneError;

const WORD_BYTES: usize = 4;
const WORD_CHARS: usize = 5;

/// Returns the number of characters [`encode`] produces for `len` bytes.
pub const fn encoded_len(len: usize) -> usize {
    let pad = (WORD_BYTES - len % WORD_BYTES) % WORD_BYTES;
    len.div_ceil(WORD_BYTES) * WORD_CHARS - pad
}

/// Returns the number of bytes [`decode`] produces for `len` characters.
///
/// Returns `None` for lengths that leave a single dangling character.
pub const fn decoded_len(len: usize) -> Option<usize> {
    match len % WORD_CHARS {
        1 => None,
        0 => Some(len / WORD_CHARS * WORD_BYTES),
        rem => Some(len / WORD_CHARS * WORD_BYTES + rem - 1),
    }
}

/// Encodes bytes as base85 text.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = Vec::with_capacity(bytes.len().div_ceil(WORD_BYTES) * WORD_CHARS);

    for chunk in bytes.chunks(WORD_BYTES) {
        let mut word = [0u8; WORD_BYTES];
        word[..chunk.len()].copy_from_slice(chunk);
        push_word(&mut out, u32::from_be_bytes(word));
    }

    let pad = (WORD_BYTES - bytes.len() % WORD_BYTES) % WORD_BYTES;
    out.truncate(out.len() - pad);

    trace!(bytes = bytes.len(), chars = out.len(), "base85 encoded");

    // Every byte pushed comes from the alphabet, which is ASCII.
    out.into_iter().map(char::from).collect()
}

fn push_word(out: &mut Vec<u8>, mut word: u32) {
    let mut digits = [0u8; WORD_CHARS];
    for slot in digits.iter_mut().rev() {
        *slot = (word % RADIX) as u8;
        word /= RADIX;
    }
    out.extend(digits.iter().map(|&d| alphabet::encode_byte(d)));
}

/// Decodes base85 text into bytes.
///
/// Fails with [`HailstoneError::InvalidEncoding`] if the text contains a
/// symbol outside the alphabet, a group exceeds 32 bits, or the text ends in a
/// single dangling character.
pub fn decode(text: &str) -> Result<Vec<u8>, HailstoneError> {
    let Some(out_len) = decoded_len(text.len()) else {
        return Err(HailstoneError::invalid_encoding(format!(
            "dangling final character in {}-character input",
            text.len()
        )));
    };

    let mut out = Vec::with_capacity(text.len().div_ceil(WORD_CHARS) * WORD_BYTES);

    for (group_index, group) in text.as_bytes().chunks(WORD_CHARS).enumerate() {
        let mut digits = [MAX_DIGIT; WORD_CHARS];
        for (i, &b) in group.iter().enumerate() {
            let position = group_index * WORD_CHARS + i;
            digits[i] = alphabet::decode_byte(b).ok_or_else(|| unknown_symbol(text, position))?;
        }

        let word = accumulate(&digits).ok_or_else(|| {
            HailstoneError::invalid_encoding(format!(
                "group {} overflows 32 bits",
                group_index
            ))
        })?;
        out.extend_from_slice(&word.to_be_bytes());
    }

    out.truncate(out_len);

    trace!(chars = text.len(), bytes = out.len(), "base85 decoded");

    Ok(out)
}

fn accumulate(digits: &[u8; WORD_CHARS]) -> Option<u32> {
    digits.iter().try_fold(0u32, |acc, &d| {
        acc.checked_mul(RADIX)?.checked_add(u32::from(d))
    })
}

fn unknown_symbol(text: &str, position: usize) -> HailstoneError {
    // Report the full character even when the offending byte is inside a
    // multi-byte sequence.
    let shown = text
        .char_indices()
        .take_while(|(start, _)| *start <= position)
        .last()
        .map(|(_, c)| c)
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    HailstoneError::invalid_encoding(format!(
        "unknown character {:?} at position {}",
        shown, position
    ))
}
