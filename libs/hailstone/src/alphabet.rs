//! The 85-symbol alphabet used for the text form of identifiers.
//!
//! This is a reordered RFC 1924 set: every symbol sits in ASCII order, and
//! the characters `"`, `#`, `&`, `'`, `+`, `/`, `:`, `?` and `\` are left out
//! so identifiers survive in URLs and shell arguments.

/// Number of symbols in the alphabet.
pub const RADIX: u32 = 85;

/// Largest digit value. Used to pad partial groups when decoding.
pub const MAX_DIGIT: u8 = 84;

/// The alphabet, indexed by digit value.
pub const ALPHABET: &str =
    "!$%()*,-.0123456789;<=>@ABCDEFGHIJKLMNOPQRSTUVWXYZ[]^_`abcdefghijklmnopqrstuvwxyz{|}~";

const ENC: &[u8; 85] = match ALPHABET.as_bytes().first_chunk::<85>() {
    Some(table) => table,
    None => panic!("alphabet must hold 85 symbols"),
};

/// Marker for bytes that are not part of the alphabet.
const INVALID: u8 = 0xFF;

/// Reverse lookup indexed by ASCII byte.
const DEC: [u8; 128] = build_decode_table();

const fn build_decode_table() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut digit = 0;
    while digit < ENC.len() {
        let symbol = ENC[digit] as usize;
        assert!(symbol < 128, "alphabet must be ASCII");
        assert!(table[symbol] == INVALID, "alphabet symbols must be unique");
        table[symbol] = digit as u8;
        digit += 1;
    }
    table
}

/// Returns the symbol for a digit value.
///
/// # Panics
///
/// Panics if `digit` is greater than [`MAX_DIGIT`].
#[inline]
pub fn encode_digit(digit: u8) -> char {
    ENC[digit as usize] as char
}

/// Returns the digit value of a symbol, or `None` if it is not in the alphabet.
#[inline]
pub fn decode_char(c: char) -> Option<u8> {
    if c.is_ascii() {
        decode_byte(c as u8)
    } else {
        None
    }
}

#[inline]
pub(crate) fn decode_byte(b: u8) -> Option<u8> {
    match DEC.get(b as usize) {
        Some(&INVALID) | None => None,
        Some(&digit) => Some(digit),
    }
}

#[inline]
pub(crate) fn encode_byte(digit: u8) -> u8 {
    ENC[digit as usize]
}
