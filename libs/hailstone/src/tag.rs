//! Domain and type tags, and the identifier length class.
//!
//! Tags are caller-owned 8-bit classifiers. Their meaning lives outside this
//! crate; only their range is checked here.

use crate::macros::impl_tag_from_int;
use crate::HailstoneError;

pub(crate) const TAG_RANGE: &str = "an integer between 0 and 255";

// =============================================================================
// Tag
// =============================================================================

/// An 8-bit domain or type classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(u8);

impl Tag {
    /// The smallest tag value.
    pub const MIN: Self = Self(u8::MIN);

    /// The largest tag value.
    pub const MAX: Self = Self(u8::MAX);

    /// Creates a tag from a raw byte.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the underlying byte.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl std::str::FromStr for Tag {
    type Err = HailstoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.to_tag("tag")
    }
}

/// Values that can be validated into a [`Tag`].
///
/// `name` identifies the argument in error messages, e.g. `"domain"`.
pub trait TagInput {
    /// Validates `self` as a tag.
    fn to_tag(self, name: &'static str) -> Result<Tag, HailstoneError>;
}

impl TagInput for Tag {
    fn to_tag(self, _name: &'static str) -> Result<Tag, HailstoneError> {
        Ok(self)
    }
}

impl_tag_from_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl TagInput for f64 {
    fn to_tag(self, name: &'static str) -> Result<Tag, HailstoneError> {
        if self.is_finite() && self.fract() == 0.0 && (0.0..=255.0).contains(&self) {
            Ok(Tag(self as u8))
        } else {
            Err(HailstoneError::invalid_argument(name, self, TAG_RANGE))
        }
    }
}

impl TagInput for f32 {
    fn to_tag(self, name: &'static str) -> Result<Tag, HailstoneError> {
        f64::from(self).to_tag(name)
    }
}

impl TagInput for &str {
    fn to_tag(self, name: &'static str) -> Result<Tag, HailstoneError> {
        let trimmed = self.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(HailstoneError::invalid_argument(
                name,
                format!("{self:?}"),
                TAG_RANGE,
            ));
        }
        trimmed
            .parse::<u8>()
            .map(Tag)
            .map_err(|_| HailstoneError::invalid_argument(name, trimmed, TAG_RANGE))
    }
}

impl TagInput for &String {
    fn to_tag(self, name: &'static str) -> Result<Tag, HailstoneError> {
        self.as_str().to_tag(name)
    }
}

impl TryFrom<f64> for Tag {
    type Error = HailstoneError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        value.to_tag("tag")
    }
}

impl TryFrom<f32> for Tag {
    type Error = HailstoneError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        value.to_tag("tag")
    }
}

impl TryFrom<&str> for Tag {
    type Error = HailstoneError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_tag("tag")
    }
}

impl serde::Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        value.to_tag("tag").map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Length Class
// =============================================================================

/// Total identifier size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LengthClass {
    /// 64-bit identifier: 8-byte frame, 5 instance bytes, 10 characters.
    Bits64,
    /// 128-bit identifier: 16-byte frame, 13 instance bytes, 20 characters.
    #[default]
    Bits128,
}

impl LengthClass {
    /// Header bytes preceding the instance: header, domain, type.
    pub const HEADER_LEN: usize = 3;

    /// Mask over the length selector bits of the header byte.
    pub const SELECTOR_MASK: u8 = 0xC0;

    /// Parses a size in bits. Only 64 and 128 are accepted.
    pub fn from_bits(bits: u32) -> Result<Self, HailstoneError> {
        match bits {
            64 => Ok(Self::Bits64),
            128 => Ok(Self::Bits128),
            other => Err(HailstoneError::invalid_length(
                "64 or 128 bits",
                other as usize,
            )),
        }
    }

    /// Resolves the length selector bits of a header byte.
    pub fn from_header(header: u8) -> Result<Self, HailstoneError> {
        match header & Self::SELECTOR_MASK {
            0x40 => Ok(Self::Bits64),
            0x80 => Ok(Self::Bits128),
            _ => Err(HailstoneError::invalid_header(
                header,
                "unknown length selector",
            )),
        }
    }

    /// Resolves a frame buffer length. Only 8 and 16 bytes are accepted.
    pub fn from_buffer_len(len: usize) -> Result<Self, HailstoneError> {
        match len {
            8 => Ok(Self::Bits64),
            16 => Ok(Self::Bits128),
            other => Err(HailstoneError::invalid_length("8 or 16 bytes", other)),
        }
    }

    /// Total size in bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits64 => 64,
            Self::Bits128 => 128,
        }
    }

    /// Length selector bits as they appear in the header byte.
    #[must_use]
    pub const fn selector(self) -> u8 {
        match self {
            Self::Bits64 => 0x40,
            Self::Bits128 => 0x80,
        }
    }

    /// Size of the packed frame in bytes.
    #[must_use]
    pub const fn buffer_len(self) -> usize {
        self.bits() as usize / 8
    }

    /// Number of instance bytes following the header.
    #[must_use]
    pub const fn instance_len(self) -> usize {
        self.buffer_len() - Self::HEADER_LEN
    }

    /// Length of the base85 text form.
    #[must_use]
    pub const fn text_len(self) -> usize {
        crate::base85::encoded_len(self.buffer_len())
    }
}

impl std::fmt::Display for LengthClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl TryFrom<u32> for LengthClass {
    type Error = HailstoneError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::from_bits(bits)
    }
}

impl std::str::FromStr for LengthClass {
    type Err = HailstoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .trim()
            .parse::<u32>()
            .map_err(|_| HailstoneError::invalid_argument("length", s, "64 or 128"))?;
        Self::from_bits(bits)
    }
}

impl serde::Serialize for LengthClass {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> serde::Deserialize<'de> for LengthClass {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Self::from_bits(bits).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_from_integers() {
        assert_eq!(Tag::try_from(0i64).unwrap(), Tag::MIN);
        assert_eq!(Tag::try_from(255u32).unwrap(), Tag::MAX);
        assert_eq!(Tag::try_from(7u8).unwrap().value(), 7);
    }

    #[test]
    fn test_tag_rejects_out_of_range() {
        assert!(Tag::try_from(-1i32).unwrap_err().is_invalid_argument());
        assert!(Tag::try_from(256u16).unwrap_err().is_invalid_argument());
        assert!(Tag::try_from(i64::MIN).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_tag_rejects_fractions() {
        let err = 1.5f64.to_tag("type").unwrap_err();
        assert_eq!(
            err.to_string(),
            "value of type must be an integer between 0 and 255, but was 1.5"
        );
        assert!(Tag::try_from(f64::NAN).is_err());
        assert!(Tag::try_from(f64::INFINITY).is_err());
        assert!(Tag::try_from(-0.5f32).is_err());
        assert_eq!(Tag::try_from(12.0f64).unwrap().value(), 12);
    }

    #[test]
    fn test_tag_error_names_argument() {
        let err = 300i64.to_tag("domain").unwrap_err();
        assert!(matches!(
            err,
            HailstoneError::InvalidArgument { name: "domain", .. }
        ));
    }

    #[test]
    fn test_tag_from_str() {
        assert_eq!("42".parse::<Tag>().unwrap().value(), 42);
        assert_eq!(" 9 ".parse::<Tag>().unwrap().value(), 9);
        assert!("256".parse::<Tag>().is_err());
        assert!("-1".parse::<Tag>().is_err());
        assert!("1.5".parse::<Tag>().is_err());
        assert!("".parse::<Tag>().is_err());
    }

    #[test]
    fn test_tag_json_roundtrip() {
        let tag = Tag::new(200);
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, "200");
        let parsed: Tag = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tag);
        assert!(serde_json::from_str::<Tag>("256").is_err());
    }

    #[test]
    fn test_length_class_constants() {
        assert_eq!(LengthClass::Bits64.buffer_len(), 8);
        assert_eq!(LengthClass::Bits64.instance_len(), 5);
        assert_eq!(LengthClass::Bits64.text_len(), 10);
        assert_eq!(LengthClass::Bits128.buffer_len(), 16);
        assert_eq!(LengthClass::Bits128.instance_len(), 13);
        assert_eq!(LengthClass::Bits128.text_len(), 20);
        assert_eq!(LengthClass::default(), LengthClass::Bits128);
    }

    #[test]
    fn test_length_class_from_bits() {
        assert_eq!(LengthClass::from_bits(64).unwrap(), LengthClass::Bits64);
        assert_eq!(LengthClass::from_bits(128).unwrap(), LengthClass::Bits128);
        assert!(LengthClass::from_bits(96).unwrap_err().is_invalid_length());
        assert!("32".parse::<LengthClass>().unwrap_err().is_invalid_length());
        assert_eq!("64".parse::<LengthClass>().unwrap(), LengthClass::Bits64);
    }

    #[test]
    fn test_length_class_from_header() {
        assert_eq!(
            LengthClass::from_header(0x4F).unwrap(),
            LengthClass::Bits64
        );
        assert_eq!(
            LengthClass::from_header(0x80).unwrap(),
            LengthClass::Bits128
        );
        assert!(LengthClass::from_header(0x00).unwrap_err().is_invalid_header());
        assert!(LengthClass::from_header(0xC0).unwrap_err().is_invalid_header());
    }

    #[test]
    fn test_length_class_selector_roundtrip() {
        for class in [LengthClass::Bits64, LengthClass::Bits128] {
            assert_eq!(LengthClass::from_header(class.selector()).unwrap(), class);
            assert_eq!(
                LengthClass::from_buffer_len(class.buffer_len()).unwrap(),
                class
            );
        }
    }
}
