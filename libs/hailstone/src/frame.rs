//! Binary frame layout.
//!
//! ```text
//! byte 0     header: bits 7-6 length selector (01 = 64, 10 = 128),
//!                    bits 5-4 unused, bits 3-0 version - 1
//! byte 1     domain
//! byte 2     type
//! byte 3..   instance (5 or 13 bytes)
//! ```
//!
//! Frames are exactly 8 or 16 bytes long.

use tracing::debug;

use crate::{HailstoneError, LengthClass, Tag};

/// Lowest supported format version.
pub const MIN_VERSION: u8 = 1;

/// Highest version the 4-bit header field can carry.
pub const MAX_VERSION: u8 = 16;

/// Version written by newly minted identifiers.
pub const CURRENT_VERSION: u8 = 1;

/// Largest instance payload, used by the 128-bit class.
pub const MAX_INSTANCE_LEN: usize = 13;

const VERSION_MASK: u8 = 0x0F;

/// The unpacked contents of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frame {
    version: u8,
    length_class: LengthClass,
    domain: Tag,
    type_tag: Tag,
    // Bytes past `length_class.instance_len()` are always zero.
    instance: [u8; MAX_INSTANCE_LEN],
}

impl Frame {
    /// Builds a frame, validating the version and the instance length.
    pub fn new(
        version: u8,
        length_class: LengthClass,
        domain: Tag,
        type_tag: Tag,
        instance: &[u8],
    ) -> Result<Self, HailstoneError> {
        if !(MIN_VERSION..=MAX_VERSION).contains(&version) {
            return Err(HailstoneError::invalid_argument(
                "version",
                version,
                "an integer between 1 and 16",
            ));
        }

        let expected = length_class.instance_len();
        if instance.len() != expected {
            return Err(HailstoneError::invalid_length(
                format!("{expected} instance bytes for a {length_class}-bit identifier"),
                instance.len(),
            ));
        }

        let mut stored = [0u8; MAX_INSTANCE_LEN];
        stored[..expected].copy_from_slice(instance);

        Ok(Self {
            version,
            length_class,
            domain,
            type_tag,
            instance: stored,
        })
    }

    /// Unpacks a frame from an 8- or 16-byte buffer.
    pub fn unpack(buf: &[u8]) -> Result<Self, HailstoneError> {
        let from_len = LengthClass::from_buffer_len(buf.len())?;

        let header = buf[0];
        let length_class = LengthClass::from_header(header)?;
        if length_class != from_len {
            return Err(HailstoneError::invalid_header(
                header,
                format!(
                    "length selector says {} bits but the buffer holds {} bytes",
                    length_class,
                    buf.len()
                ),
            ));
        }

        let version = (header & VERSION_MASK) + 1;
        let frame = Self::new(
            version,
            length_class,
            Tag::new(buf[1]),
            Tag::new(buf[2]),
            &buf[LengthClass::HEADER_LEN..],
        )?;

        debug!(
            version = frame.version,
            length = %frame.length_class,
            domain = %frame.domain,
            type_tag = %frame.type_tag,
            "unpacked frame"
        );

        Ok(frame)
    }

    /// Packs the frame into a new 8- or 16-byte buffer.
    #[must_use]
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.length_class.buffer_len());
        buf.push(self.header());
        buf.push(self.domain.value());
        buf.push(self.type_tag.value());
        buf.extend_from_slice(self.instance());
        buf
    }

    /// Returns the header byte.
    #[must_use]
    pub const fn header(&self) -> u8 {
        (self.version - 1) | self.length_class.selector()
    }

    /// Returns the format version (1-16).
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.version
    }

    /// Returns the length class.
    #[must_use]
    pub const fn length_class(&self) -> LengthClass {
        self.length_class
    }

    /// Returns the domain tag.
    #[must_use]
    pub const fn domain(&self) -> Tag {
        self.domain
    }

    /// Returns the type tag.
    #[must_use]
    pub const fn type_tag(&self) -> Tag {
        self.type_tag
    }

    /// Returns the instance bytes (5 or 13).
    #[must_use]
    pub fn instance(&self) -> &[u8] {
        &self.instance[..self.length_class.instance_len()]
    }
}

/// Packs identifier fields into a frame buffer.
pub fn pack(
    version: u8,
    length_class: LengthClass,
    domain: Tag,
    type_tag: Tag,
    instance: &[u8],
) -> Result<Vec<u8>, HailstoneError> {
    Frame::new(version, length_class, domain, type_tag, instance).map(|frame| frame.pack())
}

/// Unpacks a frame buffer.
pub fn unpack(buf: &[u8]) -> Result<Frame, HailstoneError> {
    Frame::unpack(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_scenario() {
        let buf = pack(1, LengthClass::Bits64, Tag::new(3), Tag::new(7), &[0; 5]).unwrap();
        assert_eq!(buf, vec![0x40, 0x03, 0x07, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_pack_header_bits() {
        let buf = pack(16, LengthClass::Bits128, Tag::MAX, Tag::MIN, &[0xAA; 13]).unwrap();
        assert_eq!(buf.len(), 16);
        assert_eq!(buf[0], 0x8F);
        assert_eq!(buf[1], 0xFF);
        assert_eq!(buf[2], 0x00);
        assert!(buf[3..].iter().all(|b| *b == 0xAA));
    }

    #[test]
    fn test_unpack_fields() {
        let buf = [0x42, 9, 200, 1, 2, 3, 4, 5];
        let frame = unpack(&buf).unwrap();
        assert_eq!(frame.version(), 3);
        assert_eq!(frame.length_class(), LengthClass::Bits64);
        assert_eq!(frame.domain().value(), 9);
        assert_eq!(frame.type_tag().value(), 200);
        assert_eq!(frame.instance(), &[1, 2, 3, 4, 5]);
        assert_eq!(frame.pack(), buf);
    }

    #[test]
    fn test_unpack_rejects_bad_lengths() {
        for len in [0, 1, 7, 9, 15, 17, 32] {
            let buf = vec![0x40; len];
            let err = unpack(&buf).unwrap_err();
            assert!(err.is_invalid_length(), "length {len}: {err}");
        }
    }

    #[test]
    fn test_unpack_rejects_unknown_selector() {
        let mut buf = [0u8; 8];
        assert!(unpack(&buf).unwrap_err().is_invalid_header());
        buf[0] = 0xC0;
        assert!(unpack(&buf).unwrap_err().is_invalid_header());
    }

    #[test]
    fn test_unpack_rejects_mismatched_selector() {
        let mut buf = [0u8; 16];
        buf[0] = 0x40;
        let err = unpack(&buf).unwrap_err();
        assert!(err.is_invalid_header());
        assert!(err.to_string().contains("16 bytes"));
    }

    #[test]
    fn test_unpack_ignores_reserved_bits() {
        let buf = [0x70, 1, 2, 0, 0, 0, 0, 0];
        let frame = unpack(&buf).unwrap();
        assert_eq!(frame.version(), 1);
        assert_eq!(frame.header(), 0x40);
    }

    #[test]
    fn test_new_rejects_version() {
        for version in [0, 17, 255] {
            let err =
                Frame::new(version, LengthClass::Bits64, Tag::MIN, Tag::MIN, &[0; 5]).unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn test_new_rejects_instance_length() {
        let err = Frame::new(1, LengthClass::Bits64, Tag::MIN, Tag::MIN, &[0; 13]).unwrap_err();
        assert!(err.is_invalid_length());
        let err = Frame::new(1, LengthClass::Bits128, Tag::MIN, Tag::MIN, &[0; 5]).unwrap_err();
        assert!(err.is_invalid_length());
    }

    #[test]
    fn test_instance_padding_does_not_leak() {
        let a = Frame::new(1, LengthClass::Bits64, Tag::MIN, Tag::MIN, &[7; 5]).unwrap();
        let b = unpack(&a.pack()).unwrap();
        assert_eq!(a, b);
        assert_eq!(b.instance().len(), 5);
    }
}
