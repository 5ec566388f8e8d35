//! The Hailstone identifier value object and its factory.

use tracing::debug;

use crate::frame::{Frame, CURRENT_VERSION};
use crate::random::{AsyncRandomSource, OsRandom, RandomSource};
use crate::{base85, HailstoneError, LengthClass, Tag, TagInput};

/// A quasi-unique identifier tagged with a domain and a type.
///
/// The canonical text form is the base85 encoding of the packed frame:
/// 10 characters for 64-bit identifiers, 20 for 128-bit ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hailstone(Frame);

impl Hailstone {
    /// Wraps an already validated frame.
    #[must_use]
    pub const fn from_frame(frame: Frame) -> Self {
        Self(frame)
    }

    /// Parses an identifier from its packed binary form.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, HailstoneError> {
        Frame::unpack(buf)
            .map(Self)
            .map_err(HailstoneError::invalid_identifier)
    }

    /// Parses an identifier from its base85 text form.
    pub fn parse(s: &str) -> Result<Self, HailstoneError> {
        if s.is_empty() {
            return Err(HailstoneError::invalid_identifier(
                HailstoneError::invalid_length("10 or 20 characters", 0),
            ));
        }

        let buf = base85::decode(s).map_err(HailstoneError::invalid_identifier)?;
        Self::from_bytes(&buf)
    }

    /// Mints a new identifier, drawing instance bytes from a blocking source.
    ///
    /// `domain` and `type_tag` accept any integer, float, or decimal string;
    /// values that are not whole numbers in `0..=255` are rejected before the
    /// source is touched.
    pub fn create<D, T, R>(
        domain: D,
        type_tag: T,
        length_class: LengthClass,
        mut source: R,
    ) -> Result<Self, HailstoneError>
    where
        D: TagInput,
        T: TagInput,
        R: RandomSource,
    {
        let (domain, type_tag) = validate_tags(domain, type_tag)?;

        let mut instance = [0u8; crate::frame::MAX_INSTANCE_LEN];
        let instance = &mut instance[..length_class.instance_len()];
        source.fill(instance)?;

        assemble(domain, type_tag, length_class, instance)
    }

    /// Mints a new identifier, awaiting instance bytes from a suspending source.
    ///
    /// Tag validation happens before the first suspension point.
    pub async fn create_async<D, T, R>(
        domain: D,
        type_tag: T,
        length_class: LengthClass,
        source: &R,
    ) -> Result<Self, HailstoneError>
    where
        D: TagInput,
        T: TagInput,
        R: AsyncRandomSource + ?Sized,
    {
        let (domain, type_tag) = validate_tags(domain, type_tag)?;

        let expected = length_class.instance_len();
        let instance = source.bytes(expected).await?;
        if instance.len() != expected {
            return Err(HailstoneError::RandomSource(format!(
                "requested {expected} bytes, received {}",
                instance.len()
            )));
        }

        assemble(domain, type_tag, length_class, &instance)
    }

    /// Mints a new identifier from the operating system entropy pool.
    pub fn generate<D, T>(
        domain: D,
        type_tag: T,
        length_class: LengthClass,
    ) -> Result<Self, HailstoneError>
    where
        D: TagInput,
        T: TagInput,
    {
        Self::create(domain, type_tag, length_class, OsRandom)
    }

    /// Returns the unpacked frame.
    #[must_use]
    pub const fn frame(&self) -> &Frame {
        &self.0
    }

    /// Returns the format version.
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.0.version()
    }

    /// Returns the length class.
    #[must_use]
    pub const fn length_class(&self) -> LengthClass {
        self.0.length_class()
    }

    /// Returns the domain tag.
    #[must_use]
    pub const fn domain(&self) -> Tag {
        self.0.domain()
    }

    /// Returns the type tag.
    #[must_use]
    pub const fn type_tag(&self) -> Tag {
        self.0.type_tag()
    }

    /// Returns the instance bytes.
    #[must_use]
    pub fn instance(&self) -> &[u8] {
        self.0.instance()
    }

    /// Packs the identifier into its 8- or 16-byte binary form.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.pack()
    }
}

fn validate_tags<D: TagInput, T: TagInput>(
    domain: D,
    type_tag: T,
) -> Result<(Tag, Tag), HailstoneError> {
    Ok((domain.to_tag("domain")?, type_tag.to_tag("type")?))
}

fn assemble(
    domain: Tag,
    type_tag: Tag,
    length_class: LengthClass,
    instance: &[u8],
) -> Result<Hailstone, HailstoneError> {
    let frame = Frame::new(CURRENT_VERSION, length_class, domain, type_tag, instance)?;
    debug!(
        length = %length_class,
        domain = %domain,
        type_tag = %type_tag,
        "minted identifier"
    );
    Ok(Hailstone(frame))
}

impl From<Frame> for Hailstone {
    fn from(frame: Frame) -> Self {
        Self(frame)
    }
}

impl From<Hailstone> for Frame {
    fn from(id: Hailstone) -> Self {
        id.0
    }
}

impl std::fmt::Display for Hailstone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&base85::encode(&self.to_bytes()))
    }
}

impl std::str::FromStr for Hailstone {
    type Err = HailstoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&[u8]> for Hailstone {
    type Error = HailstoneError;

    fn try_from(buf: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(buf)
    }
}

impl serde::Serialize for Hailstone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Hailstone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{BlockingTask, FixedBytes, ThreadRandom};

    #[test]
    fn test_create_64_layout() {
        let id = Hailstone::create(3, 7, LengthClass::Bits64, FixedBytes::new([0])).unwrap();
        assert_eq!(id.to_bytes(), vec![0x40, 0x03, 0x07, 0, 0, 0, 0, 0]);
        assert_eq!(id.version(), 1);

        let text = id.to_string();
        assert_eq!(text.len(), 10);
        assert_eq!(Hailstone::parse(&text).unwrap(), id);
    }

    #[test]
    fn test_create_128_roundtrip() {
        let id = Hailstone::create(255, 0, LengthClass::Bits128, ThreadRandom).unwrap();
        let text = id.to_string();
        assert_eq!(text.len(), 20);

        let parsed: Hailstone = text.parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(parsed.domain().value(), 255);
        assert_eq!(parsed.type_tag().value(), 0);
        assert_eq!(parsed.instance().len(), 13);
    }

    #[test]
    fn test_create_rejects_bad_tags() {
        let err = Hailstone::create(-1, 0, LengthClass::Bits128, ThreadRandom).unwrap_err();
        assert!(err.is_invalid_argument());

        let err = Hailstone::create(256, 0, LengthClass::Bits128, ThreadRandom).unwrap_err();
        assert!(err.is_invalid_argument());

        let err = Hailstone::create(0, 1.5, LengthClass::Bits128, ThreadRandom).unwrap_err();
        assert!(matches!(
            err,
            HailstoneError::InvalidArgument { name: "type", .. }
        ));
    }

    #[test]
    fn test_create_does_not_touch_source_on_bad_tags() {
        struct Untouchable;

        impl RandomSource for Untouchable {
            fn fill(&mut self, _dest: &mut [u8]) -> Result<(), HailstoneError> {
                panic!("source must not be consulted");
            }
        }

        assert!(Hailstone::create(1000, 0, LengthClass::Bits64, Untouchable).is_err());
    }

    #[test]
    fn test_create_propagates_source_failure() {
        struct Failing;

        impl RandomSource for Failing {
            fn fill(&mut self, _dest: &mut [u8]) -> Result<(), HailstoneError> {
                Err(HailstoneError::RandomSource("no entropy".into()))
            }
        }

        let err = Hailstone::create(1, 1, LengthClass::Bits64, Failing).unwrap_err();
        assert_eq!(err, HailstoneError::RandomSource("no entropy".into()));
    }

    #[test]
    fn test_create_with_borrowed_source() {
        let mut source = FixedBytes::new([1, 2, 3, 4, 5]);
        let id = Hailstone::create(1u8, 2u8, LengthClass::Bits64, &mut source).unwrap();
        assert_eq!(id.instance(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_generate_uses_os_entropy() {
        let a = Hailstone::generate(1, 2, LengthClass::Bits128).unwrap();
        let b = Hailstone::generate(1, 2, LengthClass::Bits128).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_rejects_foreign_characters() {
        let err = Hailstone::parse("abc/efghij").unwrap_err();
        assert!(err.is_invalid_identifier());
        assert!(err.root_cause().is_invalid_encoding());
    }

    #[test]
    fn test_parse_rejects_wrong_size() {
        // 15 characters decode to 12 bytes, which is not a frame size.
        let err = Hailstone::parse("!!!!!!!!!!!!!!!").unwrap_err();
        assert!(err.is_invalid_identifier());
        assert!(err.root_cause().is_invalid_length());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(Hailstone::parse("").unwrap_err().is_invalid_identifier());
    }

    #[test]
    fn test_parse_rejects_bad_header() {
        let text = base85::encode(&[0u8; 8]);
        let err = Hailstone::parse(&text).unwrap_err();
        assert!(err.root_cause().is_invalid_header());
    }

    #[test]
    fn test_from_bytes_rejects_short_buffers() {
        let err = Hailstone::from_bytes(&[0x40; 7]).unwrap_err();
        assert!(err.is_invalid_identifier());
        assert!(err.root_cause().is_invalid_length());

        let err = Hailstone::try_from(&[0x80u8; 15][..]).unwrap_err();
        assert!(err.root_cause().is_invalid_length());
    }

    #[test]
    fn test_to_bytes_is_deterministic() {
        let id = Hailstone::create(9, 9, LengthClass::Bits128, ThreadRandom).unwrap();
        assert_eq!(id.to_bytes(), id.to_bytes());
        assert_eq!(Hailstone::from_bytes(&id.to_bytes()).unwrap(), id);
    }

    #[test]
    fn test_json_roundtrip() {
        let id = Hailstone::create(3, 7, LengthClass::Bits64, ThreadRandom).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let parsed: Hailstone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_json_rejects_invalid() {
        assert!(serde_json::from_str::<Hailstone>("\"not an id\"").is_err());
    }

    #[tokio::test]
    async fn test_create_async_matches_blocking_structure() {
        let source = FixedBytes::new([0x11, 0x22]);
        let id = Hailstone::create_async(3, 7, LengthClass::Bits128, &source)
            .await
            .unwrap();
        let blocking = Hailstone::create(3, 7, LengthClass::Bits128, source.clone()).unwrap();
        assert_eq!(id, blocking);
    }

    #[tokio::test]
    async fn test_create_async_on_blocking_pool() {
        let source = BlockingTask(OsRandom);
        let id = Hailstone::create_async(0, 0, LengthClass::Bits64, &source)
            .await
            .unwrap();
        assert_eq!(id.to_string().len(), 10);
    }

    #[tokio::test]
    async fn test_create_async_rejects_short_reads() {
        struct Short;

        #[async_trait::async_trait]
        impl AsyncRandomSource for Short {
            async fn bytes(&self, len: usize) -> Result<Vec<u8>, HailstoneError> {
                Ok(vec![0; len - 1])
            }
        }

        let err = Hailstone::create_async(1, 1, LengthClass::Bits64, &Short)
            .await
            .unwrap_err();
        assert!(matches!(err, HailstoneError::RandomSource(_)));
    }

    #[tokio::test]
    async fn test_create_async_rejects_bad_tags() {
        let err = Hailstone::create_async("256", 0, LengthClass::Bits64, &FixedBytes::new([0]))
            .await
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
