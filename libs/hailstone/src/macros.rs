//! Macros for validated tag conversions.

/// Implements [`TagInput`](crate::TagInput) and `TryFrom` for
/// [`Tag`](crate::Tag) for each listed integer type.
///
/// Values outside `0..=255` are rejected with
/// [`HailstoneError::InvalidArgument`](crate::HailstoneError::InvalidArgument).
///
/// # Example
///
/// ```ignore
/// impl_tag_from_int!(u16, i64);
///
/// let tag = Tag::try_from(7i64)?;
/// ```
macro_rules! impl_tag_from_int {
    ($($int:ty),+ $(,)?) => {
        $(
            impl $crate::TagInput for $int {
                fn to_tag(self, name: &'static str) -> Result<$crate::Tag, $crate::HailstoneError> {
                    u8::try_from(self).map($crate::Tag::new).map_err(|_| {
                        $crate::HailstoneError::invalid_argument(
                            name,
                            self,
                            $crate::tag::TAG_RANGE,
                        )
                    })
                }
            }

            impl TryFrom<$int> for $crate::Tag {
                type Error = $crate::HailstoneError;

                fn try_from(value: $int) -> Result<Self, Self::Error> {
                    $crate::TagInput::to_tag(value, "tag")
                }
            }
        )+
    };
}

pub(crate) use impl_tag_from_int;
