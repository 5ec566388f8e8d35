//! # hailstone
//!
//! Quasi-unique identifiers that carry a domain tag, a type tag, a version,
//! and random instance bytes in a fixed 8- or 16-byte frame.
//!
//! ## Design Principles
//!
//! - Tags are caller-owned; this crate only checks that they fit in a byte
//! - IDs are minted without a central allocator, so uniqueness is bounded by
//!   the instance entropy (40 or 104 bits)
//! - Text and binary forms roundtrip exactly (parse → format → parse)
//!
//! ## ID Format
//!
//! The binary frame is a header byte (length selector and version), the
//! domain, the type, and the instance bytes. The text form is a base85
//! encoding over an ASCII-ordered, URL-friendly alphabet:
//!
//! - 64-bit: 8-byte frame, 10 characters
//! - 128-bit: 16-byte frame, 20 characters
//!
//! ```
//! use hailstone::{Hailstone, LengthClass};
//!
//! let id = Hailstone::generate(3, 7, LengthClass::Bits64)?;
//! let text = id.to_string();
//! assert_eq!(text.len(), 10);
//!
//! let parsed: Hailstone = text.parse()?;
//! assert_eq!(parsed.domain().value(), 3);
//! assert_eq!(parsed.type_tag().value(), 7);
//! # Ok::<(), hailstone::HailstoneError>(())
//! ```

pub mod alphabet;
pub mod base85;
mod error;
pub mod frame;
mod identifier;
mod macros;
pub mod random;
mod tag;

pub use error::HailstoneError;
pub use frame::Frame;
pub use identifier::Hailstone;
pub use random::{AsyncRandomSource, RandomSource};
pub use tag::{LengthClass, Tag, TagInput};
