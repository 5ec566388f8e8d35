//! Random-byte sources for minting identifiers.
//!
//! Two capabilities exist:
//! - [`RandomSource`] fills a buffer in place and may block the caller
//! - [`AsyncRandomSource`] yields bytes through a future, for callers that
//!   must not block while entropy is gathered
//!
//! Sources never retry. A failure is reported once and propagated to the
//! caller of [`Hailstone::create`](crate::Hailstone::create).

use async_trait::async_trait;
use rand::rngs::OsRng;
use rand::{RngCore, TryRngCore};

use crate::HailstoneError;

// =============================================================================
// Traits
// =============================================================================

/// A blocking source of uniformly random bytes.
pub trait RandomSource {
    /// Fills `dest` entirely with random bytes.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), HailstoneError>;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), HailstoneError> {
        (**self).fill(dest)
    }
}

/// A suspending source of uniformly random bytes.
#[async_trait]
pub trait AsyncRandomSource: Send + Sync {
    /// Returns exactly `len` random bytes.
    async fn bytes(&self, len: usize) -> Result<Vec<u8>, HailstoneError>;
}

// =============================================================================
// Implementations
// =============================================================================

/// Operating system entropy pool.
///
/// Reads may block while the pool is initialized, and fail if the platform
/// cannot provide entropy.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), HailstoneError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| HailstoneError::RandomSource(e.to_string()))
    }
}

/// The thread-local generator from `rand`.
///
/// Seeded from the OS once per thread, then never blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), HailstoneError> {
        rand::rng().fill_bytes(dest);
        Ok(())
    }
}

/// Runs a blocking source on the tokio blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingTask<S>(pub S);

#[async_trait]
impl<S> AsyncRandomSource for BlockingTask<S>
where
    S: RandomSource + Clone + Send + Sync + 'static,
{
    async fn bytes(&self, len: usize) -> Result<Vec<u8>, HailstoneError> {
        let mut source = self.0.clone();
        tokio::task::spawn_blocking(move || {
            let mut buf = vec![0u8; len];
            source.fill(&mut buf)?;
            Ok(buf)
        })
        .await
        .map_err(|e| HailstoneError::RandomSource(format!("entropy task failed: {e}")))?
    }
}

/// A deterministic source that repeats a byte pattern.
///
/// Useful for tests and fixtures. Every request starts at the beginning of
/// the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedBytes(Vec<u8>);

impl FixedBytes {
    /// Creates a source repeating `pattern`. An empty pattern yields zeros.
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        Self(pattern.into())
    }

    fn fill_slice(&self, dest: &mut [u8]) {
        if self.0.is_empty() {
            dest.fill(0);
            return;
        }
        for (slot, byte) in dest.iter_mut().zip(self.0.iter().cycle()) {
            *slot = *byte;
        }
    }
}

impl RandomSource for FixedBytes {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), HailstoneError> {
        self.fill_slice(dest);
        Ok(())
    }
}

#[async_trait]
impl AsyncRandomSource for FixedBytes {
    async fn bytes(&self, len: usize) -> Result<Vec<u8>, HailstoneError> {
        let mut buf = vec![0u8; len];
        self.fill_slice(&mut buf);
        Ok(buf)
    }
}
