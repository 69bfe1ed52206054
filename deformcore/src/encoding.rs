//! Note-count sequences ("encodings")
//!
//! An encoding lists how many notes each band holds, coarsest band first,
//! e.g. `4, 7`. Only validated sequences exist as [`NoteCounts`], so the layout
//! engine never sees an empty list, a zero, or a band too dense to build.

use crate::error::{EncodingError, Result};
use std::fmt;
use std::str::FromStr;

/// Largest band accepted unless configured otherwise. Every frame builds one
/// note and one connector per note, so this bounds per-frame work.
pub const DEFAULT_MAX_NOTES: u32 = 20_000;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteCounts(Vec<u32>);

impl NoteCounts {
    pub fn new(counts: Vec<u32>) -> Result<Self> {
        Self::with_limit(counts, DEFAULT_MAX_NOTES)
    }

    /// Validate `counts`, rejecting any band with more than `max_notes` notes.
    pub fn with_limit(counts: Vec<u32>, max_notes: u32) -> Result<Self> {
        if counts.is_empty() {
            return Err(EncodingError::Empty);
        }
        if let Some(position) = counts.iter().position(|&c| c == 0) {
            return Err(EncodingError::ZeroCount { position });
        }
        if let Some((position, &count)) = counts.iter().enumerate().find(|(_, c)| **c > max_notes) {
            return Err(EncodingError::TooManyNotes {
                position,
                count,
                max: max_notes,
            });
        }
        Ok(Self(counts))
    }

    /// Parse text typed by the user.
    ///
    /// Whitespace is ignored and trailing commas are dropped, so `"4, 7,"`
    /// is accepted while the user is still typing.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with_limit(text, DEFAULT_MAX_NOTES)
    }

    pub fn parse_with_limit(text: &str, max_notes: u32) -> Result<Self> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let trimmed = compact.trim_end_matches(',');
        if trimmed.is_empty() {
            return Err(EncodingError::Empty);
        }
        let counts = trimmed
            .split(',')
            .enumerate()
            .map(|(position, entry)| {
                entry.parse::<u32>().map_err(|_| EncodingError::InvalidNumber {
                    position,
                    text: entry.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::with_limit(counts, max_notes)
    }

    /// Notes in the base band
    pub fn base(&self) -> u32 {
        self.0[0]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a sequence holds at least one band.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl Default for NoteCounts {
    /// The problem statement's example: four notes re-encoded as seven.
    fn default() -> Self {
        Self(vec![4, 7])
    }
}

impl FromStr for NoteCounts {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for NoteCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(", "))
    }
}
