//! Spaced seeds.
//!
//! A seed is a pattern over `SEED_LEN` positions, `1` marks a position whose
//! residue is compared and `*` a position that is ignored. An s-mer packs the
//! codes of a window into 5 bits per position, the first residue in the most
//! significant bits.

use crate::libs::error::{Result, SprintError};

/// Length of every spaced seed
pub const SEED_LEN: usize = 12;

/// Bits used by one residue code in an s-mer
pub const CODE_BITS: usize = 5;

const CODE_MASK: u64 = (1 << CODE_BITS) - 1;

/// Seed patterns used by SPRINT
pub const SEEDS: [&str; 4] = ["11****11***1", "1**1*1***1*1", "11**1***1**1", "1*1******111"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pattern: String,
    mask: u64,
    /// Window offsets of the compared positions
    care: Vec<usize>,
}

impl Seed {
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() || pattern.len() * CODE_BITS > 64 {
            return Err(SprintError::InvalidConfig(format!(
                "seed `{}` must hold between 1 and {} positions",
                pattern,
                64 / CODE_BITS
            )));
        }

        let mut mask = 0u64;
        let mut care = vec![];
        for (i, ch) in pattern.chars().enumerate() {
            mask <<= CODE_BITS;
            match ch {
                '1' => {
                    mask |= CODE_MASK;
                    care.push(i);
                }
                '*' => {}
                _ => {
                    return Err(SprintError::InvalidConfig(format!(
                        "invalid character `{}` in seed `{}`",
                        ch, pattern
                    )))
                }
            }
        }

        Ok(Seed {
            pattern: pattern.to_string(),
            mask,
            care,
        })
    }

    /// All SPRINT seeds
    pub fn defaults() -> Vec<Seed> {
        SEEDS.iter().filter_map(|p| Seed::new(p).ok()).collect()
    }

    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    pub fn mask(&self) -> u64 {
        self.mask
    }

    pub fn care(&self) -> &[usize] {
        &self.care
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Pack a window of residue codes, ignored positions become `0`
    pub fn smer(&self, window: &[u8]) -> u64 {
        let packed = window
            .iter()
            .take(self.len())
            .fold(0u64, |acc, &code| (acc << CODE_BITS) | code as u64);
        packed & self.mask
    }

    /// Code at window offset `i` of a packed s-mer
    #[inline]
    pub fn code_at(&self, smer: u64, i: usize) -> u8 {
        let shift = (self.len() - i - 1) * CODE_BITS;
        ((smer >> shift) & CODE_MASK) as u8
    }

    /// Replace the code at window offset `i`
    #[inline]
    pub fn with_code(&self, smer: u64, i: usize, code: u8) -> u64 {
        let shift = (self.len() - i - 1) * CODE_BITS;
        (smer & !(CODE_MASK << shift)) | ((code as u64) << shift)
    }
}
