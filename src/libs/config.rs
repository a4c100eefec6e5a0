use crate::libs::error::{Result, SprintError};
use crate::libs::seed::SEED_LEN;

/// Numeric parameters of a run.
///
/// Passed by reference into every core operation; shards of one run share the
/// same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Length of the windows scored during HSP extension, also the minimum HSP length
    pub kmer_size: usize,
    /// Minimal PAM120 score of two similar s-mers
    pub t_sim: i32,
    /// Minimal PAM120 score of every window inside an HSP
    pub t_hsp: i32,
    /// Maximal number of HSPs a residue may start a window in
    pub t_count: u32,
    /// Let every training interactor count as its own homologue when scoring.
    /// Off by default, so scores only come from HSP chains.
    pub self_evidence: bool,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            kmer_size: 20,
            t_sim: 15,
            t_hsp: 35,
            t_count: 40,
            self_evidence: false,
        }
    }
}

impl Thresholds {
    pub fn with_kmer_size(mut self, kmer_size: usize) -> Self {
        self.kmer_size = kmer_size;
        self
    }

    pub fn with_t_sim(mut self, t_sim: i32) -> Self {
        self.t_sim = t_sim;
        self
    }

    pub fn with_t_hsp(mut self, t_hsp: i32) -> Self {
        self.t_hsp = t_hsp;
        self
    }

    pub fn with_t_count(mut self, t_count: u32) -> Self {
        self.t_count = t_count;
        self
    }

    pub fn with_self_evidence(mut self, self_evidence: bool) -> Self {
        self.self_evidence = self_evidence;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.kmer_size < SEED_LEN {
            return Err(SprintError::InvalidConfig(format!(
                "kmer_size ({}) must be at least the seed length ({})",
                self.kmer_size, SEED_LEN
            )));
        }
        if self.t_count == 0 {
            return Err(SprintError::InvalidConfig(
                "t_count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
