use crate::libs::config::Thresholds;
use crate::libs::error::{Result, SprintError};
use crate::libs::hsp::{Hsp, HspSet, Location};
use crate::libs::protein::ProteinSet;
use log::info;
use std::str::FromStr;

/// How HSPs touching overrepresented residues are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessMode {
    /// Drop the whole HSP
    #[default]
    Remove,
    /// Cut the HSP around the overrepresented window starts and keep the pieces
    Truncate,
}

impl FromStr for ProcessMode {
    type Err = SprintError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "remove" => Ok(ProcessMode::Remove),
            "truncate" => Ok(ProcessMode::Truncate),
            _ => Err(SprintError::InvalidConfig(format!(
                "unknown processing mode `{}`",
                s
            ))),
        }
    }
}

/// For every residue, the number of HSP windows starting at it
pub fn count_residues(set: &ProteinSet, hsps: &HspSet, kmer_size: usize) -> Vec<Vec<u32>> {
    let mut counts: Vec<Vec<u32>> = set.iter().map(|p| vec![0; p.len()]).collect();

    for hsp in hsps {
        if hsp.len() < kmer_size {
            continue;
        }
        for offset in 0..=hsp.len() - kmer_size {
            for loc in [hsp.first(), hsp.second()] {
                counts[loc.index][loc.position + offset] += 1;
            }
        }
    }

    counts
}

/// Suppress HSPs whose windows start on overrepresented residues.
///
/// A residue is overrepresented when more than `t.t_count` windows start on it.
pub fn process_hsps(set: &ProteinSet, hsps: &HspSet, t: &Thresholds, mode: ProcessMode) -> HspSet {
    let k = t.kmer_size;
    let counts = count_residues(set, hsps, k);
    let fine = |loc: Location, offset: usize| counts[loc.index][loc.position + offset] <= t.t_count;

    let mut processed = HspSet::default();
    for hsp in hsps.iter().filter(|h| h.len() >= k) {
        let starts = hsp.len() - k + 1;
        let accepted: Vec<bool> = (0..starts)
            .map(|o| fine(hsp.first(), o) && fine(hsp.second(), o))
            .collect();

        match mode {
            ProcessMode::Remove => {
                if accepted.iter().all(|&a| a) {
                    processed.insert(*hsp);
                }
            }
            ProcessMode::Truncate => processed.extend(pieces(hsp, &accepted, k)),
        }
    }

    info!(
        "{} of {} HSPs kept after processing (t_count = {})",
        processed.len(),
        hsps.len(),
        t.t_count
    );
    processed
}

// Maximal runs of accepted window starts, each turned into one HSP
fn pieces(hsp: &Hsp, accepted: &[bool], k: usize) -> Vec<Hsp> {
    let mut result = vec![];
    let mut run_start = None;
    for (i, &ok) in accepted.iter().chain(std::iter::once(&false)).enumerate() {
        match (ok, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                result.push(hsp.shifted(start, i - start + k - 1));
                run_start = None;
            }
            _ => {}
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (ProteinSet, HspSet) {
        let seq = "ACDEFGHIKLMNPQRSTVWYACDEFGHIKLMNPQRSTVWY";
        let set = ProteinSet::new(&[("A", seq), ("B", seq), ("C", seq), ("D", seq)]).unwrap();
        let mut hsps = HspSet::default();
        // three HSPs stack on A:0..4, one lies elsewhere
        for other in 1..4 {
            hsps.insert(Hsp::new(Location::new(0, 0), Location::new(other, 0), 24));
        }
        hsps.insert(Hsp::new(Location::new(1, 16), Location::new(2, 16), 20));
        (set, hsps)
    }

    #[test]
    fn test_count_residues() {
        let (set, hsps) = fixture();
        let counts = count_residues(&set, &hsps, 20);
        assert_eq!(counts[0][0], 3);
        assert_eq!(counts[0][4], 3);
        assert_eq!(counts[0][5], 0);
        assert_eq!(counts[1][16], 1);
    }

    #[test]
    fn test_remove() {
        let (set, hsps) = fixture();
        let t = Thresholds::default().with_t_count(2);
        let processed = process_hsps(&set, &hsps, &t, ProcessMode::Remove);
        assert_eq!(processed.len(), 1);
        assert!(processed.is_subset(&hsps));

        // idempotent
        let again = process_hsps(&set, &processed, &t, ProcessMode::Remove);
        assert_eq!(again, processed);
    }

    #[test]
    fn test_monotone() {
        let (set, hsps) = fixture();
        let mut last = 0;
        for t_count in 1..5 {
            let t = Thresholds::default().with_t_count(t_count);
            let size = process_hsps(&set, &hsps, &t, ProcessMode::Remove).len();
            assert!(size >= last);
            last = size;
        }
        assert_eq!(last, hsps.len());
    }

    #[test]
    fn test_truncate() {
        let hsp = Hsp::new(Location::new(0, 10), Location::new(1, 30), 26);
        // 7 window starts, the fourth one overrepresented
        let accepted = [true, true, true, false, true, true, true];
        let cut = pieces(&hsp, &accepted, 20);
        assert_eq!(
            cut,
            vec![
                Hsp::new(Location::new(0, 10), Location::new(1, 30), 22),
                Hsp::new(Location::new(0, 14), Location::new(1, 34), 22),
            ]
        );

        assert!(pieces(&hsp, &[false; 7], 20).is_empty());
        assert_eq!(pieces(&hsp, &[true; 7], 20), vec![hsp]);
    }

    #[test]
    fn test_mode() {
        assert_eq!("remove".parse::<ProcessMode>().unwrap(), ProcessMode::Remove);
        assert_eq!("truncate".parse::<ProcessMode>().unwrap(), ProcessMode::Truncate);
        assert!("trim".parse::<ProcessMode>().is_err());
    }
}
