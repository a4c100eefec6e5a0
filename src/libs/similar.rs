//! Neighbourhood of an s-mer: every s-mer whose compared positions score at
//! least a threshold against it.
//!
//! The enumeration walks the compared positions left to right, trying the
//! substitutes of each residue from the most to the least similar, and stops
//! a branch as soon as the best reachable total falls under the threshold.

use crate::libs::pam;
use crate::libs::seed::Seed;

/// Score of two s-mers over the compared positions of a seed
pub fn smer_score(a: u64, b: u64, seed: &Seed) -> i32 {
    seed.care()
        .iter()
        .map(|&i| pam::score(seed.code_at(a, i), seed.code_at(b, i)) as i32)
        .sum()
}

/// All s-mers scoring at least `threshold` against `smer`.
///
/// The relation is symmetric: `b` is in the result for `a` exactly when `a`
/// is in the result for `b`.
pub fn similar_smers(smer: u64, seed: &Seed, threshold: i32) -> Vec<u64> {
    let codes: Vec<u8> = seed.care().iter().map(|&i| seed.code_at(smer, i)).collect();

    // best[k]: highest score reachable from compared position k to the end
    let mut best = vec![0i32; codes.len() + 1];
    for k in (0..codes.len()).rev() {
        best[k] = best[k + 1] + pam::row_max(codes[k]) as i32;
    }

    let mut found = vec![];
    if best[0] >= threshold {
        descend(seed, &codes, &best, 0, smer, 0, threshold, &mut found);
    }
    found
}

#[allow(clippy::too_many_arguments)]
fn descend(
    seed: &Seed,
    codes: &[u8],
    best: &[i32],
    k: usize,
    current: u64,
    acc: i32,
    threshold: i32,
    found: &mut Vec<u64>,
) {
    if k == codes.len() {
        found.push(current);
        return;
    }

    for &other in pam::best_first(codes[k]) {
        let score = acc + pam::score(codes[k], other) as i32;
        if score + best[k + 1] < threshold {
            break;
        }
        let next = seed.with_code(current, seed.care()[k], other);
        descend(seed, codes, best, k + 1, next, score, threshold, found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(s: &[u8]) -> Vec<u8> {
        s.iter().map(|&b| pam::encode(b)).collect()
    }

    #[test]
    fn test_similar_smers() {
        let seed = Seed::new("11****11***1").unwrap();
        let smer = seed.smer(&encode(b"WCAAAAWCAAAW"));
        let threshold = 40;

        let similar = similar_smers(smer, &seed, threshold);
        assert!(similar.contains(&smer));
        for &other in &similar {
            assert!(smer_score(smer, other, &seed) >= threshold);
        }

        // exhaustive check on the last compared position
        let last = seed.care()[4];
        for code in 1..=pam::UNKNOWN {
            let candidate = seed.with_code(smer, last, code);
            let expected = smer_score(smer, candidate, &seed) >= threshold;
            assert_eq!(similar.contains(&candidate), expected);
        }
    }

    #[test]
    fn test_ambiguous_residues() {
        let seed = Seed::new("11****11***1").unwrap();
        let d = seed.smer(&encode(b"WCAAAAWCAAAD"));
        let b = seed.smer(&encode(b"WCAAAAWCAAAB"));
        let threshold = smer_score(d, b, &seed);

        // a D-bucket meets a B-bucket from either side
        assert!(b > d);
        assert!(similar_smers(d, &seed, threshold).contains(&b));
        assert!(similar_smers(b, &seed, threshold).contains(&d));

        for other in similar_smers(d, &seed, 45) {
            assert!(similar_smers(other, &seed, 45).contains(&d));
        }
    }

    #[test]
    fn test_unreachable_threshold() {
        let seed = Seed::new("1**1*1***1*1").unwrap();
        let smer = seed.smer(&encode(b"AAAAAAAAAAAA"));
        // five alanines score 15 at best
        assert_eq!(similar_smers(smer, &seed, 16).len(), 0);
        assert!(similar_smers(smer, &seed, 15).contains(&smer));
    }
}
