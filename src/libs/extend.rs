use crate::libs::config::Thresholds;
use crate::libs::hsp::{Hsp, Location};
use crate::libs::pam;
use crate::libs::protein::{Protein, ProteinSet};
use crate::libs::seed::SEED_LEN;

/// A window of `kmer_size` residues scoring at least `t_hsp`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub a: Location,
    pub b: Location,
    pub score: i32,
}

/// Summed PAM120 score of two aligned windows
pub fn window_score(p1: &Protein, p2: &Protein, start1: usize, start2: usize, len: usize) -> i32 {
    p1.residues()[start1..start1 + len]
        .iter()
        .zip(&p2.residues()[start2..start2 + len])
        .map(|(&a, &b)| pam::score(a, b) as i32)
        .sum()
}

/// Find the first high-scoring window covering two similar seed windows.
///
/// Windows are tried from the one starting at the seeds to the one ending
/// with them.
pub fn find_hit(set: &ProteinSet, a: Location, b: Location, t: &Thresholds) -> Option<Hit> {
    let (p1, p2) = (set.get(a.index), set.get(b.index));
    let k = t.kmer_size;

    for offset in 0..=(k - SEED_LEN) {
        if offset > a.position || offset > b.position {
            break;
        }
        let (s1, s2) = (a.position - offset, b.position - offset);
        if s1 + k > p1.len() || s2 + k > p2.len() {
            continue;
        }

        let score = window_score(p1, p2, s1, s2, k);
        if score >= t.t_hsp {
            return Some(Hit {
                a: Location::new(a.index, s1),
                b: Location::new(b.index, s2),
                score,
            });
        }
    }

    None
}

/// Slide the window of a hit outwards while it keeps scoring at least `t_hsp`
pub fn extend_hit(set: &ProteinSet, hit: &Hit, t: &Thresholds) -> Hsp {
    let (p1, p2) = (set.get(hit.a.index), set.get(hit.b.index));
    let k = t.kmer_size;
    let (s1, s2) = (hit.a.position, hit.b.position);
    let pair = |i: usize, j: usize| pam::score(p1.residue(i), p2.residue(j)) as i32;

    let room_right = (p1.len() - s1 - k).min(p2.len() - s2 - k);
    let mut score = hit.score;
    let mut right = 0;
    while right < room_right {
        score += pair(s1 + k + right, s2 + k + right) - pair(s1 + right, s2 + right);
        if score < t.t_hsp {
            break;
        }
        right += 1;
    }

    let room_left = s1.min(s2);
    let mut score = hit.score;
    let mut left = 0;
    while left < room_left {
        score += pair(s1 - left - 1, s2 - left - 1) - pair(s1 + k - left - 1, s2 + k - left - 1);
        if score < t.t_hsp {
            break;
        }
        left += 1;
    }

    Hsp::new(
        Location::new(hit.a.index, s1 - left),
        Location::new(hit.b.index, s2 - left),
        k + left + right,
    )
}

/// Sum of the scores of every `kmer_size` window along an HSP
pub fn hsp_score(set: &ProteinSet, hsp: &Hsp, kmer_size: usize) -> i32 {
    let (l1, l2) = (hsp.first(), hsp.second());
    let (p1, p2) = (set.get(l1.index), set.get(l2.index));
    if hsp.len() < kmer_size {
        return 0;
    }

    let pair = |i: usize| pam::score(p1.residue(l1.position + i), p2.residue(l2.position + i)) as i32;
    let mut window = window_score(p1, p2, l1.position, l2.position, kmer_size);
    let mut total = window;
    for i in 0..hsp.len() - kmer_size {
        window += pair(i + kmer_size) - pair(i);
        total += window;
    }
    total
}

/// Score of a protein aligned with itself over its whole length
pub fn self_score(protein: &Protein, kmer_size: usize) -> i32 {
    if protein.len() < kmer_size {
        return 0;
    }
    protein
        .residues()
        .windows(kmer_size)
        .map(|w| w.iter().map(|&c| pam::score(c, c) as i32).sum::<i32>())
        .sum()
}
