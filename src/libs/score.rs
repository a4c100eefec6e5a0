//! Matching-statistics scoring.
//!
//! A pair `(X, Y)` scores when X shares an HSP with some training
//! interactor A, Y shares an HSP with some B, and A and B are a training
//! pair. Each such chain adds
//!
//! ```text
//! (s1 * (l2 - k + 1) + s2 * (l1 - k + 1)) / (L_X * L_Y)
//! ```
//!
//! where `s` and `l` are the score and length of the two HSPs, `k` the window
//! size, and `L` protein lengths.

use crate::libs::config::Thresholds;
use crate::libs::error::Result;
use crate::libs::extend::{hsp_score, self_score};
use crate::libs::hsp::HspSet;
use crate::libs::prediction::PredictionMatrix;
use crate::libs::protein::ProteinSet;
use crate::libs::shard::Shard;
use indexmap::IndexMap;
use log::{info, warn};
use nalgebra::DMatrix;
use rayon::prelude::*;

/// One HSP seen from one of its ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evidence {
    /// Protein on the far side
    pub other: usize,
    /// Start of the segment on this side
    pub position: usize,
    pub length: usize,
    pub score: f64,
}

/// HSP evidence of every protein, and the training partners of interactors
#[derive(Debug, Clone, Default)]
pub struct EvidenceTable {
    entries: Vec<Vec<Evidence>>,
    partners: Vec<Vec<usize>>,
    kmer_size: usize,
}

/// Which sequences make the rows and the columns of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Proteins against proteins
    AllToAll,
    /// Proteins then peptides against proteins
    Peptides,
}

impl Layout {
    pub fn rows(&self, set: &ProteinSet) -> Vec<usize> {
        match self {
            Layout::AllToAll => proteins_only(set),
            Layout::Peptides => (0..set.len()).collect(),
        }
    }

    pub fn cols(&self, set: &ProteinSet) -> Vec<usize> {
        proteins_only(set)
    }
}

fn proteins_only(set: &ProteinSet) -> Vec<usize> {
    set.iter()
        .filter(|p| !p.is_peptide())
        .map(|p| p.index())
        .collect()
}

/// Resolve training pairs against the set; unknown names are skipped
pub fn map_pairs(set: &ProteinSet, pairs: &[(String, String)]) -> Vec<(usize, usize)> {
    let mut mapped = vec![];
    for (a, b) in pairs {
        match (set.index_of(a), set.index_of(b)) {
            (Some(i), Some(j)) => mapped.push((i, j)),
            _ => warn!("Training pair {} {} refers to an unknown sequence, skipped", a, b),
        }
    }
    mapped
}

impl EvidenceTable {
    pub fn build(set: &ProteinSet, hsps: &HspSet, pairs: &[(usize, usize)], t: &Thresholds) -> Self {
        let k = t.kmer_size;

        let mut partners = vec![vec![]; set.len()];
        for &(a, b) in pairs {
            partners[a].push(b);
            if a != b {
                partners[b].push(a);
            }
        }
        for list in partners.iter_mut() {
            list.sort_unstable();
            list.dedup();
        }
        let is_interactor = |i: usize| !partners[i].is_empty();

        let scored: Vec<_> = hsps
            .par_iter()
            .filter(|h| h.len() >= k && !h.is_self_pair())
            .filter(|h| is_interactor(h.first().index) || is_interactor(h.second().index))
            .map(|h| (*h, hsp_score(set, h, k) as f64))
            .collect();

        let mut entries = vec![vec![]; set.len()];
        for (hsp, score) in scored {
            let (l1, l2) = (hsp.first(), hsp.second());
            entries[l1.index].push(Evidence {
                other: l2.index,
                position: l1.position,
                length: hsp.len(),
                score,
            });
            entries[l2.index].push(Evidence {
                other: l1.index,
                position: l2.position,
                length: hsp.len(),
                score,
            });
        }

        if t.self_evidence {
            for protein in set.iter().filter(|p| is_interactor(p.index()) && p.len() >= k) {
                entries[protein.index()].push(Evidence {
                    other: protein.index(),
                    position: 0,
                    length: protein.len(),
                    score: self_score(protein, k) as f64,
                });
            }
        }

        // HashSet iteration order must not leak into float sums
        for list in entries.iter_mut() {
            list.sort_by(|a, b| {
                (a.other, a.position, a.length)
                    .cmp(&(b.other, b.position, b.length))
                    .then(a.score.total_cmp(&b.score))
            });
        }

        EvidenceTable {
            entries,
            partners,
            kmer_size: k,
        }
    }

    pub fn entries(&self, index: usize) -> &[Evidence] {
        &self.entries[index]
    }

    pub fn partners(&self, index: usize) -> &[usize] {
        &self.partners[index]
    }

    /// Unnormalised contribution of two HSPs linked through a training pair
    pub fn contribution(&self, h1: &Evidence, h2: &Evidence) -> f64 {
        let k = self.kmer_size as f64;
        h1.score * (h2.length as f64 - k + 1.0) + h2.score * (h1.length as f64 - k + 1.0)
    }

    /// Every `(h1, h2)` chain from `x` through a training pair, `h1` on `x`
    fn chains(&self, x: usize) -> impl Iterator<Item = (&Evidence, &Evidence)> + '_ {
        self.entries[x].iter().flat_map(move |h1| {
            self.partners[h1.other]
                .iter()
                .flat_map(move |&b| self.entries[b].iter().map(move |h2| (h1, h2)))
        })
    }
}

/// Score every row against every column of a layout.
///
/// The shard selects a contiguous block of rows; a single shard yields the
/// complete matrix.
pub fn score_interactions(
    set: &ProteinSet,
    hsps: &HspSet,
    pairs: &[(String, String)],
    t: &Thresholds,
    layout: Layout,
    shard: Shard,
) -> Result<PredictionMatrix> {
    t.validate()?;

    let mapped = map_pairs(set, pairs);
    let table = EvidenceTable::build(set, hsps, &mapped, t);
    info!(
        "{} training pairs, {} HSPs, {} interactors",
        mapped.len(),
        hsps.len(),
        table.partners.iter().filter(|p| !p.is_empty()).count()
    );

    let rows = layout.rows(set);
    let cols = layout.cols(set);
    let mut col_of = vec![None; set.len()];
    for (j, &c) in cols.iter().enumerate() {
        col_of[c] = Some(j);
    }

    let block = shard.block(rows.len());
    info!(
        "Shard {}/{} scores rows {}..{} of {}",
        shard.rank(),
        shard.world_size(),
        block.start,
        block.end,
        rows.len()
    );

    let values: Vec<f32> = rows[block.clone()]
        .par_iter()
        .flat_map_iter(|&x| score_row(&table, set, x, &col_of, cols.len()))
        .collect();

    let name = |&i: &usize| set.get(i).name().to_string();
    let scores = DMatrix::from_row_slice(block.len(), cols.len(), &values);
    PredictionMatrix::new(
        scores,
        rows[block.clone()].iter().map(name).collect(),
        cols.iter().map(name).collect(),
    )?
    .into_block(block.start, rows.len())
}

fn score_row(
    table: &EvidenceTable,
    set: &ProteinSet,
    x: usize,
    col_of: &[Option<usize>],
    ncols: usize,
) -> Vec<f32> {
    let mut acc = vec![0f64; ncols];
    let len_x = set.get(x).len() as f64;
    for (h1, h2) in table.chains(x) {
        if let Some(j) = col_of[h2.other] {
            let len_y = set.get(h2.other).len() as f64;
            acc[j] += table.contribution(h1, h2) / (len_x * len_y);
        }
    }
    acc.into_iter().map(|v| v as f32).collect()
}

/// Per-residue contributions of a target protein to its score with every
/// peptide of the set.
///
/// Each chain's contribution is spread evenly over the target residues
/// covered by the target's HSP.
pub fn contributions(
    target: &str,
    set: &ProteinSet,
    hsps: &HspSet,
    pairs: &[(String, String)],
    t: &Thresholds,
) -> Result<IndexMap<String, Vec<f32>>> {
    t.validate()?;

    let x = set.get_by_name(target)?.index();
    let mapped = map_pairs(set, pairs);
    let table = EvidenceTable::build(set, hsps, &mapped, t);

    let len_x = set.get(x).len();
    let mut sites: IndexMap<usize, Vec<f64>> = set
        .iter()
        .filter(|p| p.is_peptide())
        .map(|p| (p.index(), vec![0f64; len_x]))
        .collect();

    for (h1, h2) in table.chains(x) {
        if let Some(residues) = sites.get_mut(&h2.other) {
            let len_y = set.get(h2.other).len() as f64;
            let share = table.contribution(h1, h2) / (len_x as f64 * len_y) / h1.length as f64;
            for value in &mut residues[h1.position..h1.position + h1.length] {
                *value += share;
            }
        }
    }

    Ok(sites
        .into_iter()
        .map(|(i, v)| {
            (
                set.get(i).name().to_string(),
                v.into_iter().map(|c| c as f32).collect(),
            )
        })
        .collect())
}
