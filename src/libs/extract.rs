use crate::libs::config::Thresholds;
use crate::libs::error::Result;
use crate::libs::extend::{extend_hit, find_hit};
use crate::libs::hsp::{HspSet, Location};
use crate::libs::kmer::KmerIndex;
use crate::libs::protein::ProteinSet;
use crate::libs::seed::Seed;
use crate::libs::shard::Shard;
use crate::libs::similar::{similar_smers, smer_score};
use log::{debug, info};
use rayon::prelude::*;

/// Which occurrence pairs are worth extending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairFilter {
    /// Any two distinct sequences
    AllPairs,
    /// One protein and one peptide
    CrossGroup,
}

impl PairFilter {
    pub fn accepts(&self, set: &ProteinSet, a: Location, b: Location) -> bool {
        if a.index == b.index {
            return false;
        }
        match self {
            PairFilter::AllPairs => true,
            PairFilter::CrossGroup => set.get(a.index).is_peptide() != set.get(b.index).is_peptide(),
        }
    }
}

/// HSPs between all proteins of a set
pub fn extract_hsps(set: &ProteinSet, t: &Thresholds, shard: Shard) -> Result<HspSet> {
    extract_with(set, t, PairFilter::AllPairs, shard)
}

/// HSPs between the proteins and the peptides of a set built by
/// `ProteinSet::with_peptides`. `t.t_sim` is the s-mer threshold of peptides.
pub fn extract_peptide_hsps(set: &ProteinSet, t: &Thresholds, shard: Shard) -> Result<HspSet> {
    extract_with(set, t, PairFilter::CrossGroup, shard)
}

/// Seed, hit and extend under every default spaced seed.
///
/// The shard owns k-mer buckets round-robin; running all shards of a world
/// and unioning their outputs gives the unsharded result.
pub fn extract_with(
    set: &ProteinSet,
    t: &Thresholds,
    filter: PairFilter,
    shard: Shard,
) -> Result<HspSet> {
    t.validate()?;

    let mut hsps = HspSet::default();
    for seed in Seed::defaults() {
        let index = KmerIndex::build(set, &seed);
        info!(
            "Seed {}: {} s-mer buckets, shard {}/{}",
            seed.pattern(),
            index.len(),
            shard.rank(),
            shard.world_size()
        );

        let found = (0..index.len())
            .into_par_iter()
            .filter(|&b| shard.owns(b))
            .fold(HspSet::default, |mut acc, b| {
                search_bucket(set, &index, &seed, b, t, filter, &mut acc);
                acc
            })
            .reduce(HspSet::default, |mut a, b| {
                a.extend(b);
                a
            });

        debug!("Seed {}: {} HSPs", seed.pattern(), found.len());
        hsps.extend(found);
    }

    info!("{} HSPs extracted", hsps.len());
    Ok(hsps)
}

/// Pairs inside bucket `b`, and between `b` and every similar bucket of a
/// greater value, so each unordered pair of buckets is visited once.
fn search_bucket(
    set: &ProteinSet,
    index: &KmerIndex,
    seed: &Seed,
    b: usize,
    t: &Thresholds,
    filter: PairFilter,
    acc: &mut HspSet,
) {
    let bucket = &index.buckets()[b];

    let mut visit = |x: Location, y: Location| {
        if !filter.accepts(set, x, y) {
            return;
        }
        if let Some(hit) = find_hit(set, x, y, t) {
            acc.insert(extend_hit(set, &hit, t));
        }
    };

    if smer_score(bucket.smer, bucket.smer, seed) >= t.t_sim {
        for (i, &x) in bucket.locations.iter().enumerate() {
            for &y in &bucket.locations[i + 1..] {
                visit(x, y);
            }
        }
    }

    for other in similar_smers(bucket.smer, seed, t.t_sim) {
        if other <= bucket.smer {
            continue;
        }
        if let Some(neighbour) = index.get(other) {
            for &x in &bucket.locations {
                for &y in &neighbour.locations {
                    visit(x, y);
                }
            }
        }
    }
}
