use crate::libs::hsp::Location;
use crate::libs::protein::{Protein, ProteinSet};
use crate::libs::seed::Seed;
use fxhash::FxHashMap;

/// All occurrences of one s-mer value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub smer: u64,
    pub locations: Vec<Location>,
}

/// s-mer buckets of a `ProteinSet` under one spaced seed.
///
/// Buckets are sorted by s-mer value; inside a bucket, locations keep the
/// order in which they were met (protein index, then position).
#[derive(Debug, Clone)]
pub struct KmerIndex {
    buckets: Vec<Bucket>,
    position_of: FxHashMap<u64, usize>,
}

impl KmerIndex {
    pub fn build(set: &ProteinSet, seed: &Seed) -> Self {
        let mut grouped: FxHashMap<u64, Vec<Location>> = FxHashMap::default();
        for protein in set.iter() {
            for (smer, location) in smers(protein, seed) {
                grouped.entry(smer).or_default().push(location);
            }
        }

        let mut buckets: Vec<Bucket> = grouped
            .into_iter()
            .map(|(smer, locations)| Bucket { smer, locations })
            .collect();
        buckets.sort_by_key(|b| b.smer);

        let position_of = buckets
            .iter()
            .enumerate()
            .map(|(i, b)| (b.smer, i))
            .collect();

        KmerIndex {
            buckets,
            position_of,
        }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, smer: u64) -> Option<&Bucket> {
        self.position_of.get(&smer).map(|&i| &self.buckets[i])
    }

    pub fn position(&self, smer: u64) -> Option<usize> {
        self.position_of.get(&smer).copied()
    }
}

/// Every `(s-mer, location)` of a protein, in position order
pub fn smers<'a>(protein: &'a Protein, seed: &'a Seed) -> impl Iterator<Item = (u64, Location)> + 'a {
    protein
        .residues()
        .windows(seed.len())
        .enumerate()
        .map(move |(position, window)| (seed.smer(window), Location::new(protein.index(), position)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index() {
        let set = ProteinSet::new(&[
            ("P1", "ACDEFGHIKLMNPQ"),
            ("P2", "ACDEFGHIKLMN"),
            ("P3", "ACDEF"),
        ])
        .unwrap();
        let seed = Seed::new("111111111111").unwrap();
        let index = KmerIndex::build(&set, &seed);

        // P1 has 3 windows, P2 shares the first one, P3 is too short
        assert_eq!(index.len(), 3);
        let total: usize = index.buckets().iter().map(|b| b.locations.len()).sum();
        assert_eq!(total, 4);

        let p2 = set.get(1);
        let (smer, _) = smers(p2, &seed).next().unwrap();
        let bucket = index.get(smer).unwrap();
        assert_eq!(
            bucket.locations,
            vec![Location::new(0, 0), Location::new(1, 0)]
        );

        for pair in index.buckets().windows(2) {
            assert!(pair[0].smer < pair[1].smer);
        }
    }
}
