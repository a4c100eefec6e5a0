use crate::libs::error::{Result, SprintError};
use crate::libs::protein::ProteinSet;
use fxhash::FxHashSet;
use std::fmt;
use std::str::FromStr;

/// A position inside one protein of a `ProteinSet`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub index: usize,
    pub position: usize,
}

impl Location {
    pub fn new(index: usize, position: usize) -> Self {
        Location { index, position }
    }
}

/// A gapless High-Scoring Segment Pair.
///
/// The two locations are stored with the lower protein index first, so an
/// HSP and its mirror image compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hsp {
    loc1: Location,
    loc2: Location,
    length: usize,
}

pub type HspSet = FxHashSet<Hsp>;

impl Hsp {
    pub fn new(a: Location, b: Location, length: usize) -> Self {
        if (a.index, a.position) <= (b.index, b.position) {
            Hsp {
                loc1: a,
                loc2: b,
                length,
            }
        } else {
            Hsp {
                loc1: b,
                loc2: a,
                length,
            }
        }
    }

    pub fn first(&self) -> Location {
        self.loc1
    }

    pub fn second(&self) -> Location {
        self.loc2
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn is_self_pair(&self) -> bool {
        self.loc1.index == self.loc2.index
    }

    /// The same pair of segments starting `delta` residues further
    pub fn shifted(&self, delta: usize, length: usize) -> Self {
        Hsp::new(
            Location::new(self.loc1.index, self.loc1.position + delta),
            Location::new(self.loc2.index, self.loc2.position + delta),
            length,
        )
    }

    /// The textual form, proteins ordered by name
    pub fn to_record(&self, set: &ProteinSet) -> HspRecord {
        let name1 = set.get(self.loc1.index).name();
        let name2 = set.get(self.loc2.index).name();
        if name1 <= name2 {
            HspRecord {
                protein1: name1.to_string(),
                protein2: name2.to_string(),
                pos1: self.loc1.position,
                pos2: self.loc2.position,
                length: self.length,
            }
        } else {
            HspRecord {
                protein1: name2.to_string(),
                protein2: name1.to_string(),
                pos1: self.loc2.position,
                pos2: self.loc1.position,
                length: self.length,
            }
        }
    }

    /// Resolve a record against the proteins of a run
    pub fn from_record(record: &HspRecord, set: &ProteinSet) -> Result<Self> {
        let p1 = set.get_by_name(&record.protein1)?;
        let p2 = set.get_by_name(&record.protein2)?;
        for (p, pos) in [(p1, record.pos1), (p2, record.pos2)] {
            let end = pos.checked_add(record.length).filter(|&end| end <= p.len());
            if end.is_none() {
                return Err(SprintError::OutOfBounds(format!(
                    "{} residues from {} exceed the {} residues of {}",
                    record.length,
                    pos,
                    p.len(),
                    p.name()
                )));
            }
        }

        Ok(Hsp::new(
            Location::new(p1.index(), record.pos1),
            Location::new(p2.index(), record.pos2),
            record.length,
        ))
    }
}

/// One line of an HSP file: `protein1 protein2 pos1 pos2 length`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HspRecord {
    pub protein1: String,
    pub protein2: String,
    pub pos1: usize,
    pub pos2: usize,
    pub length: usize,
}

impl HspRecord {
    /// The same record with the proteins ordered by name
    pub fn canonical(self) -> Self {
        if self.protein1 <= self.protein2 {
            self
        } else {
            HspRecord {
                protein1: self.protein2,
                protein2: self.protein1,
                pos1: self.pos2,
                pos2: self.pos1,
                length: self.length,
            }
        }
    }

    pub fn is_self_pair(&self) -> bool {
        self.protein1 == self.protein2
    }
}

impl fmt::Display for HspRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.protein1, self.protein2, self.pos1, self.pos2, self.length
        )
    }
}

impl FromStr for HspRecord {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(format!("expected 5 fields, found {}", fields.len()));
        }

        let number = |i: usize, what: &str| {
            fields[i]
                .parse::<usize>()
                .map_err(|_| format!("{} `{}` is not a non-negative integer", what, fields[i]))
        };

        Ok(HspRecord {
            protein1: fields[0].to_string(),
            protein2: fields[1].to_string(),
            pos1: number(2, "pos1")?,
            pos2: number(3, "pos2")?,
            length: number(4, "length")?,
        })
    }
}

/// Records of a set, sorted so that the same set always prints the same way
pub fn sorted_records(hsps: &HspSet, set: &ProteinSet) -> Vec<HspRecord> {
    let mut records: Vec<HspRecord> = hsps.iter().map(|h| h.to_record(set)).collect();
    records.sort();
    records
}
