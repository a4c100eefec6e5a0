use crate::libs::error::{Result, SprintError};
use crate::libs::pam;
use indexmap::IndexMap;

/// A named sequence with its residues encoded as PAM120 codes
#[derive(Debug, Clone)]
pub struct Protein {
    index: usize,
    name: String,
    residues: Vec<u8>,
    peptide: bool,
}

impl Protein {
    pub fn new(index: usize, name: &str, sequence: &[u8], peptide: bool) -> Self {
        let residues = sequence
            .iter()
            .filter(|b| !b.is_ascii_whitespace())
            .map(|&b| pam::encode(b))
            .collect();

        Protein {
            index,
            name: name.to_string(),
            residues,
            peptide,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    #[inline]
    pub fn residue(&self, position: usize) -> u8 {
        self.residues[position]
    }

    pub fn residues(&self) -> &[u8] {
        &self.residues
    }

    pub fn is_peptide(&self) -> bool {
        self.peptide
    }

    /// The residues decoded back to one-letter symbols
    pub fn sequence(&self) -> String {
        self.residues.iter().map(|&c| pam::decode(c)).collect()
    }
}

/// Proteins of a run, addressed by position or by name.
///
/// Peptides are always stored after the proteins, so protein indices do not
/// move when peptides are added.
#[derive(Debug, Clone, Default)]
pub struct ProteinSet {
    proteins: Vec<Protein>,
    indices: IndexMap<String, usize>,
}

impl ProteinSet {
    /// Build a set of proteins from `(name, sequence)` records
    pub fn new<N, S>(records: &[(N, S)]) -> Result<Self>
    where
        N: AsRef<str>,
        S: AsRef<[u8]>,
    {
        let mut set = ProteinSet::default();
        set.extend(records, false)?;
        Ok(set)
    }

    /// A copy of this set with the peptides appended
    pub fn with_peptides<N, S>(&self, peptides: &[(N, S)]) -> Result<Self>
    where
        N: AsRef<str>,
        S: AsRef<[u8]>,
    {
        let mut set = self.clone();
        set.extend(peptides, true)?;
        Ok(set)
    }

    fn extend<N, S>(&mut self, records: &[(N, S)], peptide: bool) -> Result<()>
    where
        N: AsRef<str>,
        S: AsRef<[u8]>,
    {
        for (name, seq) in records {
            let name = name.as_ref();
            if self.indices.contains_key(name) {
                return Err(SprintError::Duplicate(name.to_string()));
            }
            let index = self.proteins.len();
            self.proteins
                .push(Protein::new(index, name, seq.as_ref(), peptide));
            self.indices.insert(name.to_string(), index);
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> &Protein {
        &self.proteins[index]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Result<&Protein> {
        self.index_of(name)
            .map(|i| &self.proteins[i])
            .ok_or_else(|| SprintError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Protein> {
        self.proteins.iter()
    }

    pub fn len(&self) -> usize {
        self.proteins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proteins.is_empty()
    }

    /// Number of entries that are not peptides
    pub fn num_proteins(&self) -> usize {
        self.proteins.iter().filter(|p| !p.is_peptide()).count()
    }

    /// Names in index order
    pub fn names(&self) -> Vec<String> {
        self.indices.keys().cloned().collect()
    }
}
