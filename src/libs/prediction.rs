use crate::libs::error::{Result, SprintError};
use indexmap::{IndexMap, IndexSet};
use nalgebra::DMatrix;
use std::io::{Read, Write};
use std::str::FromStr;

const MAGIC: [u8; 4] = *b"SPRM";
const VERSION: u32 = 1;
const MAX_NAME_LEN: usize = 1 << 16;

/// Shape of `PredictionMatrix::get_scores`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreFormat {
    Array,
    Dict,
}

impl FromStr for ScoreFormat {
    type Err = SprintError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "array" => Ok(ScoreFormat::Array),
            "dict" => Ok(ScoreFormat::Dict),
            _ => Err(SprintError::InvalidFormat(s.to_string())),
        }
    }
}

/// A row of scores
#[derive(Debug, Clone, PartialEq)]
pub enum Scores {
    /// Values in column order
    Array(Vec<f32>),
    /// Column name to value, in column order
    Dict(IndexMap<String, f32>),
}

/// Dense interaction scores with name-indexed rows and columns.
///
/// A matrix computed by one shard only holds a block of rows; `row_offset`
/// and `total_rows` place it inside the full matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionMatrix {
    rows: IndexSet<String>,
    cols: IndexSet<String>,
    scores: DMatrix<f32>,
    row_offset: usize,
    total_rows: usize,
}

impl PredictionMatrix {
    pub fn new(scores: DMatrix<f32>, row_names: Vec<String>, col_names: Vec<String>) -> Result<Self> {
        let rows = unique_names(row_names)?;
        let cols = unique_names(col_names)?;
        if scores.nrows() != rows.len() || scores.ncols() != cols.len() {
            return Err(SprintError::InvalidConfig(format!(
                "a {}x{} matrix cannot hold {} rows and {} columns",
                scores.nrows(),
                scores.ncols(),
                rows.len(),
                cols.len()
            )));
        }

        let total_rows = rows.len();
        Ok(PredictionMatrix {
            rows,
            cols,
            scores,
            row_offset: 0,
            total_rows,
        })
    }

    /// Same names on both axes
    pub fn square(scores: DMatrix<f32>, names: Vec<String>) -> Result<Self> {
        PredictionMatrix::new(scores, names.clone(), names)
    }

    /// Mark this matrix as rows `offset..offset + nrows` of a matrix of `total` rows
    pub fn into_block(mut self, offset: usize, total: usize) -> Result<Self> {
        if offset + self.rows.len() > total {
            return Err(SprintError::InvalidConfig(format!(
                "rows {}..{} exceed a matrix of {} rows",
                offset,
                offset + self.rows.len(),
                total
            )));
        }
        self.row_offset = offset;
        self.total_rows = total;
        Ok(self)
    }

    pub fn row_names(&self) -> impl Iterator<Item = &String> {
        self.rows.iter()
    }

    pub fn col_names(&self) -> impl Iterator<Item = &String> {
        self.cols.iter()
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.cols.len()
    }

    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Holds every row, not a shard's block
    pub fn is_complete(&self) -> bool {
        self.row_offset == 0 && self.rows.len() == self.total_rows
    }

    pub fn scores(&self) -> &DMatrix<f32> {
        &self.scores
    }

    pub fn get_score(&self, row: &str, col: &str) -> Result<f32> {
        let i = self.row_index(row)?;
        let j = self
            .cols
            .get_index_of(col)
            .ok_or_else(|| SprintError::NotFound(col.to_string()))?;
        Ok(self.scores[(i, j)])
    }

    pub fn get_scores(&self, row: &str, format: ScoreFormat) -> Result<Scores> {
        let i = self.row_index(row)?;
        let row = self.scores.row(i);
        let values = row.iter().copied();
        Ok(match format {
            ScoreFormat::Array => Scores::Array(values.collect()),
            ScoreFormat::Dict => Scores::Dict(self.cols.iter().cloned().zip(values).collect()),
        })
    }

    fn row_index(&self, row: &str) -> Result<usize> {
        self.rows
            .get_index_of(row)
            .ok_or_else(|| SprintError::NotFound(row.to_string()))
    }

    /// Put the row blocks of every shard back together
    pub fn assemble(mut blocks: Vec<PredictionMatrix>) -> Result<Self> {
        blocks.sort_by_key(|b| b.row_offset);
        let first = blocks
            .first()
            .ok_or_else(|| SprintError::Container("no block to assemble".to_string()))?;
        let cols = first.cols.clone();
        let total = first.total_rows;

        let mut rows = IndexSet::new();
        let mut data = Vec::with_capacity(total * cols.len());
        for block in &blocks {
            if block.cols != cols || block.total_rows != total {
                return Err(SprintError::Container(
                    "blocks belong to different matrices".to_string(),
                ));
            }
            if block.row_offset != rows.len() {
                return Err(SprintError::Container(format!(
                    "rows {}..{} are missing or overlapping",
                    rows.len(),
                    block.row_offset
                )));
            }
            for (i, name) in block.rows.iter().enumerate() {
                if !rows.insert(name.clone()) {
                    return Err(SprintError::Duplicate(name.clone()));
                }
                data.extend(block.scores.row(i).iter().copied());
            }
        }
        if rows.len() != total {
            return Err(SprintError::Container(format!(
                "rows {}..{} are missing",
                rows.len(),
                total
            )));
        }

        let scores = DMatrix::from_row_slice(rows.len(), cols.len(), &data);
        Ok(PredictionMatrix {
            rows,
            cols,
            scores,
            row_offset: 0,
            total_rows: total,
        })
    }

    /// One `row col score` line per cell
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> Result<()> {
        for (i, row) in self.rows.iter().enumerate() {
            for (j, col) in self.cols.iter().enumerate() {
                writeln!(writer, "{}\t{}\t{}", row, col, self.scores[(i, j)])?;
            }
        }
        Ok(())
    }

    /// Write the binary container, gzipped when the path ends with `.gz`
    pub fn save(&self, path: &str) -> Result<()> {
        let file = std::io::BufWriter::new(std::fs::File::create(path)?);
        if path.ends_with(".gz") {
            let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
            self.write_to(&mut encoder)?;
            encoder.finish()?.flush()?;
        } else {
            let mut writer = file;
            self.write_to(&mut writer)?;
            writer.flush()?;
        }
        Ok(())
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let mut reader = crate::reader(path)?;
        PredictionMatrix::read_from(&mut reader)
    }

    /// Layout, little-endian:
    ///
    /// * magic `SPRM`, version `u32`
    /// * `nrows`, `ncols`, `row_offset`, `total_rows` as `u32`
    /// * row names then column names, each a `u32` length and UTF-8 bytes
    /// * `nrows * ncols` scores as `f32`, row-major
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&MAGIC)?;
        write_u32(writer, VERSION)?;
        for n in [self.nrows(), self.ncols(), self.row_offset, self.total_rows] {
            write_u32(writer, to_u32(n)?)?;
        }

        for name in self.rows.iter().chain(self.cols.iter()) {
            write_u32(writer, to_u32(name.len())?)?;
            writer.write_all(name.as_bytes())?;
        }

        for i in 0..self.nrows() {
            for value in self.scores.row(i).iter() {
                writer.write_all(&value.to_le_bytes())?;
            }
        }
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        read_exact(reader, &mut magic)?;
        if magic != MAGIC {
            return Err(SprintError::Container(format!(
                "not a prediction file (magic: {:02x?})",
                magic
            )));
        }

        let version = read_u32(reader)?;
        if version != VERSION {
            return Err(SprintError::Container(format!(
                "unsupported version: {}",
                version
            )));
        }

        let nrows = read_u32(reader)? as usize;
        let ncols = read_u32(reader)? as usize;
        let row_offset = read_u32(reader)? as usize;
        let total_rows = read_u32(reader)? as usize;

        let ncells = nrows
            .checked_mul(ncols)
            .ok_or_else(|| SprintError::Container(format!("{} x {} scores", nrows, ncols)))?;

        // header sizes are untrusted, vectors grow as data arrives
        let row_names = read_names(reader, nrows)?;
        let col_names = read_names(reader, ncols)?;

        let mut data = vec![];
        let mut buf = [0u8; 4];
        for _ in 0..ncells {
            read_exact(reader, &mut buf)?;
            data.push(f32::from_le_bytes(buf));
        }
        if reader.read(&mut buf)? != 0 {
            return Err(SprintError::Container("trailing data".to_string()));
        }

        let scores = DMatrix::from_row_slice(nrows, ncols, &data);
        PredictionMatrix::new(scores, row_names, col_names)?.into_block(row_offset, total_rows)
    }
}

fn unique_names(names: Vec<String>) -> Result<IndexSet<String>> {
    let mut set = IndexSet::with_capacity(names.len());
    for name in names {
        if set.contains(&name) {
            return Err(SprintError::Duplicate(name));
        }
        set.insert(name);
    }
    Ok(set)
}

fn to_u32(n: usize) -> Result<u32> {
    u32::try_from(n).map_err(|_| SprintError::Container(format!("{} does not fit in 32 bits", n)))
}

fn write_u32<W: Write>(writer: &mut W, n: u32) -> Result<()> {
    writer.write_all(&n.to_le_bytes())?;
    Ok(())
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => SprintError::Container("truncated file".to_string()),
        _ => SprintError::Io(e),
    })
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    read_exact(reader, &mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_names<R: Read>(reader: &mut R, n: usize) -> Result<Vec<String>> {
    let mut names = vec![];
    for _ in 0..n {
        names.push(read_name(reader)?);
    }
    Ok(names)
}

fn read_name<R: Read>(reader: &mut R) -> Result<String> {
    let len = read_u32(reader)? as usize;
    if len > MAX_NAME_LEN {
        return Err(SprintError::Container(format!("name of {} bytes", len)));
    }
    let mut buf = vec![0u8; len];
    read_exact(reader, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}
