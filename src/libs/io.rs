use crate::libs::error::{Result, SprintError};
use crate::libs::hsp::{sorted_records, Hsp, HspRecord, HspSet};
use crate::libs::protein::ProteinSet;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::collections::HashSet;
use std::io::{BufRead, BufReader, BufWriter, Write};

lazy_static! {
    static ref PAIR_SEP: Regex = Regex::new(r"[\s,]+").unwrap();
}

/// ```
/// use std::io::BufRead;
/// let reader = sprint::reader("tests/sprint/pairs.txt").unwrap();
/// assert_eq!(reader.lines().count(), 3);
///
/// assert!(sprint::reader("tests/sprint/missing.txt").is_err());
/// ```
pub fn reader(input: &str) -> std::io::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path).map_err(|why| {
            std::io::Error::new(why.kind(), format!("could not open {}: {}", path.display(), why))
        })?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

pub fn writer(output: &str) -> std::io::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        Box::new(BufWriter::new(std::fs::File::create(output)?))
    };

    Ok(writer)
}

/// `(name, sequence)` records of a FASTA file, plain or gzipped
pub fn read_fasta(input: &str) -> Result<Vec<(String, Vec<u8>)>> {
    let mut fa_in = noodles_fasta::io::Reader::new(reader(input)?);

    let mut records = vec![];
    for result in fa_in.records() {
        let record = result?;
        let name = String::from_utf8(record.name().into())?;
        let seq = record.sequence().as_ref().to_vec();
        records.push((name, seq));
    }
    debug!("{} sequences read from {}", records.len(), input);

    Ok(records)
}

/// Proteins of a FASTA file
pub fn load_proteins(input: &str) -> Result<ProteinSet> {
    ProteinSet::new(&read_fasta(input)?)
}

/// HSP records of a text file, one per line.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn read_hsp_records<R: BufRead>(reader: R) -> Result<Vec<HspRecord>> {
    let mut records = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let record: HspRecord = trimmed
            .parse()
            .map_err(|reason: String| SprintError::parse(i + 1, trimmed, reason))?;
        records.push(record);
    }
    Ok(records)
}

/// HSPs of a text file resolved against a set; self pairs are dropped
pub fn read_hsps<R: BufRead>(reader: R, set: &ProteinSet) -> Result<HspSet> {
    let mut hsps = HspSet::default();
    for record in read_hsp_records(reader)? {
        if record.is_self_pair() {
            debug!("Self pair skipped: {}", record);
            continue;
        }
        hsps.insert(Hsp::from_record(&record, set)?);
    }
    Ok(hsps)
}

pub fn load_hsps(input: &str, set: &ProteinSet) -> Result<HspSet> {
    let hsps = read_hsps(reader(input)?, set)?;
    debug!("{} HSPs read from {}", hsps.len(), input);
    Ok(hsps)
}

/// Write HSPs sorted, so the same set always gives the same bytes
pub fn write_hsps<W: Write>(writer: &mut W, hsps: &HspSet, set: &ProteinSet) -> Result<()> {
    for record in sorted_records(hsps, set) {
        writeln!(writer, "{}", record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Training pairs, two names per line separated by blanks or a comma.
///
/// A pair appearing again, in either order, is kept once.
pub fn read_pairs<R: BufRead>(reader: R) -> Result<Vec<(String, String)>> {
    let mut seen = HashSet::new();
    let mut pairs = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = PAIR_SEP.split(trimmed).collect();
        if fields.len() != 2 {
            return Err(SprintError::parse(
                i + 1,
                trimmed,
                format!("expected 2 names, found {}", fields.len()),
            ));
        }

        let (a, b) = (fields[0].to_string(), fields[1].to_string());
        let key = if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        };
        if seen.insert(key) {
            pairs.push((a, b));
        }
    }
    Ok(pairs)
}

pub fn load_pairs(input: &str) -> Result<Vec<(String, String)>> {
    read_pairs(reader(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_pairs() {
        let text = "A B\nB,A\n\n# comment\nC\tD\nE , F\nA A\n";
        let pairs = read_pairs(Cursor::new(text)).unwrap();
        let names: Vec<(&str, &str)> = pairs.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        assert_eq!(names, vec![("A", "B"), ("C", "D"), ("E", "F"), ("A", "A")]);

        let err = read_pairs(Cursor::new("A B\nA B C\n")).unwrap_err();
        assert!(matches!(err, SprintError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_hsps_round_trip() {
        let set = ProteinSet::new(&[("B", "ACDEFGHIKLMNPQRSTVWY"), ("A", "ACDEFGHIKLMNPQRSTVWY")]).unwrap();
        let text = "# header\nB A 0 2 12\n\nA B 1 3 10\nA A 0 5 10\n";
        let hsps = read_hsps(Cursor::new(text), &set).unwrap();
        assert_eq!(hsps.len(), 2);

        let mut out = vec![];
        write_hsps(&mut out, &hsps, &set).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "A B 1 3 10\nA B 2 0 12\n");
    }

    #[test]
    fn test_bad_hsp_line() {
        let set = ProteinSet::new(&[("A", "ACDEFGHIKL"), ("B", "ACDEFGHIKL")]).unwrap();

        let err = read_hsps(Cursor::new("A B 0 0 5\nA B 0 x 5\n"), &set).unwrap_err();
        match err {
            SprintError::Parse { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, "A B 0 x 5");
            }
            other => panic!("unexpected {:?}", other),
        }

        let err = read_hsps(Cursor::new("A C 0 0 5\n"), &set).unwrap_err();
        assert!(matches!(err, SprintError::NotFound(name) if name == "C"));

        // positions near usize::MAX must not wrap past the bounds check
        for line in [format!("A B {} 0 1\n", usize::MAX), format!("A B 0 1 {}\n", usize::MAX)] {
            let err = read_hsps(Cursor::new(line), &set).unwrap_err();
            assert!(matches!(err, SprintError::OutOfBounds(_)));
        }
    }
}
