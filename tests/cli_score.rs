use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn score_to(dir: &Path, name: &str, extra: &[&str]) -> anyhow::Result<PathBuf> {
    let outfile = dir.join(name);
    let mut cmd = Command::cargo_bin("sprint")?;
    cmd.arg("score")
        .arg("tests/sprint/proteins.fa")
        .arg("tests/sprint/hsps.txt")
        .arg("tests/sprint/pairs.txt")
        .args(extra)
        .arg("-o")
        .arg(&outfile);
    cmd.assert().success();
    Ok(outfile)
}

fn query(pred: &Path, extra: &[&str]) -> anyhow::Result<String> {
    let mut cmd = Command::cargo_bin("sprint")?;
    let output = cmd.arg("query").arg(pred).args(extra).output()?;
    assert!(output.status.success());
    Ok(String::from_utf8(output.stdout)?)
}

#[test]
fn command_score() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let pred = score_to(temp.path(), "pred.bin", &[])?;

    // P1-P3 is a training pair, P2 resembles P1 and P4 resembles P3
    let p2_p4: f32 = query(&pred, &["--pair", "P2", "P4"])?.trim().parse()?;
    let p4_p2: f32 = query(&pred, &["--pair", "P4", "P2"])?.trim().parse()?;
    let p6_p4: f32 = query(&pred, &["--pair", "P6", "P4"])?.trim().parse()?;
    approx::assert_relative_eq!(p2_p4, 116.998_96, max_relative = 1e-5);
    approx::assert_relative_eq!(p2_p4, p4_p2, max_relative = 1e-6);
    approx::assert_relative_eq!(p6_p4, 108.593_33, max_relative = 1e-5);

    // no HSP chain links the training pair itself
    assert_eq!(query(&pred, &["--pair", "P1", "P3"])?, "0\n");

    // P5 shares nothing with anyone
    assert_eq!(query(&pred, &["--pair", "P2", "P5"])?, "0\n");
    assert_eq!(
        query(&pred, &["--name", "P5", "--format", "array"])?,
        "0\t0\t0\t0\t0\t0\n"
    );

    let dict = query(&pred, &["--name", "P2"])?;
    assert_eq!(dict.lines().count(), 6);
    assert!(dict.starts_with("P1\t0\nP2\t0\nP3\t"));

    Ok(())
}

#[test]
fn command_score_self() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let pred = score_to(temp.path(), "pred.bin", &["--self"])?;

    let p1_p3: f32 = query(&pred, &["--pair", "P1", "P3"])?.trim().parse()?;
    let p2_p4: f32 = query(&pred, &["--pair", "P2", "P4"])?.trim().parse()?;
    approx::assert_relative_eq!(p1_p3, 130.578_18, max_relative = 1e-5);
    approx::assert_relative_eq!(p2_p4, 116.998_96, max_relative = 1e-5);
    assert!(p1_p3 > p2_p4);
    assert_eq!(query(&pred, &["--pair", "P2", "P5"])?, "0\n");

    Ok(())
}

#[test]
fn command_score_no_hsps() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let empty = temp.path().join("empty.txt");
    std::fs::write(&empty, "")?;
    let pred = temp.path().join("pred.bin");

    let mut cmd = Command::cargo_bin("sprint")?;
    cmd.arg("score")
        .arg("tests/sprint/proteins.fa")
        .arg(&empty)
        .arg("tests/sprint/pairs.txt")
        .arg("-o")
        .arg(&pred);
    cmd.assert().success();

    let tsv = query(&pred, &["--tsv"])?;
    assert_eq!(tsv.lines().count(), 36);
    assert!(tsv.lines().all(|line| line.ends_with("\t0")));

    Ok(())
}

#[test]
fn command_score_gz() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let plain = score_to(temp.path(), "pred.bin", &[])?;
    let gz = score_to(temp.path(), "pred.bin.gz", &[])?;

    assert_eq!(query(&plain, &["--tsv"])?, query(&gz, &["--tsv"])?);
    assert_eq!(query(&plain, &["--tsv"])?.lines().count(), 36);

    Ok(())
}

#[test]
fn command_score_sharded() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let full = score_to(temp.path(), "full.bin", &[])?;
    let workers = score_to(temp.path(), "workers.bin", &["--workers", "4"])?;

    let mut blocks = vec![];
    for rank in 0..3 {
        let rank = rank.to_string();
        blocks.push(score_to(
            temp.path(),
            &format!("block{}.bin", rank),
            &["--rank", rank.as_str(), "--world-size", "3"],
        )?);
    }

    // a block alone is not the full matrix
    let mut cmd = Command::cargo_bin("sprint")?;
    cmd.arg("merge-scores")
        .arg(&blocks[0])
        .arg(&blocks[2])
        .arg("-o")
        .arg(temp.path().join("partial.bin"));
    cmd.assert().failure();

    let merged = temp.path().join("merged.bin");
    let mut cmd = Command::cargo_bin("sprint")?;
    cmd.arg("merge-scores")
        .arg(&blocks[2])
        .arg(&blocks[0])
        .arg(&blocks[1])
        .arg("-o")
        .arg(&merged);
    cmd.assert().success();

    let expected = query(&full, &["--tsv"])?;
    assert_eq!(query(&merged, &["--tsv"])?, expected);
    assert_eq!(query(&workers, &["--tsv"])?, expected);

    Ok(())
}

#[test]
fn command_query_errors() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let pred = score_to(temp.path(), "pred.bin", &[])?;

    let mut cmd = Command::cargo_bin("sprint")?;
    cmd.arg("query").arg(&pred).arg("--pair").arg("P1").arg("P9");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("P9"));

    let mut cmd = Command::cargo_bin("sprint")?;
    cmd.arg("query")
        .arg(&pred)
        .arg("--name")
        .arg("P1")
        .arg("--format")
        .arg("list");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("`dict`").and(predicate::str::contains("`array`")));

    let mut cmd = Command::cargo_bin("sprint")?;
    cmd.arg("query").arg("tests/sprint/pairs.txt").arg("--tsv");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("prediction file"));

    Ok(())
}

#[test]
fn command_score_peptides() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let pred = temp.path().join("pred.bin");

    let mut cmd = Command::cargo_bin("sprint")?;
    cmd.arg("score-peptides")
        .arg("tests/sprint/proteins.fa")
        .arg("tests/sprint/peptides.fa")
        .arg("tests/sprint/hsps.txt")
        .arg("tests/sprint/pairs.txt")
        .arg("--self")
        .arg("-o")
        .arg(&pred);
    cmd.assert().success();

    let pep1: f32 = query(&pred, &["--pair", "pep1", "P1"])?.trim().parse()?;
    approx::assert_relative_eq!(pep1, 96.792_75, max_relative = 1e-5);
    assert_eq!(query(&pred, &["--pair", "pep2", "P1"])?, "0\n");

    // peptides are rows only
    let mut cmd = Command::cargo_bin("sprint")?;
    cmd.arg("query").arg(&pred).arg("--pair").arg("P1").arg("pep1");
    cmd.assert().failure();

    let tsv = query(&pred, &["--tsv"])?;
    assert_eq!(tsv.lines().count(), 8 * 6);

    Ok(())
}

#[test]
fn command_sites() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("sprint")?;
    let output = cmd
        .arg("sites")
        .arg("tests/sprint/proteins.fa")
        .arg("tests/sprint/peptides.fa")
        .arg("tests/sprint/hsps.txt")
        .arg("tests/sprint/pairs.txt")
        .arg("--target")
        .arg("P1")
        .arg("--self")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("peptide,target_position,contribution"));
    // P1 has 100 residues, two peptides
    assert_eq!(stdout.lines().count(), 1 + 2 * 100);

    let mut total = 0f32;
    for line in lines {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 3);
        let value: f32 = fields[2].parse()?;
        if fields[0] == "pep1" {
            assert!(value > 0.0);
            total += value;
        } else {
            assert_eq!(value, 0.0);
        }
    }
    approx::assert_relative_eq!(total, 96.792_75, max_relative = 1e-4);
    assert!(stdout.contains("\npep1,1,"));
    assert!(stdout.contains("\npep2,100,0\n"));

    let mut cmd = Command::cargo_bin("sprint")?;
    cmd.arg("sites")
        .arg("tests/sprint/proteins.fa")
        .arg("tests/sprint/peptides.fa")
        .arg("tests/sprint/hsps.txt")
        .arg("tests/sprint/pairs.txt")
        .arg("--target")
        .arg("P9");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("P9"));

    Ok(())
}
