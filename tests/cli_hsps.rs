use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const HSPS: &str = "P1 P2 10 0 80\nP1 P6 30 0 65\nP2 P6 20 0 60\nP3 P4 0 0 60\n";

#[test]
fn command_extract_hsps() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("sprint")?;
    let output = cmd
        .arg("extract-hsps")
        .arg("tests/sprint/proteins.fa")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout, HSPS);

    Ok(())
}

#[test]
fn command_extract_hsps_gz() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("sprint")?;
    let output = cmd
        .arg("extract-hsps")
        .arg("tests/sprint/proteins.fa.gz")
        .arg("--workers")
        .arg("3")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout, HSPS);

    Ok(())
}

#[test]
fn command_extract_hsps_sharded() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let mut parts = vec![];

    for rank in 0..2 {
        let part = temp.path().join(format!("part{}.txt", rank));
        let mut cmd = Command::cargo_bin("sprint")?;
        cmd.arg("extract-hsps")
            .arg("tests/sprint/proteins.fa")
            .arg("--rank")
            .arg(rank.to_string())
            .arg("--world-size")
            .arg("2")
            .arg("-o")
            .arg(&part);
        cmd.assert().success();
        parts.push(part);
    }

    let mut cmd = Command::cargo_bin("sprint")?;
    let output = cmd.arg("merge-hsps").args(&parts).output()?;
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout, HSPS);

    Ok(())
}

#[test]
fn command_extract_hsps_invalid() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("sprint")?;
    cmd.arg("extract-hsps")
        .arg("tests/sprint/proteins.fa")
        .arg("-k")
        .arg("10");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("kmer_size"));

    let mut cmd = Command::cargo_bin("sprint")?;
    cmd.arg("extract-hsps").arg("tests/sprint/missing.fa");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("missing.fa"));

    let mut cmd = Command::cargo_bin("sprint")?;
    cmd.arg("extract-hsps")
        .arg("tests/sprint/proteins.fa")
        .arg("--rank")
        .arg("2")
        .arg("--world-size")
        .arg("2");
    cmd.assert().failure();

    Ok(())
}

#[test]
fn command_process_hsps() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("sprint")?;
    let output = cmd
        .arg("process-hsps")
        .arg("tests/sprint/proteins.fa")
        .arg("tests/sprint/hsps.txt")
        .output()?;
    assert_eq!(String::from_utf8(output.stdout)?, HSPS);

    // residues of P1, P2 and P6 start windows of two HSPs each
    let mut cmd = Command::cargo_bin("sprint")?;
    let output = cmd
        .arg("process-hsps")
        .arg("tests/sprint/proteins.fa")
        .arg("tests/sprint/hsps.txt")
        .arg("-c")
        .arg("1")
        .output()?;
    assert_eq!(String::from_utf8(output.stdout)?, "P3 P4 0 0 60\n");

    Ok(())
}

#[test]
fn command_process_hsps_bad_line() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("sprint")?;
    cmd.arg("process-hsps")
        .arg("tests/sprint/proteins.fa")
        .arg("tests/sprint/bad_hsps.txt");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));

    Ok(())
}

#[test]
fn command_peptide_hsps() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("sprint")?;
    let output = cmd
        .arg("peptide-hsps")
        .arg("tests/sprint/proteins.fa")
        .arg("tests/sprint/peptides.fa")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout, "P3 pep1 5 0 40\nP4 pep1 5 0 40\n");

    Ok(())
}

#[test]
fn command_merge_hsps() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let a = temp.path().join("a.txt");
    let b = temp.path().join("b.txt");

    fs::write(&a, "P2 P1 0 10 80\n# comment\nP3 P4 0 0 60\n")?;
    fs::write(&b, "P1 P2 10 0 80\nP1 P1 0 5 20\n\nP1 P6 30 0 65\n")?;

    let mut cmd = Command::cargo_bin("sprint")?;
    let output = cmd.arg("merge-hsps").arg(&a).arg(&b).output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout, "P1 P2 10 0 80\nP1 P6 30 0 65\nP3 P4 0 0 60\n");

    Ok(())
}
