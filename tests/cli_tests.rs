//! End-to-end tests of the `tag-scan` binary.

use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use noodles::bgzf;
use predicates::prelude::*;
use tempfile::TempDir;

const PANEL_VCF: &str = "##fileformat=VCFv4.2
##contig=<ID=1>
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\tS2
1\t260\trs3\tA\tC\t.\tPASS\t.\tGT\t0|1\t1|1
1\t100\trs1\tA\tG\t.\tPASS\t.\tGT\t0/0\t0/1
1\t250\trs2\tC\tT\t.\tPASS\t.\tGT\t1/1\t./.
2\t50\trs4\tG\tA\t.\tPASS\t.\tGT\t0/0\t0/0
";

const STUDY_TSV: &str = "SNP\tCHR\tBP\tZ
rs1\t1\t100\t2.1
rsA\t1\t205\t-0.3
rsB\t1\t400\t1.7
";

fn write_inputs(dir: &TempDir, study_name: &str, study: &str) -> (PathBuf, PathBuf) {
    let panel = dir.path().join("panel.vcf");
    std::fs::write(&panel, PANEL_VCF).unwrap();
    let gwas = dir.path().join(study_name);
    std::fs::write(&gwas, study).unwrap();
    (panel, gwas)
}

fn tag_scan(args: &[&str], panel: &Path, gwas: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tag-scan").unwrap();
    cmd.args(args).arg(panel).arg(gwas);
    cmd
}

#[test]
fn test_regions_text_report() {
    let dir = TempDir::new().unwrap();
    let (panel, gwas) = write_inputs(&dir, "study.tsv", STUDY_TSV);

    let expected_first = "chrm1\t   0-200
       1 # RefPanel SNPs in this window
       2 # GWAS     SNPs in this window (with 10 flanking)
       1 # SNPs in both (i.e. useful as tags)
";
    let expected_second = "chrm1\t   200-400
       2 # RefPanel SNPs in this window
       2 # GWAS     SNPs in this window (with 10 flanking)
       0 # SNPs in both (i.e. useful as tags)
";

    tag_scan(
        &["regions", "--window-width", "200", "--flanking-width", "10"],
        &panel,
        &gwas,
    )
    .assert()
    .success()
    .stdout(predicate::str::contains(expected_first))
    .stdout(predicate::str::contains(expected_second))
    .stdout(predicate::str::contains("chrm2\t   0-200"));
}

#[test]
fn test_regions_tsv() {
    let dir = TempDir::new().unwrap();
    let (panel, gwas) = write_inputs(&dir, "study.tsv", STUDY_TSV);

    tag_scan(
        &["regions", "-w", "200", "--flanking-width", "10", "--format", "tsv"],
        &panel,
        &gwas,
    )
    .assert()
    .success()
    .stdout(predicate::eq(
        "chrom\tstart\tend\tref_snps\tgwas_snps\ttag_snps
1\t0\t200\t1\t2\t1
1\t200\t400\t2\t2\t0
2\t0\t200\t1\t0\t0
",
    ));
}

#[test]
fn test_regions_json_fills_positions() {
    let dir = TempDir::new().unwrap();
    // rs2 has no position in the study; the panel places it at 1:250
    let study = "rsid,chr,pos\nrs1,1,100\nrs2,NA,NA\nnovel,,\n";
    let (panel, gwas) = write_inputs(&dir, "study.csv", study);

    let output = tag_scan(
        &["regions", "--window-width", "200", "--flanking-width", "10", "--format", "json"],
        &panel,
        &gwas,
    )
    .output()
    .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["gwas_snps"], 3);
    assert_eq!(json["summary"]["gwas_unknown_position"], 1);
    assert_eq!(json["reconciliation"]["filled"], 1);
    assert_eq!(json["windows"][1]["tag_snps"], 1);
}

#[test]
fn test_config_file_and_gzip_input() {
    let dir = TempDir::new().unwrap();
    let (_, gwas) = write_inputs(&dir, "study.tsv", STUDY_TSV);

    let panel = dir.path().join("panel.vcf.gz");
    let mut writer = bgzf::Writer::new(std::fs::File::create(&panel).unwrap());
    writer.write_all(PANEL_VCF.as_bytes()).unwrap();
    drop(writer);

    let config = dir.path().join("scan.json");
    std::fs::write(&config, r#"{"window_width": 200, "flanking_width": 10}"#).unwrap();

    tag_scan(
        &["regions", "--config", config.to_str().unwrap(), "--format", "tsv"],
        &panel,
        &gwas,
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("1\t0\t200\t1\t2\t1"));
}

#[test]
fn test_impute_text_reports_cache() {
    let dir = TempDir::new().unwrap();
    let (panel, gwas) = write_inputs(&dir, "study.tsv", STUDY_TSV);

    tag_scan(
        &["impute", "--window-width", "200", "--flanking-width", "10"],
        &panel,
        &gwas,
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("       1 x 2 tag genotype matrix"))
    .stdout(predicate::str::contains("genotype cache: 0 hits, 1 misses"));
}

#[test]
fn test_impute_json_lists_tags() {
    let dir = TempDir::new().unwrap();
    let (panel, gwas) = write_inputs(&dir, "study.tsv", STUDY_TSV);

    let output = tag_scan(
        &["impute", "-w", "200", "--flanking-width", "10", "-f", "json"],
        &panel,
        &gwas,
    )
    .output()
    .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["samples"], 2);
    assert_eq!(json["windows"][0]["tags"][0]["pos"], 100);
    assert_eq!(json["cache"]["misses"], 1);
}

#[test]
fn test_duplicate_positions_policy() {
    let dir = TempDir::new().unwrap();
    let duplicated = format!("{PANEL_VCF}1\t100\trs1b\tA\tT\t.\tPASS\t.\tGT\t0/0\t0/0\n");
    let (panel, gwas) = write_inputs(&dir, "study.tsv", STUDY_TSV);
    std::fs::write(&panel, duplicated).unwrap();

    tag_scan(&["regions"], &panel, &gwas)
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than one record at 1:100"));

    tag_scan(&["regions", "--duplicate-positions", "keep-first"], &panel, &gwas)
        .assert()
        .success();
}

#[test]
fn test_duplicate_identifier_is_fatal() {
    let dir = TempDir::new().unwrap();
    let duplicated = format!("{PANEL_VCF}2\t70\trs1\tA\tT\t.\tPASS\t.\tGT\t0/0\t0/0\n");
    let (panel, gwas) = write_inputs(&dir, "study.tsv", STUDY_TSV);
    std::fs::write(&panel, duplicated).unwrap();

    tag_scan(&["regions"], &panel, &gwas)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Identifier 'rs1' appears more than once"));
}

#[test]
fn test_invalid_window_width() {
    let dir = TempDir::new().unwrap();
    let (panel, gwas) = write_inputs(&dir, "study.tsv", STUDY_TSV);

    tag_scan(&["regions", "--window-width", "0"], &panel, &gwas)
        .assert()
        .failure()
        .stderr(predicate::str::contains("window_width must be positive"));
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let (_, gwas) = write_inputs(&dir, "study.tsv", STUDY_TSV);

    tag_scan(&["regions"], &dir.path().join("absent.vcf"), &gwas)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read reference panel"));
}
