//! Command-line interface for tag-scan.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **regions**: List every non-empty window with its reference, study and tag counts
//! - **impute**: Walk the same windows and assemble each window's tag genotype matrix
//!
//! ## Usage
//!
//! ```text
//! # Per-window counts with the default 1 Mb windows and 250 kb flanks
//! tag-scan regions panel.vcf.gz sumstats.tsv
//!
//! # Narrower windows, JSON output for scripting
//! tag-scan regions panel.vcf.gz sumstats.tsv --window-width 500000 --format json
//!
//! # Assemble tag genotypes, tolerating repeated panel coordinates
//! tag-scan impute panel.vcf.gz sumstats.csv --duplicate-positions keep-first
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::panel::gwas::GwasDataset;
use crate::panel::reference::{DuplicatePolicy, ReferencePanel};
use crate::parsing::tsv::{delimiter_for, parse_gwas_file};
use crate::parsing::vcf::parse_vcf_file;
use crate::scan::reconcile::{reconcile, DatasetSummary, ReconcileSummary};
use crate::scan::ScanConfig;

pub mod impute;
pub mod regions;

#[derive(Parser)]
#[command(name = "tag-scan")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Find tag SNPs shared by a reference panel and GWAS summary statistics")]
#[command(
    long_about = "tag-scan walks each autosome in fixed-width windows and finds the SNPs present in both a reference panel (VCF) and a set of GWAS summary statistics.\n\nStudy SNPs without a position are placed using the panel's rsIDs. For each window it reports:\n- Reference SNPs inside the window\n- Study SNPs inside the window plus a flanking margin\n- SNPs in both, usable as tags for imputation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report reference, study and tag SNP counts per window
    Regions(regions::RegionsArgs),

    /// Assemble the tag genotype matrix of every window
    Impute(impute::ImputeArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Inputs and window geometry shared by every subcommand
#[derive(Args)]
pub struct InputArgs {
    /// Reference panel VCF (plain or bgzipped)
    #[arg(required = true)]
    pub ref_panel: PathBuf,

    /// GWAS summary statistics (TSV, or CSV by extension; plain or gzipped)
    #[arg(required = true)]
    pub gwas: PathBuf,

    /// Window width in base pairs [default: 1000000]
    #[arg(short = 'w', long)]
    pub window_width: Option<i64>,

    /// Flanking margin added to both sides of a window for the GWAS [default: 250000]
    #[arg(long)]
    pub flanking_width: Option<i64>,

    /// JSON file with `window_width` and/or `flanking_width`; flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// What to do when two reference records share a chromosome and position
    #[arg(long, value_enum, default_value = "reject")]
    pub duplicate_positions: DuplicatePolicy,
}

/// Parsed, reconciled inputs ready for scanning
pub struct LoadedInputs {
    pub reference: ReferencePanel,
    pub gwas: GwasDataset,
    pub config: ScanConfig,
    pub reconciled: ReconcileSummary,
    pub summary: DatasetSummary,
}

impl InputArgs {
    /// Resolve the scan config: defaults, then the config file, then flags
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the final widths
    /// are out of range.
    pub fn scan_config(&self) -> anyhow::Result<ScanConfig> {
        let base = match &self.config {
            Some(path) => ScanConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ScanConfig::default(),
        };
        let config = base.with_overrides(self.window_width, self.flanking_width);
        config.validate()?;
        Ok(config)
    }

    /// Parse both inputs and fill study positions from the panel
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be parsed or the panel repeats an
    /// identifier.
    pub fn load(&self) -> anyhow::Result<LoadedInputs> {
        let config = self.scan_config()?;

        let reference =
            parse_vcf_file(&self.ref_panel, self.duplicate_positions).with_context(|| {
                format!("Failed to read reference panel {}", self.ref_panel.display())
            })?;
        let mut gwas = parse_gwas_file(&self.gwas, delimiter_for(&self.gwas))
            .with_context(|| format!("Failed to read GWAS file {}", self.gwas.display()))?;

        let reconciled = reconcile(&reference, &mut gwas)?;
        let summary = DatasetSummary::collect(&reference, &gwas);

        info!(
            reference_snps = summary.reference_snps,
            gwas_snps = summary.gwas_snps,
            gwas_unknown_position = summary.gwas_unknown_position,
            window_width = config.window_width,
            flanking_width = config.flanking_width,
            "Loaded inputs"
        );

        Ok(LoadedInputs {
            reference,
            gwas,
            config,
            reconciled,
            summary,
        })
    }
}

/// Dataset counts printed ahead of the window reports
pub(crate) fn print_text_summary(summary: &DatasetSummary) {
    println!();
    println!("reference SNPs:                  {:>8}", summary.reference_snps);
    println!("GWAS SNPs:                       {:>8}", summary.gwas_snps);
    println!(
        "GWAS SNPs with unknown position: {:>8}",
        summary.gwas_unknown_position
    );
    println!();
}
