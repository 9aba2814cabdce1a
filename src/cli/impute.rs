use clap::Args;

use crate::cli::regions::print_text_report;
use crate::cli::{print_text_summary, InputArgs, OutputFormat};
use crate::scan::{ImputationDriver, TagBatch};

#[derive(Args)]
pub struct ImputeArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Execute impute subcommand
///
/// # Errors
///
/// Returns an error if the inputs cannot be loaded, a tag's genotypes cannot be
/// decoded, or JSON serialization fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ImputeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let inputs = args.input.load()?;
    let driver = ImputationDriver::new(&inputs.reference, &inputs.gwas, inputs.config)?;
    let flank = inputs.config.flanking_width;
    let n_samples = inputs.reference.samples().len();

    match format {
        OutputFormat::Text => {
            print_text_summary(&inputs.summary);
            let stats = driver.run(|batch| {
                print_text_report(&batch.report, flank);
                println!("{:>8} x {n_samples} tag genotype matrix", batch.tags.len());
            })?;
            println!();
            println!("genotype cache: {} hits, {} misses", stats.hits, stats.misses);
        }
        OutputFormat::Json => {
            let mut windows = Vec::new();
            let stats = driver.run(|batch| windows.push(batch_json(&batch, n_samples)))?;
            let output = serde_json::json!({
                "summary": inputs.summary,
                "reconciliation": inputs.reconciled,
                "config": inputs.config,
                "samples": n_samples,
                "windows": windows,
                "cache": stats,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("chrom\tstart\tend\ttag_chrom\ttag_pos\tmissing_calls");
            let stats = driver.run(|batch| print_tsv_rows(&batch))?;
            if verbose {
                eprintln!("genotype cache: {} hits, {} misses", stats.hits, stats.misses);
            }
        }
    }

    Ok(())
}

fn batch_json(batch: &TagBatch, n_samples: usize) -> serde_json::Value {
    serde_json::json!({
        "report": batch.report,
        "tags": batch.tags,
        "shape": [batch.tags.len(), n_samples],
    })
}

/// One row per tag, with the number of samples lacking a call
fn print_tsv_rows(batch: &TagBatch) {
    for (tag, row) in batch.tags.iter().zip(&batch.genotypes) {
        let missing = row.iter().filter(|&&g| g < 0).count();
        println!(
            "{}\t{}\t{}\t{}\t{}\t{missing}",
            batch.report.chrom, batch.report.start, batch.report.end, tag.chrom, tag.pos
        );
    }
}
