use clap::Args;

use crate::cli::{print_text_summary, InputArgs, OutputFormat};
use crate::scan::{RegionReporter, WindowReport};

#[derive(Args)]
pub struct RegionsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Execute regions subcommand
///
/// # Errors
///
/// Returns an error if the inputs cannot be loaded or a chromosome cannot be
/// scanned.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RegionsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let inputs = args.input.load()?;

    if verbose {
        eprintln!(
            "Filled {} study positions from the panel ({} conflicting, {} unresolved)",
            inputs.reconciled.filled, inputs.reconciled.conflicting, inputs.reconciled.unresolved
        );
    }

    let reporter = RegionReporter::new(&inputs.reference, &inputs.gwas, inputs.config)?;
    let flank = inputs.config.flanking_width;

    match format {
        OutputFormat::Text => {
            print_text_summary(&inputs.summary);
            reporter.run(|r| print_text_report(&r, flank))?;
        }
        OutputFormat::Json => {
            let reports = reporter.collect_reports()?;
            let output = serde_json::json!({
                "summary": inputs.summary,
                "reconciliation": inputs.reconciled,
                "config": inputs.config,
                "windows": reports,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("chrom\tstart\tend\tref_snps\tgwas_snps\ttag_snps");
            reporter.run(|r| print_tsv_row(&r))?;
        }
    }

    Ok(())
}

/// One window in the classic layout: a heading then three right-aligned counts
pub(crate) fn print_text_report(report: &WindowReport, flank: i64) {
    println!();
    println!("chrm{}\t   {}-{}", report.chrom, report.start, report.end);
    println!("{:>8} # RefPanel SNPs in this window", report.ref_snps);
    println!(
        "{:>8} # GWAS     SNPs in this window (with {flank} flanking)",
        report.gwas_snps
    );
    println!("{:>8} # SNPs in both (i.e. useful as tags)", report.tag_snps);
}

fn print_tsv_row(report: &WindowReport) {
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        report.chrom, report.start, report.end, report.ref_snps, report.gwas_snps, report.tag_snps
    );
}
