mod catalog;
mod config;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

#[cfg(test)]
#[path = "../tests/src_inline/fixtures.rs"]
mod fixtures;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::catalog::Catalog;
use crate::config::Settings;
use crate::input::{list_categories, load_catalog};
use crate::model::account::AccountType;
use crate::model::request::SelectionRequest;
use crate::pipeline::stage1_order::{SampleCountChoice, SnapDirection, sample_count_options};
use crate::pipeline::stage4_quote::assemble_quote;
use crate::report::merge::merge_summaries_to_file;
use crate::report::{QuoteHeader, write_reports};

#[derive(Debug, Parser)]
#[command(
    name = "labquote",
    version,
    about = "Price quotes for genomic panel orders from a tabular price catalog."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON settings file (catalog_dir, prepared_by, out_dir, default_category)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Price a panel selection and write the quote reports
    Quote(QuoteArgs),
    /// Show whether a sample count fits the panels' batch sizes
    Options(OptionsArgs),
    /// List the panels of a category, or the categories of a catalog
    Panels(CatalogArgs),
    /// Concatenate exported quote summaries into one CSV
    Merge(MergeArgs),
}

#[derive(Debug, Args)]
struct CatalogArgs {
    /// Catalog directory holding categories.csv and pricing_rules.csv
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[arg(long)]
    category: Option<String>,
}

#[derive(Debug, Args)]
struct OptionsArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    #[arg(long = "panel", required = true)]
    panels: Vec<String>,

    #[arg(long)]
    samples: u32,
}

#[derive(Debug, Args)]
struct QuoteArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    #[arg(long = "panel", required = true)]
    panels: Vec<String>,

    #[arg(long)]
    samples: u32,

    #[arg(long, value_enum)]
    account: AccountType,

    /// Direction to move a sample count that is not a batch multiple
    #[arg(long, value_enum)]
    snap: Option<SnapDirection>,

    #[arg(long)]
    prepared_by: Option<String>,

    #[arg(long, default_value = "")]
    prepared_for: String,

    #[arg(long, default_value = "")]
    notes: String,

    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct MergeArgs {
    #[arg(long)]
    out: PathBuf,

    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let settings = Settings::load_optional(cli.config.as_deref()).map_err(|e| e.to_string())?;
    match cli.command {
        Command::Quote(args) => run_quote(&settings, args),
        Command::Options(args) => run_options(&settings, args),
        Command::Panels(args) => run_panels(&settings, args),
        Command::Merge(args) => run_merge(args),
    }
}

fn open_catalog(settings: &Settings, args: &CatalogArgs) -> Result<Catalog, String> {
    let dir = settings.catalog_dir(args.catalog.as_deref());
    let category = settings
        .category(args.category.as_deref())
        .ok_or_else(|| "missing --category (no default_category in settings)".to_string())?;
    load_catalog(&dir, &category).map_err(|e| e.to_string())
}

fn run_quote(settings: &Settings, args: QuoteArgs) -> Result<(), String> {
    let catalog = open_catalog(settings, &args.catalog)?;
    let request = SelectionRequest::new(&args.panels, args.samples, args.account)
        .apply_full_set(&catalog);
    request.validate(&catalog).map_err(|e| e.to_string())?;

    let request = snap_request(&catalog, request, args.snap)?;

    let quote = assemble_quote(&catalog, &request).map_err(|e| e.to_string())?;
    if quote.is_empty() {
        tracing::warn!("quote has no priced products or kits");
    }
    let header = QuoteHeader {
        date: chrono::Local::now().date_naive(),
        prepared_by: settings.prepared_by(args.prepared_by.as_deref()),
        prepared_for: args.prepared_for,
        category: catalog.category().name.clone(),
        notes: args.notes,
    };
    let out_dir = settings.out_dir(args.out.as_deref());
    let paths = write_reports(&header, &quote, &out_dir).map_err(|e| e.to_string())?;

    print!("{}", report::text::render_quote_text(&header, &quote));
    println!();
    println!("Wrote {}", paths.csv.display());
    println!("Wrote {}", paths.json.display());
    println!("Wrote {}", paths.text.display());
    Ok(())
}

/// Moves the sample count onto a batch multiple when needed and checks
/// the request again at its final size.
fn snap_request(
    catalog: &Catalog,
    request: SelectionRequest,
    snap: Option<SnapDirection>,
) -> Result<SelectionRequest, String> {
    let choice = sample_count_options(catalog, &request.selected_panels, request.sample_count);
    let sample_count = choose_sample_count(choice, snap)?;
    if sample_count == request.sample_count {
        return Ok(request);
    }
    tracing::info!(
        requested = request.sample_count,
        used = sample_count,
        "sample count snapped to batch multiple"
    );
    let snapped = request.with_sample_count(sample_count);
    snapped.validate(catalog).map_err(|e| e.to_string())?;
    Ok(snapped)
}

fn choose_sample_count(
    choice: SampleCountChoice,
    snap: Option<SnapDirection>,
) -> Result<u32, String> {
    choice.pick(snap).ok_or_else(|| match choice {
        SampleCountChoice::Snap {
            smaller: Some(smaller),
            larger,
        } => format!(
            "sample count is not a multiple of every batch size; pass --snap smaller ({smaller}) or --snap larger ({larger})"
        ),
        SampleCountChoice::Snap {
            smaller: None,
            larger,
        } => format!("sample count is below every batch size; pass --snap larger ({larger})"),
        SampleCountChoice::Exact { sample_count } => {
            format!("cannot use sample count {sample_count}")
        }
    })
}

fn run_options(settings: &Settings, args: OptionsArgs) -> Result<(), String> {
    let catalog = open_catalog(settings, &args.catalog)?;
    let request = SelectionRequest::new(&args.panels, args.samples, AccountType::Internal)
        .apply_full_set(&catalog);
    match sample_count_options(&catalog, &request.selected_panels, request.sample_count) {
        SampleCountChoice::Exact { sample_count } => {
            println!("{sample_count} samples fit every selected panel's batch size");
        }
        SampleCountChoice::Snap { smaller, larger } => {
            println!("{} samples is not a batch multiple", request.sample_count);
            if let Some(smaller) = smaller {
                println!("  smaller: {smaller}");
            }
            println!("  larger:  {larger}");
        }
    }
    Ok(())
}

fn run_panels(settings: &Settings, args: CatalogArgs) -> Result<(), String> {
    if settings.category(args.category.as_deref()).is_none() {
        let dir = settings.catalog_dir(args.catalog.as_deref());
        let categories = list_categories(&dir).map_err(|e| e.to_string())?;
        println!("Categories");
        for c in categories {
            println!("  {}", c.name);
        }
        return Ok(());
    }

    let catalog = open_catalog(settings, &args)?;
    println!("Combinable panels");
    for p in catalog.combinable_panels() {
        println!("  {}{}", p.panel_name, batch_note(p.batch_size));
    }
    println!("Standalone panels");
    for p in catalog.standalone_panels() {
        println!("  {}{}", p.panel_name, batch_note(p.batch_size));
    }
    Ok(())
}

fn batch_note(batch_size: Option<u32>) -> String {
    match batch_size {
        Some(b) => format!(" (batch {b})"),
        None => " (no batch size)".to_string(),
    }
}

fn run_merge(args: MergeArgs) -> Result<(), String> {
    let outcome = merge_summaries_to_file(&args.inputs, &args.out).map_err(|e| e.to_string())?;
    println!(
        "Merged {} rows from {} files into {}",
        outcome.rows,
        outcome.files_merged,
        args.out.display()
    );
    for (path, err) in &outcome.failed {
        eprintln!("skipped {}: {err}", path.display());
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
