//! DD1750 packing list CLI tool
//!
//! Merges the items copy and the admin copy of a packing list into one
//! printable PDF.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::process;

use dd1750_merge::extract::{extract_admin, extract_items, DEFAULT_ITEM_CAP};
use dd1750_merge::layout::ITEMS_PER_PAGE;
use dd1750_merge::{merge_documents_with, AdminField, ExtractOptions, MergeOptions};

/// DD1750 - Merge the items and admin copies of a packing list
#[derive(Parser)]
#[command(name = "dd1750")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Merge the two copies
    dd1750 merge --items items.pdf --admin admin.pdf -o packing-list.pdf

    # Merge and open the result
    dd1750 merge --items items.pdf --admin admin.pdf -o packing-list.pdf --open

    # Show what would be read from a document
    dd1750 inspect items.pdf")]
struct Cli {
    /// Increase log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge an items PDF and an admin PDF into one packing list
    Merge {
        /// PDF holding the line items
        #[arg(long)]
        items: PathBuf,

        /// PDF holding the shipment metadata
        #[arg(long)]
        admin: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Item rows per page
        #[arg(long, default_value_t = ITEMS_PER_PAGE)]
        page_capacity: usize,

        /// Maximum number of items read from the items PDF
        #[arg(long, default_value_t = DEFAULT_ITEM_CAP)]
        item_cap: usize,

        /// Open the output file after creation
        #[arg(long)]
        open: bool,
    },

    /// Show the admin fields and items read from a PDF
    Inspect {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Merge {
            items,
            admin,
            output,
            page_capacity,
            item_cap,
            open,
        } => cmd_merge(&items, &admin, &output, page_capacity, item_cap, open),
        Commands::Inspect { input } => cmd_inspect(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Open a file with the system default application
fn open_file(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()?;
    }
    Ok(())
}

/// Keep the full diagnostic in the log and show the short message
fn user_error(e: dd1750_merge::Error) -> anyhow::Error {
    log::debug!("{:?}", e);
    anyhow::anyhow!(e.user_message())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Merge the two copies; nothing is written unless the merge succeeds
fn cmd_merge(
    items: &Path,
    admin: &Path,
    output: &Path,
    page_capacity: usize,
    item_cap: usize,
    open: bool,
) -> Result<()> {
    let items_bytes = read_input(items)?;
    let admin_bytes = read_input(admin)?;

    let options = MergeOptions {
        page_capacity,
        extract: ExtractOptions {
            item_cap,
            ..ExtractOptions::default()
        },
    };

    eprintln!("Merging {} with {}...", items.display(), admin.display());

    let merged =
        merge_documents_with(&items_bytes, &admin_bytes, &options).map_err(user_error)?;

    std::fs::write(output, merged)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    eprintln!("Merged to: {}", output.display());

    if open {
        open_file(output)?;
    }

    Ok(())
}

/// Print what the extractors read from one document
fn cmd_inspect(input: &Path) -> Result<()> {
    let bytes = read_input(input)?;
    let options = ExtractOptions::default();

    let admin = extract_admin(&bytes, &options);
    let items = extract_items(&bytes, &options).map_err(user_error)?;

    println!("File: {}", input.display());
    for field in AdminField::ALL {
        println!("{:<18}{}", field.label(), admin.get(field).unwrap_or("-"));
    }

    println!("Items: {}", items.len());
    for item in &items {
        println!(
            "  {:>4}  {:<18} {:<40} {:<4} {:>5} {:>5}",
            item.box_no, item.stock_number, item.nomenclature, item.unit_issue, item.qty_init, item.qty_run
        );
    }

    Ok(())
}
