//! Depinv CLI - mark common inventory items for depreciation
//!
//! # Main Command
//!
//! ```bash
//! depinv run Invcurrent.csv Invpast.xlsx -o Common_Items.csv
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! depinv parse Invcurrent.csv          # Just parse the export to JSON
//! ```

use clap::{Parser, Subcommand};
use depinv::{logs, parse_csv_file, parse_csv_file_auto, ConsoleEditor, RunOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "depinv")]
#[command(about = "Reconcile current and past inventory exports and mark common items for depreciation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full reconciliation: match current against past, export marked items
    Run {
        /// Current inventory export (delimited text)
        current: PathBuf,

        /// Past inventory export (xlsx)
        past: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "Common_Items.csv")]
        output: PathBuf,

        /// Suppress progress output (warnings and errors still print)
        #[arg(long)]
        quiet: bool,
    },

    /// Parse a delimited export and output its rows as JSON
    Parse {
        /// Input file
        input: PathBuf,

        /// Delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            current,
            past,
            output,
            quiet,
        } => cmd_run(current, past, output, quiet),

        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(&input, delimiter, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_run(
    current: PathBuf,
    past: PathBuf,
    output: PathBuf,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    logs::set_quiet(quiet);

    let options = RunOptions {
        current,
        past,
        output,
    };

    let summary = depinv::run(&options, &mut ConsoleEditor)?;

    eprintln!("\n📊 Comparison results:");
    eprintln!("   Active items in current export: {}", summary.current_rows);
    eprintln!("   Active items in past export: {}", summary.past_rows);
    eprintln!("   Common items found: {}", summary.matched);
    eprintln!("   Marked for depreciation: {}", summary.eligible);
    if !summary.verification_failures.is_empty() {
        eprintln!(
            "   ⚠️  Verification mismatches: {}",
            summary.verification_failures.len()
        );
    }

    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing export: {}", input.display());

    let result = match delimiter {
        Some(d) => parse_csv_file(input, d)?,
        None => parse_csv_file_auto(input)?,
    };

    eprintln!("   Encoding: {}", result.encoding);
    eprintln!(
        "   Delimiter: '{}'{}",
        match result.delimiter {
            '\t' => "\\t".to_string(),
            c => c.to_string(),
        },
        if delimiter.is_none() {
            " (auto-detected)"
        } else {
            ""
        }
    );
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} records", result.records.len());

    let json = serde_json::to_string_pretty(&result.records)?;
    write_output(&json, output)?;

    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
