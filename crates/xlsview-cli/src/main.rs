//! xlsview CLI - inspect and export legacy Excel workbooks

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use xlsview::{SheetVisibility, Workbook, Worksheet};

#[derive(Parser)]
#[command(name = "xlsview")]
#[command(author, version, about = "Inspect and export legacy Excel (.xls) workbooks")]
struct Cli {
    /// Increase engine diagnostics (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Target charset for decoded text
    #[arg(long, default_value = xlsview::DEFAULT_CHARSET, global = true)]
    charset: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a worksheet as CSV to stdout or a file
    #[command(alias = "csv")]
    ToCsv {
        /// Input .xls file
        input: PathBuf,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sheet index to export (0-based)
        #[arg(short, long, default_value = "0")]
        sheet: usize,

        /// Field delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Show workbook globals and per-sheet dimensions
    Info {
        /// Input .xls file
        input: PathBuf,
    },

    /// List the sheet directory
    Sheets {
        /// Input .xls file
        input: PathBuf,
    },

    /// Print document summary properties
    Summary {
        /// Input .xls file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::ToCsv {
            input,
            output,
            sheet,
            delimiter,
        } => to_csv(&input, &cli.charset, output.as_deref(), sheet, delimiter),
        Commands::Info { input } => show_info(&input, &cli.charset),
        Commands::Sheets { input } => list_sheets(&input, &cli.charset),
        Commands::Summary { input } => show_summary(&input, &cli.charset),
    }
}

fn init_logging(verbose: u8) {
    xlsview::set_debug_level(i32::from(verbose));
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Also installs the `log` bridge, so library diagnostics reach stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn open(input: &Path, charset: &str) -> Result<Workbook> {
    Workbook::open_with_charset(input, charset)
        .with_context(|| format!("Failed to open '{}'", input.display()))
}

fn to_csv(
    input: &Path,
    charset: &str,
    output: Option<&Path>,
    sheet: usize,
    delimiter: char,
) -> Result<()> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got {delimiter:?}");
    }
    let workbook = open(input, charset)?;
    if sheet >= workbook.sheet_count() {
        bail!(
            "Sheet index {sheet} not found ({} sheets)",
            workbook.sheet_count()
        );
    }

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create '{}'", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let rows = workbook.try_with_worksheet(sheet, |ws| write_csv(ws, writer, delimiter as u8))?;
    if let Some(path) = output {
        eprintln!("Wrote {rows} rows to '{}'", path.display());
    }
    Ok(())
}

/// Write every row of `ws`, one field per column. Returns the row count.
fn write_csv<W: Write>(ws: &Worksheet<'_>, writer: W, delimiter: u8) -> Result<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    let mut record = Vec::with_capacity(ws.column_count());
    ws.for_each_row(|row| {
        record.clear();
        record.extend(row.cells().iter().map(|cell| cell.value().to_string()));
        csv_writer.write_record(&record)
    })
    .context("Failed to write CSV")?;

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(ws.row_count())
}

fn show_info(input: &Path, charset: &str) -> Result<()> {
    let workbook = open(input, charset)?;

    println!("File: {}", input.display());
    println!(
        "Format: {}",
        if workbook.is_legacy_format() { "BIFF5" } else { "BIFF8" }
    );
    println!("Codepage: {}", workbook.codepage());
    println!(
        "Date system: {}",
        if workbook.uses_1904_date_system() { "1904" } else { "1900" }
    );
    println!("Fonts: {}", workbook.fonts().len());
    println!("Number formats: {}", workbook.number_formats().len());
    println!("Extended formats: {}", workbook.extended_formats().len());
    println!("Active sheet: {}", workbook.active_sheet_index());
    println!("Sheets: {}", workbook.sheet_count());

    for (i, info) in workbook.sheets().iter().enumerate() {
        println!();
        println!("  Sheet {}: \"{}\"", i, info.name);
        match workbook.with_worksheet(i, |ws| (ws.row_count(), ws.column_count())) {
            Ok((0, _)) => println!("    Used range: empty"),
            Ok((rows, cols)) => println!("    Used range: {rows} rows x {cols} columns"),
            Err(err) => {
                log::warn!("sheet {i} could not be parsed: {err}");
                println!("    Used range: unreadable ({err})");
            }
        }
    }

    Ok(())
}

fn list_sheets(input: &Path, charset: &str) -> Result<()> {
    let workbook = open(input, charset)?;

    for (i, info) in workbook.sheets().iter().enumerate() {
        let state = match info.visibility {
            SheetVisibility::Visible => "",
            SheetVisibility::Hidden => "\t(hidden)",
            SheetVisibility::VeryHidden => "\t(very hidden)",
        };
        println!("{}\t{}{}", i, info.name, state);
    }

    Ok(())
}

fn show_summary(input: &Path, charset: &str) -> Result<()> {
    let workbook = open(input, charset)?;
    let Some(summary) = workbook
        .summary_info()
        .context("Failed to read summary information")?
    else {
        println!("No summary information");
        return Ok(());
    };

    let fields = [
        ("Title", &summary.title),
        ("Subject", &summary.subject),
        ("Author", &summary.author),
        ("Keywords", &summary.keywords),
        ("Comment", &summary.comment),
        ("Last author", &summary.last_author),
        ("Application", &summary.app_name),
        ("Category", &summary.category),
        ("Manager", &summary.manager),
        ("Company", &summary.company),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("{label}: {value}");
        }
    }

    Ok(())
}
