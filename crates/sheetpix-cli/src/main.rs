//! Sheetpix CLI - pull cell values and embedded pictures out of XLSX files

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sheetpix::prelude::*;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetpix")]
#[command(
    author,
    version,
    about = "Extract cell values and embedded pictures from XLSX workbooks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all sheets in a workbook
    Sheets {
        /// Input workbook file
        input: PathBuf,
    },

    /// Show information about a workbook
    Info {
        /// Input workbook file
        input: PathBuf,
    },

    /// Read one row of a sheet, optionally probing blank cells for pictures
    Row {
        /// Input workbook file
        input: PathBuf,

        /// Row number (1-based)
        row: u32,

        /// Sheet index to read (0-based, default: 0)
        #[arg(short, long, default_value = "0")]
        sheet: usize,

        /// Probe blank cells for anchored pictures
        #[arg(short, long)]
        pictures: bool,

        /// Restrict picture probing to these column letters (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Print picture payloads as base64 text
        #[arg(short, long)]
        base64: bool,

        /// Emit the row as JSON (picture payloads are base64-encoded)
        #[arg(short, long)]
        json: bool,
    },

    /// Read a single cell by coordinate (e.g. E2)
    Cell {
        /// Input workbook file
        input: PathBuf,

        /// Cell coordinate, like E2
        coord: String,

        /// Sheet index to read (0-based, default: 0)
        #[arg(short, long, default_value = "0")]
        sheet: usize,

        /// Emit the cell as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Extract the picture anchored at a coordinate
    Image {
        /// Input workbook file
        input: PathBuf,

        /// Cell coordinate, like E2
        coord: String,

        /// Sheet index to read (0-based, default: 0)
        #[arg(short, long, default_value = "0")]
        sheet: usize,

        /// Save to this file (format from extension) instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print base64 text instead of raw PNG bytes
        #[arg(short, long)]
        base64: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sheets { input } => list_sheets(&input),
        Commands::Info { input } => show_info(&input),
        Commands::Row {
            input,
            row,
            sheet,
            pictures,
            columns,
            base64,
            json,
        } => read_row(&input, row, sheet, pictures, columns, base64, json),
        Commands::Cell {
            input,
            coord,
            sheet,
            json,
        } => read_cell(&input, &coord, sheet, json),
        Commands::Image {
            input,
            coord,
            sheet,
            output,
            base64,
        } => extract_image(&input, &coord, sheet, output.as_deref(), base64),
    }
}

fn open_workbook(input: &PathBuf) -> Result<PictureWorkbook> {
    PictureWorkbook::open(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn list_sheets(input: &PathBuf) -> Result<()> {
    let workbook = open_workbook(input)?;

    for (i, name) in workbook.sheet_names().iter().enumerate() {
        println!("{}\t{}", i, name);
    }

    Ok(())
}

fn show_info(input: &PathBuf) -> Result<()> {
    let workbook = open_workbook(input)?;

    println!("File: {}", input.display());
    println!("Sheets: {}", workbook.sheet_count());

    for (i, name) in workbook.sheet_names().iter().enumerate() {
        let pictures = SheetPictures::open(input, i)
            .with_context(|| format!("Failed to index pictures of sheet {}", i))?;

        println!();
        println!("  Sheet {}: \"{}\"", i, name);
        println!("    Pictures: {}", pictures.len());
        for addr in pictures.anchor_cells() {
            println!("      {}", addr);
        }
    }

    Ok(())
}

fn read_row(
    input: &PathBuf,
    row: u32,
    sheet: usize,
    pictures: bool,
    columns: Vec<String>,
    base64: bool,
    json: bool,
) -> Result<()> {
    let mut workbook = open_workbook(input)?;
    workbook
        .set_active_sheet_index(sheet)
        .with_context(|| format!("Sheet index {} not found", sheet))?;

    let options = RowOptions {
        read_pictures: pictures,
        // JSON output must stay text-safe
        base64: base64 || json,
        picture_columns: columns,
    };

    let contents = workbook
        .read_row(row, &options)
        .with_context(|| format!("Failed to read row {}", row))?;

    let Some(contents) = contents else {
        if json {
            println!("null");
        } else {
            eprintln!("Row {} is empty", row);
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string(&contents)?);
        return Ok(());
    }

    let rendered: Vec<String> = contents.iter().map(render_content).collect();
    println!("{}", rendered.join("\t"));
    Ok(())
}

fn read_cell(input: &PathBuf, coord: &str, sheet: usize, json: bool) -> Result<()> {
    let mut workbook = open_workbook(input)?;
    workbook
        .set_active_sheet_index(sheet)
        .with_context(|| format!("Sheet index {} not found", sheet))?;

    let content = workbook
        .read_cell(coord)
        .with_context(|| format!("Failed to read cell {}", coord))?;

    if json {
        println!("{}", serde_json::to_string(&content)?);
    } else {
        println!("{}", render_content(&content));
    }
    Ok(())
}

fn extract_image(
    input: &PathBuf,
    coord: &str,
    sheet: usize,
    output: Option<&std::path::Path>,
    base64: bool,
) -> Result<()> {
    if let Some(output_path) = output {
        let saved = PictureResolver::save_to(input, sheet, coord, output_path)
            .with_context(|| format!("Failed to extract picture at {}", coord))?;
        if saved {
            eprintln!("Wrote picture at {} to '{}'", coord, output_path.display());
        } else {
            anyhow::bail!("No picture anchored at {}", coord);
        }
        return Ok(());
    }

    if base64 {
        match PictureResolver::fetch_base64(input, sheet, coord)? {
            Some(b64) => println!("{}", b64),
            None => anyhow::bail!("No picture anchored at {}", coord),
        }
        return Ok(());
    }

    match PictureResolver::fetch(input, sheet, coord)? {
        Some(png) => io::stdout()
            .write_all(&png)
            .context("Failed to write to stdout")?,
        None => anyhow::bail!("No picture anchored at {}", coord),
    }
    Ok(())
}

/// Render cell content for plain-text output
fn render_content(content: &CellContent) -> String {
    match content {
        CellContent::Value(v) => cell_value_to_string(v),
        CellContent::Picture(PictureData::Base64(b64)) => b64.clone(),
        CellContent::Picture(PictureData::Png(bytes)) => {
            format!("<picture {} bytes>", bytes.len())
        }
        CellContent::NoPicture => String::new(),
    }
}

/// Convert a CellValue to display text, printing whole numbers without a
/// trailing ".0"
fn cell_value_to_string(value: &CellValue) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Number(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        CellValue::String(s) => s.to_string(),
        CellValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        CellValue::Error(e) => e.to_string(),
    }
}
