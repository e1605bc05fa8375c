//! invoice-forge – command-line invoice JSON → PDF converter.
//!
//! Usage:
//!   invoice-forge <invoice.json> [output.pdf] --font <rupee.ttf>
//!   invoice-forge --sample [output.pdf] --font <rupee.ttf>
//!
//! The input JSON holds the validated record: `{"header": {...},
//! "items": [...]}`. If `output.pdf` is omitted the PDF is written next to
//! the input file with the same stem (e.g. `inv-42.json` → `inv-42.pdf`).

use std::{env, fs, path::PathBuf, process};

use serde::Deserialize;

use invoice_forge::pipeline::generate_invoice_document;
use invoice_forge::{FontStore, InvoiceHeader, InvoiceLineItem};

/// The on-disk input format: one validated invoice record.
#[derive(Debug, Deserialize)]
struct InvoiceInput {
    header: InvoiceHeader,
    items: Vec<InvoiceLineItem>,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut font_path: Option<PathBuf> = None;
    let mut use_sample = false;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1).peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--sample" | "-s" => use_sample = true,
            "--font" | "-f" => match iter.next() {
                Some(v) => font_path = Some(PathBuf::from(v)),
                None => {
                    eprintln!("--font requires a path to a TTF file");
                    process::exit(1);
                }
            },
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    let font_path = match font_path {
        Some(p) => p,
        None => {
            eprintln!("Error: no --font specified (a TTF carrying the rupee glyph is required).");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let fonts = match FontStore::load(&font_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error loading font '{}': {e}", font_path.display());
            process::exit(1);
        }
    };

    let (header, items, default_output) = if use_sample {
        // --sample ignores the input path; output may still be given as the
        // first positional argument.
        let (header, items) = invoice_forge::samples::intra_state_invoice();
        let output = output_path.or(input_path);
        (header, items, output.unwrap_or_else(|| PathBuf::from("sample_invoice.pdf")))
    } else {
        let input = match input_path {
            Some(p) => p,
            None => {
                eprintln!("Error: no input file specified.");
                print_usage(&args[0]);
                process::exit(1);
            }
        };

        let json = match fs::read_to_string(&input) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading '{}': {e}", input.display());
                process::exit(1);
            }
        };

        let record: InvoiceInput = match serde_json::from_str(&json) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error parsing '{}': {e}", input.display());
                process::exit(1);
            }
        };

        // Default output: same directory + same stem as input, but with .pdf
        let output = output_path.unwrap_or_else(|| {
            let mut o = input.clone();
            o.set_extension("pdf");
            o
        });
        (record.header, record.items, output)
    };

    match generate_invoice_document(&header, &items, &fonts) {
        Ok(bytes) => {
            if let Some(parent) = default_output.parent() {
                if !parent.as_os_str().is_empty() {
                    if let Err(e) = fs::create_dir_all(parent) {
                        eprintln!("Error creating output directory: {e}");
                        process::exit(1);
                    }
                }
            }
            if let Err(e) = fs::write(&default_output, &bytes) {
                eprintln!("Error writing '{}': {e}", default_output.display());
                process::exit(1);
            }
            eprintln!(
                "Wrote '{}' ({} bytes, invoice {})",
                default_output.display(),
                bytes.len(),
                header.invoice_number
            );
        }
        Err(e) => {
            eprintln!("Error generating invoice PDF: {e}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("invoice-forge – GST tax-invoice PDF generator");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <invoice.json> [output.pdf] --font <rupee.ttf>");
    eprintln!("  {prog} --sample [output.pdf] --font <rupee.ttf>");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <invoice.json>  Validated invoice record: {{\"header\": ..., \"items\": [...]}}");
    eprintln!("  [output.pdf]    Output path (default: same stem as input with .pdf)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --font, -f      TTF file carrying the rupee glyph (required)");
    eprintln!("  --sample, -s    Render the built-in sample invoice instead of reading JSON");
    eprintln!("  --help          Print this message");
}
