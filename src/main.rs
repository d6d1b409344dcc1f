//! cadop CLI - Convert and serve the ANS operators registry
//!
//! # Main Commands
//!
//! ```bash
//! cadop convert Relatorio_cadop.csv    # Convert CSV export to JSON
//! cadop serve                          # Start HTTP server (port 3000)
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! cadop validate Relatorio_cadop.json  # Validate a converted file
//! cadop query data.json --uf SP        # Run a filter without the server
//! ```

use clap::{Parser, Subcommand};
use cadop::{convert_csv_file, query, validate_dataset, write_json, OperatorStore, SearchCriteria};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cadop")]
#[command(about = "Convert and serve the ANS registered operators registry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a registry CSV export to a JSON data file
    Convert {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a converted JSON file against the dataset schema
    Validate {
        /// Input JSON file (array of records)
        input: PathBuf,
    },

    /// Run a filter against a converted file without starting the server
    Query {
        /// Input JSON file (array of records)
        input: PathBuf,

        /// ANS registration code (trim-only, case-sensitive)
        #[arg(long)]
        registro: Option<String>,

        /// Tax ID (trim-only, case-sensitive)
        #[arg(long)]
        cnpj: Option<String>,

        /// City name (case-insensitive)
        #[arg(long)]
        cidade: Option<String>,

        /// State code (case-insensitive)
        #[arg(long)]
        uf: Option<String>,

        /// Operator category (case-insensitive)
        #[arg(long)]
        modalidade: Option<String>,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Data file to serve (default: CADOP_DATA env, then Relatorio_cadop.json)
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            delimiter,
            output,
        } => cmd_convert(&input, delimiter, output.as_deref()),

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Query {
            input,
            registro,
            cnpj,
            cidade,
            uf,
            modalidade,
        } => cmd_query(
            &input,
            SearchCriteria {
                registro,
                cnpj,
                cidade,
                uf,
                modalidade,
            },
        ),

        Commands::Serve { port, data } => cmd_serve(port, data).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Converting CSV: {}", input.display());

    let conversion = convert_csv_file(input, delimiter)?;

    eprintln!("   Encoding: {}", conversion.encoding);
    eprintln!(
        "   Delimiter: '{}'{}",
        format_delimiter(conversion.delimiter),
        if delimiter.is_none() { " (auto-detected)" } else { "" }
    );
    eprintln!("   Columns: {}", conversion.headers.join(", "));
    eprintln!("✅ Converted {} records", conversion.records.len());

    match output {
        Some(path) => {
            write_json(&conversion.records, path)?;
            eprintln!("💾 Output written to: {}", path.display());
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&conversion.records)?);
        }
    }

    Ok(())
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Validating: {}", input.display());

    let content = fs::read_to_string(input)?;
    let dataset: Value = serde_json::from_str(&content)?;

    match validate_dataset(&dataset) {
        Ok(()) => {
            let count = dataset.as_array().map(|a| a.len()).unwrap_or(0);
            eprintln!("✅ All {} records valid!", count);
            Ok(())
        }
        Err(errors) => {
            eprintln!("❌ Dataset invalid:");
            for err in errors.iter().take(5) {
                eprintln!("   - {}", err);
            }
            std::process::exit(1);
        }
    }
}

fn cmd_query(input: &Path, criteria: SearchCriteria) -> Result<(), Box<dyn std::error::Error>> {
    let store = OperatorStore::new(input);
    let records = store.load()?;

    eprintln!("📄 Loaded {} records from {}", records.len(), input.display());

    let hits = query::filter(&records, &criteria)?;
    eprintln!("✅ {} matching records", hits.len());

    println!("{}", serde_json::to_string_pretty(&hits)?);
    Ok(())
}

async fn cmd_serve(port: u16, data: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let data_path = data
        .or_else(|| std::env::var("CADOP_DATA").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(cadop::DEFAULT_DATA_FILE));

    if !data_path.exists() {
        eprintln!(
            "⚠️  Data file {} not found - requests will return 404 until it exists",
            data_path.display()
        );
        eprintln!("   Run 'cadop convert <export.csv> -o {}' first", data_path.display());
    }

    cadop::server::start_server(port, OperatorStore::new(data_path)).await
}
