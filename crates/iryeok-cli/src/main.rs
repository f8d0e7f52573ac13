mod commands;
mod output;

use clap::{Parser, Subcommand};
use iryeok_core::corpus::DEFAULT_CORPUS_PATH;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "iryeok",
    version,
    about = "Structured applicant records from Korean résumé PDFs"
)]
struct Cli {
    /// Log pipeline decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a résumé PDF into an applicant record
    Parse {
        /// Path to the résumé PDF
        input_file: PathBuf,

        /// pdftotext executable to use instead of the one on PATH
        #[arg(long, env = "IRYEOK_PDFTOTEXT", value_name = "EXE")]
        pdftotext: Option<PathBuf>,

        /// Seconds to wait for pdftotext
        #[arg(long, default_value = "30", value_name = "SECS")]
        timeout: u64,

        /// Write raw text, extraction metadata and segments to this directory
        #[arg(long, value_name = "DIR")]
        debug_dir: Option<PathBuf>,

        /// Split sections by the header corpus instead of blank lines
        #[arg(long)]
        use_corpus_headers: bool,

        /// Header corpus artifact (default: pdf_resume/common_headers.json)
        #[arg(long, env = "IRYEOK_HEADERS", value_name = "FILE")]
        headers: Option<PathBuf>,

        /// Save the profile photo into this directory
        #[arg(long, value_name = "DIR")]
        photo_dir: Option<PathBuf>,

        /// Output format: json (default) or table
        #[arg(short, long, default_value = "json")]
        output: String,

        /// Write the JSON record to a file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Print the extracted text and the engine that produced it
    Extract {
        /// Path to the résumé PDF
        input_file: PathBuf,

        /// pdftotext executable to use instead of the one on PATH
        #[arg(long, env = "IRYEOK_PDFTOTEXT", value_name = "EXE")]
        pdftotext: Option<PathBuf>,

        /// Seconds to wait for pdftotext
        #[arg(long, default_value = "30", value_name = "SECS")]
        timeout: u64,

        /// Write the text to a file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// List the images embedded in a PDF
    Images {
        /// Path to the PDF
        input_file: PathBuf,
    },
    /// Inspect header corpus artifacts
    Headers {
        #[command(subcommand)]
        action: HeadersAction,
    },
}

#[derive(Subcommand)]
enum HeadersAction {
    /// Check that an artifact loads and is usable
    Validate {
        /// Path to the JSON artifact
        file: PathBuf,
    },
    /// Print the header candidates of an artifact
    Show {
        /// Path to the JSON artifact
        #[arg(default_value = DEFAULT_CORPUS_PATH)]
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Parse {
            input_file,
            pdftotext,
            timeout,
            debug_dir,
            use_corpus_headers,
            headers,
            photo_dir,
            output,
            out,
        } => {
            let args = commands::parse::ParseArgs {
                pdftotext,
                timeout,
                debug_dir,
                use_corpus_headers,
                headers,
                photo_dir,
            };
            match commands::parse::run(&input_file, args, &output, out) {
                // The error record is already on stdout
                Ok(false) => std::process::exit(1),
                other => other.map(|_| ()),
            }
        }
        Commands::Extract {
            input_file,
            pdftotext,
            timeout,
            out,
        } => commands::extract::run(&input_file, pdftotext, timeout, out),
        Commands::Images { input_file } => commands::images::run(&input_file),
        Commands::Headers { action } => match action {
            HeadersAction::Validate { file } => commands::headers::validate(&file),
            HeadersAction::Show { file } => commands::headers::show(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
