use std::{ffi::OsString, path::{Path, PathBuf}, process::ExitCode};

use clap::{Parser, ValueEnum};

use huffpack::{container, utils::logging, Properties};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Compress,
    Decompress,
}

#[derive(Parser, Debug)]
#[command(
    name = "huffpack",
    version,
    about = "Compress or decompress a single file with static Huffman coding"
)]
struct Args {
    /// Operation to run
    #[arg(value_enum)]
    mode: Mode,
    /// Source filename
    input: PathBuf,
    /// Destination filename
    output: PathBuf,
    /// Decode the compressed output in memory and compare it with the input before writing
    #[arg(long)]
    verify: bool,
    /// Write the container stats as JSON to <OUTPUT>.json
    #[arg(long)]
    report: bool,
    /// A .properties file with default settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn report_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(".json");
    PathBuf::from(name)
}

fn run(args: Args) -> huffpack::Result<()> {
    let mut props = match &args.config {
        Some(path) => Properties::load(path)?,
        None => Properties::default(),
    };

    props.verify |= args.verify;
    props.report |= args.report;
    if let Some(level) = args.log_level {
        props.log_level = level;
    }

    logging::init(&props.log_level)?;

    match args.mode {
        Mode::Compress => {
            let stats = container::compress_with(&args.input, &args.output, props.verify)?;

            if props.report {
                let report = serde_json::to_string_pretty(&stats)?;
                container::write_atomically(&report_path(&args.output), report.as_bytes())?;
            }
        }
        Mode::Decompress => {
            container::decompress(&args.input, &args.output)?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
