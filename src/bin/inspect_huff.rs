use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser;

use huffpack::inspect;

#[derive(Parser, Debug)]
#[command(about = "Print the header statistics of a Huffman container as JSON")]
struct Args {
    /// The compressed file
    source_name: PathBuf,
}

fn run(args: &Args) -> huffpack::Result<String> {
    let data = fs::read(&args.source_name)?;
    let stats = inspect(&data)?;
    Ok(serde_json::to_string_pretty(&stats)?)
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
