use anyhow::Result;
use argh::FromArgs;
use fingalaxy::{
    errors::AppError,
    export::AnalysisSnapshot,
    query::{describe, overview, resolve_symbol},
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(FromArgs)]
/// Ask about the latest FinGalaxy analysis.
struct Args {
    /// path to the exported analysis snapshot
    #[argh(option, default = "PathBuf::from(\"latest_analysis.json\")")]
    snapshot: PathBuf,

    /// question or symbol, e.g. "what about apple"
    #[argh(positional)]
    words: Vec<String>,
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args: Args = argh::from_env();

    let snapshot = match AnalysisSnapshot::load(&args.snapshot) {
        Ok(s) => s,
        Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            println!("⚠️  No data available yet. Please wait for the monitor to run at least one cycle.");
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e.into()),
    };

    let question = args.words.join(" ");
    match resolve_symbol(&question, Some(&snapshot)) {
        Some(symbol) => match snapshot.symbols.get(&symbol) {
            Some(record) => println!("{}", describe(&symbol, record)),
            None => println!("I don't have recent data for {symbol}. Please try again in a moment."),
        },
        None => {
            println!("Latest analysis ({}):", snapshot.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
            for line in overview(&snapshot) {
                println!("  {line}");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
