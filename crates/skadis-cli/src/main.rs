mod error;
mod generate;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use skadis_layout::Parameters;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::generate::{GenerateArgs, run_generate};

#[derive(Parser)]
#[command(name = "skadis", version, about = "SKADIS-style pegboard DXF generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the board drawing
    Generate(GenerateArgs),
    /// Print the default parameter set
    Defaults {
        /// Print JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => error::ErrorCode::Usage as i32,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    let debug = matches!(&cli.command, Command::Generate(args) if args.debug);
    init_tracing(debug);

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Defaults { json } => print_defaults(json),
    };
    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}

/// Logs go to stderr. `--debug` forces the `debug` level, otherwise `RUST_LOG` wins over
/// the `info` fallback.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn print_defaults(json: bool) -> Result<(), CliError> {
    let params = Parameters::default();
    let out = if json {
        serde_json::to_string_pretty(&params).map_err(|e| CliError::processing(e.to_string()))?
    } else {
        params
            .to_yaml()
            .map_err(|e| CliError::processing(e.to_string()))?
    };
    println!("{}", out.trim_end());
    Ok(())
}
