use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use subcalc_cidr::Network;
use subcalc_core::Address;

mod interactive;
mod output;

use output::{write_address, write_networks, write_summary, AddressReport, OutputFormat};

/// IPv4 subnet calculator
#[derive(Parser)]
#[command(name = "subcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "human", global = true)]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show mask, range and counts for a CIDR block
    Network(NetworkArgs),
    /// Show decimal, binary and integer forms of an address
    Address(AddressArgs),
    /// List the blocks that follow a CIDR block
    Next(NextArgs),
    /// Prompt for CIDR blocks until EOF or "quit"
    Interactive,
}

#[derive(Parser)]
struct NetworkArgs {
    /// CIDR block, e.g. 192.168.1.141/26
    #[arg(value_name = "CIDR")]
    cidr: String,
}

#[derive(Parser)]
struct AddressArgs {
    /// Dotted-decimal IPv4 address
    #[arg(value_name = "ADDRESS")]
    address: String,
}

#[derive(Parser)]
struct NextArgs {
    /// CIDR block to start after
    #[arg(value_name = "CIDR")]
    cidr: String,

    /// Number of blocks to list
    #[arg(short, long, default_value = "4")]
    count: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    setup_tracing(cli.verbose);

    match cli.command {
        Commands::Network(args) => handle_network(args, cli.output)?,
        Commands::Address(args) => handle_address(args, cli.output)?,
        Commands::Next(args) => handle_next(args, cli.output)?,
        Commands::Interactive => handle_interactive(cli.output)?,
    }

    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the level picked by `--verbose`.
fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn handle_network(args: NetworkArgs, format: OutputFormat) -> Result<()> {
    let network = Network::parse(&args.cidr)?;
    tracing::debug!(%network, "network");

    write_summary(&mut io::stdout().lock(), &network.summary(), format)
}

fn handle_address(args: AddressArgs, format: OutputFormat) -> Result<()> {
    let address = Address::parse(&args.address)?;
    tracing::debug!(%address, "address");

    write_address(&mut io::stdout().lock(), &AddressReport::from(address), format)
}

fn handle_next(args: NextArgs, format: OutputFormat) -> Result<()> {
    let network = Network::parse(&args.cidr)?;
    let blocks: Vec<Network> = network.subnets().skip(1).take(args.count).collect();

    if blocks.len() < args.count {
        tracing::warn!(
            requested = args.count,
            listed = blocks.len(),
            "reached the end of the address space"
        );
    }

    write_networks(&mut io::stdout().lock(), &blocks, format)
}

fn handle_interactive(format: OutputFormat) -> Result<()> {
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();

    interactive::run(stdin, &mut stdout, format)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["subcalc", "network", "192.168.1.141/26"]);
        assert!(matches!(cli.command, Commands::Network(_)));
        assert!(matches!(cli.output, OutputFormat::Human));
    }

    #[test]
    fn test_output_format_json() {
        let cli = Cli::parse_from(["subcalc", "--output", "json", "address", "10.0.0.1"]);
        assert!(matches!(cli.output, OutputFormat::Json));
    }

    #[test]
    fn test_output_format_after_subcommand() {
        let cli = Cli::parse_from(["subcalc", "network", "10.0.0.0/8", "-o", "csv"]);
        assert!(matches!(cli.output, OutputFormat::Csv));
    }

    #[test]
    fn test_next_command() {
        let cli = Cli::parse_from(["subcalc", "next", "10.0.0.0/24", "--count", "8"]);
        if let Commands::Next(args) = cli.command {
            assert_eq!(args.cidr, "10.0.0.0/24");
            assert_eq!(args.count, 8);
        } else {
            panic!("Expected Next command");
        }
    }

    #[test]
    fn test_next_default_count() {
        let cli = Cli::parse_from(["subcalc", "next", "10.0.0.0/24"]);
        if let Commands::Next(args) = cli.command {
            assert_eq!(args.count, 4);
        } else {
            panic!("Expected Next command");
        }
    }

    #[test]
    fn test_interactive_command() {
        let cli = Cli::parse_from(["subcalc", "interactive"]);
        assert!(matches!(cli.command, Commands::Interactive));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["subcalc", "-v", "--no-color", "address", "1.1.1.1"]);
        assert!(cli.verbose);
        assert!(cli.no_color);
    }
}
