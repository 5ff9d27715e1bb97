use clap::Parser;
use emisiones_processor::cli::{run, Cli};
use emisiones_processor::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
