use clap::Parser;
use permute_cli::{CliArgs, logging};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    logging::init(args.verbose);
    permute_cli::run(&args)
}
