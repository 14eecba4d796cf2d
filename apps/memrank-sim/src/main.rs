// crates.io
use clap::Parser;
// self
use memrank_sim::Args;

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = Args::parse();

	memrank_sim::run(args)
}
