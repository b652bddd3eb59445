// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::Parser;
use pose_annotator::cli::args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Annotate(args) => pose_annotator::cli::annotate::run(&args),
    }
}
