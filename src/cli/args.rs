// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::{Args, Parser, Subcommand};

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Annotate Options:
    --source, -s <SOURCE>  Input video file
    --output, -o <OUTPUT>  Output video path [default: <source stem>_annotated.mp4]
    --black                Draw skeletons on a black background instead of the frames
    --max-age <FRAMES>     Frames a lost identity survives before expiring [default: 25]
    --dist-thresh <PX>     Override the identity matching distance in pixels
    --verbose              Show verbose output

Examples:
    pose-annotator annotate --source video.mp4
    pose-annotator annotate --source video.mp4 --output annotated.mp4
    pose-annotator annotate -s video.mp4 --black --max-age 30
    pose-annotator annotate -s video.mp4 --dist-thresh 64"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Annotate a video with tracked stick-figure pose overlays
    Annotate(AnnotateArgs),
}

/// Arguments for the annotate command.
#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Input video file
    #[arg(short, long)]
    pub source: String,

    /// Output video path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Draw skeletons on a black background instead of the original frames
    #[arg(long, default_value_t = false)]
    pub black: bool,

    /// Frames a lost identity survives before expiring
    #[arg(long, default_value_t = crate::tracker::DEFAULT_MAX_AGE)]
    pub max_age: u64,

    /// Override the identity matching distance threshold in pixels
    #[arg(long)]
    pub dist_thresh: Option<f32>,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_annotate_args_defaults() {
        let args = Cli::parse_from(["app", "annotate", "--source", "video.mp4"]);
        match args.command {
            Commands::Annotate(annotate_args) => {
                assert_eq!(annotate_args.source, "video.mp4");
                assert!(annotate_args.output.is_none());
                assert!(!annotate_args.black);
                assert_eq!(annotate_args.max_age, crate::tracker::DEFAULT_MAX_AGE);
                assert!(annotate_args.dist_thresh.is_none());
                assert!(annotate_args.verbose);
            }
        }
    }

    #[test]
    fn test_annotate_args_custom() {
        let args = Cli::parse_from([
            "app",
            "annotate",
            "--source",
            "in.mp4",
            "--output",
            "out.mp4",
            "--black",
            "--max-age",
            "30",
            "--verbose",
            "false",
        ]);
        match args.command {
            Commands::Annotate(annotate_args) => {
                assert_eq!(annotate_args.source, "in.mp4");
                assert_eq!(annotate_args.output, Some("out.mp4".to_string()));
                assert!(annotate_args.black);
                assert_eq!(annotate_args.max_age, 30);
                assert!(!annotate_args.verbose);
            }
        }
    }
}
