// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::fs::File;
use std::path::Path;
use std::process;

use crate::cli::args::AnnotateArgs;
use crate::detector::NullLandmarkSource;
use crate::{PipelineConfig, VERSION, pipeline};
use crate::{error, success, verbose, warn};

/// Run the annotate command.
pub fn run(args: &AnnotateArgs) {
    crate::cli::logging::set_verbose(args.verbose);

    let mut config = PipelineConfig::new()
        .with_overlay(!args.black)
        .with_max_age(args.max_age);
    if let Some(thresh) = args.dist_thresh {
        config = config.with_dist_thresh(thresh);
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.source));

    verbose!("pose-annotator {VERSION} 🚀");
    verbose!("Source: {}", args.source);
    verbose!("Output: {output}");

    // The pose model is an external collaborator; without a backend linked
    // in, frames pass through the full decode/track/encode path unannotated.
    warn!("No landmark backend is linked in this build; running passthrough.");

    #[cfg(feature = "video")]
    {
        let detector = NullLandmarkSource;
        match pipeline::run(detector, &args.source, &output, &config) {
            Ok(summary) => {
                success!(
                    "{} frames, {} identities, {:.1}ms",
                    summary.frames,
                    summary.tracks_created,
                    summary.elapsed_ms
                );
            }
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        }
    }

    #[cfg(not(feature = "video"))]
    {
        let _ = (config, output, NullLandmarkSource);
        error!("Video processing requires the 'video' feature.");
        process::exit(1);
    }
}

/// Pick a collision-free default output path next to the source.
///
/// Tries `<stem>_annotated.mp4`, then `<stem>_annotated2.mp4`, and so on.
/// Each candidate is claimed with an exclusive create, so concurrent jobs
/// over the same source settle on distinct paths; the encoder then writes
/// over the claimed placeholder.
fn default_output_path(source: &str) -> String {
    let source = Path::new(source);
    let stem = source.file_stem().unwrap_or_default().to_string_lossy();
    let dir = source.parent().unwrap_or_else(|| Path::new(""));

    let candidate = |name: String| dir.join(name).to_string_lossy().into_owned();

    let first = candidate(format!("{stem}_annotated.mp4"));
    if claim(&first) {
        return first;
    }

    for i in 2..1000 {
        let numbered = candidate(format!("{stem}_annotated{i}.mp4"));
        if claim(&numbered) {
            return numbered;
        }
    }

    // Nothing claimable (e.g. unwritable directory); let the encoder open
    // report the real error.
    first
}

/// Atomically claim a path by creating it exclusively.
fn claim(path: &str) -> bool {
    File::create_new(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_output_path_sits_next_to_source() {
        let dir = std::env::temp_dir().join(format!("pa-naming-stem-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let source = dir.join("session.mp4");

        let output = default_output_path(&source.to_string_lossy());

        assert_eq!(Path::new(&output), dir.join("session_annotated.mp4"));
        assert!(Path::new(&output).exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_default_output_path_skips_claimed_outputs() {
        let dir = std::env::temp_dir().join(format!("pa-naming-skip-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let source = dir.join("session.mp4");

        let first = default_output_path(&source.to_string_lossy());
        let second = default_output_path(&source.to_string_lossy());

        assert_eq!(Path::new(&first), dir.join("session_annotated.mp4"));
        assert_eq!(Path::new(&second), dir.join("session_annotated2.mp4"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
