use std::path::PathBuf;
use clap::Parser;
use crate::constants::{RENDER_HEIGHT, RENDER_WIDTH};

#[derive(Parser, Debug)]
#[command(about = "Plays a photo reel as a filmstrip slideshow", version)]
pub struct Args {
    /// JSON manifest of slides, or a directory of images
    pub source: PathBuf,

    /// Background music (ogg, mp3, wav, flac), looped
    #[arg(long)]
    pub music: Option<PathBuf>,

    /// YAML file overriding timings and volume
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Viewer is not the reel's owner
    #[arg(long)]
    pub view_only: bool,

    /// Start with the music muted
    #[arg(long)]
    pub muted: bool,

    #[arg(long, default_value_t = RENDER_WIDTH)]
    pub width: i32,

    #[arg(long, default_value_t = RENDER_HEIGHT)]
    pub height: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from(["filmreel", "reel.json", "--music", "song.ogg", "--view-only", "--width", "800"]).unwrap();
        assert_eq!(args.source, PathBuf::from("reel.json"));
        assert_eq!(args.music, Some(PathBuf::from("song.ogg")));
        assert!(args.view_only);
        assert!(!args.muted);
        assert_eq!(args.width, 800);
        assert_eq!(args.height, RENDER_HEIGHT);
    }

    #[test]
    fn source_is_required() {
        assert!(Args::try_parse_from(["filmreel"]).is_err());
    }
}
