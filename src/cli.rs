use std::env;
use std::io;
use std::path::PathBuf;

use clap::Parser;

/// Lightweight terminal music player.
///
/// Plays the given files and directories in order. Songs in the current
/// directory are played when no paths are given.
#[derive(Parser, Debug)]
#[command(name = "spindle", version)]
pub struct Cli {
    /// Song files or directories to play
    pub paths: Vec<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Starting volume, from 0.0 to 1.0
    #[arg(long, value_parser = parse_volume)]
    pub volume: Option<f32>,
}

impl Cli {
    /// The paths to build the playlist from; the working directory when none were given.
    pub fn playlist_roots(&self) -> io::Result<Vec<PathBuf>> {
        if self.paths.is_empty() {
            Ok(vec![env::current_dir()?])
        } else {
            Ok(self.paths.clone())
        }
    }
}

fn parse_volume(s: &str) -> Result<f32, String> {
    let v: f32 = s.parse().map_err(|_| format!("{s:?} is not a number"))?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("{v} is outside 0.0..=1.0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn paths_and_options_parse() {
        let cli = Cli::try_parse_from(["spindle", "a.mp3", "music", "--volume", "0.5"]).unwrap();
        assert_eq!(cli.paths, vec![PathBuf::from("a.mp3"), PathBuf::from("music")]);
        assert_eq!(cli.volume, Some(0.5));
        assert!(cli.config.is_none());
        assert_eq!(cli.playlist_roots().unwrap(), cli.paths);
    }

    #[test]
    fn no_paths_means_current_directory() {
        let cli = Cli::try_parse_from(["spindle"]).unwrap();
        assert_eq!(cli.playlist_roots().unwrap(), vec![env::current_dir().unwrap()]);
    }

    #[test]
    fn help_is_reported_as_display_help() {
        let err = Cli::try_parse_from(["spindle", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn volume_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["spindle", "--volume", "1.5"]).is_err());
        assert!(Cli::try_parse_from(["spindle", "--volume", "loud"]).is_err());
    }
}
