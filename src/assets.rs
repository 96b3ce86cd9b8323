//! Startup assets
//!
//! Everything here runs once during setup; any failure is fatal to the caller.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::audio::{AudioBackend, Sound};
use crate::error::{GameError, Result};

/// Help screen text, one entry per line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpText {
    pub lines: Vec<String>,
}

impl HelpText {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => GameError::MissingHelp(path.to_path_buf()),
            _ => GameError::io(path, e),
        })?;
        let lines = text.lines().map(|l| l.trim_end().to_string()).collect();
        Ok(Self { lines })
    }

    pub fn from_lines(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Fail on the first sound the backend cannot play
pub fn verify_sounds(backend: &dyn AudioBackend) -> Result<()> {
    match Sound::ALL.into_iter().find(|s| !backend.is_loaded(*s)) {
        Some(missing) => Err(GameError::MissingSound(missing.name().to_string())),
        None => {
            log::debug!("All {} sounds available", Sound::ALL.len());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;

    struct NoTheme;

    impl AudioBackend for NoTheme {
        fn play(&mut self, _sound: Sound, _looping: bool) {}
        fn stop(&mut self, _sound: Sound) {}
        fn set_volume(&mut self, _volume: f32) {}
        fn is_loaded(&self, sound: Sound) -> bool {
            sound != Sound::Theme
        }
    }

    #[test]
    fn test_missing_help_is_fatal() {
        let err = HelpText::load(Path::new("/nowhere/help.txt")).unwrap_err();
        assert!(matches!(err, GameError::MissingHelp(_)));
    }

    #[test]
    fn test_help_lines() {
        let path =
            std::env::temp_dir().join(format!("asteroids-2k-help-{}.txt", std::process::id()));
        fs::write(&path, "Arrows: rotate   \nSpace: fire\n").unwrap();
        let help = HelpText::load(&path).unwrap();
        assert_eq!(help, HelpText::from_lines(&["Arrows: rotate", "Space: fire"]));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_verify_sounds() {
        assert!(verify_sounds(&NullAudio).is_ok());
        match verify_sounds(&NoTheme) {
            Err(GameError::MissingSound(name)) => assert_eq!(name, "theme"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
