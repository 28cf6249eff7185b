use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use badgesweep_core as game;
use serde::{Deserialize, Serialize};

/// Everything the settings file can set. Missing keys keep their defaults.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub game: game::GameConfig,
    pub viewport: game::Viewport,
    pub display: Display,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Display {
    /// Upper bound on redraws per second.
    pub frame_rate: u32,
    pub tile_px: u16,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            tile_px: game::FrameConfig::DEFAULT_TILE_PX,
        }
    }
}

/// Command-line values that win over the settings file.
#[derive(clap::Args, Debug, Default)]
pub(crate) struct Overrides {
    /// Board width in tiles
    #[arg(long)]
    pub width: Option<game::Coord>,

    /// Board height in tiles
    #[arg(long)]
    pub height: Option<game::Coord>,

    /// Number of bombs
    #[arg(short, long)]
    pub bombs: Option<game::CellCount>,

    /// Let the mark button cycle through a question mark
    #[arg(long)]
    pub question_marks: bool,
}

impl Settings {
    /// Reads a settings file. Values are checked by [`Settings::validate`] once overrides are in.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read settings from {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("bad settings file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(width) = overrides.width {
            self.game.size.0 = width;
        }
        if let Some(height) = overrides.height {
            self.game.size.1 = height;
        }
        if let Some(bombs) = overrides.bombs {
            self.game.bombs = bombs;
        }
        if overrides.question_marks {
            self.game.question_marks = true;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.game.validate().context("invalid [game] section")?;
        self.viewport.validate().context("invalid [viewport] section")?;
        ensure!(self.display.frame_rate > 0, "frame_rate must be positive");
        ensure!(self.display.tile_px > 0, "tile_px must be positive");
        Ok(())
    }

    pub fn frame_config(&self) -> game::FrameConfig {
        game::FrameConfig {
            viewport: self.viewport,
            frame_delay: Duration::from_secs(1) / self.display.frame_rate,
            tile_px: self.display.tile_px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_frame_driver() {
        assert_eq!(Settings::default().frame_config(), game::FrameConfig::default());
    }

    #[test]
    fn toml_round_trip() {
        let mut settings = Settings::default();
        settings.game = settings.game.with_question_marks(true);
        settings.viewport.lead = (2, 2);

        let text = toml::to_string(&settings).unwrap();

        assert_eq!(Settings::parse(&text).unwrap(), settings);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let settings = Settings::parse("[game]\nbombs = 5\n\n[display]\nframe_rate = 60\n").unwrap();

        assert_eq!(settings.game.bombs, 5);
        assert_eq!(settings.game.size, game::GameConfig::DEFAULT_SIZE);
        assert_eq!(settings.viewport, game::Viewport::default());
        assert_eq!(settings.display.frame_rate, 60);
    }

    #[test]
    fn rejects_impossible_boards() {
        for text in [
            "[game]\nsize = [2, 2]\nbombs = 4\n",
            "[viewport]\nsize = [0, 8]\n",
            "[display]\nframe_rate = 0\n",
        ] {
            assert!(Settings::parse(text).unwrap().validate().is_err(), "{text}");
        }
    }

    #[test]
    fn overrides_can_fix_the_file() {
        let mut settings = Settings::parse("[game]\nbombs = 150\n").unwrap();
        assert!(settings.validate().is_err());

        settings.apply(&Overrides {
            width: Some(20),
            ..Default::default()
        });

        assert!(settings.validate().is_ok());
        assert_eq!(settings.game.size, (20, 10));
        assert_eq!(settings.game.bombs, 150);
    }

    #[test]
    fn load_leaves_checking_to_the_caller() {
        let path = std::env::temp_dir().join(format!("badgesweep-{}.toml", std::process::id()));
        std::fs::write(&path, "[game]\nbombs = 150\n").unwrap();

        let loaded = Settings::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.unwrap().game.bombs, 150);
    }

    #[test]
    fn overrides_win() {
        let mut settings = Settings::default();
        settings.apply(&Overrides {
            width: Some(20),
            bombs: Some(30),
            ..Default::default()
        });

        assert_eq!(settings.game.size, (20, 10));
        assert_eq!(settings.game.bombs, 30);
        assert!(!settings.game.question_marks);
    }
}
