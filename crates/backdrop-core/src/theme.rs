//! Colour themes for the animations.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// Named colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Classic,
    Cosmic,
    Cyberpunk,
    Ocean,
    Sunset,
    Forest,
}

/// Colours a theme feeds into the generators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Base fill for starfield, particle network and galaxy.
    pub background: Rgba,
    /// Base fill for bubbles.
    pub backdrop: Rgba,
    /// Gradient wave start colour (top-left).
    pub gradient_start: Rgba,
    /// Gradient wave end colour (bottom-right).
    pub gradient_end: Rgba,
    /// Stars, particles and link lines.
    pub foreground: Rgba,
    /// Galaxy core and highlights.
    pub accent: Rgba,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Classic,
        Theme::Cosmic,
        Theme::Cyberpunk,
        Theme::Ocean,
        Theme::Sunset,
        Theme::Forest,
    ];

    /// Cycle to the next theme.
    pub fn next(self) -> Self {
        match self {
            Theme::Classic => Theme::Cosmic,
            Theme::Cosmic => Theme::Cyberpunk,
            Theme::Cyberpunk => Theme::Ocean,
            Theme::Ocean => Theme::Sunset,
            Theme::Sunset => Theme::Forest,
            Theme::Forest => Theme::Classic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::Cosmic => "cosmic",
            Theme::Cyberpunk => "cyberpunk",
            Theme::Ocean => "ocean",
            Theme::Sunset => "sunset",
            Theme::Forest => "forest",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Classic => Palette {
                background: Rgba::rgb8(15, 23, 42),
                backdrop: Rgba::rgb8(30, 41, 59),
                gradient_start: Rgba::rgb8(74, 0, 224),
                gradient_end: Rgba::rgb8(142, 45, 226),
                foreground: Rgba::WHITE,
                accent: Rgba::rgb8(255, 236, 179),
            },
            Theme::Cosmic => Palette {
                background: Rgba::rgb8(8, 6, 24),
                backdrop: Rgba::rgb8(20, 14, 48),
                gradient_start: Rgba::rgb8(32, 0, 88),
                gradient_end: Rgba::rgb8(160, 40, 180),
                foreground: Rgba::rgb8(220, 210, 255),
                accent: Rgba::rgb8(255, 190, 250),
            },
            Theme::Cyberpunk => Palette {
                background: Rgba::rgb8(10, 4, 18),
                backdrop: Rgba::rgb8(24, 6, 36),
                gradient_start: Rgba::rgb8(255, 0, 128),
                gradient_end: Rgba::rgb8(0, 240, 255),
                foreground: Rgba::rgb8(0, 255, 200),
                accent: Rgba::rgb8(255, 230, 0),
            },
            Theme::Ocean => Palette {
                background: Rgba::rgb8(2, 20, 38),
                backdrop: Rgba::rgb8(4, 44, 70),
                gradient_start: Rgba::rgb8(0, 82, 130),
                gradient_end: Rgba::rgb8(0, 180, 200),
                foreground: Rgba::rgb8(190, 240, 255),
                accent: Rgba::rgb8(120, 255, 230),
            },
            Theme::Sunset => Palette {
                background: Rgba::rgb8(30, 10, 20),
                backdrop: Rgba::rgb8(52, 18, 34),
                gradient_start: Rgba::rgb8(255, 94, 98),
                gradient_end: Rgba::rgb8(255, 195, 113),
                foreground: Rgba::rgb8(255, 228, 200),
                accent: Rgba::rgb8(255, 150, 60),
            },
            Theme::Forest => Palette {
                background: Rgba::rgb8(6, 20, 12),
                backdrop: Rgba::rgb8(14, 36, 22),
                gradient_start: Rgba::rgb8(19, 78, 44),
                gradient_end: Rgba::rgb8(113, 178, 128),
                foreground: Rgba::rgb8(210, 255, 200),
                accent: Rgba::rgb8(250, 240, 140),
            },
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.label() == lowered)
            .ok_or_else(|| format!("unknown theme '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle_visits_all() {
        let mut theme = Theme::Classic;
        for _ in 0..Theme::ALL.len() {
            theme = theme.next();
        }
        assert_eq!(theme, Theme::Classic);
    }

    #[test]
    fn test_classic_palette_colors() {
        let palette = Theme::Classic.palette();
        assert_eq!(palette.background.to_rgb8(), (15, 23, 42));
        assert_eq!(palette.backdrop.to_rgb8(), (30, 41, 59));
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("Cyberpunk".parse(), Ok(Theme::Cyberpunk));
        assert!("neon".parse::<Theme>().is_err());
    }
}
