use std::fs;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AppError, ConfigError};
use crate::food::SpawnPolicy;
use crate::grid::{Grid, Position};
use crate::input::Direction;
use crate::speed::SpeedController;

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default side length of the square grid.
pub const DEFAULT_GRID_SIZE: u16 = 15;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 60;

/// Interval reduction applied per feeding move.
pub const TICK_INTERVAL_STEP_MS: u64 = 10;

/// Starting head cell.
pub const DEFAULT_ORIGIN: Position = Position::new(2, 2);

/// Terminal columns used per grid cell so cells render roughly square.
pub const CELL_WIDTH: u16 = 2;

pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_FOOD: &str = "◖◗";

/// Game settings fixed at construction.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_size: u16,
    pub initial_interval_ms: u64,
    pub min_interval_ms: u64,
    pub interval_step_ms: u64,
    pub origin: Position,
    pub initial_direction: Direction,
    /// Snake tints as `#RRGGBB`; cosmetic only.
    pub palette: Vec<String>,
    pub food_policy: SpawnPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            initial_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            min_interval_ms: MIN_TICK_INTERVAL_MS,
            interval_step_ms: TICK_INTERVAL_STEP_MS,
            origin: DEFAULT_ORIGIN,
            initial_direction: Direction::Right,
            palette: [
                "#00FF00", "#00BFFF", "#FFD700", "#FF69B4", "#FF8C00", "#9370DB",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            food_policy: SpawnPolicy::FreeCells,
        }
    }
}

impl GameConfig {
    /// Checks every construction-time contract and returns the derived pieces.
    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        let grid = Grid::new(self.grid_size)?;

        if self.initial_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.min_interval_ms == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }
        if self.min_interval_ms > self.initial_interval_ms {
            return Err(ConfigError::MinAboveInitial {
                min_ms: self.min_interval_ms,
                initial_ms: self.initial_interval_ms,
            });
        }
        if !grid.contains(self.origin) {
            return Err(ConfigError::OriginOutOfBounds {
                x: self.origin.x,
                y: self.origin.y,
                size: self.grid_size,
            });
        }

        let palette = Palette::parse(&self.palette)?;

        Ok(ValidatedConfig {
            grid,
            speed: SpeedController::new(
                self.initial_interval_ms,
                self.min_interval_ms,
                self.interval_step_ms,
            ),
            origin: self.origin,
            initial_direction: self.initial_direction,
            palette,
            food_policy: self.food_policy,
        })
    }
}

/// Configuration that passed validation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ValidatedConfig {
    pub grid: Grid,
    pub speed: SpeedController,
    pub origin: Position,
    pub initial_direction: Direction,
    pub palette: Palette,
    pub food_policy: SpawnPolicy,
}

/// Plain RGB triple.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb(r, g, b)
    }
}

/// Non-empty list of snake tints.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Parses `#RRGGBB` strings.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        let colors = entries
            .iter()
            .map(|entry| parse_hex_color(entry.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { colors })
    }

    /// Snake tint for the given score; changes with every food eaten.
    #[must_use]
    pub fn tint_for_score(&self, score: u32) -> Rgb {
        let index = usize::try_from(score).unwrap_or(0) % self.colors.len();
        self.colors[index]
    }
}

fn parse_hex_color(raw: &str) -> Result<Rgb, ConfigError> {
    let invalid = || ConfigError::InvalidColor(raw.to_owned());

    let hex = raw.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }

    let channel =
        |range: Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| invalid());
    Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Returns the platform-correct default config path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}

/// Loads configuration from an explicit path, else the default path, else defaults.
///
/// An explicit path must exist. A missing default file is not an error.
pub fn load_config(explicit: Option<&Path>) -> Result<GameConfig, AppError> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }

    let Some(path) = default_config_path() else {
        return Ok(GameConfig::default());
    };

    match load_config_from_path(&path) {
        Err(AppError::ConfigRead { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            Ok(GameConfig::default())
        }
        other => other,
    }
}

fn load_config_from_path(path: &Path) -> Result<GameConfig, AppError> {
    let raw = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
        path: path.to_owned(),
        source,
    })?;

    let config = serde_json::from_str::<GameConfig>(&raw).map_err(|source| {
        warn!(path = %path.display(), "config file is not valid JSON");
        AppError::ConfigParse {
            path: path.to_owned(),
            source,
        }
    })?;

    info!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Colours for the non-snake parts of the terminal view.
#[derive(Debug)]
pub struct Theme {
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub game_over_title: Color,
    pub game_over_action: Color,
}

/// Dark board with a white frame and white food.
pub const THEME_DARK: Theme = Theme {
    food: Color::White,
    play_bg: Color::Rgb(0x33, 0x33, 0x33),
    border_fg: Color::White,
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    game_over_title: Color::Red,
    game_over_action: Color::Rgb(0x00, 0xFF, 0x00),
};

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::error::{AppError, ConfigError};
    use crate::food::SpawnPolicy;
    use crate::grid::Position;
    use crate::input::Direction;

    use super::{GameConfig, Palette, Rgb, load_config};

    #[test]
    fn default_config_is_valid() {
        let validated = GameConfig::default()
            .validate()
            .expect("defaults should validate");

        assert_eq!(validated.grid.size(), 15);
        assert_eq!(validated.speed.initial_interval_ms(), 200);
        assert_eq!(validated.origin, Position::new(2, 2));
        assert_eq!(validated.initial_direction, Direction::Right);
        assert_eq!(validated.palette.tint_for_score(0), Rgb(0x00, 0xFF, 0x00));
    }

    #[test]
    fn malformed_configs_are_rejected() {
        let base = GameConfig::default();

        let cases = [
            (
                GameConfig {
                    grid_size: 1,
                    ..base.clone()
                },
                ConfigError::GridTooSmall(1),
            ),
            (
                GameConfig {
                    initial_interval_ms: 0,
                    ..base.clone()
                },
                ConfigError::ZeroInterval,
            ),
            (
                GameConfig {
                    min_interval_ms: 0,
                    ..base.clone()
                },
                ConfigError::ZeroMinInterval,
            ),
            (
                GameConfig {
                    min_interval_ms: 300,
                    ..base.clone()
                },
                ConfigError::MinAboveInitial {
                    min_ms: 300,
                    initial_ms: 200,
                },
            ),
            (
                GameConfig {
                    origin: Position::new(15, 0),
                    ..base.clone()
                },
                ConfigError::OriginOutOfBounds {
                    x: 15,
                    y: 0,
                    size: 15,
                },
            ),
            (
                GameConfig {
                    palette: Vec::new(),
                    ..base.clone()
                },
                ConfigError::EmptyPalette,
            ),
        ];

        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn palette_parses_hex_and_cycles_with_score() {
        let palette = Palette::parse(&["#00FF00", "#1e1e1e"]).expect("valid palette");

        assert_eq!(palette.tint_for_score(0), Rgb(0x00, 0xFF, 0x00));
        assert_eq!(palette.tint_for_score(1), Rgb(0x1E, 0x1E, 0x1E));
        assert_eq!(palette.tint_for_score(2), Rgb(0x00, 0xFF, 0x00));
    }

    #[test]
    fn palette_rejects_bad_colours() {
        for raw in ["00FF00", "#00FF0", "#GG0000", "#00FF00FF"] {
            assert_eq!(
                Palette::parse(&[raw]),
                Err(ConfigError::InvalidColor(raw.to_owned()))
            );
        }
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let path = unique_test_path("partial");
        write_test_file(
            &path,
            r#"{ "grid_size": 20, "initial_direction": "down", "food_policy": "any_but_head" }"#,
        );

        let config = load_config(Some(&path)).expect("config should load");

        assert_eq!(config.grid_size, 20);
        assert_eq!(config.initial_direction, Direction::Down);
        assert_eq!(config.food_policy, SpawnPolicy::AnyButHead);
        assert_eq!(config.initial_interval_ms, 200);
        cleanup_test_path(&path);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, "not-json");

        assert!(matches!(
            load_config(Some(&path)),
            Err(AppError::ConfigParse { .. })
        ));
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = unique_test_path("missing");

        assert!(matches!(
            load_config(Some(&path)),
            Err(AppError::ConfigRead { .. })
        ));
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-config-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
