use directories::ProjectDirs;
use dotring::{IndicatorConfig, Style};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgba;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// `#RRGGBB` or `#AARRGGBB`, alpha first.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(pub Srgba<f64>);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Color '{0}' must start with '#'")]
    MissingHash(String),
    #[error("Color '{0}' must have 6 or 8 hex digits")]
    BadLength(String),
    #[error("Color '{0}' contains a non-hex digit")]
    BadDigit(String),
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;

        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::BadLength(s.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_string()));
        }

        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError::BadDigit(s.to_string()))?;
        let argb = if digits.len() == 6 {
            0xff00_0000 | value
        } else {
            value
        };

        let channel = |shift: u32| f64::from((argb >> shift) & 0xff) / 255.0;
        Ok(Self(Srgba::new(
            channel(16),
            channel(8),
            channel(0),
            channel(24),
        )))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = self.0.into_components();
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            to_byte(a),
            to_byte(r),
            to_byte(g),
            to_byte(b)
        )
    }
}

fn default_dot_color() -> HexColor {
    HexColor(IndicatorConfig::default().dot_color)
}

fn default_background_color() -> HexColor {
    HexColor(IndicatorConfig::default().background_color)
}

fn default_window_size() -> i32 {
    dotring::layout::DEFAULT_CONTAINER_SIZE
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default, serialize_with = "serialize_style")]
    pub style: Style,
    #[serde(default = "default_dot_color")]
    pub dot_color: HexColor,
    #[serde(default = "default_background_color")]
    pub background_color: HexColor,
    #[serde(default)]
    pub top_padding: i32,
    #[serde(default = "default_window_size")]
    pub window_size: i32,
    /// Take colors from the gtk theme, keeping the configured alpha.
    #[serde(default)]
    pub follow_theme: bool,
}

fn serialize_style<S: serde::Serializer>(style: &Style, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(style)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: Style::default(),
            dot_color: default_dot_color(),
            background_color: default_background_color(),
            top_padding: 0,
            window_size: default_window_size(),
            follow_theme: false,
        }
    }
}

impl Config {
    /// The window size to apply after a reload, if it differs from `previous`.
    pub fn resized_from(&self, previous: &Config) -> Option<i32> {
        (self.window_size != previous.window_size).then_some(self.window_size)
    }

    pub fn indicator_config(&self) -> IndicatorConfig {
        IndicatorConfig {
            style: self.style,
            dot_color: self.dot_color.0,
            background_color: self.background_color.0,
            top_padding: self.top_padding,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "dotring", "dotloader").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("DOTLOADER").try_parsing(true))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
        log::info!("Wrote default config to {}", path.display());
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_color(actual: HexColor, (r, g, b, a): (f64, f64, f64, f64)) {
        let (ar, ag, ab, aa) = actual.0.into_components();
        for (got, want) in [(ar, r), (ag, g), (ab, b), (aa, a)] {
            assert!((got - want).abs() < 1e-9, "{actual} != {:?}", (r, g, b, a));
        }
    }

    #[test]
    fn test_hex_color_parsing() {
        assert_color("#ff0000".parse().unwrap(), (1.0, 0.0, 0.0, 1.0));
        assert_color("#00ff00".parse().unwrap(), (0.0, 1.0, 0.0, 1.0));
        assert_color("#8000ff00".parse().unwrap(), (0.0, 1.0, 0.0, 128.0 / 255.0));
        assert_color(" #FFFFFFFF ".parse().unwrap(), (1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_hex_color_errors() {
        assert_eq!(
            "ff0000".parse::<HexColor>(),
            Err(ColorParseError::MissingHash("ff0000".to_string()))
        );
        assert_eq!(
            "#fff".parse::<HexColor>(),
            Err(ColorParseError::BadLength("#fff".to_string()))
        );
        assert_eq!(
            "#zz0000".parse::<HexColor>(),
            Err(ColorParseError::BadDigit("#zz0000".to_string()))
        );
    }

    #[test]
    fn test_hex_color_display_round_trip() {
        let color: HexColor = "#44cccccc".parse().unwrap();
        assert_eq!(color.to_string(), "#44cccccc");
        assert_eq!(color, default_background_color());
    }

    #[test]
    fn test_config_deserialization() {
        let json = r##"{
            "style": "sequential-sweep",
            "dot_color": "#ff2288ff",
            "top_padding": 40
        }"##;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.style, Style::SequentialSweep);
        assert_eq!(config.top_padding, 40);
        assert_eq!(config.background_color, default_background_color());
        assert_eq!(config.window_size, 300);

        let indicator = config.indicator_config();
        assert_eq!(indicator.style, Style::SequentialSweep);
        assert_eq!(indicator.dot_color, config.dot_color.0);
    }

    #[test]
    fn test_numeric_and_unknown_styles() {
        let config: Config = serde_json::from_str(r#"{ "style": 3 }"#).unwrap();
        assert_eq!(config.style, Style::ScalePulse);

        let config: Config = serde_json::from_str(r#"{ "style": 9 }"#).unwrap();
        assert_eq!(config.style, Style::Rotate);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.style, Style::Rotate);
        assert_eq!(config.dot_color, default_dot_color());
        assert_eq!(config.indicator_config(), IndicatorConfig::default());
    }

    #[test]
    fn test_reload_reports_window_size_change() {
        let previous = Config::default();
        let same: Config = serde_json::from_str(r#"{ "style": "sequential" }"#).unwrap();
        assert_eq!(same.resized_from(&previous), None);

        let grown: Config = serde_json::from_str(r#"{ "window_size": 480 }"#).unwrap();
        assert_eq!(grown.resized_from(&previous), Some(480));
        assert_eq!(previous.resized_from(&grown), Some(300));
    }

    #[test]
    fn test_default_config_file_parses() {
        let s = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .unwrap();
        let config: Config = s.try_deserialize().unwrap();
        assert_eq!(config.style, Style::Rotate);
        assert_eq!(config.dot_color, default_dot_color());
    }
}
