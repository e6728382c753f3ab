//! Configuration persistence for mapposter settings

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

/// Overlay fill color, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OverlayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl OverlayColor {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self {
        r: 0xff,
        g: 0xff,
        b: 0xff,
    };
    /// Default color for new icons (#0066FF)
    pub const ICON_BLUE: Self = Self {
        r: 0x00,
        g: 0x66,
        b: 0xff,
    };

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl Default for OverlayColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for OverlayColor {
    type Err = anyhow::Error;

    /// Accepts `#rgb` and `#rrggbb`, with or without the leading `#`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            bail!("invalid color {s:?}");
        }
        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).with_context(|| format!("invalid color {s:?}"))
        };
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
                Ok(Self {
                    r: expand(0)?,
                    g: expand(1)?,
                    b: expand(2)?,
                })
            }
            6 => Ok(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            _ => bail!("invalid color {s:?}"),
        }
    }
}

impl TryFrom<String> for OverlayColor {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<OverlayColor> for String {
    fn from(c: OverlayColor) -> Self {
        c.to_string()
    }
}

impl fmt::Display for OverlayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Where exported posters are written
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveLocation {
    #[default]
    Pictures,
    Documents,
    Custom(PathBuf),
}

impl SaveLocation {
    /// Resolve the directory, falling back to the home folder layout
    pub fn dir(&self) -> Option<PathBuf> {
        match self {
            SaveLocation::Pictures => {
                dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
            }
            SaveLocation::Documents => {
                dirs::document_dir().or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
            }
            SaveLocation::Custom(path) => Some(path.clone()),
        }
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterConfig {
    /// Output size selected when a session starts
    pub output_size: String,
    /// Map style selected when a session starts
    pub map_style: String,
    /// Distance in pixels within which dragged text snaps to the viewport center
    pub snap_threshold: f32,
    /// Degrees within which a rotation snaps to a common angle
    pub rotation_snap_tolerance: f32,
    /// Wait after entering capture mode, in milliseconds
    pub capture_settle_ms: u64,
    /// Wait after fonts are loaded, in milliseconds
    pub font_settle_ms: u64,
    /// Upper bound on waiting for a single font family, in milliseconds
    pub font_load_timeout_ms: u64,
    /// Extra directories scanned for font files
    pub font_dirs: Vec<PathBuf>,
    /// Where exported posters are written
    pub save_location: SaveLocation,
    /// Whether overlay positions follow the viewport when it is resized
    pub renormalize_on_resize: bool,
}

impl PosterConfig {
    /// Directory name under the platform config dir
    pub const ID: &'static str = "mapposter";

    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("Could not determine config directory, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => {
                log::debug!("No config at {}: {}", path.display(), err);
                return Self::default();
            }
        };
        match serde_json::from_str(&data) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            log::error!("Could not determine config directory for saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {err:#}");
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data).with_context(|| format!("writing {}", path.display()))
    }

    pub fn capture_settle(&self) -> Duration {
        Duration::from_millis(self.capture_settle_ms)
    }

    pub fn font_settle(&self) -> Duration {
        Duration::from_millis(self.font_settle_ms)
    }

    pub fn font_load_timeout(&self) -> Duration {
        Duration::from_millis(self.font_load_timeout_ms)
    }
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            output_size: "18x24\"".to_string(),
            map_style: "Positron".to_string(),
            snap_threshold: 20.0,
            rotation_snap_tolerance: 5.0,
            capture_settle_ms: 300,
            font_settle_ms: 100,
            font_load_timeout_ms: 3000,
            font_dirs: Vec::new(),
            save_location: SaveLocation::Pictures,
            renormalize_on_resize: false,
        }
    }
}
