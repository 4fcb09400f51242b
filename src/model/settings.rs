use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_GIF_URL: &str = "https://media1.giphy.com/media/26tPplGWjN0xLybiU/giphy.gif";
pub const DEFAULT_IMAGE_URL: &str = "https://imgflip.com/i/9uj9l8";
pub const DEFAULT_BANNER: &str = "LEVEL UP! YOU DID IT!";
pub const DEFAULT_MARQUEE: &str = "\u{1F680}";

/// How the completion surprise is presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurpriseMode {
    #[default]
    #[serde(rename = "GIF")]
    Gif,
    #[serde(rename = "Image")]
    Image,
    #[serde(rename = "CSS")]
    Css,
}

impl SurpriseMode {
    pub const ALL: [SurpriseMode; 3] = [SurpriseMode::Gif, SurpriseMode::Image, SurpriseMode::Css];

    pub fn as_str(self) -> &'static str {
        match self {
            SurpriseMode::Gif => "GIF",
            SurpriseMode::Image => "Image",
            SurpriseMode::Css => "CSS",
        }
    }

    /// Next mode in selector order, wrapping around
    pub fn next(self) -> Self {
        match self {
            SurpriseMode::Gif => SurpriseMode::Image,
            SurpriseMode::Image => SurpriseMode::Css,
            SurpriseMode::Css => SurpriseMode::Gif,
        }
    }

    /// Previous mode in selector order, wrapping around
    pub fn prev(self) -> Self {
        match self {
            SurpriseMode::Gif => SurpriseMode::Css,
            SurpriseMode::Image => SurpriseMode::Gif,
            SurpriseMode::Css => SurpriseMode::Image,
        }
    }
}

impl fmt::Display for SurpriseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for settings validation
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid surprise mode '{0}': expected GIF, Image or CSS")]
    InvalidMode(String),
}

impl FromStr for SurpriseMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GIF" => Ok(SurpriseMode::Gif),
            "Image" => Ok(SurpriseMode::Image),
            "CSS" => Ok(SurpriseMode::Css),
            other => Err(SettingsError::InvalidMode(other.to_string())),
        }
    }
}

/// Display customization (settings.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: SurpriseMode,
    #[serde(rename = "gif")]
    pub gif_url: String,
    #[serde(rename = "img")]
    pub image_url: String,
    #[serde(rename = "banner")]
    pub banner_text: String,
    #[serde(rename = "marquee")]
    pub marquee_emoji: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            mode: SurpriseMode::Gif,
            gif_url: DEFAULT_GIF_URL.to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            banner_text: DEFAULT_BANNER.to_string(),
            marquee_emoji: DEFAULT_MARQUEE.to_string(),
        }
    }
}

/// What to show when a task reaches 100%
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surprise {
    /// Animated image reference
    Gif(String),
    /// Still image reference
    Image(String),
    /// Styled banner text
    Banner(String),
}

/// A partial settings change. `None` leaves the field as it is.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub mode: Option<String>,
    pub gif_url: Option<String>,
    pub image_url: Option<String>,
    pub banner_text: Option<String>,
    pub marquee_emoji: Option<String>,
}

impl Settings {
    /// The surprise presentation for the current mode
    pub fn surprise(&self) -> Surprise {
        match self.mode {
            SurpriseMode::Gif => Surprise::Gif(self.gif_url.clone()),
            SurpriseMode::Image => Surprise::Image(self.image_url.clone()),
            SurpriseMode::Css => Surprise::Banner(self.banner_text.clone()),
        }
    }

    /// Apply an update. The mode is validated before any field changes.
    pub fn update(&mut self, fields: SettingsUpdate) -> Result<(), SettingsError> {
        let mode = fields.mode.as_deref().map(str::parse).transpose()?;
        if let Some(mode) = mode {
            self.mode = mode;
        }
        if let Some(gif) = fields.gif_url {
            self.gif_url = gif;
        }
        if let Some(img) = fields.image_url {
            self.image_url = img;
        }
        if let Some(banner) = fields.banner_text {
            self.banner_text = banner;
        }
        if let Some(marquee) = fields.marquee_emoji {
            self.marquee_emoji = marquee;
        }
        Ok(())
    }
}
