//! Screen configuration (TOML).
//!
//! ```toml
//! [screens.choose]
//! layout = "binary2"
//! items  = ["All Poses", "Training"]
//!
//! [screens.all_poses]
//! layout      = "grid2col"
//! items       = ["Tree Style", "Warrior2 Style", "Plank"]
//! cooldown_ms = 1000
//! swipe       = false
//!
//! [screens.all_poses.channel]
//! poll_interval_ms = 750
//! initial_delay_ms = 1000
//!
//! [routines]
//! "Morning Wake-up Flow" = ["Mountain pose", "Child's pose"]
//! ```
//!
//! The hold-to-confirm duration is fixed at [`HOLD_TO_CONFIRM`] and cannot
//! be configured.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::debounce::{BINARY_COOLDOWN, GRID_COOLDOWN};
use crate::hold::HOLD_TO_CONFIRM;
use crate::layout::{LayoutError, NavLayout};
use crate::navigator::{NavSettings, Navigator};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io { path: PathBuf, #[source] source: std::io::Error },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("screen '{screen}': {source}")]
    Layout { screen: String, #[source] source: LayoutError },
    #[error("screen '{0}': cooldown_ms must be greater than zero")]
    ZeroCooldown(String),
    #[error("screen '{0}': poll_interval_ms must be greater than zero")]
    ZeroPollInterval(String),
    #[error("no screen named '{0}'")]
    UnknownScreen(String),
    #[error("routine '{0}' has no poses")]
    EmptyRoutine(String),
}

/// Layout name as written in the file.  The grid size comes from `items`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenLayout {
    Chain10,
    Grid2Col,
    Binary2,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        ChannelConfig {
            poll_interval_ms: default_poll_interval_ms(),
            initial_delay_ms: default_initial_delay_ms(),
        }
    }
}

impl ChannelConfig {
    pub fn poll_interval(&self) -> Duration { Duration::from_millis(self.poll_interval_ms) }
    pub fn initial_delay(&self) -> Duration { Duration::from_millis(self.initial_delay_ms) }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub layout: ScreenLayout,
    pub items:  Vec<String>,
    /// Falls back to 500 ms for binary2 and 1000 ms otherwise.
    #[serde(default)]
    pub cooldown_ms: Option<u64>,
    /// Wrist swipe as an extra Back/Confirm source.
    #[serde(default)]
    pub swipe: bool,
    #[serde(default)]
    pub channel: ChannelConfig,
}

fn default_poll_interval_ms() -> u64 { 750 }
fn default_initial_delay_ms() -> u64 { 1000 }

impl ScreenConfig {
    pub fn new(layout: ScreenLayout, items: &[&str]) -> Self {
        ScreenConfig {
            layout,
            items:       items.iter().map(|s| s.to_string()).collect(),
            cooldown_ms: None,
            swipe:       false,
            channel:     ChannelConfig::default(),
        }
    }

    pub fn cooldown(&self) -> Duration {
        match (self.cooldown_ms, self.layout) {
            (Some(ms), _)                 => Duration::from_millis(ms),
            (None, ScreenLayout::Binary2) => BINARY_COOLDOWN,
            (None, _)                     => GRID_COOLDOWN,
        }
    }

    pub fn nav_layout(&self) -> Result<NavLayout, LayoutError> {
        match self.layout {
            ScreenLayout::Chain10  => NavLayout::chain10(self.items.iter().cloned()),
            ScreenLayout::Grid2Col => NavLayout::grid2col(self.items.iter().cloned()),
            ScreenLayout::Binary2  => match self.items.as_slice() {
                [a, b] => Ok(NavLayout::binary2(a.clone(), b.clone())),
                other  => Err(LayoutError::ItemCount { kind: "binary2", expected: 2, found: other.len() }),
            },
        }
    }

    pub fn settings(&self) -> NavSettings {
        NavSettings { cooldown: self.cooldown(), hold: HOLD_TO_CONFIRM, swipe: self.swipe }
    }

    /// Fresh navigator for one entry into this screen.
    pub fn navigator(&self) -> Result<Navigator, LayoutError> {
        Ok(Navigator::new(self.nav_layout()?, self.settings()))
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        self.nav_layout()
            .map_err(|source| ConfigError::Layout { screen: name.to_string(), source })?;
        if self.cooldown_ms == Some(0) {
            return Err(ConfigError::ZeroCooldown(name.to_string()));
        }
        if self.channel.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval(name.to_string()));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// NavConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavConfig {
    #[serde(default)]
    pub screens: BTreeMap<String, ScreenConfig>,
    /// Training routine name → ordered poses.
    #[serde(default)]
    pub routines: BTreeMap<String, Vec<String>>,
}

impl NavConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: NavConfig = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let cfg = NavConfig::from_toml_str(&text)?;
        debug!(path = %path.display(), screens = cfg.screens.len(), "config loaded");
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, screen) in &self.screens {
            screen.validate(name)?;
        }
        if let Some((name, _)) = self.routines.iter().find(|(_, poses)| poses.is_empty()) {
            return Err(ConfigError::EmptyRoutine(name.clone()));
        }
        Ok(())
    }

    pub fn screen(&self, name: &str) -> Result<&ScreenConfig, ConfigError> {
        self.screens.get(name).ok_or_else(|| ConfigError::UnknownScreen(name.to_string()))
    }

    pub fn routine(&self, name: &str) -> Option<&[String]> {
        self.routines.get(name).map(Vec::as_slice)
    }

    /// The four menus of the yoga app: main pose list, mode choice, every
    /// pose, and the training routines.
    pub fn builtin() -> Self {
        let mut screens = BTreeMap::new();
        screens.insert("main".to_string(), ScreenConfig::new(ScreenLayout::Chain10, &ALL_POSES[..10]));
        screens.insert("choose".to_string(), ScreenConfig::new(ScreenLayout::Binary2, &["All Poses", "Training"]));
        screens.insert("all_poses".to_string(), ScreenConfig::new(ScreenLayout::Grid2Col, &ALL_POSES));
        let names: Vec<&str> = ROUTINES.iter().map(|(name, _)| *name).collect();
        screens.insert("training".to_string(), ScreenConfig::new(ScreenLayout::Grid2Col, &names));

        let routines = ROUTINES
            .iter()
            .map(|(name, poses)| (name.to_string(), poses.iter().map(|p| p.to_string()).collect()))
            .collect();
        NavConfig { screens, routines }
    }
}

const ALL_POSES: [&str; 20] = [
    "Tree Style", "Warrior2 Style", "Plank", "Reverse Plank", "Child's pose",
    "Seated Forward Bend", "Low Lunge", "Downward dog", "Pyramid pose", "Bridge pose",
    "Mountain pose", "Triangle pose", "Locust pose", "Cobra pose", "Half moon pose",
    "Boat pose", "Camel pose", "Pigeon pose", "Fish pose", "Chair pose",
];

const ROUTINES: [(&str, [&str; 6]); 6] = [
    ("Morning Wake-up Flow",
     ["Mountain pose", "Warrior2 Style", "Triangle pose", "Low Lunge", "Downward dog", "Child's pose"]),
    ("Full-Body Strength",
     ["Tree Style", "Plank", "Cobra pose", "Boat pose", "Bridge pose", "Seated Forward Bend"]),
    ("Balance and Stability",
     ["Locust pose", "Pigeon pose", "Half moon pose", "Reverse Plank", "Pyramid pose", "Chair pose"]),
    ("Core Strength Flow",
     ["Mountain pose", "Tree Style", "Warrior2 Style", "Triangle pose", "Downward dog", "Child's pose"]),
    ("Flexibility and Stretch",
     ["Locust pose", "Cobra pose", "Camel pose", "Fish pose", "Low Lunge", "Bridge pose"]),
    ("Core Inferno",
     ["Plank", "Boat pose", "Reverse Plank", "Low Lunge", "Chair pose", "Bridge pose"]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutKind;
    use std::io::Write;

    #[test]
    fn builtin_is_valid() {
        let cfg = NavConfig::builtin();
        cfg.validate().unwrap();
        assert_eq!(cfg.screens.len(), 4);
        assert_eq!(cfg.screen("main").unwrap().nav_layout().unwrap().kind(), LayoutKind::Chain10);
        assert_eq!(cfg.screen("all_poses").unwrap().nav_layout().unwrap().kind(), LayoutKind::Grid2Col(20));
        assert_eq!(cfg.screen("training").unwrap().items.len(), 6);
        assert_eq!(cfg.routine("Core Inferno").map(|r| r.len()), Some(6));
    }

    #[test]
    fn default_cooldowns_follow_layout() {
        let cfg = NavConfig::builtin();
        assert_eq!(cfg.screen("choose").unwrap().cooldown(), Duration::from_millis(500));
        assert_eq!(cfg.screen("main").unwrap().cooldown(), Duration::from_millis(1000));
    }

    #[test]
    fn parses_screens_with_defaults() {
        let cfg = NavConfig::from_toml_str(
            r#"
            [screens.pick]
            layout = "binary2"
            items  = ["yes", "no"]

            [screens.grid]
            layout      = "grid2col"
            items       = ["a", "b", "c"]
            cooldown_ms = 250
            swipe       = true

            [screens.grid.channel]
            poll_interval_ms = 100
            "#,
        )
        .unwrap();
        let pick = cfg.screen("pick").unwrap();
        assert_eq!(pick.layout, ScreenLayout::Binary2);
        assert_eq!(pick.channel, ChannelConfig::default());
        let grid = cfg.screen("grid").unwrap();
        assert_eq!(grid.cooldown(), Duration::from_millis(250));
        assert!(grid.settings().swipe);
        assert_eq!(grid.channel.poll_interval(), Duration::from_millis(100));
        assert_eq!(grid.channel.initial_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn wrong_item_counts_are_rejected() {
        let err = NavConfig::from_toml_str(
            r#"
            [screens.main]
            layout = "chain10"
            items  = ["only", "three", "items"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Layout { ref screen, .. } if screen == "main"));

        let err = NavConfig::from_toml_str(
            r#"
            [screens.pick]
            layout = "binary2"
            items  = ["a", "b", "c"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Layout { .. }));
    }

    #[test]
    fn zero_durations_are_rejected() {
        let err = NavConfig::from_toml_str(
            r#"
            [screens.g]
            layout      = "grid2col"
            items       = ["a"]
            cooldown_ms = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCooldown(_)));

        let err = NavConfig::from_toml_str(
            r#"
            [screens.g]
            layout = "grid2col"
            items  = ["a"]
            [screens.g.channel]
            poll_interval_ms = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroPollInterval(_)));
    }

    #[test]
    fn unknown_layout_is_a_parse_error() {
        let err = NavConfig::from_toml_str("[screens.x]\nlayout = \"ring\"\nitems = [\"a\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_screen() {
        let cfg = NavConfig::builtin();
        assert!(matches!(cfg.screen("settings"), Err(ConfigError::UnknownScreen(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[screens.pick]\nlayout = \"binary2\"\nitems = [\"left\", \"right\"]").unwrap();
        let cfg = NavConfig::load(file.path()).unwrap();
        let nav = cfg.screen("pick").unwrap().navigator().unwrap();
        assert_eq!(nav.layout().items(), ["left", "right"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = NavConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
