use crate::command::Theme;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted widget settings. Session state (counters, elapsed time) is
/// never written to disk; only these user preferences survive a restart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WidgetConfig {
    pub timer_minutes: u32,
    pub theme: Theme,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            timer_minutes: 0,
            theme: Theme::Light,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> WidgetConfig;
    fn save(&self, cfg: &WidgetConfig) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "typometer") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("typometer_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> WidgetConfig {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<WidgetConfig>(&bytes) {
                return cfg;
            }
        }
        WidgetConfig::default()
    }

    fn save(&self, cfg: &WidgetConfig) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
