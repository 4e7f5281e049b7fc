use crate::events::AppEvent;
use async_channel::Sender;
use colorwheel::config::{self as wheel_config, ConfigError, WheelConfig};
use derive_more::{Deref, From, Into};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgb;
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::str::FromStr;

pub const DEFAULT_COLORS: &[&str] = &[
    "#e6194b", "#f58231", "#ffe119", "#3cb44b", "#42d4f4", "#4363d8", "#911eb4", "#f032e6",
];

/// A `#rrggbb` color from the config file.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, DeserializeFromStr)]
pub struct HexColor(Srgb<u8>);

impl FromStr for HexColor {
    type Err = palette::rgb::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<Srgb<u8>>().map(HexColor)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct HostConfig {
    #[serde(flatten)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub colors: Vec<HexColor>,
}

impl HostConfig {
    /// Configured colors, or the built-in palette when none are set.
    pub fn palette(&self) -> Vec<HexColor> {
        if !self.colors.is_empty() {
            return self.colors.clone();
        }
        DEFAULT_COLORS
            .iter()
            .filter_map(|c| HexColor::from_str(c).ok())
            .collect()
    }
}

pub fn load_host_config() -> Result<HostConfig, ConfigError> {
    wheel_config::load()
}

pub fn load_or_default() -> HostConfig {
    match load_host_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default config: {}", e);
            HostConfig::default()
        }
    }
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match wheel_config::get_config_path() {
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
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
