// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application services: persisted settings plus the platform drawer service.

use std::path::{Path, PathBuf};

use drawerkick_core::AppConfig;
use drawerkick_core::error::Result;
use drawerkick_print::DrawerService;
use tracing::{debug, info, warn};

/// Everything a command needs, built once per invocation.
pub struct AppServices {
    data_dir: PathBuf,
    config: AppConfig,
    drawer: DrawerService,
}

impl AppServices {
    /// Services around an already loaded `config` stored under `dir`.
    pub fn with_config(dir: PathBuf, config: AppConfig) -> Self {
        let drawer = DrawerService::platform(&config);
        info!(driver = drawer.driver_name(), "drawer service ready");
        Self {
            data_dir: dir,
            config,
            drawer,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn drawer(&self) -> &DrawerService {
        &self.drawer
    }

    /// Persist `config` and rebuild the drawer service around it.
    pub fn save_config(&mut self, config: AppConfig) -> Result<()> {
        persist_config(&self.data_dir, &config)?;
        if config.spool_dir != self.config.spool_dir {
            self.drawer = DrawerService::platform(&config);
        } else {
            self.drawer = self.drawer.clone().with_defaults(config.drawer);
        }
        self.config = config;
        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";

/// Settings stored under `data_dir`, or defaults.
pub fn load_settings(data_dir: &Path) -> AppConfig {
    load_config(data_dir).unwrap_or_else(|| {
        debug!(path = %data_dir.display(), "no usable config.json; using defaults");
        AppConfig::default()
    })
}

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed config.json");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
