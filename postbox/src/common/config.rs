/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::path::Path;
use std::time::Duration;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::common::FailurePolicy;

/// Configuration for postbox actors.
///
/// Loaded once from `config.toml` in the XDG config directory for `postbox`;
/// every section falls back to its defaults when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostboxConfig {
    /// Timeout configuration
    pub timeouts: TimeoutConfig,
    /// Default values configuration
    pub defaults: DefaultsConfig,
}

/// Timeout-related configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// How long `ActorHandle::stop` waits for an actor to drain, in milliseconds
    pub actor_shutdown_ms: u64,
}

/// Default values applied to actors created without an explicit config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default actor name when none provided
    pub actor_name: String,
    /// What an actor does when a handler fails
    pub failure_policy: FailurePolicy,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            actor_shutdown_ms: 10_000,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            actor_name: "actor".to_string(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl PostboxConfig {
    /// Actor shutdown timeout as a `Duration`.
    pub const fn actor_shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.actor_shutdown_ms)
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load configuration from XDG-compliant locations
    ///
    /// Looks for `$XDG_CONFIG_HOME/postbox/config.toml` (then the XDG config
    /// dirs). A missing file yields the defaults; an unreadable or malformed
    /// file is logged and also yields the defaults.
    pub fn load() -> Self {
        use tracing::{error, info};

        let xdg_dirs = match xdg::BaseDirectories::with_prefix("postbox") {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        let Some(path) = xdg_dirs.find_config_file("config.toml") else {
            info!("No configuration file found, using defaults");
            return Self::default();
        };

        Self::load_from(&path)
    }

    /// Reads one configuration file, falling back to the defaults (with an
    /// error log) when it cannot be read or parsed.
    pub fn load_from(path: &Path) -> Self {
        use tracing::{error, info};

        info!("Loading configuration from: {}", path.display());
        match std::fs::read_to_string(path) {
            Ok(config_str) => match Self::from_toml(&config_str) {
                Ok(config) => config,
                Err(e) => {
                    error!("Failed to parse configuration file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read configuration file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

lazy_static! {
    /// Global configuration instance loaded from XDG-compliant locations
    pub static ref CONFIG: PostboxConfig = PostboxConfig::load();
}
