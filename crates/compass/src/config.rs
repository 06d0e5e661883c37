// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::error::{CompassError, CompassResult};
use dotenvy::dotenv;
use llm_contracts::ProviderConfig;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

pub const API_KEY_VARS: [&str; 2] = ["COMPASS_OPENAI_API_KEY", "OPENAI_API_KEY"];

#[derive(Clone, Deserialize)]
pub struct CompassConfig {
    #[serde(skip)]
    pub api_key: String,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub normalizer: NormalizerSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NormalizerSettings {
    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

fn default_top_k() -> u32 {
    3
}

impl Default for NormalizerSettings {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

impl fmt::Debug for CompassConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompassConfig")
            .field("api_key", &"<redacted>")
            .field("provider", &self.provider)
            .field("normalizer", &self.normalizer)
            .finish()
    }
}

impl CompassConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            provider: ProviderConfig::default(),
            normalizer: NormalizerSettings::default(),
        }
    }

    pub fn from_env() -> CompassResult<Self> {
        dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> CompassResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::with_api_key(String::new());
        config.apply_env(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> CompassResult<Self> {
        dotenv().ok();
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading compass configuration");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text, |name| std::env::var(name).ok())
    }

    pub fn from_toml_str<F>(text: &str, lookup: F) -> CompassResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(text)?;
        config.apply_env(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env<F>(&mut self, lookup: &F) -> CompassResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.api_key = API_KEY_VARS
            .iter()
            .find_map(|name| lookup(name).filter(|value| !value.trim().is_empty()))
            .ok_or_else(|| CompassError::MissingApiKey {
                vars: API_KEY_VARS.to_vec(),
            })?;

        if let Some(model) = lookup("COMPASS_MODEL") {
            self.provider.model = model;
        }
        if let Some(endpoint) = lookup("COMPASS_ENDPOINT") {
            self.provider.endpoint = endpoint;
        }
        if let Some(timeout) = lookup("COMPASS_TIMEOUT_SECONDS") {
            self.provider.timeout_seconds = timeout.trim().parse().map_err(|_| {
                CompassError::InvalidConfig(format!(
                    "COMPASS_TIMEOUT_SECONDS must be a whole number of seconds, got '{timeout}'"
                ))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> CompassResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(CompassError::MissingApiKey {
                vars: API_KEY_VARS.to_vec(),
            });
        }
        if self.provider.endpoint.trim().is_empty() {
            return Err(CompassError::InvalidConfig(
                "provider.endpoint must not be empty".to_string(),
            ));
        }
        if self.provider.model.trim().is_empty() {
            return Err(CompassError::InvalidConfig(
                "provider.model must not be empty".to_string(),
            ));
        }
        if self.provider.timeout_seconds == 0 {
            return Err(CompassError::InvalidConfig(
                "provider.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.provider.max_attempts == 0 {
            return Err(CompassError::InvalidConfig(
                "provider.max_attempts must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(CompassError::InvalidConfig(format!(
                "provider.temperature must be within 0..=2, got {}",
                self.provider.temperature
            )));
        }
        if self.normalizer.top_k == 0 {
            return Err(CompassError::InvalidConfig(
                "normalizer.top_k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
