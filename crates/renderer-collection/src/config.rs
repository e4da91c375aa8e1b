// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration for a [`RendererCollection`](crate::RendererCollection).
//!
//! Configurations are plain serde structs and can be authored in RON:
//!
//! ```ron
//! (
//!     name: "PostProcess",
//!     profiling: true,
//! )
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

const DEFAULT_NAME: &str = "RendererCollection";

/// Settings shared by every pass a collection runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Name used in log lines and pass markers.
    pub name: String,
    /// When `false`, passes are skipped entirely and membership bookkeeping
    /// is left untouched.
    pub enabled: bool,
    /// Emit begin/end pass markers around each pass.
    ///
    /// Off by default: a collection is usually embedded in its parent's pass.
    pub profiling: bool,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            enabled: true,
            profiling: false,
        }
    }
}

impl CollectionConfig {
    /// Default configuration with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style toggle for pass markers.
    #[must_use]
    pub fn with_profiling(mut self, profiling: bool) -> Self {
        self.profiling = profiling;
        self
    }

    /// Parses a configuration from RON text. Missing fields take their defaults.
    pub fn from_ron_str(source: &str) -> anyhow::Result<Self> {
        ron::from_str(source).context("Failed to parse collection config")
    }

    /// Loads a configuration from a RON file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read collection config '{}'", path.display()))?;
        Self::from_ron_str(&source)
            .with_context(|| format!("Invalid collection config '{}'", path.display()))
    }
}
