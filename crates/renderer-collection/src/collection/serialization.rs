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

//! Persists a collection as the plain list of its members.
//!
//! Only the current sequence is written. Configuration and pass bookkeeping
//! are runtime state: a deserialized collection starts with every member
//! new, so its first pass initializes all of them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::RendererCollection;
use crate::renderer::{Renderer, RendererHandle};

impl<R: Renderer + Serialize> Serialize for RendererCollection<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.current.iter().map(|handle| &**handle))
    }
}

impl<'de, R: Renderer + Deserialize<'de>> Deserialize<'de> for RendererCollection<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let members = Vec::<R>::deserialize(deserializer)?;
        let mut collection = Self::new();
        collection.current = members.into_iter().map(RendererHandle::new).collect();
        Ok(collection)
    }
}
