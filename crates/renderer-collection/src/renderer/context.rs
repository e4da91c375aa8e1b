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

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// A begin or end marker recorded in a [`RenderContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassMarker {
    /// A named pass started.
    Begin(String),
    /// A named pass finished.
    End(String),
}

/// A type-erased, extensible context passed through a draw pass.
///
/// The owning pipeline stage populates it with whatever its renderers need
/// (targets, frame counters, device handles) and every lifecycle call
/// receives it. Renderers retrieve data by type using [`get`](RenderContext::get).
///
/// ```rust
/// use renderer_collection::renderer::{FrameIndex, RenderContext};
///
/// let mut ctx = RenderContext::new();
/// ctx.insert(FrameIndex(7));
///
/// assert_eq!(ctx.get::<FrameIndex>(), Some(&FrameIndex(7)));
/// ```
///
/// The context also collects [`PassMarker`]s for stages that profile their
/// passes.
pub struct RenderContext {
    data: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    markers: Vec<PassMarker>,
}

impl RenderContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            markers: Vec::new(),
        }
    }

    /// Inserts a value, keyed by its concrete type.
    ///
    /// If a value of the same type was already present, it is replaced.
    pub fn insert<T: 'static + Send + Sync>(&mut self, value: T) {
        self.data.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Returns a shared reference to a value by type.
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.data.get(&TypeId::of::<T>())?.downcast_ref()
    }

    /// Returns a mutable reference to a value by type.
    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.data.get_mut(&TypeId::of::<T>())?.downcast_mut()
    }

    /// Checks whether a value of the given type is present.
    pub fn contains<T: 'static>(&self) -> bool {
        self.data.contains_key(&TypeId::of::<T>())
    }

    /// Removes and returns a value by type.
    pub fn remove<T: 'static>(&mut self) -> Option<T> {
        self.data
            .remove(&TypeId::of::<T>())
            .and_then(|b| b.downcast().ok().map(|b| *b))
    }

    /// Records the start of a named pass.
    pub fn begin_pass(&mut self, name: &str) {
        log::trace!("Begin pass '{name}'");
        self.markers.push(PassMarker::Begin(name.to_owned()));
    }

    /// Records the end of a named pass.
    pub fn end_pass(&mut self, name: &str) {
        log::trace!("End pass '{name}'");
        self.markers.push(PassMarker::End(name.to_owned()));
    }

    /// Markers recorded so far, in emission order.
    pub fn markers(&self) -> &[PassMarker] {
        &self.markers
    }

    /// Drains the recorded markers, typically once per frame.
    pub fn take_markers(&mut self) -> Vec<PassMarker> {
        std::mem::take(&mut self.markers)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("entries", &self.data.len())
            .field("markers", &self.markers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{FrameDelta, FrameIndex};

    #[test]
    fn test_typed_entries() {
        let mut ctx = RenderContext::new();
        ctx.insert(FrameIndex(1));
        ctx.insert(FrameDelta(0.016));

        assert!(ctx.contains::<FrameIndex>());
        ctx.get_mut::<FrameIndex>().unwrap().0 += 1;
        assert_eq!(ctx.get::<FrameIndex>(), Some(&FrameIndex(2)));

        assert_eq!(ctx.remove::<FrameIndex>(), Some(FrameIndex(2)));
        assert!(!ctx.contains::<FrameIndex>());
        assert!(ctx.get::<u32>().is_none());
    }

    #[test]
    fn test_insert_replaces_same_type() {
        let mut ctx = RenderContext::new();
        ctx.insert(FrameIndex(1));
        ctx.insert(FrameIndex(9));
        assert_eq!(ctx.get::<FrameIndex>(), Some(&FrameIndex(9)));
    }

    #[test]
    fn test_markers_are_recorded_and_drained() {
        let mut ctx = RenderContext::new();
        ctx.begin_pass("Opaque");
        ctx.end_pass("Opaque");

        assert_eq!(
            ctx.markers(),
            &[
                PassMarker::Begin("Opaque".into()),
                PassMarker::End("Opaque".into())
            ]
        );
        assert_eq!(ctx.take_markers().len(), 2);
        assert!(ctx.markers().is_empty());
    }
}
