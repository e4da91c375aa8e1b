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

//! The renderer collection and its per-pass membership diff.

use std::ops::Index;

use ahash::AHashSet;

use crate::config::CollectionConfig;
use crate::error::{CollectionError, RendererError};
use crate::renderer::{FrameIndex, RenderContext, Renderer, RendererHandle};

mod nested;
mod serialization;

pub use nested::CollectionRenderer;

/// An ordered sequence of renderers that handles their `initialize` and
/// `dispose` calls automatically as membership changes between passes.
///
/// The sequence API ([`push`](Self::push), [`insert`](Self::insert),
/// [`remove`](Self::remove), [`clear`](Self::clear), ...) only edits the
/// current sequence. Lifecycle calls happen exclusively in
/// [`run_pass`](Self::run_pass) and [`teardown`](Self::teardown).
///
/// ## Pass semantics
///
/// For each member, in sequence order:
/// - not drawn by the previous pass: `initialize`, then `draw`;
/// - drawn by the previous pass: `draw` only.
///
/// Afterwards every member drawn by the previous pass but absent now is
/// disposed. The order of those disposals is unspecified.
///
/// ## Duplicates
///
/// The same handle may appear several times. Every occurrence is drawn, but
/// the renderer is initialized at most once per pass and disposed once.
///
/// ## Failures
///
/// A failing member aborts the pass and its error is returned unchanged as
/// [`CollectionError::MemberFailure`]. Bookkeeping stays consistent:
/// - a member whose `initialize` failed is not tracked and will be
///   initialized again on the next pass that contains it;
/// - a member whose `draw` failed stays tracked;
/// - previous members not reached before the abort stay tracked;
/// - a member whose `dispose` failed counts as disposed, and the members
///   still waiting to be disposed are retried on the next pass.
///
/// ## Threading
///
/// No internal locking. Callers serialize mutation and passes on one thread.
pub struct RendererCollection<R: Renderer + ?Sized = dyn Renderer> {
    config: CollectionConfig,
    // The sequence callers see and edit.
    current: Vec<RendererHandle<R>>,
    // Members drawn by the last pass; each one is initialized and not yet disposed.
    previous: AHashSet<RendererHandle<R>>,
    // Reused across passes; empty outside of run_pass/teardown.
    scratch: AHashSet<RendererHandle<R>>,
    // Never-initialized members a failed teardown still owes a dispose.
    leftovers: Vec<RendererHandle<R>>,
}

impl<R: Renderer + ?Sized> RendererCollection<R> {
    /// Creates an empty collection with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CollectionConfig::default())
    }

    /// Creates an empty collection with the given configuration.
    pub fn with_config(config: CollectionConfig) -> Self {
        Self {
            config,
            current: Vec::new(),
            previous: AHashSet::new(),
            scratch: AHashSet::new(),
            leftovers: Vec::new(),
        }
    }

    /// The collection's configuration.
    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Mutable access to the configuration; takes effect on the next pass.
    pub fn config_mut(&mut self) -> &mut CollectionConfig {
        &mut self.config
    }

    /// The collection's name, as configured.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    // --- Sequence operations ---

    /// Appends a renderer at the end of the sequence.
    pub fn push(
        &mut self,
        item: impl Into<Option<RendererHandle<R>>>,
    ) -> Result<(), CollectionError> {
        let item = non_null(item, "item")?;
        self.current.push(item);
        Ok(())
    }

    /// Inserts a renderer at `index`, shifting later members. `index` may
    /// equal [`len`](Self::len).
    pub fn insert(
        &mut self,
        index: usize,
        item: impl Into<Option<RendererHandle<R>>>,
    ) -> Result<(), CollectionError> {
        let item = non_null(item, "item")?;
        if index > self.current.len() {
            return Err(self.out_of_range(index));
        }
        self.current.insert(index, item);
        Ok(())
    }

    /// Removes the first occurrence of `item`. Returns `false` if it was not
    /// in the sequence.
    pub fn remove(&mut self, item: &RendererHandle<R>) -> bool {
        match self.index_of(item) {
            Some(index) => {
                self.current.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the renderer at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<RendererHandle<R>, CollectionError> {
        if index >= self.current.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.current.remove(index))
    }

    /// Returns the renderer at `index`.
    pub fn get(&self, index: usize) -> Result<&RendererHandle<R>, CollectionError> {
        self.current
            .get(index)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Replaces the renderer at `index`, returning the one it replaced.
    pub fn set(
        &mut self,
        index: usize,
        item: impl Into<Option<RendererHandle<R>>>,
    ) -> Result<RendererHandle<R>, CollectionError> {
        let item = non_null(item, "value")?;
        let len = self.current.len();
        let slot = self
            .current
            .get_mut(index)
            .ok_or(CollectionError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, item))
    }

    /// Empties the sequence without disposing anything.
    ///
    /// Members drawn by the last pass are disposed by the next pass unless
    /// they are added back before it, or by [`teardown`](Self::teardown).
    pub fn clear(&mut self) {
        self.current.clear();
    }

    /// Returns `true` if `item` is in the sequence.
    pub fn contains(&self, item: &RendererHandle<R>) -> bool {
        self.current.contains(item)
    }

    /// Position of the first occurrence of `item`.
    pub fn index_of(&self, item: &RendererHandle<R>) -> Option<usize> {
        self.current.iter().position(|h| h == item)
    }

    /// Number of entries in the sequence, duplicates included.
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Returns `true` if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Copies the sequence into `dest` starting at `start`.
    pub fn copy_to(
        &self,
        dest: &mut [RendererHandle<R>],
        start: usize,
    ) -> Result<(), CollectionError> {
        let end = start
            .checked_add(self.current.len())
            .filter(|&end| end <= dest.len())
            .ok_or(CollectionError::IndexOutOfRange {
                index: start,
                len: dest.len(),
            })?;
        dest[start..end].clone_from_slice(&self.current);
        Ok(())
    }

    /// The sequence as a slice.
    pub fn as_slice(&self) -> &[RendererHandle<R>] {
        &self.current
    }

    /// Iterates the sequence in order.
    pub fn iter(&self) -> std::slice::Iter<'_, RendererHandle<R>> {
        self.current.iter()
    }

    // --- Lifecycle ---

    /// Runs one draw pass: initializes new members, draws every member in
    /// sequence order and disposes members that left since the last pass.
    pub fn run_pass(&mut self, ctx: &mut RenderContext) -> Result<(), CollectionError> {
        if !self.config.enabled {
            log::trace!("Collection '{}' is disabled, skipping pass", self.config.name);
            return Ok(());
        }

        if self.config.profiling {
            ctx.begin_pass(&self.config.name);
        }
        let result = self.draw_members(ctx);
        if self.config.profiling {
            ctx.end_pass(&self.config.name);
        }
        result
    }

    fn draw_members(&mut self, ctx: &mut RenderContext) -> Result<(), CollectionError> {
        // 1. Last pass's members become the pending set; `previous` is rebuilt below.
        debug_assert!(self.scratch.is_empty());
        std::mem::swap(&mut self.previous, &mut self.scratch);

        // 2. Draw in sequence order, initializing members that were not drawn last pass.
        let mut failure: Option<RendererError> = None;
        for handle in &self.current {
            let is_member = self.scratch.remove(handle) || self.previous.contains(handle);
            if !is_member {
                log::debug!(
                    "Collection '{}': initializing '{}'",
                    self.config.name,
                    handle.name()
                );
                if let Err(e) = handle.initialize(ctx) {
                    failure = Some(e);
                    break;
                }
                if !self.leftovers.is_empty() {
                    self.leftovers.retain(|h| h != handle);
                }
            }

            self.previous.insert(handle.clone());

            log::trace!("Collection '{}': drawing '{}'", self.config.name, handle.name());
            if let Err(e) = handle.draw(ctx) {
                failure = Some(e);
                break;
            }
        }

        if let Some(e) = failure {
            log::debug!(
                "Collection '{}': pass aborted, {} pending member(s) kept alive",
                self.config.name,
                self.scratch.len()
            );
            self.previous.extend(self.scratch.drain());
            return Err(e.into());
        }

        // 3. Whatever is still pending was drawn last pass but is gone now.
        let mut removed = self.scratch.drain();
        while let Some(handle) = removed.next() {
            log::debug!(
                "Collection '{}': disposing removed '{}'",
                self.config.name,
                handle.name()
            );
            if let Err(e) = handle.dispose() {
                self.previous.extend(removed);
                return Err(e.into());
            }
        }
        drop(removed);

        log::trace!(
            "Collection '{}': pass done ({} drawn, frame {:?})",
            self.config.name,
            self.current.len(),
            ctx.get::<FrameIndex>().map(|f| f.0)
        );
        Ok(())
    }

    /// Disposes every member and empties the collection.
    ///
    /// Each distinct member of the sequence is disposed once, in sequence
    /// order, whether or not a pass ever initialized it. Members drawn by the
    /// last pass but removed from the sequence since then are disposed too.
    /// Afterwards the collection is equivalent to a new one.
    ///
    /// Stops at the first failing `dispose`. That member counts as disposed.
    /// The members still waiting are kept for the next `teardown`, which
    /// disposes exactly those. Initialized ones stay live; never-initialized
    /// ones are held apart and are not members for [`run_pass`](Self::run_pass),
    /// so adding one back initializes it before its first draw.
    pub fn teardown(&mut self) -> Result<(), CollectionError> {
        self.scratch.clear();

        let mut pending =
            Vec::with_capacity(self.current.len() + self.previous.len() + self.leftovers.len());
        let candidates = self
            .current
            .drain(..)
            .chain(self.previous.iter().cloned())
            .chain(self.leftovers.drain(..));
        for handle in candidates {
            if self.scratch.insert(handle.clone()) {
                pending.push(handle);
            }
        }
        self.scratch.clear();

        let mut pending = pending.into_iter();
        while let Some(handle) = pending.next() {
            self.previous.remove(&handle);
            log::debug!(
                "Collection '{}': disposing '{}' on teardown",
                self.config.name,
                handle.name()
            );
            if let Err(e) = handle.dispose() {
                // `previous` now holds exactly the live members not yet disposed.
                self.leftovers
                    .extend(pending.filter(|h| !self.previous.contains(h)));
                return Err(e.into());
            }
        }
        debug_assert!(self.previous.is_empty());
        Ok(())
    }

    /// Number of members currently tracked as initialized and not disposed.
    pub fn live_count(&self) -> usize {
        self.previous.len()
    }

    /// Returns `true` if `item` has been initialized and not disposed since.
    ///
    /// That covers members drawn by the last pass, plus members a failed pass
    /// or teardown has not reached yet.
    pub fn is_live(&self, item: &RendererHandle<R>) -> bool {
        self.previous.contains(item)
    }

    fn out_of_range(&self, index: usize) -> CollectionError {
        CollectionError::IndexOutOfRange {
            index,
            len: self.current.len(),
        }
    }
}

fn non_null<R: ?Sized>(
    item: impl Into<Option<RendererHandle<R>>>,
    argument: &'static str,
) -> Result<RendererHandle<R>, CollectionError> {
    let item: Option<RendererHandle<R>> = item.into();
    item.ok_or(CollectionError::InvalidArgument { argument })
}

impl<R: Renderer + ?Sized> Default for RendererCollection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer + ?Sized> Drop for RendererCollection<R> {
    fn drop(&mut self) {
        let undisposed = self.previous.len() + self.leftovers.len();
        if undisposed > 0 {
            log::warn!(
                "Collection '{}' dropped with {} undisposed renderer(s); call teardown() to dispose them",
                self.config.name,
                undisposed
            );
        }
    }
}

impl<R: Renderer + ?Sized> Index<usize> for RendererCollection<R> {
    type Output = RendererHandle<R>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.current[index]
    }
}

impl<'a, R: Renderer + ?Sized> IntoIterator for &'a RendererCollection<R> {
    type Item = &'a RendererHandle<R>;
    type IntoIter = std::slice::Iter<'a, RendererHandle<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.current.iter()
    }
}

impl<R: Renderer + ?Sized> std::fmt::Debug for RendererCollection<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererCollection")
            .field("name", &self.config.name)
            .field("len", &self.current.len())
            .field("live", &self.previous.len())
            .finish()
    }
}
