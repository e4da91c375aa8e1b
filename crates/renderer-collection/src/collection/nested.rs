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

//! Lets a whole collection act as a single member of another collection.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::RendererCollection;
use crate::error::{CollectionError, RendererError};
use crate::renderer::{RenderContext, Renderer};

/// A [`RendererCollection`] wrapped so it can be shared as a [`Renderer`].
///
/// Drawing it runs a pass of the inner collection and disposing it tears the
/// inner collection down. Initialization is a no-op: the inner members are
/// initialized lazily by the inner pass.
///
/// The name is captured when the wrapper is built.
pub struct CollectionRenderer<R: Renderer + ?Sized = dyn Renderer> {
    name: String,
    inner: Mutex<RendererCollection<R>>,
}

impl<R: Renderer + ?Sized> CollectionRenderer<R> {
    /// Wraps `collection`.
    pub fn new(collection: RendererCollection<R>) -> Self {
        Self {
            name: collection.name().to_owned(),
            inner: Mutex::new(collection),
        }
    }

    /// Locks the inner collection, e.g. to edit its members between passes.
    ///
    /// Must not be called from inside one of the inner members' lifecycle
    /// calls.
    pub fn lock(&self) -> MutexGuard<'_, RendererCollection<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Unwraps the inner collection.
    pub fn into_inner(self) -> RendererCollection<R> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Renderer + ?Sized> Renderer for CollectionRenderer<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn draw(&self, ctx: &mut RenderContext) -> Result<(), RendererError> {
        self.lock().run_pass(ctx).map_err(into_renderer_error)
    }

    fn dispose(&self) -> Result<(), RendererError> {
        self.lock().teardown().map_err(into_renderer_error)
    }
}

fn into_renderer_error(err: CollectionError) -> RendererError {
    match err {
        CollectionError::MemberFailure(e) => e,
        other => RendererError::DrawFailed(Box::new(other)),
    }
}
