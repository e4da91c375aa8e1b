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

//! # Renderer Abstraction
//!
//! The capability every member of a [`RendererCollection`](crate::RendererCollection)
//! provides, and the handle type the collection stores.
//!
//! ## Lifecycle
//!
//! ```text
//! initialize(ctx)  →  [ draw(ctx) ]*  →  dispose()
//! ```
//!
//! - **`initialize`** is called once each time the renderer enters a
//!   collection's membership, right before its first draw.
//! - **`draw`** is called once per pass for every occurrence in the sequence.
//! - **`dispose`** is called once when the membership ends, either because a
//!   pass found the renderer gone or because the collection was torn down.
//!   It may run without a prior `initialize` (a renderer that was added and
//!   torn down before any pass), so implementations must not assume one.
//!
//! `initialize` and `dispose` are the only places a renderer should acquire
//! and release its own GPU resources.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use crate::error::RendererError;

mod context;
pub mod context_keys;

pub use context::{PassMarker, RenderContext};
pub use context_keys::*;

/// A drawable stage that can be sequenced by a [`RendererCollection`](crate::RendererCollection).
///
/// Methods take `&self`: handles are shared, so implementors keep mutable
/// state behind interior mutability.
///
/// ```rust,ignore
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// struct Skybox { ready: AtomicBool }
///
/// impl Renderer for Skybox {
///     fn name(&self) -> &str { "Skybox" }
///
///     fn initialize(&self, _ctx: &mut RenderContext) -> Result<(), RendererError> {
///         self.ready.store(true, Ordering::Relaxed);
///         Ok(())
///     }
///
///     fn draw(&self, _ctx: &mut RenderContext) -> Result<(), RendererError> {
///         if !self.ready.load(Ordering::Relaxed) {
///             return Err(RendererError::NotInitialized);
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Renderer: Send + Sync {
    /// Human-readable name, used for logging and pass markers.
    fn name(&self) -> &str;

    /// Prepares the renderer for drawing. May allocate resources.
    ///
    /// Default is a no-op returning `Ok(())`.
    fn initialize(&self, _ctx: &mut RenderContext) -> Result<(), RendererError> {
        Ok(())
    }

    /// Performs the drawing work for the current pass.
    fn draw(&self, ctx: &mut RenderContext) -> Result<(), RendererError>;

    /// Releases whatever `initialize` acquired.
    ///
    /// Default is a no-op returning `Ok(())`.
    fn dispose(&self) -> Result<(), RendererError> {
        Ok(())
    }
}

/// A shared, reference-counted handle to a renderer.
///
/// Two handles are equal only when they point at the same renderer instance;
/// structurally identical renderers behind different allocations are
/// different members. Cloning a handle is cheap and keeps the identity.
pub struct RendererHandle<R: ?Sized>(Arc<R>);

impl<R> RendererHandle<R> {
    /// Creates a handle that takes ownership of `renderer`.
    pub fn new(renderer: R) -> Self {
        Self(Arc::new(renderer))
    }
}

impl<R: ?Sized> RendererHandle<R> {
    /// Wraps a renderer that is already shared elsewhere.
    pub fn from_arc(renderer: Arc<R>) -> Self {
        Self(renderer)
    }

    /// Returns the underlying shared pointer.
    pub fn as_arc(&self) -> &Arc<R> {
        &self.0
    }

    /// Returns `true` if both handles refer to the same renderer instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl RendererHandle<dyn Renderer> {
    /// Creates a type-erased handle that takes ownership of `renderer`.
    pub fn from_renderer<T: Renderer + 'static>(renderer: T) -> Self {
        Self(Arc::new(renderer))
    }

    /// Creates a type-erased handle sharing a concrete renderer, so the
    /// caller can keep its typed `Arc` around.
    pub fn from_shared<T: Renderer + 'static>(renderer: Arc<T>) -> Self {
        Self(renderer)
    }
}

impl<R: ?Sized> Clone for RendererHandle<R> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<R: ?Sized> Deref for RendererHandle<R> {
    type Target = R;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<R: ?Sized> PartialEq for RendererHandle<R> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<R: ?Sized> Eq for RendererHandle<R> {}

impl<R: ?Sized> Hash for RendererHandle<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl<R: ?Sized> fmt::Debug for RendererHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RendererHandle").field(&self.addr()).finish()
    }
}

impl<R: ?Sized> From<Arc<R>> for RendererHandle<R> {
    fn from(renderer: Arc<R>) -> Self {
        Self(renderer)
    }
}
