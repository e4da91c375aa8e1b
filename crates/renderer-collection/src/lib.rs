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

//! # Renderer Collection
//!
//! An ordered container of [`Renderer`]s that behaves like a single rendering
//! stage. Pipeline stages push, insert and remove members freely between
//! frames; each call to [`RendererCollection::run_pass`] works out which
//! members are new (initialize, then draw), which are continuing (draw only)
//! and which disappeared since the previous pass (dispose, not drawn).
//!
//! ```rust
//! use renderer_collection::{
//!     RenderContext, Renderer, RendererCollection, RendererError, RendererHandle,
//! };
//!
//! struct Clear;
//!
//! impl Renderer for Clear {
//!     fn name(&self) -> &str {
//!         "Clear"
//!     }
//!
//!     fn draw(&self, _ctx: &mut RenderContext) -> Result<(), RendererError> {
//!         Ok(())
//!     }
//! }
//!
//! let mut stage: RendererCollection = RendererCollection::new();
//! stage.push(RendererHandle::from_renderer(Clear)).unwrap();
//!
//! let mut ctx = RenderContext::new();
//! stage.run_pass(&mut ctx).unwrap();
//! stage.teardown().unwrap();
//! assert!(stage.is_empty());
//! ```
//!
//! ## Threading
//!
//! Everything here is synchronous. The collection does no locking of its own:
//! mutating it and running passes must happen from one thread at a time
//! (`&mut self` enforces this for a directly owned collection). The only
//! lock lives in [`CollectionRenderer`], which exists so a collection can be
//! shared as a member of another collection.

#![warn(missing_docs)]

pub mod collection;
pub mod config;
pub mod error;
pub mod renderer;

pub use collection::{CollectionRenderer, RendererCollection};
pub use config::CollectionConfig;
pub use error::{CollectionError, RendererError};
pub use renderer::{PassMarker, RenderContext, Renderer, RendererHandle};
