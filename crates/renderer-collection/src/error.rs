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

//! Error types for renderers and for the collection that sequences them.

use thiserror::Error;

/// Boxed source error carried by the failure variants of [`RendererError`].
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An error reported by a [`Renderer`](crate::Renderer) from one of its
/// lifecycle calls.
#[derive(Debug, Error)]
pub enum RendererError {
    /// The renderer was asked to draw before it was initialized.
    #[error("Renderer not initialized")]
    NotInitialized,
    /// The render context is missing data the renderer needs.
    #[error("Invalid render context: expected {expected}, got {received}")]
    InvalidContext {
        /// What the renderer expected.
        expected: &'static str,
        /// Description of what was received.
        received: String,
    },
    /// Resource acquisition failed in `initialize`.
    #[error("Renderer initialization failed: {0}")]
    InitializationFailed(#[source] BoxedError),
    /// Drawing failed in `draw`.
    #[error("Renderer draw failed: {0}")]
    DrawFailed(#[source] BoxedError),
    /// Releasing resources failed in `dispose`.
    #[error("Renderer dispose failed: {0}")]
    DisposeFailed(#[source] BoxedError),
}

impl RendererError {
    /// Convenience constructor for a missing context entry.
    pub fn missing(type_name: &'static str) -> Self {
        RendererError::InvalidContext {
            expected: type_name,
            received: "not found in RenderContext".into(),
        }
    }
}

/// An error reported by a [`RendererCollection`](crate::RendererCollection).
#[derive(Debug, Error)]
pub enum CollectionError {
    /// A null handle was passed where a renderer is required.
    #[error("Invalid argument `{argument}`: renderer handle must not be null")]
    InvalidArgument {
        /// Name of the rejected argument.
        argument: &'static str,
    },
    /// An indexed operation was given an index outside the collection.
    #[error("Index {index} is out of range for {len} renderers")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The length it was checked against.
        len: usize,
    },
    /// A member failed during `initialize`, `draw` or `dispose`.
    #[error(transparent)]
    MemberFailure(#[from] RendererError),
}

impl CollectionError {
    /// Returns the member's own error if this is a [`MemberFailure`](Self::MemberFailure).
    pub fn member_error(&self) -> Option<&RendererError> {
        match self {
            CollectionError::MemberFailure(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_member_failure_is_transparent() {
        let inner = RendererError::DrawFailed("device lost".into());
        let err = CollectionError::from(inner);
        assert_eq!(err.to_string(), "Renderer draw failed: device lost");
        assert!(matches!(
            err.member_error(),
            Some(RendererError::DrawFailed(_))
        ));
    }

    #[test]
    fn test_failure_variants_expose_source() {
        let err = RendererError::InitializationFailed("out of memory".into());
        assert_eq!(err.source().unwrap().to_string(), "out of memory");
        assert!(RendererError::NotInitialized.source().is_none());
    }

    #[test]
    fn test_missing_context_entry_message() {
        let err = RendererError::missing("FrameIndex");
        assert_eq!(
            err.to_string(),
            "Invalid render context: expected FrameIndex, got not found in RenderContext"
        );
    }
}
