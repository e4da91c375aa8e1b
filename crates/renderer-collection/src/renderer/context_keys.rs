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

//! Frame-level key types for [`RenderContext`](super::RenderContext).
//!
//! | Key            | Meaning                                  |
//! |----------------|------------------------------------------|
//! | [`FrameIndex`] | Monotonic index of the frame being drawn |
//! | [`FrameDelta`] | Seconds elapsed since the previous frame |

/// Index of the frame the current pass belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameIndex(pub u64);

/// Time elapsed since the previous frame, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDelta(pub f32);
