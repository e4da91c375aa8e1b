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

//! Shared fixtures: a renderer that records every lifecycle call into a log
//! shared by all renderers of a test.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use renderer_collection::{RenderContext, Renderer, RendererError, RendererHandle};

/// One recorded lifecycle call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Call {
    Initialize(String),
    Draw(String),
    Dispose(String),
}

impl Call {
    pub fn name(&self) -> &str {
        match self {
            Call::Initialize(n) | Call::Draw(n) | Call::Dispose(n) => n,
        }
    }
}

pub fn init(name: &str) -> Call {
    Call::Initialize(name.to_owned())
}

pub fn draw(name: &str) -> Call {
    Call::Draw(name.to_owned())
}

pub fn dispose(name: &str) -> Call {
    Call::Dispose(name.to_owned())
}

/// Ordered log of calls, shared between renderers.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    /// Returns and clears everything recorded so far.
    pub fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

/// Lifecycle stage a [`Recording`] can be told to fail in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Initialize,
    Draw,
    Dispose,
}

/// A renderer that logs its calls and can be made to fail.
pub struct Recording {
    name: String,
    log: CallLog,
    fail_on: Mutex<Option<Stage>>,
}

impl Recording {
    pub fn new(name: &str, log: &CallLog) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_owned(),
            log: log.clone(),
            fail_on: Mutex::new(None),
        })
    }

    pub fn fail_on(&self, stage: Option<Stage>) {
        *self.fail_on.lock().unwrap() = stage;
    }

    fn check(&self, stage: Stage) -> Result<(), RendererError> {
        if *self.fail_on.lock().unwrap() != Some(stage) {
            return Ok(());
        }
        let cause = format!("{} refused to {:?}", self.name, stage).into();
        Err(match stage {
            Stage::Initialize => RendererError::InitializationFailed(cause),
            Stage::Draw => RendererError::DrawFailed(cause),
            Stage::Dispose => RendererError::DisposeFailed(cause),
        })
    }
}

impl Renderer for Recording {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&self, _ctx: &mut RenderContext) -> Result<(), RendererError> {
        self.log.record(Call::Initialize(self.name.clone()));
        self.check(Stage::Initialize)
    }

    fn draw(&self, _ctx: &mut RenderContext) -> Result<(), RendererError> {
        self.log.record(Call::Draw(self.name.clone()));
        self.check(Stage::Draw)
    }

    fn dispose(&self) -> Result<(), RendererError> {
        self.log.record(Call::Dispose(self.name.clone()));
        self.check(Stage::Dispose)
    }
}

/// Type-erased handle sharing `renderer`.
pub fn handle(renderer: &Arc<Recording>) -> RendererHandle<dyn Renderer> {
    RendererHandle::from_shared(Arc::clone(renderer))
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
