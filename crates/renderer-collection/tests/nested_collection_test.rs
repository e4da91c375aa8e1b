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

mod common;

use std::sync::Arc;

use common::*;
use renderer_collection::{
    CollectionConfig, CollectionRenderer, PassMarker, RenderContext, RendererCollection,
    RendererError, RendererHandle,
};

fn nested_stage(name: &str, members: &[&Arc<Recording>]) -> Arc<CollectionRenderer> {
    let mut inner: RendererCollection =
        RendererCollection::with_config(CollectionConfig::named(name));
    for member in members {
        inner.push(handle(member)).unwrap();
    }
    Arc::new(CollectionRenderer::new(inner))
}

#[test]
fn test_nested_stage_draws_inline_with_parent_order() {
    // --- 1. ARRANGE ---
    init_logger();
    let log = CallLog::new();
    let pre = Recording::new("pre", &log);
    let x = Recording::new("x", &log);
    let y = Recording::new("y", &log);
    let post = Recording::new("post", &log);
    let stage = nested_stage("PostProcess", &[&x, &y]);

    let mut outer: RendererCollection = RendererCollection::new();
    outer.push(handle(&pre)).unwrap();
    outer.push(RendererHandle::from_shared(stage.clone())).unwrap();
    outer.push(handle(&post)).unwrap();

    // --- 2. ACT ---
    let mut ctx = RenderContext::new();
    outer.run_pass(&mut ctx).unwrap();

    // --- 3. ASSERT ---
    assert_eq!(
        log.take(),
        vec![
            init("pre"),
            draw("pre"),
            init("x"),
            draw("x"),
            init("y"),
            draw("y"),
            init("post"),
            draw("post"),
        ]
    );
    // Nested collections stay silent by default.
    assert!(ctx.markers().is_empty());

    outer.teardown().unwrap();
}

#[test]
fn test_removing_nested_stage_disposes_its_members() {
    init_logger();
    let log = CallLog::new();
    let x = Recording::new("x", &log);
    let y = Recording::new("y", &log);
    let stage = nested_stage("Overlay", &[&x, &y]);
    let stage_handle = RendererHandle::from_shared(stage.clone());

    let mut outer: RendererCollection = RendererCollection::new();
    outer.push(stage_handle.clone()).unwrap();
    let mut ctx = RenderContext::new();
    outer.run_pass(&mut ctx).unwrap();
    log.take();

    outer.remove(&stage_handle);
    outer.run_pass(&mut ctx).unwrap();

    assert_eq!(log.take(), vec![dispose("x"), dispose("y")]);
    assert!(stage.lock().is_empty());
    assert_eq!(stage.lock().live_count(), 0);
}

#[test]
fn test_inner_member_failure_surfaces_verbatim() {
    init_logger();
    let log = CallLog::new();
    let x = Recording::new("x", &log);
    let stage = nested_stage("Inner", &[&x]);
    stage.lock().config_mut().profiling = true;

    let mut outer: RendererCollection =
        RendererCollection::with_config(CollectionConfig::named("Outer").with_profiling(true));
    outer
        .push(RendererHandle::from_shared(stage.clone()))
        .unwrap();

    x.fail_on(Some(Stage::Draw));
    let mut ctx = RenderContext::new();
    let err = outer.run_pass(&mut ctx).unwrap_err();

    assert!(matches!(
        err.member_error(),
        Some(RendererError::DrawFailed(_))
    ));
    assert_eq!(err.to_string(), "Renderer draw failed: x refused to Draw");
    assert_eq!(
        ctx.take_markers(),
        vec![
            PassMarker::Begin("Outer".into()),
            PassMarker::Begin("Inner".into()),
            PassMarker::End("Inner".into()),
            PassMarker::End("Outer".into()),
        ]
    );

    x.fail_on(None);
    outer.teardown().unwrap();
    assert_eq!(log.take(), vec![init("x"), draw("x"), dispose("x")]);
}

#[test]
fn test_members_can_be_edited_through_the_lock_between_passes() {
    init_logger();
    let log = CallLog::new();
    let x = Recording::new("x", &log);
    let y = Recording::new("y", &log);
    let stage = nested_stage("Dynamic", &[&x]);

    let mut outer: RendererCollection = RendererCollection::new();
    outer
        .push(RendererHandle::from_shared(stage.clone()))
        .unwrap();
    let mut ctx = RenderContext::new();
    outer.run_pass(&mut ctx).unwrap();
    log.take();

    {
        let mut inner = stage.lock();
        inner.clear();
        inner.push(handle(&y)).unwrap();
    }
    outer.run_pass(&mut ctx).unwrap();

    assert_eq!(log.take(), vec![init("y"), draw("y"), dispose("x")]);
    outer.teardown().unwrap();
}
