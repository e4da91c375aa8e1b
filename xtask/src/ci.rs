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

use crate::helpers::*;
use anyhow::{bail, Result};
use std::time::Instant;

pub fn test() -> Result<()> {
    print_task_start("Tests", GREEN);
    cargo(&["test", "--workspace"], "Tests")
}

pub fn check() -> Result<()> {
    print_task_start("Check", CYAN);
    cargo(&["check", "--workspace", "--all-targets"], "Check")
}

pub fn clippy() -> Result<()> {
    print_task_start("Clippy", YELLOW);
    cargo(
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        "Clippy",
    )
}

/// Formats the workspace, or only verifies formatting when `verify` is set.
pub fn fmt(verify: bool) -> Result<()> {
    print_task_start("Format", MAGENTA);
    if verify {
        cargo(&["fmt", "--all", "--", "--check"], "Format check")
    } else {
        cargo(&["fmt", "--all"], "Format")
    }
}

/// Runs every task in order and reports a summary. Keeps going after a
/// failure so one run shows every broken step.
pub fn all() -> Result<()> {
    print_banner();

    let start = Instant::now();
    let tasks: [(&str, fn() -> Result<()>); 4] = [
        ("fmt", || fmt(true)),
        ("check", check),
        ("clippy", clippy),
        ("test", test),
    ];

    let mut failed = Vec::new();
    for (i, (name, task)) in tasks.iter().enumerate() {
        println!("\n{BOLD}{BLUE}[{}/{}] {name}{RESET}", i + 1, tasks.len());
        if task().is_err() {
            failed.push(*name);
        }
    }

    let secs = start.elapsed().as_secs_f64();
    if failed.is_empty() {
        print_success(&format!("all {} tasks passed in {secs:.2}s", tasks.len()));
        Ok(())
    } else {
        print_error(&format!("failed: {} ({secs:.2}s)", failed.join(", ")));
        bail!("{}/{} tasks failed", failed.len(), tasks.len());
    }
}
