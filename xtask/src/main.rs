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

// Workspace automation. Run with: cargo xtask <command>

mod ci;
mod helpers;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask", version, about = "Workspace tasks for renderer-collection")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Run unit, integration, property and doc tests.
    Test,
    /// Type-check every target.
    Check,
    /// Lint with warnings denied.
    Clippy,
    /// Format the workspace.
    Fmt {
        /// Only verify formatting.
        #[arg(long)]
        check: bool,
    },
    /// fmt --check, check, clippy and test in one go.
    Ci,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Task::Test => ci::test(),
        Task::Check => ci::check(),
        Task::Clippy => ci::clippy(),
        Task::Fmt { check } => ci::fmt(check),
        Task::Ci => ci::all(),
    }
}
