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


use anyhow::Result;
use clap::Parser;
use gradtex_editor::Cli;

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    gradtex_editor::run(cli)
}
