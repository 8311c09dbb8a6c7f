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


//! Command-line interface of the `gradtex` authoring tool.

use crate::authoring::TextureAuthoring;
use crate::session::{EditorSession, Project};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use gradtex_core::{ContainerFormat, Extent2D, FormatParameters};
use gradtex_io::{ColorSpace, ProjectSettings, SETTINGS_FILE_NAME};
use std::path::{Path, PathBuf};

/// Author and bake gradient textures.
#[derive(Parser, Debug)]
#[command(name = "gradtex", version, about)]
pub struct Cli {
    /// Project color space, overriding the settings file.
    #[arg(long, global = true, value_enum)]
    pub color_space: Option<ColorSpaceArg>,

    /// Project settings file.
    #[arg(long, global = true, default_value = SETTINGS_FILE_NAME)]
    pub settings: PathBuf,

    /// Log debug output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// The available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a gradient texture definition with default gradients
    New {
        /// Path of the `.ron` definition to create
        asset: PathBuf,
        /// Asset name (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,
        /// Texture width in pixels
        #[arg(long, default_value_t = 256)]
        width: u32,
        /// Texture height in pixels
        #[arg(long, default_value_t = 256)]
        height: u32,
        /// Store 8-bit pixels instead of 32-bit floats
        #[arg(long)]
        ldr: bool,
        /// Treat gradient colors as linear rather than sRGB
        #[arg(long)]
        linear_colors: bool,
        /// Generate a full mip chain
        #[arg(long)]
        mipmaps: bool,
        /// Use the top gradient only
        #[arg(long)]
        single: bool,
        /// Overwrite an existing definition
        #[arg(long)]
        force: bool,
    },
    /// Generate the texture and write it to an image file
    Bake {
        /// Path of the `.ron` definition
        asset: PathBuf,
        /// Output file (defaults to `{name}_baked.{ext}` in the output directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Container format (defaults to the output extension, else EXR for HDR and PNG for LDR)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
        /// JPEG quality
        #[arg(long, default_value_t = ContainerFormat::DEFAULT_JPEG_QUALITY,
              value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: u8,
    },
    /// Write a square PNG preview icon
    Icon {
        /// Path of the `.ron` definition
        asset: PathBuf,
        /// Output file (defaults to `{name}_icon.png` in the output directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Icon edge length in pixels (defaults to the settings value)
        #[arg(long)]
        size: Option<u32>,
    },
    /// Print the parameters of a definition and the state of its last bake
    Inspect {
        /// Path of the `.ron` definition
        asset: PathBuf,
    },
}

/// Command-line spelling of [`ColorSpace`].
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorSpaceArg {
    /// Linear lighting
    Linear,
    /// Gamma lighting
    Gamma,
}

impl From<ColorSpaceArg> for ColorSpace {
    fn from(arg: ColorSpaceArg) -> Self {
        match arg {
            ColorSpaceArg::Linear => ColorSpace::Linear,
            ColorSpaceArg::Gamma => ColorSpace::Gamma,
        }
    }
}

/// Command-line spelling of [`ContainerFormat`].
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    /// 8-bit PNG
    Png,
    /// 8-bit TGA
    Tga,
    /// 32-bit float OpenEXR
    Exr,
    /// 8-bit JPEG
    Jpeg,
}

impl FormatArg {
    /// The container, with `quality` applied to JPEG.
    pub fn container(self, quality: u8) -> ContainerFormat {
        match self {
            FormatArg::Png => ContainerFormat::Png,
            FormatArg::Tga => ContainerFormat::Tga,
            FormatArg::Exr => ContainerFormat::Exr,
            FormatArg::Jpeg => ContainerFormat::Jpeg { quality },
        }
    }
}

impl Cli {
    /// Loads the settings file and applies command-line overrides.
    pub fn project(&self) -> Result<Project> {
        let mut settings = ProjectSettings::load(&self.settings)?;
        if let Some(color_space) = self.color_space {
            settings.color_space = color_space.into();
        }
        let root = self
            .settings
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        Ok(Project::from_settings(&settings, root))
    }
}

/// Runs the parsed command.
pub fn run(cli: Cli) -> Result<()> {
    let project = cli.project()?;
    log::debug!("Project: {project:?}");

    match cli.command {
        Command::New {
            asset,
            name,
            width,
            height,
            ldr,
            linear_colors,
            mipmaps,
            single,
            force,
        } => {
            let params = FormatParameters {
                resolution: Extent2D::new(width, height),
                high_dynamic_range: !ldr,
                store_as_srgb: !linear_colors,
                generate_mipmaps: mipmaps,
                use_two_gradients: !single,
            };
            EditorSession::create(&asset, name.as_deref(), params, force, project)?;
            println!("Created {}", asset.display());
        }
        Command::Bake {
            asset,
            output,
            format,
            quality,
        } => {
            let mut session = EditorSession::open(&asset, project)?;
            let path = session.bake(output, format.map(|f| f.container(quality)))?;
            println!("Baked {}", path.display());
        }
        Command::Icon {
            asset,
            output,
            size,
        } => {
            let mut session = EditorSession::open(&asset, project)?;
            session.load_existing_texture()?;
            let path = session.icon(output, size)?;
            println!("Wrote {}", path.display());
        }
        Command::Inspect { asset } => {
            let mut session = EditorSession::open(&asset, project)?;
            let baked = session.load_existing_texture()?;
            print!("{}", session.summary());
            if !baked {
                println!("baked file:    none");
            }
        }
    }
    Ok(())
}
