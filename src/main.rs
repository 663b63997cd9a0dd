//! Command-line interface: collection export and one-off icon rendering.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use glyphforge::{
    DimensionValue, IconDescriptor, RenderProperties, export_file, serialize,
};

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Declarative SVG icon engine - export icon collections and render icons
#[derive(Parser)]
#[command(name = "glyphforge")]
#[command(about = "Declarative SVG icon engine - export icon collections and render icons")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a bulk icon collection into per-icon descriptor modules
    Export {
        /// Collection JSON file (icons, aliases, defaults)
        input: PathBuf,

        /// Output directory. Defaults to {input stem}/
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Render a descriptor module to an SVG string on stdout
    Render {
        /// Descriptor JSON file
        input: PathBuf,

        /// Width override (number, string with units, "auto", or "false")
        #[arg(long)]
        width: Option<String>,

        /// Height override (number, string with units, "auto", or "false")
        #[arg(long)]
        height: Option<String>,

        /// Replacement for currentColor
        #[arg(long)]
        color: Option<String>,

        /// Flip keywords: "horizontal", "vertical", or both
        #[arg(long)]
        flip: Option<String>,

        /// Rotation: quarter-turns, "<n>deg", or "<n>%"
        #[arg(long)]
        rotate: Option<String>,

        /// Alignment keywords, e.g. "left top crop"
        #[arg(long)]
        align: Option<String>,

        /// Render for inline (text-flow) placement
        #[arg(long)]
        inline: bool,

        /// Append the transparent bounding-box marker rectangle
        #[arg(long = "box")]
        box_marker: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export { input, out_dir } => run_export(&input, out_dir),
        Commands::Render {
            input,
            width,
            height,
            color,
            flip,
            rotate,
            align,
            inline,
            box_marker,
        } => run_render(
            &input, width, height, color, flip, rotate, align, inline, box_marker,
        ),
    }
}

fn run_export(input: &PathBuf, out_dir: Option<PathBuf>) -> ExitCode {
    let out_dir = out_dir.unwrap_or_else(|| {
        input
            .file_stem()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("icons"))
    });

    match export_file(input, &out_dir) {
        Ok(count) => {
            println!("Exported {} descriptors to {}", count, out_dir.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_render(
    input: &PathBuf,
    width: Option<String>,
    height: Option<String>,
    color: Option<String>,
    flip: Option<String>,
    rotate: Option<String>,
    align: Option<String>,
    inline: bool,
    box_marker: bool,
) -> ExitCode {
    let json = match fs::read_to_string(input) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    let icon: IconDescriptor = match serde_json::from_str(&json) {
        Ok(icon) => icon,
        Err(e) => {
            eprintln!("Error: invalid descriptor '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut props = RenderProperties::new();
    props.width = width.as_deref().map(DimensionValue::parse);
    props.height = height.as_deref().map(DimensionValue::parse);
    props.color = color;
    props.flip = flip;
    props.rotate = rotate.map(|spec| spec.as_str().into());
    props.align = align;
    if inline {
        props.inline = Some(true);
    }
    if box_marker {
        props.box_marker = Some(true);
    }

    println!("{}", serialize(&icon, &props, &[]));
    ExitCode::from(EXIT_SUCCESS)
}
