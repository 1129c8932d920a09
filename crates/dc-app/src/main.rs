// ABOUTME: Command line entry point for deep-colour.
// ABOUTME: Inspects colours, renders selector planes to PNG and edits saved swatches.

mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dc_core::{ConfigError, DeepColour, SelectorConfig, Swatches};
use dc_selector::{pixel_bytes, ColourSelector, Notification, Param};
use report::ColourReport;

/// Largest width or height `render` will draw
const MAX_RENDER_SIZE: u32 = 8192;

#[derive(Debug, Parser)]
#[command(bin_name = "deep-colour")]
#[command(about = "Inspect colours and preview a colour selector's planes")]
#[command(version)]
#[command(arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    global: GlobalOptions,
}

#[derive(Debug, Args)]
struct GlobalOptions {
    #[arg(global = true, long, help = "Config file to use instead of the default location")]
    config: Option<PathBuf>,

    #[arg(global = true, long, help = "Print machine readable JSON")]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[clap(about = "Describe a hex colour, e.g. `deep-colour inspect '#336699'`")]
    Inspect { colour: DeepColour },

    #[clap(about = "Build a colour from hue (degrees), saturation and brightness (percent)")]
    Hsb {
        hue: f32,
        saturation: f32,
        brightness: f32,
        #[arg(long, default_value_t = 255.0, help = "Alpha, 0 to 255")]
        alpha: f32,
    },

    #[clap(about = "Render the plane (or strip) for a parameter to a PNG file")]
    Render {
        #[arg(long, value_parser = parse_param, default_value = "hue")]
        param: Param,
        #[arg(long, help = "Colour to render around, defaults to the configured initial colour")]
        colour: Option<DeepColour>,
        #[arg(long, help = "Render the 1D strip instead of the 2D plane")]
        strip: bool,
        #[arg(long, default_value_t = 256)]
        width: u32,
        #[arg(long, default_value_t = 256)]
        height: u32,
        output: PathBuf,
    },

    #[clap(about = "List or edit the saved swatches")]
    Swatch {
        #[command(subcommand)]
        action: SwatchAction,
    },
}

#[derive(Debug, Subcommand)]
enum SwatchAction {
    List,
    Set { index: usize, colour: DeepColour },
    Add { colour: DeepColour },
}

fn parse_param(name: &str) -> Result<Param, String> {
    Param::all()
        .iter()
        .copied()
        .find(|p| p.label().eq_ignore_ascii_case(name) || p.short_label() == name)
        .ok_or_else(|| {
            let names: Vec<_> = Param::all().iter().map(|p| p.label()).collect();
            format!("unknown parameter '{}', expected one of {}", name, names.join(", "))
        })
}

fn config_path(global: &GlobalOptions) -> Result<PathBuf, ConfigError> {
    match &global.config {
        Some(path) => Ok(path.clone()),
        None => SelectorConfig::default_path().ok_or(ConfigError::NoConfigDir),
    }
}

/// Config for read-only commands: a broken file falls back to defaults.
fn read_config(global: &GlobalOptions) -> SelectorConfig {
    match &global.config {
        Some(path) => SelectorConfig::load_or_default_from(path),
        None => SelectorConfig::load_or_default(),
    }
}

/// Config for commands that write it back: a broken file is an error so it
/// isn't overwritten.
fn load_config_for_edit(path: &Path) -> Result<SelectorConfig> {
    if path.exists() {
        SelectorConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
    } else {
        Ok(SelectorConfig::default())
    }
}

fn print_colour(colour: &DeepColour, json: bool) -> Result<()> {
    let report = ColourReport::new(colour);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

fn render(
    global: &GlobalOptions,
    param: Param,
    colour: Option<DeepColour>,
    strip: bool,
    (width, height): (u32, u32),
    output: &Path,
) -> Result<()> {
    anyhow::ensure!(
        (1..=MAX_RENDER_SIZE).contains(&width) && (1..=MAX_RENDER_SIZE).contains(&height),
        "Render size {}x{} must be between 1 and {} on each side",
        width,
        height,
        MAX_RENDER_SIZE
    );

    let config = read_config(global);
    let mut selector = ColourSelector::from_config(&config)?;
    if let Some(colour) = colour {
        selector.set_current_colour(colour, Notification::DontSend);
    }
    selector.set_active_param(param);

    let colour = selector.current_colour();
    let pixels = if strip {
        selector.strip().render(&colour, width, height)
    } else {
        selector.plane().render(&colour, width, height)
    };

    let image = image::RgbaImage::from_raw(width, height, pixel_bytes(&pixels).to_vec())
        .context("Rendered pixels do not fill the image")?;
    image
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!("Rendered {} to {}", param.label(), output.display());
    Ok(())
}

fn swatch(global: &GlobalOptions, action: SwatchAction) -> Result<()> {
    let path = config_path(global)?;
    let mut config = load_config_for_edit(&path)?;

    match action {
        SwatchAction::List => {
            if global.json {
                println!("{}", serde_json::to_string_pretty(&config.swatches)?);
            } else {
                for (i, colour) in config.swatches.iter().enumerate() {
                    println!("{:>3}  {}", i, colour);
                }
            }
            return Ok(());
        }
        SwatchAction::Set { index, colour } => {
            // Goes through the selector so hidden alpha is dropped the same way
            let mut selector = ColourSelector::from_config(&config)?;
            selector.set_current_colour(colour, Notification::DontSend);
            if !selector.store_swatch(&mut config.swatches, index)? {
                tracing::info!("Swatch {} already {}", index, colour);
                return Ok(());
            }
        }
        SwatchAction::Add { colour } => {
            config.swatches.push(colour);
            tracing::info!("Added swatch {}", config.swatches.len() - 1);
        }
    }

    config.save(&path)?;
    tracing::info!("Saved {}", path.display());
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Inspect { colour } => print_colour(&colour, cli.global.json),
        Command::Hsb {
            hue,
            saturation,
            brightness,
            alpha,
        } => {
            let colour = DeepColour::from_hsb(
                (hue / 360.0).clamp(0.0, 1.0),
                (saturation / 100.0).clamp(0.0, 1.0),
                (brightness / 100.0).clamp(0.0, 1.0),
                (alpha / 255.0).clamp(0.0, 1.0),
            );
            print_colour(&colour, cli.global.json)
        }
        Command::Render {
            param,
            colour,
            strip,
            width,
            height,
            output,
        } => render(&cli.global, param, colour, strip, (width, height), &output),
        Command::Swatch { action } => swatch(&cli.global, action),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    tracing::debug!("Running {:?}", cli.command);

    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_param_accepts_names_and_letters() {
        assert_eq!(parse_param("saturation"), Ok(Param::Saturation));
        assert_eq!(parse_param("Green"), Ok(Param::Green));
        assert_eq!(parse_param("R"), Ok(Param::Red));
        assert!(parse_param("alpha").is_err());
    }

    #[test]
    fn inspect_parses_hex() {
        let cli = Cli::try_parse_from(["deep-colour", "inspect", "#80336699", "--json"]).unwrap();
        assert!(cli.global.json);
        match cli.command {
            Command::Inspect { colour } => assert_eq!(colour.to_argb(), 0x80336699),
            other => panic!("unexpected {:?}", other),
        }
        assert!(Cli::try_parse_from(["deep-colour", "inspect", "nope"]).is_err());
    }

    #[test]
    fn swatch_edits_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let global = GlobalOptions {
            config: Some(path.clone()),
            json: false,
        };

        swatch(&global, SwatchAction::Add { colour: DeepColour::BLACK }).unwrap();
        let red = DeepColour::from_rgb(1.0, 0.0, 0.0);
        swatch(&global, SwatchAction::Set { index: 0, colour: red }).unwrap();
        assert!(swatch(&global, SwatchAction::Set { index: 5, colour: red }).is_err());

        let config = SelectorConfig::load(&path).unwrap();
        assert_eq!(config.swatches.len(), 1);
        assert_eq!(config.swatches.colour(0), Some(red));
    }

    #[test]
    fn render_writes_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("plane.png");
        let global = GlobalOptions {
            config: Some(dir.path().join("missing.toml")),
            json: false,
        };

        render(&global, Param::Red, Some(DeepColour::BLACK), false, (16, 8), &output).unwrap();

        let image = image::open(&output).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (16, 8));
        // red axis plane: x is blue, y is green, top left is full green
        assert_eq!(image.get_pixel(0, 0).0, [0, 255, 0, 255]);
    }

    #[test]
    fn render_rejects_huge_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("huge.png");
        let global = GlobalOptions {
            config: Some(dir.path().join("missing.toml")),
            json: false,
        };

        let err = render(&global, Param::Hue, None, false, (70000, 70000), &output).unwrap_err();
        assert!(err.to_string().contains("70000x70000"));
        assert!(render(&global, Param::Hue, None, true, (0, 10), &output).is_err());
        assert!(!output.exists());
    }
}
