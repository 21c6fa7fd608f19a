use clap::{Parser, Subcommand};
use swatch::color::HexColor;
use swatch::compose;
use swatch::config;
use swatch::geometry::Point;
use swatch::material::NOT_SELECTED;
use swatch::profile::Complexion;
use swatch::shades;

#[derive(Parser, Debug)]
#[command(name = "swatch", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print the eight shades of a hue, lightest first
    Shades {
        /// Hue in degrees (0-360)
        hue: f64,
    },
    /// Resolve a point on the configured wheel to its cell and color
    Locate {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Print the wheel as an SVG document
    Wheel {
        /// Outline the cell drawn in this color (#RRGGBB)
        #[arg(short = 's', long)]
        selected: Option<HexColor>,
    },
    /// Compose a style guide
    Compose {
        /// Height in centimeters
        #[arg(long, allow_negative_numbers = true)]
        height: f64,
        /// Skin tone tag, e.g. "light_medium"
        #[arg(long)]
        skin_tone: Complexion,
        /// Garment color (#RRGGBB)
        #[arg(short = 'c', long)]
        color: HexColor,
        #[arg(short = 'm', long, default_value = NOT_SELECTED)]
        material: String,
    },
    /// List the configured materials and their image assets
    Materials,
    /// Write the default config file if none exists and print its path
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Shades { hue } => {
            for (i, shade) in shades::shades_for_hue(hue).iter().enumerate() {
                println!("{:>3}%  {}", shades::lightness_at(i), shade);
            }
        }
        Commands::Locate { x, y } => {
            let layout = config::load_or_default().wheel;
            match layout.resolve(Point::new(x, y)) {
                Some((cell, color)) => println!(
                    "hue {} shade {} -> {}",
                    cell.hue_index, cell.shade_index, color
                ),
                None => anyhow::bail!("({x}, {y}) is outside the wheel"),
            }
        }
        Commands::Wheel { selected } => {
            print!("{}", config::load_or_default().wheel.to_svg(selected));
        }
        Commands::Compose {
            height,
            skin_tone,
            color,
            material,
        } => {
            let guide = compose::compose(height, &skin_tone, &color.to_string(), &material);
            println!("{guide}");
        }
        Commands::Materials => {
            for material in config::load_or_default().catalog().materials() {
                println!("{}\t{}", material.name, material.asset.display());
            }
        }
        Commands::InitConfig => {
            println!("{}", config::write_default_config()?.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compose_args() {
        let cli = Cli::try_parse_from([
            "swatch",
            "compose",
            "--height",
            "170",
            "--skin-tone",
            "olive",
            "--color",
            "#112233",
        ])
        .unwrap();
        let Commands::Compose {
            skin_tone,
            color,
            material,
            ..
        } = cli.command
        else {
            panic!("expected compose");
        };
        assert_eq!(skin_tone, Complexion::Unrecognized("olive".to_string()));
        assert_eq!(color, HexColor::new(0x11, 0x22, 0x33));
        assert_eq!(material, "Not selected");
    }

    #[test]
    fn test_rejects_short_hex() {
        assert!(Cli::try_parse_from(["swatch", "wheel", "--selected", "#ABC"]).is_err());
    }
}
