//! Command-line definition

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Build the `clipship` argument parser
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("clipship")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Clip, cache and package GeoTIFF extracts")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Settings file (TOML)")
                .value_name("FILE")
                .global(true),
        )
        .arg(
            Arg::new("layers-dir")
                .long("layers-dir")
                .help("Directory holding one subdirectory of files per layer")
                .value_name("DIR")
                .global(true),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Append log records to this file")
                .value_name("FILE")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            ClapCommand::new("derive")
                .about("Derive a clip of a layer and print the JSON response")
                .arg(Arg::new("layer").help("Layer name").required(true).index(1))
                .arg(
                    Arg::new("bbox")
                        .long("bbox")
                        .help("Bounding box as west,south,east,north")
                        .value_name("BBOX")
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("geojson")
                        .long("geojson")
                        .help("Polygon mask as GeoJSON text")
                        .value_name("TEXT")
                        .conflicts_with("geojson-file"),
                )
                .arg(
                    Arg::new("geojson-file")
                        .long("geojson-file")
                        .help("Read the polygon mask from a file")
                        .value_name("FILE"),
                )
                .arg(
                    Arg::new("param")
                        .short('p')
                        .long("param")
                        .help("Raw request parameter as KEY=VALUE (keys are case-insensitive)")
                        .value_name("KEY=VALUE")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            ClapCommand::new("fetch")
                .about("Package a derived clip with its sidecars into a zip")
                .arg(Arg::new("layer").help("Layer name").required(true).index(1))
                .arg(Arg::new("clip_filename").help("File name returned by derive").required(true).index(2))
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Where to write the zip")
                        .value_name("FILE"),
                ),
        )
        .subcommand(
            ClapCommand::new("preview")
                .about("Print the preview page context of a raster")
                .arg(Arg::new("name").help("Raster name").required(true).index(1)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_arguments() {
        let matches = build_cli()
            .try_get_matches_from([
                "clipship", "derive", "dem",
                "--bbox", "-10,20,30,40",
                "-p", "format=tif", "-p", "GEOJSON={}",
            ])
            .unwrap();

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "derive");
        assert_eq!(sub.get_one::<String>("layer").unwrap(), "dem");
        assert_eq!(sub.get_one::<String>("bbox").unwrap(), "-10,20,30,40");
        assert_eq!(sub.get_many::<String>("param").unwrap().count(), 2);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(["clipship", "fetch", "dem", "dem.tif.x.clip.tif", "--config", "c.toml", "-v"])
            .unwrap();

        assert_eq!(matches.get_one::<String>("config").unwrap(), "c.toml");
        assert!(matches.get_flag("verbose"));
    }

    #[test]
    fn test_geojson_sources_conflict() {
        let result = build_cli().try_get_matches_from([
            "clipship", "derive", "dem", "--geojson", "{}", "--geojson-file", "mask.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(build_cli().try_get_matches_from(["clipship"]).is_err());
    }
}
