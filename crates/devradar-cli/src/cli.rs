use std::path::PathBuf;

use clap::Parser;

/// devradar: watch developers near you appear on the map in real time.
#[derive(Parser, Debug)]
#[command(name = "devradar", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Device latitude. Without a position, location is treated as denied.
    #[arg(long, requires = "longitude", allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    /// Device longitude.
    #[arg(long, requires = "latitude", allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// Initial technology filter, comma separated.
    #[arg(short, long, default_value = "")]
    pub techs: String,

    /// Log filter override (e.g. "devradar=debug").
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_negative_coordinates() {
        let args = Args::try_parse_from([
            "devradar",
            "--latitude",
            "-23.55",
            "--longitude",
            "-46.63",
            "--techs",
            "node,go",
        ])
        .unwrap();
        assert_eq!(args.latitude, Some(-23.55));
        assert_eq!(args.longitude, Some(-46.63));
        assert_eq!(args.techs, "node,go");
    }

    #[test]
    fn latitude_requires_longitude() {
        assert!(Args::try_parse_from(["devradar", "--latitude", "10"]).is_err());
    }

    #[test]
    fn everything_is_optional() {
        let args = Args::try_parse_from(["devradar"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.latitude.is_none());
        assert!(args.techs.is_empty());
    }
}
