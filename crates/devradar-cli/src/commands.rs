//! Line commands read from stdin.

use devradar_common::{FilterTags, RadarError, Region};
use devradar_feed::RadarCommand;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  techs <a,b,...>                 set the technology filter (empty clears it)
  region <lat> <lon> <dlat> <dlon>  move the viewport
  refresh                         search again
  help                            show this message
  quit                            exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Radar(RadarCommand),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not a number: {0}")]
    InvalidNumber(String),

    #[error(transparent)]
    Region(#[from] RadarError),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Input>, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let input = match word {
        "" => return Ok(None),
        "techs" | "tags" => Input::Radar(RadarCommand::SetTags(FilterTags::parse(rest))),
        "region" => Input::Radar(RadarCommand::RegionChanged(parse_region(rest)?)),
        "refresh" | "r" => Input::Radar(RadarCommand::Refresh),
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(input))
}

fn parse_region(args: &str) -> Result<Region, CommandError> {
    const USAGE: &str = "region <lat> <lon> <dlat> <dlon>";

    let numbers = args
        .split_whitespace()
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| CommandError::InvalidNumber(s.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let [latitude, longitude, latitude_delta, longitude_delta] = numbers[..] else {
        return Err(CommandError::Usage(USAGE));
    };
    Ok(Region::new(
        latitude,
        longitude,
        latitude_delta,
        longitude_delta,
    )?)
}
