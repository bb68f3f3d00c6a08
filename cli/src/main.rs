#[macro_use]
extern crate log;
extern crate env_logger;
#[macro_use]
extern crate serde_derive;
extern crate serde;
extern crate serde_json;
extern crate castability;

use castability::{can_cast, ColorSet, Land, LandType, Spell};
use std::error::Error;
use std::fmt;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct LandScenario {
  name: String,
  land_type: String,
  #[serde(default)]
  color_identity: String,
}

#[derive(Debug, Deserialize)]
struct Scenario {
  cost: String,
  #[serde(default)]
  x: u32,
  #[serde(default)]
  types: Vec<String>,
  #[serde(default)]
  subtypes: Vec<String>,
  lands: Vec<LandScenario>,
}

#[derive(Debug)]
enum CliError {
  MissingArg,
  Io(std::io::Error),
  Json(serde_json::Error),
  UnknownLandType(String),
}

impl fmt::Display for CliError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      CliError::MissingArg => write!(f, "usage: cast-cli <scenario.json>"),
      CliError::Io(e) => write!(f, "{}", e),
      CliError::Json(e) => write!(f, "{}", e),
      CliError::UnknownLandType(t) => write!(f, "unknown land_type \"{}\"", t),
    }
  }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
  fn from(e: std::io::Error) -> Self {
    CliError::Io(e)
  }
}

impl From<serde_json::Error> for CliError {
  fn from(e: serde_json::Error) -> Self {
    CliError::Json(e)
  }
}

fn parse_land_type(name: &str) -> Result<LandType, CliError> {
  Ok(match name {
    "Basic" => LandType::Basic,
    "Shock" => LandType::Shock,
    "Scry" => LandType::Scry,
    "TapDual" => LandType::TapDual,
    "Adamant" => LandType::Adamant,
    "Castle" => LandType::Castle,
    "Guildgate" => LandType::Guildgate,
    "TapTri" => LandType::TapTri,
    "Colorless" => LandType::Colorless,
    "CommandTower" => LandType::CommandTower,
    "GatewayPlaza" => LandType::GatewayPlaza,
    "TournamentGrounds" => LandType::TournamentGrounds,
    "PlazaOfHarmony" => LandType::PlazaOfHarmony,
    "FabledPassage" => LandType::FabledPassage,
    "EvolvingWilds" => LandType::EvolvingWilds,
    "Beacon" => LandType::Beacon,
    "Lotus" => LandType::Lotus,
    "Filtering" => LandType::Filtering,
    other => return Err(CliError::UnknownLandType(other.to_string())),
  })
}

fn parse_color_identity(symbols: &str) -> ColorSet {
  let mut set = ColorSet::COLORLESS;
  for ch in symbols.chars() {
    if let Some(c) = ColorSet::from_symbol(ch) {
      set = set.union(c);
    }
  }
  set
}

fn load_scenario(path: &Path) -> Result<(Spell, Vec<Land>, u32), CliError> {
  let text = std::fs::read_to_string(path)?;
  let scenario: Scenario = serde_json::from_str(&text)?;
  let x = scenario.x;

  let mut spell = Spell::parse(&scenario.cost).map_err(|e| {
    warn!("failed to parse cost \"{}\": {}", scenario.cost, e);
    std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
  })?;
  spell = spell.with_types(scenario.types).with_subtypes(scenario.subtypes);

  let mut lands = Vec::with_capacity(scenario.lands.len());
  for land in scenario.lands {
    let land_type = parse_land_type(&land.land_type)?;
    let color_identity = parse_color_identity(&land.color_identity);
    lands.push(Land::new(land.name, land_type, color_identity));
  }

  Ok((spell, lands, x))
}

pub fn main() -> Result<(), Box<dyn Error>> {
  env_logger::init();

  let path = std::env::args().nth(1).ok_or(CliError::MissingArg)?;
  let (spell, lands, x) = load_scenario(Path::new(&path))?;

  info!("cost: {}", spell.cost);
  info!("lands: {}", lands.len());

  let castable = can_cast(&spell, &lands, x);
  if castable {
    info!("castable: yes");
  } else {
    info!("castable: no");
  }
  println!("{}", castable);
  Ok(())
}
