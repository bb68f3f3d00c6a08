//! # Spells
//!
//! A `Spell` is the already-normalized input the castability decider
//! consumes: a cost multiset, a set of card types, and a set of subtypes.
//! Building one from a mana-cost string is a convenience layered on top
//! via [`Spell::parse`]; a caller that already has a [`CostMultiset`] can
//! construct a `Spell` directly.

use crate::cost::{self, CostMultiset, CostParseError};
use std::collections::HashSet;

/// A spell's cost and the type information the castability search needs
/// to know about (Tournament Grounds checks for `Knight`/`Equipment`;
/// Interplanar Beacon checks for `Planeswalker`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spell {
  pub cost: CostMultiset,
  /// Pre-expansion `X` pip count; see spec.md section 4.3 step 1. A
  /// spell with no `X` in its cost has this at 0.
  pub x_slots: u32,
  pub types: HashSet<String>,
  pub subtypes: HashSet<String>,
}

impl Spell {
  pub fn new(cost: CostMultiset) -> Self {
    Self { cost, x_slots: 0, types: HashSet::new(), subtypes: HashSet::new() }
  }

  pub fn with_types<I: IntoIterator<Item = S>, S: Into<String>>(mut self, types: I) -> Self {
    self.types = types.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_subtypes<I: IntoIterator<Item = S>, S: Into<String>>(mut self, subtypes: I) -> Self {
    self.subtypes = subtypes.into_iter().map(Into::into).collect();
    self
  }

  /// Parses a brace-delimited mana cost string (see [`cost::parse`]) into
  /// a `Spell` with no types/subtypes set.
  pub fn parse(cost_str: &str) -> Result<Self, CostParseError> {
    let parsed = cost::parse(cost_str)?;
    Ok(Self { cost: parsed.cost, x_slots: parsed.x_pips, types: HashSet::new(), subtypes: HashSet::new() })
  }

  pub fn has_type(&self, t: &str) -> bool {
    self.types.contains(t)
  }

  pub fn has_subtype(&self, t: &str) -> bool {
    self.subtypes.contains(t)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::color::ColorSet;

  #[test]
  fn parse_tracks_x_and_types() {
    let spell = Spell::parse("{X}{R}").unwrap().with_types(["Instant"]);
    assert_eq!(spell.x_slots, 1);
    assert_eq!(spell.cost.get(ColorSet::RED), 1);
    assert!(spell.has_type("Instant"));
    assert!(!spell.has_type("Sorcery"));
  }

  #[test]
  fn subtype_lookup() {
    let spell = Spell::new(CostMultiset::new()).with_subtypes(["Knight", "Equipment"]);
    assert!(spell.has_subtype("Knight"));
    assert!(!spell.has_subtype("Giant"));
  }
}
