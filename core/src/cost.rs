//! # Cost / land-pool multisets
//!
//! A `CostMultiset` maps a [`ColorSet`] to a nonnegative pip (or producer)
//! count. The same representation is reused for a spell's cost and for a
//! land pool's color output, since [`crate::oracle::can_cast_simple`]
//! transforms both the same way.

use crate::color::ColorSet;
use std::fmt;

const SLOTS: usize = 1 << crate::color::N;

/// A mapping from color bitset to a nonnegative count, indexed `0..32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostMultiset {
  #[serde(with = "serde_slots")]
  slots: [u32; SLOTS],
}

mod serde_slots {
  use serde::{Deserialize, Deserializer, Serialize, Serializer};

  pub fn serialize<S: Serializer>(slots: &[u32; 32], s: S) -> Result<S::Ok, S::Error> {
    slots.to_vec().serialize(s)
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u32; 32], D::Error> {
    let v = Vec::<u32>::deserialize(d)?;
    let mut out = [0u32; 32];
    for (i, x) in v.into_iter().take(32).enumerate() {
      out[i] = x;
    }
    Ok(out)
  }
}

impl Default for CostMultiset {
  fn default() -> Self {
    Self { slots: [0; SLOTS] }
  }
}

impl CostMultiset {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub fn get(&self, s: ColorSet) -> u32 {
    self.slots[s.bits() as usize]
  }

  #[inline]
  pub fn add(&mut self, s: ColorSet, count: u32) {
    self.slots[s.bits() as usize] += count;
  }

  #[inline]
  pub fn set(&mut self, s: ColorSet, count: u32) {
    self.slots[s.bits() as usize] = count;
  }

  pub fn iter(&self) -> impl Iterator<Item = (ColorSet, u32)> + '_ {
    self
      .slots
      .iter()
      .enumerate()
      .map(|(bits, &count)| (ColorSet::from_bits(bits as u8), count))
  }

  /// Total number of pips/producers across every color set.
  pub fn total(&self) -> u32 {
    self.slots.iter().sum()
  }

  pub(crate) fn raw(&self) -> &[u32; SLOTS] {
    &self.slots
  }

  pub(crate) fn from_raw(slots: [u32; SLOTS]) -> Self {
    Self { slots }
  }
}

impl fmt::Display for CostMultiset {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let mut first = true;
    for (s, count) in self.iter() {
      if count == 0 {
        continue;
      }
      if !first {
        write!(f, ", ")?;
      }
      first = false;
      write!(f, "{}x{}", count, s)?;
    }
    if first {
      write!(f, "(empty)")?;
    }
    Ok(())
  }
}

/// Error returned by [`parse`] when a cost string contains an unrecognized
/// symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CostParseError {
  UnknownSymbol(String),
}

impl fmt::Display for CostParseError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      CostParseError::UnknownSymbol(sym) => write!(f, "unknown mana symbol \"{}\"", sym),
    }
  }
}

impl std::error::Error for CostParseError {}

/// A parsed cost string, with the `X` slot kept separate from the rest of
/// the cost (see spec.md section 4.3 step 1 for how `X` is expanded into
/// generic pips once the caller supplies a value).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedCost {
  pub cost: CostMultiset,
  pub x_pips: u32,
}

/// Parses a brace-delimited mana cost string, e.g. `"{2}{W}{U/B}"` or
/// `"{X}{R}"`, into a [`ParsedCost`].
///
/// Grammar (spec.md section 6): digits are generic pips added to
/// [`ColorSet::ALL`]; `X` is a generic pip tracked separately in
/// `x_pips`; letters from `WUBRG`, possibly joined by `/`, form the
/// bitset union of those colors (a hybrid symbol). Unknown symbols fail
/// parsing. Ported from `landlord::card::mana_cost`'s character-stack
/// parser; unlike that parser this one does not need to produce the
/// cartesian product of hybrid alternatives, since a cost multiset already
/// represents "any color in the set" directly.
pub fn parse(cost_str: &str) -> Result<ParsedCost, CostParseError> {
  let mut result = ParsedCost::default();
  let mut symbol = String::new();
  let mut in_braces = false;

  let mut flush = |symbol: &str, result: &mut ParsedCost| -> Result<(), CostParseError> {
    if symbol.is_empty() {
      return Ok(());
    }
    if symbol == "X" {
      result.x_pips += 1;
      return Ok(());
    }
    if let Ok(n) = symbol.parse::<u32>() {
      result.cost.add(ColorSet::ALL, n);
      return Ok(());
    }
    let mut colors = ColorSet::COLORLESS;
    for part in symbol.split('/') {
      let mut chars = part.chars();
      let ch = chars.next().ok_or_else(|| CostParseError::UnknownSymbol(symbol.to_string()))?;
      if chars.next().is_some() {
        return Err(CostParseError::UnknownSymbol(symbol.to_string()));
      }
      let color = ColorSet::from_symbol(ch).ok_or_else(|| CostParseError::UnknownSymbol(symbol.to_string()))?;
      colors = colors.union(color);
    }
    result.cost.add(colors, 1);
    Ok(())
  };

  for c in cost_str.chars() {
    match c {
      '{' => {
        symbol.clear();
        in_braces = true;
      }
      '}' => {
        if !in_braces {
          return Err(CostParseError::UnknownSymbol(c.to_string()));
        }
        flush(&symbol, &mut result)?;
        symbol.clear();
        in_braces = false;
      }
      c if in_braces => symbol.push(c),
      // Symbols outside braces are ignored (e.g. stray whitespace between symbols).
      _ => {}
    }
  }
  Ok(result)
}
