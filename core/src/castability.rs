//! # Castability decider
//!
//! Reduces `(Spell, Lands, X)` to calls against the [`crate::oracle`], then
//! falls back to a best-first search over choice-dependent ("exotic")
//! lands when the simple lands alone cannot settle the question either
//! way.

use crate::color::ColorSet;
use crate::cost::CostMultiset;
use crate::heap::AdjustableHeap;
use crate::land::{CategorizeError, Land, LandCategorizer, LandType};
use crate::oracle::can_cast_simple;
use crate::spell::Spell;
use std::collections::HashSet;
use std::fmt;

const N: usize = crate::color::N;

/// Error surfaced by [`can_cast_named`] when a caller's
/// [`LandCategorizer`] cannot place one of the raw cards it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastError {
  Categorize(CategorizeError),
}

impl fmt::Display for CastError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      CastError::Categorize(e) => write!(f, "{}", e),
    }
  }
}

impl std::error::Error for CastError {}

impl From<CategorizeError> for CastError {
  fn from(e: CategorizeError) -> Self {
    CastError::Categorize(e)
  }
}

/// Decides whether `spell` is castable from `lands`, with `x` as the
/// value to resolve any `X` symbol in the cost to.
pub fn can_cast(spell: &Spell, lands: &[Land], x: u32) -> bool {
  // Step 1: expand X into a resolved generic-mana cost.
  let mut cost = spell.cost;
  if spell.x_slots > 0 {
    cost.add(ColorSet::ALL, spell.x_slots * x);
  }

  // Step 2: bucket lands into simple and exotic.
  let (mut simple_lands, mut other_lands, plaza_count, gate_colors) = bucket_lands(spell, lands);
  if plaza_count > 0 {
    simple_lands.add(gate_colors, plaza_count);
  }

  log::debug!(
    "can_cast: cost={} simple_lands={} other_lands={}",
    cost,
    simple_lands,
    other_lands.len()
  );

  // Fast path: simple lands alone suffice.
  if can_cast_simple(&cost, &simple_lands, 0) {
    return true;
  }
  if other_lands.is_empty() {
    return false;
  }

  // Optimistic pool: upper-bound what the exotic lands could contribute.
  // If even this fails, no assignment of exotic lands can help.
  let mut optimistic_cost = cost;
  let mut optimistic_lands = simple_lands;
  for land in &other_lands {
    match land.land_type {
      LandType::Beacon => {
        optimistic_cost.add(ColorSet::ALL, 1);
        optimistic_lands.add(ColorSet::ALL, 2);
      }
      LandType::Lotus => {
        optimistic_lands.add(ColorSet::ALL, 3);
      }
      LandType::Filtering => {
        optimistic_lands.add(ColorSet::ALL, 1);
      }
      _ => unreachable!("bucket_lands only routes Beacon/Lotus/Filtering into other_lands"),
    }
  }
  if !can_cast_simple(&optimistic_cost, &optimistic_lands, 0) {
    return false;
  }

  other_lands.sort_by(|a, b| a.name.cmp(&b.name));
  search(&cost, &simple_lands, &other_lands)
}

/// Thin wrapper over [`can_cast`] for callers that have raw card data
/// (name, rules text, color identity, supertypes) rather than pre-built
/// [`Land`] records, driving classification through a caller-supplied
/// [`LandCategorizer`].
pub fn can_cast_named(
  spell: &Spell,
  raw_lands: &[(String, String, ColorSet, Vec<String>)],
  categorizer: &dyn LandCategorizer,
  x: u32,
) -> Result<bool, CastError> {
  let mut lands = Vec::with_capacity(raw_lands.len());
  for (name, rules_text, color_identity, supertypes) in raw_lands {
    let land_type = categorizer.categorize(name, rules_text, *color_identity, supertypes)?;
    lands.push(Land::new(name.clone(), land_type, *color_identity));
  }
  Ok(can_cast(spell, &lands, x))
}

fn bucket_lands(spell: &Spell, lands: &[Land]) -> (CostMultiset, Vec<Land>, u32, ColorSet) {
  let mut simple_lands = CostMultiset::new();
  let mut other_lands = Vec::new();
  let mut plaza_count = 0u32;
  let mut gate_colors = ColorSet::COLORLESS;

  for land in lands {
    match land.land_type {
      LandType::FabledPassage | LandType::EvolvingWilds => continue,
      LandType::Guildgate => {
        gate_colors = gate_colors.union(land.color_identity);
        simple_lands.add(land.color_identity, 1);
      }
      t if t.is_simple() => {
        simple_lands.add(land.color_identity, 1);
      }
      LandType::GatewayPlaza => {
        gate_colors = ColorSet::ALL;
        simple_lands.add(ColorSet::ALL, 1);
      }
      LandType::CommandTower => {
        // Assumes the spell lies within the deck's color identity; this
        // is an input assumption the caller must honor (spec.md section 9).
        simple_lands.add(ColorSet::ALL, 1);
      }
      LandType::TournamentGrounds => {
        if spell.has_subtype("Equipment") || spell.has_subtype("Knight") {
          simple_lands.add(ColorSet::MARDU, 1);
        } else {
          simple_lands.add(ColorSet::COLORLESS, 1);
        }
      }
      LandType::PlazaOfHarmony => {
        plaza_count += 1;
      }
      LandType::Beacon => {
        if spell.has_type("Planeswalker") {
          other_lands.push(land.clone());
        } else {
          simple_lands.add(ColorSet::COLORLESS, 1);
        }
      }
      LandType::Lotus | LandType::Filtering => other_lands.push(land.clone()),
      // Unreachable: every LandType is covered by a preceding arm.
      LandType::Basic | LandType::Shock | LandType::Scry | LandType::TapDual | LandType::Adamant | LandType::Castle | LandType::TapTri | LandType::Colorless => {
        unreachable!("covered by the is_simple() guard above")
      }
    }
  }
  (simple_lands, other_lands, plaza_count, gate_colors)
}

/// A node in the best-first search over exotic-land color assignments.
/// Per-color tallies are clamped to `max_colors` at construction time, per
/// spec.md section 4.3 and section 9 ("clamping is essential for the
/// visited set to stay bounded").
#[derive(Debug, Clone)]
struct SearchState {
  colors: [u32; N],
  filter_colors: [u32; N],
  total: u32,
  filter_total: u32,
  filter_cost: u32,
  land_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StateKey {
  land_index: usize,
  total: u32,
  filter_total: u32,
  filter_cost: u32,
  colors: [u32; N],
  filter_colors: [u32; N],
}

struct RawState {
  colors: [u32; N],
  filter_colors: [u32; N],
  total: u32,
  filter_total: u32,
  filter_cost: u32,
  land_index: usize,
}

impl SearchState {
  fn key(&self) -> StateKey {
    StateKey {
      land_index: self.land_index,
      total: self.total,
      filter_total: self.filter_total,
      filter_cost: self.filter_cost,
      colors: self.colors,
      filter_colors: self.filter_colors,
    }
  }

  fn from_raw(max_colors: &[u32; N], total_cost: u32, raw: RawState) -> Self {
    let mut filter_colors = [0u32; N];
    for c in 0..N {
      filter_colors[c] = raw.filter_colors[c].min(max_colors[c]);
    }
    let mut colors = [0u32; N];
    for c in 0..N {
      colors[c] = raw.colors[c].min(max_colors[c].saturating_sub(filter_colors[c]));
    }
    SearchState {
      colors,
      filter_colors,
      total: raw.total,
      filter_total: raw.filter_total.min(total_cost),
      filter_cost: raw.filter_cost,
      land_index: raw.land_index,
    }
  }

  /// Applies a land transition: `normal_cols`/`filter_cols` are color
  /// indices (0..N) to add one unit of colored mana each, `colorless` is
  /// an additional count of generic (normal) mana, and `filter_cost_inc`
  /// is the surcharge incurred by this transition.
  fn add(
    &self,
    max_colors: &[u32; N],
    total_cost: u32,
    normal_cols: &[usize],
    filter_cols: &[usize],
    colorless: u32,
    filter_cost_inc: u32,
  ) -> SearchState {
    let mut colors = self.colors;
    for &c in normal_cols {
      colors[c] += 1;
    }
    let mut filter_colors = self.filter_colors;
    for &c in filter_cols {
      filter_colors[c] += 1;
    }
    let normal_total = normal_cols.len() as u32 + colorless;
    let filter_total_inc = filter_cols.len() as u32;
    Self::from_raw(
      max_colors,
      total_cost,
      RawState {
        colors,
        filter_colors,
        total: self.total + normal_total,
        filter_total: self.filter_total + filter_total_inc,
        filter_cost: self.filter_cost + filter_cost_inc,
        land_index: self.land_index + 1,
      },
    )
  }
}

/// Lexicographic heuristic distance used as the min-heap key (spec.md
/// section 4.3). Always nonnegative in its leading component since
/// `color_deficit >= 0` is an invariant of the clamp in
/// [`SearchState::from_raw`].
fn heuristic_key(state: &SearchState, max_colors: &[u32; N], total_cost: u32) -> (i64, i64, i64) {
  let color_deficit: i64 =
    max_colors.iter().sum::<u32>() as i64 - state.filter_colors.iter().sum::<u32>() as i64 - state.colors.iter().sum::<u32>() as i64;
  let total_deficit: i64 = total_cost as i64 - state.total as i64 - state.filter_total as i64;
  let lead = color_deficit.max(total_deficit) + state.land_index as i64 + state.filter_cost as i64;
  (lead, color_deficit, state.filter_total as i64)
}

fn max_colors_and_total(cost: &CostMultiset) -> ([u32; N], u32) {
  let mut max_colors = [0u32; N];
  for (s, count) in cost.iter() {
    if s == ColorSet::ALL {
      continue;
    }
    for c in 0..N {
      let single = ColorSet::from_bits(1 << c);
      if s.contains(single) {
        max_colors[c] += count;
      }
    }
  }
  (max_colors, cost.total())
}

/// Tests whether `state` is a solution: both the normal-mana pool and the
/// filtered-mana pool (with its surcharge offset) must satisfy the oracle.
fn state_satisfies(cost: &CostMultiset, simple_lands: &CostMultiset, simple_land_count: u32, state: &SearchState) -> bool {
  let mut state_lands = *simple_lands;
  let mut state_filter_lands = CostMultiset::new();
  let mut colored_mana = 0u32;
  let mut colored_filter_mana = 0u32;
  for c in 0..N {
    let single = ColorSet::from_bits(1 << c);
    let cnt = state.colors[c];
    let fcnt = state.filter_colors[c];
    state_lands.add(single, cnt + fcnt);
    state_filter_lands.add(single, fcnt);
    colored_mana += cnt + fcnt;
    colored_filter_mana += fcnt;
  }
  state_lands.add(ColorSet::COLORLESS, (state.filter_total + state.total).saturating_sub(colored_mana));
  state_filter_lands.add(ColorSet::COLORLESS, state.filter_total.saturating_sub(colored_filter_mana));

  let offset = state.filter_cost as i64 - simple_land_count as i64 - state.total as i64;
  can_cast_simple(cost, &state_lands, 0) && can_cast_simple(cost, &state_filter_lands, offset)
}

fn search(cost: &CostMultiset, simple_lands: &CostMultiset, other_lands: &[Land]) -> bool {
  let (max_colors, total_cost) = max_colors_and_total(cost);
  let simple_land_count = simple_lands.total();

  let mut visited: HashSet<StateKey> = HashSet::new();
  let mut heap: AdjustableHeap<SearchState, (i64, i64, i64), _> =
    AdjustableHeap::new(move |s: &SearchState| heuristic_key(s, &max_colors, total_cost));

  let initial = SearchState::from_raw(
    &max_colors,
    total_cost,
    RawState { colors: [0; N], filter_colors: [0; N], total: 0, filter_total: 0, filter_cost: 0, land_index: 0 },
  );
  visited.insert(initial.key());
  heap.push(initial);

  while !heap.is_empty() {
    let state = heap.pop();
    log::trace!("castability search: land_index={} total={} filter_total={}", state.land_index, state.total, state.filter_total);

    if state_satisfies(cost, simple_lands, simple_land_count, &state) {
      return true;
    }

    if state.land_index == other_lands.len() {
      continue;
    }
    let land = &other_lands[state.land_index];

    macro_rules! push_if_new {
      ($next:expr) => {{
        let next = $next;
        let key = next.key();
        if visited.insert(key) {
          heap.push(next);
        }
      }};
    }

    match land.land_type {
      LandType::Beacon => {
        push_if_new!(state.add(&max_colors, total_cost, &[], &[], 1, 0));
        for a in 0..N {
          for b in 0..a {
            push_if_new!(state.add(&max_colors, total_cost, &[], &[a, b], 0, 1));
          }
        }
      }
      LandType::Lotus => {
        for c in 0..N {
          push_if_new!(state.add(&max_colors, total_cost, &[c, c, c], &[], 0, 0));
        }
      }
      LandType::Filtering => {
        push_if_new!(state.add(&max_colors, total_cost, &[], &[], 1, 0));
        for c in 0..N {
          push_if_new!(state.add(&max_colors, total_cost, &[c], &[], 0, 1));
        }
      }
      _ => unreachable!("other_lands only contains exotic land types"),
    }
  }
  false
}

#[cfg(test)]
mod tests {
  use super::*;

  fn basic(name: &str, color: ColorSet) -> Land {
    Land::new(name, LandType::Basic, color)
  }

  fn beacon() -> Land {
    Land::new("Interplanar Beacon", LandType::Beacon, ColorSet::ALL)
  }

  fn blast_zone() -> Land {
    Land::new("Blast Zone", LandType::Colorless, ColorSet::COLORLESS)
  }

  fn nicol_bolas() -> Spell {
    Spell::parse("{U}{B}{B}{R}").unwrap().with_types(["Planeswalker"])
  }

  #[test]
  fn beacon_scenario_yes() {
    let spell = nicol_bolas();
    let lands = vec![
      beacon(),
      beacon(),
      beacon(),
      basic("Mountain", ColorSet::RED),
      basic("Island", ColorSet::BLUE),
      basic("Island", ColorSet::BLUE),
    ];
    assert!(can_cast(&spell, &lands, 0));
  }

  #[test]
  fn beacon_scenario_no_one_short() {
    let spell = nicol_bolas();
    let lands = vec![beacon(), beacon(), beacon(), basic("Mountain", ColorSet::RED), basic("Island", ColorSet::BLUE)];
    assert!(!can_cast(&spell, &lands, 0));
  }

  #[test]
  fn beacon_scenario_yes_with_colorless() {
    let spell = nicol_bolas();
    let lands = vec![beacon(), beacon(), beacon(), blast_zone(), basic("Swamp", ColorSet::BLACK)];
    assert!(can_cast(&spell, &lands, 0));
  }

  #[test]
  fn mono_red_three_mountains_yes() {
    let spell = Spell::parse("{R}{R}{R}").unwrap();
    let lands = vec![basic("Mountain", ColorSet::RED), basic("Mountain", ColorSet::RED), basic("Mountain", ColorSet::RED)];
    assert!(can_cast(&spell, &lands, 0));
  }

  #[test]
  fn mono_red_two_mountains_one_forest_no() {
    let spell = Spell::parse("{R}{R}{R}").unwrap();
    let lands = vec![basic("Mountain", ColorSet::RED), basic("Mountain", ColorSet::RED), basic("Forest", ColorSet::GREEN)];
    assert!(!can_cast(&spell, &lands, 0));
  }

  #[test]
  fn x_spell_three_mountains_x_two_yes() {
    let spell = Spell::parse("{X}{R}").unwrap();
    let lands = vec![basic("Mountain", ColorSet::RED), basic("Mountain", ColorSet::RED), basic("Mountain", ColorSet::RED)];
    assert!(can_cast(&spell, &lands, 2));
  }

  #[test]
  fn x_spell_two_mountains_x_two_no() {
    let spell = Spell::parse("{X}{R}").unwrap();
    let lands = vec![basic("Mountain", ColorSet::RED), basic("Mountain", ColorSet::RED)];
    assert!(!can_cast(&spell, &lands, 2));
  }

  #[test]
  fn fabled_passage_is_ignored() {
    let spell = Spell::parse("{R}").unwrap();
    let lands = vec![Land::new("Fabled Passage", LandType::FabledPassage, ColorSet::ALL)];
    assert!(!can_cast(&spell, &lands, 0));
  }

  #[test]
  fn command_tower_covers_any_color() {
    let spell = Spell::parse("{G}{G}").unwrap();
    let lands = vec![Land::new("Command Tower", LandType::CommandTower, ColorSet::ALL)];
    assert!(!can_cast(&spell, &lands, 0));
    let lands = vec![
      Land::new("Command Tower", LandType::CommandTower, ColorSet::ALL),
      Land::new("Command Tower", LandType::CommandTower, ColorSet::ALL),
    ];
    assert!(can_cast(&spell, &lands, 0));
  }

  #[test]
  fn tournament_grounds_generic_unless_matching_subtype() {
    let spell = Spell::parse("{W}").unwrap();
    let lands = vec![Land::new("Tournament Grounds", LandType::TournamentGrounds, ColorSet::COLORLESS)];
    assert!(!can_cast(&spell, &lands, 0));
    let spell = spell.with_subtypes(["Knight"]);
    assert!(can_cast(&spell, &lands, 0));
  }

  #[test]
  fn lotus_field_three_of_one_color() {
    let spell = Spell::parse("{G}{G}{G}").unwrap();
    let lands = vec![Land::new("Lotus Field", LandType::Lotus, ColorSet::ALL)];
    assert!(can_cast(&spell, &lands, 0));
  }

  #[test]
  fn filtering_lands_as_plain_generic_sources() {
    let spell = Spell::parse("{3}").unwrap();
    let lands = vec![
      Land::new("Unknown Shores", LandType::Filtering, ColorSet::ALL),
      Land::new("Unknown Shores", LandType::Filtering, ColorSet::ALL),
      Land::new("Unknown Shores", LandType::Filtering, ColorSet::ALL),
    ];
    assert!(can_cast(&spell, &lands, 0));
  }

  #[test]
  fn filtering_lands_alone_cannot_cover_a_larger_generic_cost() {
    let spell = Spell::parse("{4}").unwrap();
    let lands = vec![
      Land::new("Unknown Shores", LandType::Filtering, ColorSet::ALL),
      Land::new("Unknown Shores", LandType::Filtering, ColorSet::ALL),
      Land::new("Unknown Shores", LandType::Filtering, ColorSet::ALL),
    ];
    assert!(!can_cast(&spell, &lands, 0));
  }

  #[test]
  fn two_filtering_lands_each_pick_a_different_colored_pip() {
    // Each Filtering land's colored choice must count as ordinary colored
    // mana for the spell itself, not just as backing for the other
    // Filtering land's activation surcharge.
    let spell = Spell::parse("{U}{R}").unwrap();
    let lands = vec![
      Land::new("Unknown Shores", LandType::Filtering, ColorSet::ALL),
      Land::new("Unknown Shores", LandType::Filtering, ColorSet::ALL),
      Land::new("Blast Zone", LandType::Colorless, ColorSet::COLORLESS),
      Land::new("Blast Zone", LandType::Colorless, ColorSet::COLORLESS),
    ];
    assert!(can_cast(&spell, &lands, 0));
  }

  #[test]
  fn plaza_of_harmony_produces_the_guildgates_color_union() {
    let spell = Spell::parse("{U}{R}").unwrap();
    let izzet = ColorSet::BLUE.union(ColorSet::RED);
    let guildgate_only = vec![Land::new("Izzet Guildgate", LandType::Guildgate, izzet)];
    assert!(!can_cast(&spell, &guildgate_only, 0));

    let with_plaza = vec![
      Land::new("Izzet Guildgate", LandType::Guildgate, izzet),
      Land::new("Plaza of Harmony", LandType::PlazaOfHarmony, ColorSet::COLORLESS),
    ];
    assert!(can_cast(&spell, &with_plaza, 0));
  }

  #[test]
  fn gateway_plaza_forces_plaza_of_harmony_to_any_color() {
    let spell = Spell::parse("{B}{B}").unwrap();
    let gateway_only = vec![Land::new("Gateway Plaza", LandType::GatewayPlaza, ColorSet::COLORLESS)];
    assert!(!can_cast(&spell, &gateway_only, 0));

    let with_plaza = vec![
      Land::new("Gateway Plaza", LandType::GatewayPlaza, ColorSet::COLORLESS),
      Land::new("Plaza of Harmony", LandType::PlazaOfHarmony, ColorSet::COLORLESS),
    ];
    assert!(can_cast(&spell, &with_plaza, 0));
  }

  #[test]
  fn can_cast_named_propagates_categorize_error() {
    use crate::land::DemoLandCategorizer;
    let spell = Spell::parse("{R}").unwrap();
    let raw = vec![("Not A Real Land".to_string(), String::new(), ColorSet::COLORLESS, vec![])];
    let err = can_cast_named(&spell, &raw, &DemoLandCategorizer, 0).unwrap_err();
    assert!(matches!(err, CastError::Categorize(_)));
  }
}
