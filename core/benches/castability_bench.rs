#[macro_use]
extern crate criterion;

use castability::{can_cast, ColorSet, Land, LandType, Spell};
use criterion::Criterion;

fn beacon_search_scenario() -> (Spell, Vec<Land>) {
  let spell = Spell::parse("{U}{B}{B}{R}").unwrap().with_types(["Planeswalker"]);
  let lands = vec![
    Land::new("Interplanar Beacon", LandType::Beacon, ColorSet::ALL),
    Land::new("Interplanar Beacon", LandType::Beacon, ColorSet::ALL),
    Land::new("Interplanar Beacon", LandType::Beacon, ColorSet::ALL),
    Land::new("Mountain", LandType::Basic, ColorSet::RED),
    Land::new("Island", LandType::Basic, ColorSet::BLUE),
    Land::new("Island", LandType::Basic, ColorSet::BLUE),
  ];
  (spell, lands)
}

fn simple_fast_path_scenario() -> (Spell, Vec<Land>) {
  let spell = Spell::parse("{R}{R}{R}").unwrap();
  let lands = vec![
    Land::new("Mountain", LandType::Basic, ColorSet::RED),
    Land::new("Mountain", LandType::Basic, ColorSet::RED),
    Land::new("Mountain", LandType::Basic, ColorSet::RED),
  ];
  (spell, lands)
}

fn criterion_function(c: &mut Criterion) {
  let (beacon_spell, beacon_lands) = beacon_search_scenario();
  c.bench_function("beacon backtracking search", move |b| {
    b.iter(|| can_cast(&beacon_spell, &beacon_lands, 0));
  });

  let (simple_spell, simple_lands) = simple_fast_path_scenario();
  c.bench_function("simple fast path", move |b| {
    b.iter(|| can_cast(&simple_spell, &simple_lands, 0));
  });
}

criterion_group!(benches, criterion_function);
criterion_main!(benches);
