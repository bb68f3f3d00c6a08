//! # Mobius feasibility oracle
//!
//! Decides Hall's marriage condition over a 5-color bitset in constant
//! time, by computing the "lower Mobius transform" of both the cost and
//! the land-pool multisets and comparing them subset-by-subset.

use crate::color::ColorSet;
use crate::cost::CostMultiset;

const SLOTS: usize = 1 << crate::color::N;

/// Computes `g(s) = sum(f(t) for t subseteq s)` in `O(N * 2^N)` via the
/// standard subset-sum DP: for each color bit, fold every subset that
/// excludes it into the corresponding subset that includes it.
pub fn lower_mobius_transform(freq: &[u32; SLOTS]) -> [u32; SLOTS] {
  let mut result = *freq;
  for bit in 0..crate::color::N {
    let col = 1u8 << bit;
    let mut s = ColorSet::ALL.bits() ^ col;
    loop {
      result[(s | col) as usize] += result[s as usize];
      if s == 0 {
        break;
      }
      s = (s - 1) & (ColorSet::ALL.bits() ^ col);
    }
  }
  result
}

/// Decides whether `cost` is payable from `lands`, using Hall's theorem:
/// for every color subset `s`, demand restricted to `s` (plus the caller's
/// `offset` slack) must not exceed the number of lands capable of
/// producing at least one color in `s`.
///
/// `offset` may be negative — it is used by [`crate::castability`] to fold
/// an additional surcharge, or additional slack, into the same inequality
/// without building a second cost vector.
pub fn can_cast_simple(cost: &CostMultiset, lands: &CostMultiset, offset: i64) -> bool {
  let cost_g = lower_mobius_transform(cost.raw());
  let mut land_g = lower_mobius_transform(lands.raw());
  // Lands that produce no color at all can only ever cover generic pips;
  // zeroing this entry lets the complement pairing below account for them
  // via the `ALL` bucket instead of double-counting them as "produces
  // nothing in every subset".
  land_g[0] = 0;
  let total_lands = land_g[ColorSet::ALL.bits() as usize];
  for s in 0..SLOTS {
    let complement = ColorSet::ALL.bits() as usize ^ s;
    let supply = total_lands as i64 - land_g[complement] as i64;
    if cost_g[s] as i64 + offset > supply {
      return false;
    }
  }
  true
}
