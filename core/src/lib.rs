//! # castability
//!
//! Decides whether a Magic: The Gathering spell can be cast this turn from
//! a pool of lands, including lands whose color output depends on a choice
//! made at cast time (Interplanar Beacon, Lotus Field, filter lands).
//!
//! The decision procedure is layered: [`oracle::can_cast_simple`] answers
//! the fixed-output case in constant time via a Hall's-theorem feasibility
//! check over color bitsets; [`castability::can_cast`] builds on it with a
//! best-first search over the choice-dependent lands. [`flow`] is a
//! general min-cost max-flow engine that the castability search's
//! underlying [`heap::AdjustableHeap`] was built to serve.

#[macro_use]
extern crate serde_derive;
extern crate serde;
extern crate log;

pub mod castability;
pub mod color;
pub mod cost;
pub mod flow;
pub mod heap;
pub mod land;
pub mod oracle;
pub mod spell;

pub use crate::castability::{can_cast, can_cast_named, CastError};
pub use crate::color::ColorSet;
pub use crate::cost::{parse as parse_cost, CostMultiset, CostParseError};
pub use crate::land::{CategorizeError, DemoLandCategorizer, Land, LandCategorizer, LandType};
pub use crate::spell::Spell;
