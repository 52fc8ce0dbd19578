//! Destination list types used by the engine.
//!
//! The underlying type of Destinations may change at any time during
//! pre-1.0 development, so a type alias makes changes easy.

use arrayvec::ArrayVec;

use crate::coretypes::MAX_DESTINATIONS;
use crate::position::Position;

/// Destinations holds at most `MAX_DESTINATIONS`, more than any single piece
/// can reach from one square.
pub type Destinations = ArrayVec<Position, MAX_DESTINATIONS>;

/// Returns the destinations in display form, separated by `; `.
/// Display cannot be implemented on external types.
pub fn display(destinations: &Destinations) -> String {
    destinations
        .iter()
        .map(|position| format!("({position})"))
        .collect::<Vec<_>>()
        .join("; ")
}
