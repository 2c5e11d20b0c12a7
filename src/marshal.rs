//! Flat buffer encoding of positions
//!
//! Positions are written into flat `f64` buffers for exchange with numeric
//! code that works on packed arrays. Three layouts are supported:
//!
//! - **Triples in a chosen system**: `[a0, b0, c0, a1, b1, c1, ...]`, every
//!   position converted to the same system.
//! - **Tagged quads**: `[a0, b0, c0, tag0, ...]`, each position in its own
//!   system with the tag from [`CoordinateSystem::tag`].
//! - **XYZ triples**: Cartesian triples, the common case of the first layout.
//!
//! Decoding takes a position index, not a buffer offset.

use crate::coordinates::{CoordinateSystem, Coords};
use crate::errors::{PoslibError, Result};
use crate::position::Position;

const TRIPLE: usize = 3;
const QUAD: usize = 4;

fn window(buffer: &[f64], index: usize, stride: usize) -> Result<&[f64]> {
    let too_short = |expected| PoslibError::BufferLength {
        expected,
        found: buffer.len(),
    };
    // An end past usize::MAX can never fit in a buffer
    let end = index
        .checked_add(1)
        .and_then(|count| count.checked_mul(stride))
        .ok_or_else(|| too_short(usize::MAX))?;
    buffer.get(end - stride..end).ok_or_else(|| too_short(end))
}

/// Writes every position as a triple in `system`
pub fn to_flat(positions: &[Position], system: CoordinateSystem) -> Vec<f64> {
    positions
        .iter()
        .flat_map(|p| p.fill_components(system))
        .collect()
}

/// Writes every position as a Cartesian triple
pub fn to_flat_xyz(positions: &[Position]) -> Vec<f64> {
    to_flat(positions, CoordinateSystem::Cartesian)
}

/// Writes every position in its own system, followed by the system tag
pub fn to_flat_tagged(positions: &[Position]) -> Vec<f64> {
    let mut buffer = Vec::with_capacity(positions.len() * QUAD);
    for position in positions {
        buffer.extend_from_slice(&position.coords().components());
        buffer.push(f64::from(position.system().tag()));
    }
    buffer
}

/// Reads the triple at position `index`, interpreted in `system`
pub fn from_flat(buffer: &[f64], index: usize, system: CoordinateSystem) -> Result<Position> {
    let values = window(buffer, index, TRIPLE)?;
    Position::from_slice(values, system)
}

/// Reads the Cartesian triple at position `index`
pub fn from_flat_xyz(buffer: &[f64], index: usize) -> Result<Position> {
    from_flat(buffer, index, CoordinateSystem::Cartesian)
}

/// Reads the tagged quad at position `index`
pub fn from_flat_tagged(buffer: &[f64], index: usize) -> Result<Position> {
    let values = window(buffer, index, QUAD)?;
    let system = CoordinateSystem::from_tag(values[3])?;
    Ok(Position::from(Coords::from_components(
        values[0], values[1], values[2], system,
    )))
}

/// Reads every triple of a buffer in `system`
///
/// Trailing values that do not fill a whole triple are rejected.
pub fn all_from_flat(buffer: &[f64], system: CoordinateSystem) -> Result<Vec<Position>> {
    if buffer.len() % TRIPLE != 0 {
        return Err(PoslibError::BufferLength {
            expected: buffer.len().next_multiple_of(TRIPLE),
            found: buffer.len(),
        });
    }
    buffer
        .chunks_exact(TRIPLE)
        .map(|values| Position::from_slice(values, system))
        .collect()
}
