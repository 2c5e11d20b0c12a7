//! # Coordinate Systems
//!
//! A position is stored in exactly one of three systems at a time. [`Coords`]
//! is the tagged value holding only the fields of its system, so a field from
//! another system can never be read stale: reaching it means converting.
//!
//! | System      | Components                                        |
//! |-------------|---------------------------------------------------|
//! | Cartesian   | `x`, `y` (vertical), `z`                          |
//! | Spherical   | `mag` (distance), `ang1` (azimuth), `ang2` (elevation) |
//! | Cylindrical | `mag` (horizontal radius), `ang1` (azimuth), `y`  |
//!
//! Azimuth is `atan2(x, z)`, elevation is measured up from the horizontal
//! XZ plane.
//!
//! ## Conversion Formulas
//!
//! - Spherical → Cartesian: `(m·sin a1·cos a2, m·sin a2, m·cos a1·cos a2)`
//! - Cylindrical → Cartesian: `(m·sin a1, y, m·cos a1)`
//! - Cartesian → Spherical: `m = √(x²+y²+z²)`, `a1 = atan2(x, z)`,
//!   `a2 = atan(y / √(x²+z²))`
//! - Cylindrical → Spherical: `a2 = atan2(y, m)`, `m = √(m²+y²)`
//! - Cartesian → Cylindrical: `m = √(x²+z²)`, `a1 = atan2(x, z)`
//! - Spherical → Cylindrical: `y = m·sin a2`, `m = m·cos a2`
//!
//! On the vertical axis (`x = z = 0`) the elevation is ±π/2 following the sign
//! of `y`, and `+π/2` at the origin.

use super::cartesian::Cartesian3;
use crate::constants::QUARTER;
use crate::errors::{PoslibError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Elevation of a Cartesian point, ±π/2 on the vertical axis
fn elevation(x: f64, y: f64, z: f64) -> f64 {
    if x == 0.0 && z == 0.0 {
        if y < 0.0 {
            -QUARTER
        } else {
            QUARTER
        }
    } else {
        (y / (x * x + z * z).sqrt()).atan()
    }
}

/// The coordinate systems a position can be expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateSystem {
    /// Rectangular (x, y, z)
    Cartesian,
    /// (magnitude, azimuth, elevation)
    Spherical,
    /// (horizontal radius, azimuth, y)
    Cylindrical,
}

impl CoordinateSystem {
    /// All systems in tag order
    pub const ALL: [CoordinateSystem; 3] = [
        CoordinateSystem::Cartesian,
        CoordinateSystem::Spherical,
        CoordinateSystem::Cylindrical,
    ];

    /// Numeric tag used in flat buffers: Cartesian = 0, Spherical = 1, Cylindrical = 2
    pub fn tag(&self) -> u8 {
        match self {
            CoordinateSystem::Cartesian => 0,
            CoordinateSystem::Spherical => 1,
            CoordinateSystem::Cylindrical => 2,
        }
    }

    /// Parses a numeric tag as written by [`CoordinateSystem::tag`]
    pub fn from_tag(tag: f64) -> Result<Self> {
        match tag {
            t if t == 0.0 => Ok(CoordinateSystem::Cartesian),
            t if t == 1.0 => Ok(CoordinateSystem::Spherical),
            t if t == 2.0 => Ok(CoordinateSystem::Cylindrical),
            other => Err(PoslibError::UnknownSystem(other)),
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CoordinateSystem::Cartesian => "Cartesian",
            CoordinateSystem::Spherical => "Spherical",
            CoordinateSystem::Cylindrical => "Cylindrical",
        };
        f.write_str(name)
    }
}

/// Coordinates tagged with the system they belong to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coords {
    /// Rectangular coordinates
    Cartesian {
        /// X component
        x: f64,
        /// Vertical component
        y: f64,
        /// Z component
        z: f64,
    },
    /// Distance, azimuth around Y and elevation from horizontal
    Spherical {
        /// Distance from the origin
        mag: f64,
        /// Azimuth, `atan2(x, z)`
        ang1: f64,
        /// Elevation from the XZ plane
        ang2: f64,
    },
    /// Horizontal radius, azimuth around Y and height
    Cylindrical {
        /// Distance from the Y axis
        mag: f64,
        /// Azimuth, `atan2(x, z)`
        ang1: f64,
        /// Vertical component
        y: f64,
    },
}

impl Default for Coords {
    fn default() -> Self {
        Coords::ORIGIN
    }
}

impl Coords {
    /// The Cartesian origin
    pub const ORIGIN: Coords = Coords::Cartesian {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Builds coordinates from three components interpreted in `system`
    ///
    /// - Cartesian: `(a, b, c) -> (x, y, z)`
    /// - Spherical: `(a, b, c) -> (mag, ang1, ang2)`
    /// - Cylindrical: `(a, b, c) -> (mag, ang1, y)`
    pub fn from_components(a: f64, b: f64, c: f64, system: CoordinateSystem) -> Self {
        match system {
            CoordinateSystem::Cartesian => Coords::Cartesian { x: a, y: b, z: c },
            CoordinateSystem::Spherical => Coords::Spherical {
                mag: a,
                ang1: b,
                ang2: c,
            },
            CoordinateSystem::Cylindrical => Coords::Cylindrical {
                mag: a,
                ang1: b,
                y: c,
            },
        }
    }

    /// The raw components of the active system, in constructor order
    pub fn components(&self) -> [f64; 3] {
        match *self {
            Coords::Cartesian { x, y, z } => [x, y, z],
            Coords::Spherical { mag, ang1, ang2 } => [mag, ang1, ang2],
            Coords::Cylindrical { mag, ang1, y } => [mag, ang1, y],
        }
    }

    /// Applies `f` to every stored component
    pub fn map(self, f: impl Fn(f64) -> f64) -> Coords {
        let [a, b, c] = self.components();
        Coords::from_components(f(a), f(b), f(c), self.system())
    }

    /// The system these coordinates are expressed in
    pub fn system(&self) -> CoordinateSystem {
        match self {
            Coords::Cartesian { .. } => CoordinateSystem::Cartesian,
            Coords::Spherical { .. } => CoordinateSystem::Spherical,
            Coords::Cylindrical { .. } => CoordinateSystem::Cylindrical,
        }
    }

    /// Converts to Cartesian; a no-op if already Cartesian
    pub fn to_cartesian(self) -> Coords {
        match self {
            Coords::Cartesian { .. } => self,
            Coords::Spherical { mag, ang1, ang2 } => {
                let cos2 = ang2.cos();
                Coords::Cartesian {
                    x: mag * ang1.sin() * cos2,
                    y: mag * ang2.sin(),
                    z: mag * ang1.cos() * cos2,
                }
            }
            Coords::Cylindrical { mag, ang1, y } => Coords::Cartesian {
                x: mag * ang1.sin(),
                y,
                z: mag * ang1.cos(),
            },
        }
    }

    /// Converts to Spherical; a no-op if already Spherical
    pub fn to_spherical(self) -> Coords {
        match self {
            Coords::Spherical { .. } => self,
            Coords::Cartesian { x, y, z } => {
                Coords::Spherical {
                    mag: (x * x + y * y + z * z).sqrt(),
                    ang1: x.atan2(z),
                    ang2: elevation(x, y, z),
                }
            }
            Coords::Cylindrical { mag, ang1, y } => Coords::Spherical {
                mag: (mag * mag + y * y).sqrt(),
                ang1,
                ang2: y.atan2(mag),
            },
        }
    }

    /// Converts to Cylindrical; a no-op if already Cylindrical
    pub fn to_cylindrical(self) -> Coords {
        match self {
            Coords::Cylindrical { .. } => self,
            Coords::Cartesian { x, y, z } => Coords::Cylindrical {
                mag: (x * x + z * z).sqrt(),
                ang1: x.atan2(z),
                y,
            },
            Coords::Spherical { mag, ang1, ang2 } => Coords::Cylindrical {
                mag: mag * ang2.cos(),
                ang1,
                y: mag * ang2.sin(),
            },
        }
    }

    /// Converts to the given system
    pub fn to_system(self, system: CoordinateSystem) -> Coords {
        match system {
            CoordinateSystem::Cartesian => self.to_cartesian(),
            CoordinateSystem::Spherical => self.to_spherical(),
            CoordinateSystem::Cylindrical => self.to_cylindrical(),
        }
    }

    /// The Cartesian vector these coordinates describe
    pub fn cartesian(&self) -> Cartesian3 {
        match *self {
            Coords::Cartesian { x, y, z } => Cartesian3::new(x, y, z),
            _ => Cartesian3::new(self.x(), self.y(), self.z()),
        }
    }

    /// Cartesian x, computing only what is needed
    pub fn x(&self) -> f64 {
        match *self {
            Coords::Cartesian { x, .. } => x,
            Coords::Spherical { mag, ang1, ang2 } => mag * ang1.sin() * ang2.cos(),
            Coords::Cylindrical { mag, ang1, .. } => mag * ang1.sin(),
        }
    }

    /// Cartesian y, computing only what is needed
    pub fn y(&self) -> f64 {
        match *self {
            Coords::Cartesian { y, .. } | Coords::Cylindrical { y, .. } => y,
            Coords::Spherical { mag, ang2, .. } => mag * ang2.sin(),
        }
    }

    /// Cartesian z, computing only what is needed
    pub fn z(&self) -> f64 {
        match *self {
            Coords::Cartesian { z, .. } => z,
            Coords::Spherical { mag, ang1, ang2 } => mag * ang1.cos() * ang2.cos(),
            Coords::Cylindrical { mag, ang1, .. } => mag * ang1.cos(),
        }
    }

    /// Spherical magnitude (distance from the origin)
    ///
    /// Never negative, even when a stored magnitude was scaled below zero.
    pub fn mag_s(&self) -> f64 {
        match *self {
            Coords::Spherical { mag, .. } => mag.abs(),
            _ => self.mag_s_sqr().sqrt(),
        }
    }

    /// Squared spherical magnitude, avoiding trigonometry where possible
    pub fn mag_s_sqr(&self) -> f64 {
        match *self {
            Coords::Cartesian { x, y, z } => x * x + y * y + z * z,
            Coords::Spherical { mag, .. } => mag * mag,
            Coords::Cylindrical { mag, y, .. } => mag * mag + y * y,
        }
    }

    /// Cylindrical magnitude (distance from the Y axis)
    pub fn mag_c(&self) -> f64 {
        match *self {
            Coords::Cartesian { x, z, .. } => (x * x + z * z).sqrt(),
            Coords::Spherical { mag, ang2, .. } => (mag * ang2.cos()).abs(),
            Coords::Cylindrical { mag, .. } => mag.abs(),
        }
    }

    /// Squared cylindrical magnitude
    pub fn mag_c_sqr(&self) -> f64 {
        match *self {
            Coords::Cartesian { x, z, .. } => x * x + z * z,
            _ => {
                let mag = self.mag_c();
                mag * mag
            }
        }
    }

    /// Azimuth around the Y axis
    pub fn ang1(&self) -> f64 {
        match *self {
            Coords::Cartesian { x, z, .. } => x.atan2(z),
            Coords::Spherical { ang1, .. } | Coords::Cylindrical { ang1, .. } => ang1,
        }
    }

    /// Elevation from the horizontal plane
    pub fn ang2(&self) -> f64 {
        match *self {
            Coords::Spherical { ang2, .. } => ang2,
            Coords::Cylindrical { mag, y, .. } => y.atan2(mag),
            Coords::Cartesian { x, y, z } => elevation(x, y, z),
        }
    }
}

impl From<Cartesian3> for Coords {
    fn from(cart: Cartesian3) -> Self {
        Coords::Cartesian {
            x: cart.x,
            y: cart.y,
            z: cart.z,
        }
    }
}
