// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Geographic and screen coordinates.
//!
//! [`Location`] is the geographic half, [`ScreenPoint`] the pixel half, and
//! [`Projection`] is whatever the renderer uses to get from one to the other.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A latitude/longitude pair in degrees.
///
/// Equality and hashing compare the exact bit patterns, so two locations
/// parsed from the same text are equal and can share a `HashSet`.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub lat: f32,
    pub lon: f32,
}

impl Location {
    #[must_use]
    pub fn new(lat: f32, lon: f32) -> Self {
        Self { lat, lon }
    }

    /// Check that both coordinates are finite and inside the valid ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lon.to_bits() == other.lon.to_bits()
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat.to_bits().hash(state);
        self.lon.to_bits().hash(state);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// A pixel position on the map canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: ScreenPoint) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Shortest distance from this point to the segment `a`-`b`.
    #[must_use]
    pub fn distance_to_segment(self, a: ScreenPoint, b: ScreenPoint) -> f32 {
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let len_sq = dx * dx + dy * dy;
        if len_sq <= f32::EPSILON {
            return self.distance(a);
        }

        let t = (((self.x - a.x) * dx + (self.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
        self.distance(ScreenPoint::new(a.x + t * dx, a.y + t * dy))
    }
}

/// Maps geographic locations onto the current map canvas.
///
/// Implemented by the renderer for its current zoom and pan state; the
/// hit-testing in [`crate::marker::Marker::contains`] is evaluated against it.
pub trait Projection {
    fn project(&self, location: Location) -> ScreenPoint;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Flat projection used across the crate's tests: one degree is `scale` pixels.
    pub(crate) struct FlatProjection {
        pub scale: f32,
    }

    impl Projection for FlatProjection {
        fn project(&self, location: Location) -> ScreenPoint {
            ScreenPoint::new(location.lon * self.scale, -location.lat * self.scale)
        }
    }

    #[test]
    fn test_location_hash_set_membership() {
        let mut set = HashSet::new();
        set.insert(Location::new(32.7336, -117.1897));
        assert!(set.contains(&Location::new(32.7336, -117.1897)));
        assert!(!set.contains(&Location::new(32.7337, -117.1897)));
    }

    #[test]
    fn test_location_validity() {
        assert!(Location::new(45.0, -122.0).is_valid());
        assert!(!Location::new(91.0, 0.0).is_valid());
        assert!(!Location::new(0.0, f32::NAN).is_valid());
    }

    #[test]
    fn test_distance_to_segment() {
        let a = ScreenPoint::new(0.0, 0.0);
        let b = ScreenPoint::new(10.0, 0.0);
        assert!((ScreenPoint::new(5.0, 3.0).distance_to_segment(a, b) - 3.0).abs() < 0.0001);
        assert!((ScreenPoint::new(13.0, 4.0).distance_to_segment(a, b) - 5.0).abs() < 0.0001);
        assert!((ScreenPoint::new(0.0, 2.0).distance_to_segment(a, a) - 2.0).abs() < 0.0001);
    }
}
