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

//! Renderable markers.
//!
//! A [`Marker`] is built once from a feature and kept for the whole session.
//! Its geometry and properties never change afterwards; `hidden` and
//! `selected` are render state flipped by the interaction layer.

use crate::feature::{PointFeature, Properties, ShapeFeature};
use crate::geo::{Location, Projection, ScreenPoint};

/// Pixel distance from a line within which the pointer counts as inside it.
pub const LINE_HIT_TOLERANCE: f32 = 3.0;

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    /// Airports without route data.
    pub const NEAR_BLACK: Rgb = Rgb(11, 11, 11);
    pub const ROUTE: Rgb = Rgb(120, 200, 255);
}

/// Geometry of a marker.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerShape {
    Point { location: Location, radius: f32 },
    Lines { locations: Vec<Location> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub shape: MarkerShape,
    pub color: Rgb,
    pub hidden: bool,
    pub selected: bool,
    /// Properties of the feature this marker was built from.
    pub properties: Properties,
}

impl Marker {
    #[must_use]
    pub fn point(feature: &PointFeature, radius: f32, color: Rgb) -> Self {
        Self {
            shape: MarkerShape::Point {
                location: feature.location,
                radius,
            },
            color,
            hidden: false,
            selected: false,
            properties: feature.properties.clone(),
        }
    }

    #[must_use]
    pub fn lines(feature: &ShapeFeature, color: Rgb) -> Self {
        Self {
            shape: MarkerShape::Lines {
                locations: feature.locations.clone(),
            },
            color,
            hidden: false,
            selected: false,
            properties: feature.properties.clone(),
        }
    }

    #[must_use]
    pub fn locations(&self) -> &[Location] {
        match &self.shape {
            MarkerShape::Point { location, .. } => std::slice::from_ref(location),
            MarkerShape::Lines { locations } => locations,
        }
    }

    /// First location of the marker; `None` only for an empty line marker.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        self.locations().first().copied()
    }

    /// Radius in pixels for point markers.
    #[must_use]
    pub fn radius(&self) -> Option<f32> {
        match self.shape {
            MarkerShape::Point { radius, .. } => Some(radius),
            MarkerShape::Lines { .. } => None,
        }
    }

    /// Hit test against a pixel position under the given projection.
    pub fn contains(&self, projection: &dyn Projection, point: ScreenPoint) -> bool {
        match &self.shape {
            MarkerShape::Point { location, radius } => {
                projection.project(*location).distance(point) < *radius
            }
            MarkerShape::Lines { locations } => {
                let projected: Vec<ScreenPoint> =
                    locations.iter().map(|l| projection.project(*l)).collect();
                match projected.as_slice() {
                    [] => false,
                    [only] => only.distance(point) < LINE_HIT_TOLERANCE,
                    _ => projected
                        .windows(2)
                        .any(|w| point.distance_to_segment(w[0], w[1]) < LINE_HIT_TOLERANCE),
                }
            }
        }
    }
}
