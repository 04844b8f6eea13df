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

//! Earthquake markers styled by magnitude.

use log::info;

use crate::feature::PointFeature;
use crate::feed::FeedError;
use crate::legend::{Legend, LegendEntry};
use crate::marker::{Marker, Rgb};

/// Quakes below this magnitude are minor.
pub const THRESHOLD_LIGHT: f32 = 4.0;
/// Quakes below this magnitude (and at least [`THRESHOLD_LIGHT`]) are light.
pub const THRESHOLD_MODERATE: f32 = 5.0;

/// Magnitude bucket of an earthquake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagnitudeClass {
    /// Below 4.0
    Minor,
    /// 4.0 up to, not including, 5.0
    Light,
    /// 5.0 and above
    Moderate,
}

impl MagnitudeClass {
    /// Bucket a magnitude. Boundary values go to the higher class.
    #[must_use]
    pub fn classify(magnitude: f32) -> Self {
        if magnitude < THRESHOLD_LIGHT {
            MagnitudeClass::Minor
        } else if magnitude < THRESHOLD_MODERATE {
            MagnitudeClass::Light
        } else {
            MagnitudeClass::Moderate
        }
    }

    #[must_use]
    pub fn radius(self) -> f32 {
        match self {
            MagnitudeClass::Minor => 8.0,
            MagnitudeClass::Light => 15.0,
            MagnitudeClass::Moderate => 25.0,
        }
    }

    #[must_use]
    pub fn color(self) -> Rgb {
        match self {
            MagnitudeClass::Minor => Rgb::BLUE,
            MagnitudeClass::Light => Rgb::YELLOW,
            MagnitudeClass::Moderate => Rgb::RED,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MagnitudeClass::Minor => "Below 4.0",
            MagnitudeClass::Light => "4.0+ Magnitude",
            MagnitudeClass::Moderate => "5.0+ Magnitude",
        }
    }
}

/// Build the marker for one earthquake from its `magnitude` property.
#[allow(clippy::cast_possible_truncation, reason = "magnitudes are small")]
pub fn quake_marker(feature: &PointFeature) -> Result<Marker, FeedError> {
    let magnitude = feature.properties.number("magnitude")?;
    if !magnitude.is_finite() {
        return Err(FeedError::InvalidValue {
            field: "magnitude".to_string(),
            value: magnitude.to_string(),
        });
    }

    let class = MagnitudeClass::classify(magnitude as f32);
    Ok(Marker::point(feature, class.radius(), class.color()))
}

/// Build markers for every earthquake, failing on the first bad one.
pub fn quake_markers(features: &[PointFeature]) -> Result<Vec<Marker>, FeedError> {
    let markers = features
        .iter()
        .map(quake_marker)
        .collect::<Result<Vec<_>, _>>()?;

    info!("Built {} earthquake markers", markers.len());
    Ok(markers)
}

/// Sort markers smallest first, so strong quakes are drawn on top.
/// The sort is stable: equal radii keep their feed order.
pub fn sort_for_drawing(markers: &mut [Marker]) {
    markers.sort_by(|a, b| a.radius().unwrap_or(0.0).total_cmp(&b.radius().unwrap_or(0.0)));
}

/// The "Earthquake Key", strongest class first.
#[must_use]
pub fn quake_legend() -> Legend {
    Legend {
        title: "Earthquake Key",
        entries: [
            MagnitudeClass::Moderate,
            MagnitudeClass::Light,
            MagnitudeClass::Minor,
        ]
        .into_iter()
        .map(|class| LegendEntry {
            label: class.label(),
            color: class.color(),
            size: class.radius(),
        })
        .collect(),
    }
}
