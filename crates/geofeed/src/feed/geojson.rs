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

//! USGS GeoJSON earthquake feed parser.

use chrono::{DateTime, SecondsFormat};
use log::debug;
use serde::Deserialize;

use super::{FeedError, QuakeFeed};
use crate::feature::PointFeature;
use crate::geo::Location;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<GeoJsonFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeature {
    id: Option<String>,
    properties: QuakeProperties,
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct QuakeProperties {
    mag: Option<f64>,
    place: Option<String>,
    /// Origin time, milliseconds since the Unix epoch.
    time: Option<i64>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// `[longitude, latitude, depth_km]`
    coordinates: Vec<f64>,
}

/// Parser for the USGS GeoJSON summary feeds.
#[derive(Debug, Default)]
pub struct GeoJsonQuakeParser;

impl GeoJsonQuakeParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl QuakeFeed for GeoJsonQuakeParser {
    fn parse(&mut self, input: &[u8]) -> Result<Vec<PointFeature>, FeedError> {
        let collection: FeatureCollection = serde_json::from_slice(input)?;

        let mut features = Vec::with_capacity(collection.features.len());
        for item in collection.features {
            let Some(geometry) = item.geometry else {
                debug!("Skipping GeoJSON feature without geometry: {:?}", item.id);
                continue;
            };
            features.push(to_point_feature(item.id, item.properties, &geometry)?);
        }

        debug!("Parsed {} earthquakes from GeoJSON feed", features.len());
        Ok(features)
    }
}

#[allow(clippy::cast_possible_truncation, reason = "feed coordinates fit in f32")]
fn to_point_feature(
    id: Option<String>,
    props: QuakeProperties,
    geometry: &Geometry,
) -> Result<PointFeature, FeedError> {
    let [lon, lat, rest @ ..] = geometry.coordinates.as_slice() else {
        return Err(FeedError::InvalidValue {
            field: "coordinates".to_string(),
            value: format!("{:?}", geometry.coordinates),
        });
    };

    let location = Location::new(*lat as f32, *lon as f32);
    if !location.is_valid() {
        return Err(FeedError::InvalidValue {
            field: "coordinates".to_string(),
            value: format!("{:?}", geometry.coordinates),
        });
    }

    let mut feature = PointFeature::new(location);
    feature.id = id;

    if let Some(mag) = props.mag {
        feature.properties.insert("magnitude", mag);
    }
    if let Some(depth) = rest.first() {
        feature.properties.insert("depth", depth.abs());
    }
    if let Some(title) = props.title {
        feature.properties.insert("title", title);
    }
    if let Some(place) = props.place {
        feature.properties.insert("place", place);
    }
    if let Some(time) = props.time.and_then(DateTime::from_timestamp_millis) {
        feature
            .properties
            .insert("time", time.to_rfc3339_opts(SecondsFormat::Millis, true));
    }

    Ok(feature)
}
