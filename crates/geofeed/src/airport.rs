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

//! Airport and route markers.
//!
//! Airports are registered by their OpenFlights id, then every route looks
//! up its two endpoint ids. Routes whose endpoints both resolve become
//! (initially hidden) line markers and flag their airports as having
//! routes; routes with an unknown endpoint are dropped.

use std::collections::HashMap;
use std::fmt;

use log::{debug, info};

use crate::feature::{PointFeature, Properties, ShapeFeature};
use crate::feed::FeedError;
use crate::geo::Location;
use crate::legend::{Legend, LegendEntry};
use crate::marker::{Marker, Rgb};

/// Radius of every airport marker, in pixels.
pub const AIRPORT_RADIUS: f32 = 5.0;

/// Property used for the airport category when none is configured.
pub const DEFAULT_CATEGORY_PROPERTY: &str = "type";

/// Feed-defined airport classification, compared for equality only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AirportCategory(String);

impl AirportCategory {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Category of airports whose feed row carries no label.
    #[must_use]
    pub fn unknown() -> Self {
        Self("unknown".to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AirportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirportMarker {
    pub marker: Marker,
    pub airport_id: i64,
    pub category: AirportCategory,
    has_routes: bool,
}

impl AirportMarker {
    /// Build an airport marker; the feature id must be the numeric airport id.
    pub fn from_feature(feature: &PointFeature, category_property: &str) -> Result<Self, FeedError> {
        let raw_id = feature
            .id
            .as_deref()
            .ok_or_else(|| FeedError::MissingField("id".to_string()))?;
        let airport_id = raw_id.trim().parse::<i64>().map_err(|e| FeedError::InvalidValue {
            field: "id".to_string(),
            value: format!("{raw_id} ({e})"),
        })?;

        let category = feature
            .properties
            .get(category_property)
            .map_or_else(AirportCategory::unknown, |v| AirportCategory::new(v.to_string()));

        Ok(Self {
            marker: Marker::point(feature, AIRPORT_RADIUS, Rgb::NEAR_BLACK),
            airport_id,
            category,
            has_routes: false,
        })
    }

    #[must_use]
    pub fn has_routes(&self) -> bool {
        self.has_routes
    }

    /// Flag the airport as a route endpoint; the colour follows the flag.
    pub fn set_has_routes(&mut self, has_routes: bool) {
        self.has_routes = has_routes;
        self.marker.color = if has_routes { Rgb::YELLOW } else { Rgb::NEAR_BLACK };
    }

    #[must_use]
    pub fn location(&self) -> Location {
        // Airport markers are always point markers.
        self.marker.locations()[0]
    }

    /// Short label for the hover tooltip: IATA code and name when known.
    #[must_use]
    pub fn label(&self) -> String {
        let props = &self.marker.properties;
        match (props.text("code"), props.text("name")) {
            (Some(code), Some(name)) => format!("{code} {name}"),
            (None, Some(name)) => name.to_string(),
            (Some(code), None) => code.to_string(),
            (None, None) => format!("#{}", self.airport_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteMarker {
    pub marker: Marker,
    pub source: i64,
    pub destination: i64,
}

impl RouteMarker {
    #[must_use]
    pub fn touches(&self, location: Location) -> bool {
        self.marker.locations().contains(&location)
    }
}

/// Lookup from airport id to marker index and location.
#[derive(Debug, Default)]
pub struct AirportRegistry {
    index: HashMap<i64, usize>,
    locations: HashMap<i64, Location>,
}

impl AirportRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, airport_id: i64, index: usize, location: Location) -> Result<(), FeedError> {
        if self.index.contains_key(&airport_id) {
            return Err(FeedError::DuplicateId(airport_id));
        }
        self.index.insert(airport_id, index);
        self.locations.insert(airport_id, location);
        Ok(())
    }

    #[must_use]
    pub fn index(&self, airport_id: i64) -> Option<usize> {
        self.index.get(&airport_id).copied()
    }

    #[must_use]
    pub fn location(&self, airport_id: i64) -> Option<Location> {
        self.locations.get(&airport_id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Outcome of route resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteStats {
    pub resolved: usize,
    /// Routes with at least one endpoint missing from the airport table.
    pub dropped: usize,
}

/// All airport and route markers of the airport map.
#[derive(Debug)]
pub struct RouteMap {
    pub airports: Vec<AirportMarker>,
    pub routes: Vec<RouteMarker>,
    registry: AirportRegistry,
    stats: RouteStats,
}

impl RouteMap {
    /// Build airport markers, register them and resolve every route.
    pub fn build(
        airport_features: &[PointFeature],
        route_features: Vec<ShapeFeature>,
        category_property: &str,
    ) -> Result<Self, FeedError> {
        let mut airports = Vec::with_capacity(airport_features.len());
        let mut registry = AirportRegistry::new();

        for feature in airport_features {
            let airport = AirportMarker::from_feature(feature, category_property)?;
            registry.insert(airport.airport_id, airports.len(), airport.location())?;
            airports.push(airport);
        }

        let mut map = Self {
            airports,
            routes: Vec::with_capacity(route_features.len()),
            registry,
            stats: RouteStats::default(),
        };

        for route in route_features {
            map.add_route(route)?;
        }

        info!(
            "Built {} airports and {} routes ({} routes dropped with unknown endpoints)",
            map.airports.len(),
            map.stats.resolved,
            map.stats.dropped
        );
        Ok(map)
    }

    fn add_route(&mut self, mut route: ShapeFeature) -> Result<(), FeedError> {
        let source = endpoint_id(&route.properties, "source")?;
        let destination = endpoint_id(&route.properties, "destination")?;

        let resolved = source.zip(destination).and_then(|(src, dst)| {
            let src_loc = self.registry.location(src)?;
            let dst_loc = self.registry.location(dst)?;
            Some((src, src_loc, dst, dst_loc))
        });

        let Some((src, src_loc, dst, dst_loc)) = resolved else {
            debug!("Dropping route with unknown endpoint: {:?} -> {:?}", source, destination);
            self.stats.dropped += 1;
            return Ok(());
        };

        route.add_location(src_loc);
        route.add_location(dst_loc);

        for id in [src, dst] {
            if let Some(index) = self.registry.index(id) {
                self.airports[index].set_has_routes(true);
            }
        }

        let mut marker = Marker::lines(&route, Rgb::ROUTE);
        marker.hidden = true;
        self.routes.push(RouteMarker {
            marker,
            source: src,
            destination: dst,
        });
        self.stats.resolved += 1;
        Ok(())
    }

    #[must_use]
    pub fn registry(&self) -> &AirportRegistry {
        &self.registry
    }

    #[must_use]
    pub fn stats(&self) -> RouteStats {
        self.stats
    }

    #[must_use]
    pub fn airport_by_id(&self, airport_id: i64) -> Option<&AirportMarker> {
        self.registry.index(airport_id).map(|i| &self.airports[i])
    }

    /// Default render state: every airport visible, every route hidden.
    pub fn show_defaults(&mut self) {
        for route in &mut self.routes {
            route.marker.hidden = true;
        }
        for airport in &mut self.airports {
            airport.marker.hidden = false;
        }
    }
}

/// Read an endpoint id; an absent id (`\N` in the table) is `None`.
fn endpoint_id(properties: &Properties, key: &str) -> Result<Option<i64>, FeedError> {
    if properties.contains(key) {
        properties.int(key).map(Some)
    } else {
        Ok(None)
    }
}

/// The "Airport Key".
#[must_use]
pub fn airport_legend() -> Legend {
    Legend {
        title: "Airport Key",
        entries: vec![
            LegendEntry {
                label: "Has routes data",
                color: Rgb::YELLOW,
                size: 12.0,
            },
            LegendEntry {
                label: "No routes data",
                color: Rgb::NEAR_BLACK,
                size: 12.0,
            },
        ],
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn airport(id: i64, lat: f32, lon: f32, kind: &str) -> PointFeature {
        PointFeature::new(Location::new(lat, lon))
            .with_id(id.to_string())
            .with_property("name", format!("Airport {id}"))
            .with_property("type", kind)
    }

    pub(crate) fn route(source: &str, destination: &str) -> ShapeFeature {
        let mut props = Properties::new();
        if source != "\\N" {
            props.insert("source", source);
        }
        if destination != "\\N" {
            props.insert("destination", destination);
        }
        ShapeFeature::new(props)
    }

    #[test]
    fn test_airport_marker_defaults() {
        let marker = AirportMarker::from_feature(&airport(1, 0.0, 0.0, "large"), "type").unwrap();
        assert_eq!(marker.airport_id, 1);
        assert_eq!(marker.marker.radius(), Some(AIRPORT_RADIUS));
        assert!(!marker.has_routes());
        assert!(!marker.marker.hidden);
        assert!(!marker.marker.selected);
        assert_eq!(marker.category, AirportCategory::new("large"));
        assert_eq!(marker.marker.color, Rgb::NEAR_BLACK);
    }

    #[test]
    fn test_category_falls_back_to_unknown() {
        let marker = AirportMarker::from_feature(&airport(1, 0.0, 0.0, "large"), "size").unwrap();
        assert_eq!(marker.category, AirportCategory::unknown());
    }

    #[test]
    fn test_airport_id_must_be_numeric() {
        let feature = PointFeature::new(Location::new(0.0, 0.0)).with_id("LAX");
        assert!(matches!(
            AirportMarker::from_feature(&feature, "type"),
            Err(FeedError::InvalidValue { .. })
        ));
        let feature = PointFeature::new(Location::new(0.0, 0.0));
        assert!(matches!(
            AirportMarker::from_feature(&feature, "type"),
            Err(FeedError::MissingField(_))
        ));
    }

    #[test]
    fn test_resolved_route_locations_and_flags() {
        let airports = vec![
            airport(1, 0.0, 0.0, "large"),
            airport(2, 1.0, 1.0, "small"),
            airport(3, 2.0, 2.0, "small"),
        ];
        let map = RouteMap::build(&airports, vec![route("2", "1")], "type").unwrap();

        assert_eq!(map.routes.len(), 1);
        let line = &map.routes[0];
        assert_eq!(
            line.marker.locations(),
            [Location::new(1.0, 1.0), Location::new(0.0, 0.0)]
        );
        assert!(line.marker.hidden);
        assert_eq!((line.source, line.destination), (2, 1));

        assert!(map.airport_by_id(1).unwrap().has_routes());
        assert!(map.airport_by_id(2).unwrap().has_routes());
        assert!(!map.airport_by_id(3).unwrap().has_routes());
        assert_eq!(map.airport_by_id(1).unwrap().marker.color, Rgb::YELLOW);
        assert_eq!(map.stats(), RouteStats { resolved: 1, dropped: 0 });
    }

    #[test]
    fn test_unresolved_route_is_dropped() {
        let airports = vec![airport(1, 0.0, 0.0, "large"), airport(2, 1.0, 1.0, "small")];
        let routes = vec![route("1", "99"), route("\\N", "2")];
        let map = RouteMap::build(&airports, routes, "type").unwrap();

        assert!(map.routes.is_empty());
        assert!(!map.airport_by_id(1).unwrap().has_routes());
        assert!(!map.airport_by_id(2).unwrap().has_routes());
        assert_eq!(map.stats(), RouteStats { resolved: 0, dropped: 2 });
    }

    #[test]
    fn test_malformed_route_id_is_error() {
        let airports = vec![airport(1, 0.0, 0.0, "large")];
        assert!(matches!(
            RouteMap::build(&airports, vec![route("one", "1")], "type"),
            Err(FeedError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_duplicate_airport_id_is_error() {
        let airports = vec![airport(7, 0.0, 0.0, "large"), airport(7, 1.0, 1.0, "small")];
        assert!(matches!(
            RouteMap::build(&airports, Vec::new(), "type"),
            Err(FeedError::DuplicateId(7))
        ));
    }

    #[test]
    fn test_airports_keep_feed_order() {
        let airports = vec![
            airport(30, 0.0, 0.0, "a"),
            airport(10, 1.0, 1.0, "b"),
            airport(20, 2.0, 2.0, "c"),
        ];
        let map = RouteMap::build(&airports, Vec::new(), "type").unwrap();
        let ids: Vec<_> = map.airports.iter().map(|a| a.airport_id).collect();
        assert_eq!(ids, [30, 10, 20]);
        assert_eq!(map.registry().len(), 3);
        assert_eq!(map.registry().location(10), Some(Location::new(1.0, 1.0)));
    }

    #[test]
    fn test_airport_label() {
        let feature = airport(3484, 33.9, -118.4, "airport")
            .with_property("code", "LAX")
            .with_property("name", "Los Angeles International Airport");
        let marker = AirportMarker::from_feature(&feature, "type").unwrap();
        assert_eq!(marker.label(), "LAX Los Angeles International Airport");
    }

    #[test]
    fn test_airport_legend() {
        let legend = airport_legend();
        assert_eq!(legend.title, "Airport Key");
        assert_eq!(legend.entries[0].color, Rgb::YELLOW);
        assert_eq!(legend.entries[1].label, "No routes data");
    }
}
