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

//! Geo feed parsing and map marker logic, independent of any GUI toolkit.
//!
//! The crate is split in layers that can be used on their own:
//!
//! - **Feed layer** ([`feed`]): USGS earthquake feeds (Atom and GeoJSON) and
//!   the OpenFlights airport/route tables, parsed into [`PointFeature`]s and
//!   [`ShapeFeature`]s.
//! - **Marker layer** ([`marker`], [`quake`], [`airport`]): markers with
//!   magnitude-based styling for earthquakes, and airport/route markers with
//!   route endpoints resolved by airport id.
//! - **Interaction layer** ([`interaction`]): hover and click filtering of
//!   the airport map.
//!
//! The renderer plugs in through the [`Projection`] trait, which is all the
//! hit-testing needs.
//!
//! # Quick Start
//!
//! ```
//! use geofeed::feed::parse_quake_feed;
//! use geofeed::quake::quake_markers;
//!
//! let feed = br#"<feed><entry>
//!     <title>M 5.1 - 20km N of Somewhere</title>
//!     <georss:point>35.0 139.0</georss:point>
//! </entry></feed>"#;
//!
//! let features = parse_quake_feed(feed).unwrap();
//! let markers = quake_markers(&features).unwrap();
//! assert_eq!(markers[0].radius(), Some(25.0));
//! ```
//!
//! ## Airport map
//!
//! ```
//! use geofeed::airport::RouteMap;
//! use geofeed::feed::{parse_airports, parse_routes};
//! use geofeed::interaction::{Interaction, PointerButton};
//! use geofeed::{Location, Projection, ScreenPoint};
//!
//! struct Degrees;
//! impl Projection for Degrees {
//!     fn project(&self, l: Location) -> ScreenPoint {
//!         ScreenPoint::new(l.lon * 100.0, -l.lat * 100.0)
//!     }
//! }
//!
//! let airports = parse_airports("1,\"A\",\"X\",\"X\",\"AAA\",\"AAAA\",0,0,0\n\
//!                                2,\"B\",\"Y\",\"Y\",\"BBB\",\"BBBB\",1,1,0\n".as_bytes()).unwrap();
//! let routes = parse_routes("XX,1,AAA,1,BBB,2,,0,737\n".as_bytes()).unwrap();
//! let mut map = RouteMap::build(&airports, routes, "type").unwrap();
//!
//! let mut interaction = Interaction::new();
//! interaction.clicked(&mut map, &Degrees, ScreenPoint::new(0.0, 0.0), PointerButton::Primary);
//! assert!(!map.routes[0].marker.hidden);
//! ```

pub mod airport;
pub mod feature;
pub mod feed;
pub mod geo;
pub mod interaction;
pub mod legend;
pub mod marker;
pub mod quake;

pub use airport::{AirportCategory, AirportMarker, AirportRegistry, RouteMap, RouteMarker, RouteStats};
pub use feature::{PointFeature, Properties, PropertyValue, ShapeFeature};
pub use feed::{FeedError, FeedFormat};
pub use geo::{Location, Projection, ScreenPoint};
pub use interaction::{FilterMode, Interaction, InteractionOutcome, PointerButton};
pub use legend::{Legend, LegendEntry};
pub use marker::{Marker, MarkerShape, Rgb};
pub use quake::MagnitudeClass;
