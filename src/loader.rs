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

//! Startup data loading.
//!
//! Everything here runs once, blocking, before the window opens. Any error
//! is fatal to startup; there are no retries.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use geofeed::airport::RouteMap;
use geofeed::feed::{parse_airports, parse_quake_feed, parse_routes};
use geofeed::quake::quake_markers;
use geofeed::Marker;
use log::info;

use crate::config::FeedSource;

/// Fetch or read the raw earthquake feed.
pub fn read_feed(source: &FeedSource) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    match source {
        FeedSource::Url(url) => {
            info!("Downloading earthquake feed from {}...", url);
            let response = reqwest::blocking::get(url)?.error_for_status()?;
            let bytes = response.bytes()?;
            info!("Downloaded earthquake feed ({} bytes)", bytes.len());
            Ok(bytes.to_vec())
        }
        FeedSource::File(path) => {
            info!("Reading earthquake feed from {}", path.display());
            Ok(std::fs::read(path)?)
        }
    }
}

/// Load the earthquake feed and build one marker per quake.
pub fn load_quakes(source: &FeedSource) -> Result<Vec<Marker>, Box<dyn std::error::Error>> {
    let bytes = read_feed(source)?;
    let features = parse_quake_feed(&bytes)?;
    if let Some(first) = features.first() {
        info!("First earthquake properties: {}", first.properties);
    }

    let markers = quake_markers(&features)?;
    info!("Loaded {} earthquakes", markers.len());
    Ok(markers)
}

/// Load the OpenFlights tables and resolve every route.
pub fn load_route_map<P: AsRef<Path>>(
    airports_path: P,
    routes_path: P,
    category_property: &str,
) -> Result<RouteMap, Box<dyn std::error::Error>> {
    let airports = parse_airports(BufReader::new(File::open(airports_path.as_ref())?))?;
    info!("Loaded {} airports", airports.len());

    let routes = parse_routes(BufReader::new(File::open(routes_path.as_ref())?))?;
    info!("Loaded {} routes", routes.len());

    Ok(RouteMap::build(&airports, routes, category_property)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_quakes_from_file() {
        let feed = temp_file(
            r#"<feed xmlns:georss="http://www.georss.org/georss">
              <entry><title>M 3.1 - A</title><georss:point>1 2</georss:point></entry>
              <entry><title>M 6.0 - B</title><georss:point>3 4</georss:point></entry>
            </feed>"#,
        );

        let markers = load_quakes(&FeedSource::File(feed.path().to_path_buf())).unwrap();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].radius(), Some(8.0));
        assert_eq!(markers[1].radius(), Some(25.0));
    }

    #[test]
    fn test_load_quakes_bad_magnitude_is_fatal() {
        let feed = temp_file(
            r#"{"features":[{"id":"a","properties":{"mag":"big"},"geometry":{"coordinates":[1.0,2.0]}}]}"#,
        );
        assert!(load_quakes(&FeedSource::File(feed.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_missing_feed_file_is_error() {
        let source = FeedSource::File("/nonexistent/feed.atom".into());
        assert!(load_quakes(&source).is_err());
    }

    #[test]
    fn test_load_route_map() {
        let airports = temp_file(
            "1,\"A\",\"X\",\"X\",\"AAA\",\"AAAA\",0,0,0,0,\"U\",\"Etc/UTC\",\"airport\"\n\
             2,\"B\",\"Y\",\"Y\",\"BBB\",\"BBBB\",1,1,0,0,\"U\",\"Etc/UTC\",\"station\"\n",
        );
        let routes = temp_file("XX,1,AAA,1,BBB,2,,0,737\nXX,1,AAA,1,ZZZ,\\N,,0,737\n");

        let map = load_route_map(airports.path(), routes.path(), "type").unwrap();
        assert_eq!(map.airports.len(), 2);
        assert_eq!(map.routes.len(), 1);
        assert_eq!(map.stats().dropped, 1);
        assert!(map.airports.iter().all(geofeed::AirportMarker::has_routes));
    }
}
