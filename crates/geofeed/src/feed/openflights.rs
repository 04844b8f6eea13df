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

//! OpenFlights `airports.dat` and `routes.dat` readers.
//!
//! Both files are header-less CSV. `\N` marks a missing value and is
//! dropped rather than stored.
//!
//! ```text
//! airports: id,name,city,country,iata,icao,lat,lon,altitude,tz,dst,tz_db[,type,source]
//! routes:   airline,airline_id,source,source_id,dest,dest_id,codeshare,stops,equipment
//! ```

use std::io::Read;

use csv::StringRecord;
use log::debug;

use super::FeedError;
use crate::feature::{PointFeature, Properties, ShapeFeature};
use crate::geo::Location;

/// The OpenFlights null marker.
pub const OPENFLIGHTS_NULL: &str = "\\N";

const AIRPORT_MIN_COLUMNS: usize = 8;
const ROUTE_MIN_COLUMNS: usize = 6;

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

/// Column value, or `None` when empty or `\N`.
fn field(record: &StringRecord, index: usize) -> Option<&str> {
    record
        .get(index)
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != OPENFLIGHTS_NULL)
}

fn coordinate(record: &StringRecord, index: usize, name: &str) -> Result<f32, FeedError> {
    let raw = field(record, index).ok_or_else(|| FeedError::MissingField(name.to_string()))?;
    raw.parse::<f32>().map_err(|e| FeedError::InvalidValue {
        field: name.to_string(),
        value: format!("{raw} ({e})"),
    })
}

/// Read every airport row into a point feature whose id is the OpenFlights
/// airport id.
pub fn parse_airports<R: Read>(reader: R) -> Result<Vec<PointFeature>, FeedError> {
    let mut features = Vec::new();

    for (line, result) in csv_reader(reader).records().enumerate() {
        let record = result?;
        if record.len() < AIRPORT_MIN_COLUMNS {
            return Err(FeedError::InvalidFormat(format!(
                "airport row {} has {} columns, expected at least {}",
                line + 1,
                record.len(),
                AIRPORT_MIN_COLUMNS
            )));
        }

        let id = field(&record, 0).ok_or_else(|| FeedError::MissingField("id".to_string()))?;
        let location = Location::new(
            coordinate(&record, 6, "latitude")?,
            coordinate(&record, 7, "longitude")?,
        );

        let mut feature = PointFeature::new(location).with_id(id);
        let named_columns = [
            (1, "name"),
            (2, "city"),
            (3, "country"),
            (4, "code"),
            (5, "icao"),
            (8, "altitude"),
            (12, "type"),
        ];
        for (index, key) in named_columns {
            if let Some(value) = field(&record, index) {
                feature.properties.insert(key, value);
            }
        }

        features.push(feature);
    }

    debug!("Parsed {} airports", features.len());
    Ok(features)
}

/// Read every route row into a shape feature with no locations yet.
///
/// `source` and `destination` hold the endpoint airport ids; routes whose
/// ids are `\N` keep the property absent so they fail to resolve later.
pub fn parse_routes<R: Read>(reader: R) -> Result<Vec<ShapeFeature>, FeedError> {
    let mut routes = Vec::new();

    for (line, result) in csv_reader(reader).records().enumerate() {
        let record = result?;
        if record.len() < ROUTE_MIN_COLUMNS {
            return Err(FeedError::InvalidFormat(format!(
                "route row {} has {} columns, expected at least {}",
                line + 1,
                record.len(),
                ROUTE_MIN_COLUMNS
            )));
        }

        let mut properties = Properties::new();
        let named_columns = [
            (0, "airline"),
            (2, "source_code"),
            (3, "source"),
            (4, "destination_code"),
            (5, "destination"),
            (7, "stops"),
            (8, "equipment"),
        ];
        for (index, key) in named_columns {
            if let Some(value) = field(&record, index) {
                properties.insert(key, value);
            }
        }

        routes.push(ShapeFeature::new(properties));
    }

    debug!("Parsed {} routes", routes.len());
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AIRPORTS: &str = r#"1,"Goroka Airport","Goroka","Papua New Guinea","GKA","AYGA",-6.081689834590001,145.391998291,5282,10,"U","Pacific/Port_Moresby","airport","OurAirports"
3484,"Los Angeles International Airport","Los Angeles","United States","LAX","KLAX",33.94250107,-118.4079971,125,-8,"A","America/Los_Angeles"
5,"Nowhere Strip","Nowhere","Nowhere","\N","\N",10.0,20.0,\N,\N,\N,\N
"#;

    const ROUTES: &str = r#"2B,410,AER,2965,KZN,2990,,0,CR2
AA,24,LAX,3484,JFK,3797,,0,738
ZZ,\N,XXX,\N,LAX,3484,Y,1,
"#;

    #[test]
    fn test_parse_airports() {
        let airports = parse_airports(AIRPORTS.as_bytes()).unwrap();
        assert_eq!(airports.len(), 3);

        let goroka = &airports[0];
        assert_eq!(goroka.id.as_deref(), Some("1"));
        assert!((goroka.location.lat - (-6.081_69)).abs() < 0.0001);
        assert_eq!(goroka.properties.text("code"), Some("GKA"));
        assert_eq!(goroka.properties.text("type"), Some("airport"));
        assert_eq!(goroka.properties.text("country"), Some("Papua New Guinea"));

        let lax = &airports[1];
        assert_eq!(lax.id.as_deref(), Some("3484"));
        assert!(!lax.properties.contains("type"));

        let nowhere = &airports[2];
        assert!(!nowhere.properties.contains("code"));
        assert!(!nowhere.properties.contains("altitude"));
    }

    #[test]
    fn test_parse_airports_bad_latitude() {
        let data = "7,\"X\",\"Y\",\"Z\",\"AAA\",\"BBBB\",north,1.0,0\n";
        assert!(matches!(
            parse_airports(data.as_bytes()),
            Err(FeedError::InvalidValue { field, .. }) if field == "latitude"
        ));
    }

    #[test]
    fn test_parse_airports_short_row() {
        assert!(matches!(
            parse_airports("1,\"Short\",\"Row\"\n".as_bytes()),
            Err(FeedError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_routes() {
        let routes = parse_routes(ROUTES.as_bytes()).unwrap();
        assert_eq!(routes.len(), 3);
        assert!(routes.iter().all(|r| r.locations.is_empty()));

        assert_eq!(routes[1].properties.int("source").unwrap(), 3484);
        assert_eq!(routes[1].properties.int("destination").unwrap(), 3797);
        assert_eq!(routes[1].properties.text("equipment"), Some("738"));

        let unknown = &routes[2];
        assert!(!unknown.properties.contains("source"));
        assert_eq!(unknown.properties.int("destination").unwrap(), 3484);
        assert!(!unknown.properties.contains("equipment"));
    }
}
