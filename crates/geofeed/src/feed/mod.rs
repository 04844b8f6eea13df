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

//! Feed layer: turns raw feed bytes into features.
//!
//! Earthquakes come from the USGS summary feeds (Atom or GeoJSON, detected
//! from the payload). Airports and routes come from the OpenFlights
//! `airports.dat` / `routes.dat` tables.

mod atom;
mod geojson;
mod openflights;

pub use atom::AtomQuakeParser;
pub use geojson::GeoJsonQuakeParser;
pub use openflights::{parse_airports, parse_routes, OPENFLIGHTS_NULL};

use thiserror::Error;

use crate::feature::PointFeature;

/// Errors raised while reading a feed or building markers from it.
///
/// All of them are fatal for the load that produced them.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid feed format: {0}")]
    InvalidFormat(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("duplicate airport id: {0}")]
    DuplicateId(i64),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Payload format of an earthquake feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    Atom,
    GeoJson,
}

/// UTF-8 byte order mark, common at the start of saved feed files.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Drop a leading UTF-8 byte order mark, if any.
fn strip_bom(input: &[u8]) -> &[u8] {
    input.strip_prefix(UTF8_BOM).unwrap_or(input)
}

impl FeedFormat {
    /// Guess the format from the first non-whitespace byte of the payload,
    /// after any byte order mark.
    #[must_use]
    pub fn detect(input: &[u8]) -> Option<Self> {
        let first = strip_bom(input).iter().find(|b| !b.is_ascii_whitespace())?;
        match first {
            b'<' => Some(FeedFormat::Atom),
            b'{' => Some(FeedFormat::GeoJson),
            _ => None,
        }
    }
}

/// Trait for earthquake feed parsers.
pub trait QuakeFeed {
    /// Parse a complete feed document into point features.
    fn parse(&mut self, input: &[u8]) -> Result<Vec<PointFeature>, FeedError>;
}

/// Parse an earthquake feed in whichever format it turns out to be.
pub fn parse_quake_feed(input: &[u8]) -> Result<Vec<PointFeature>, FeedError> {
    let input = strip_bom(input);
    match FeedFormat::detect(input) {
        Some(FeedFormat::Atom) => AtomQuakeParser::new().parse(input),
        Some(FeedFormat::GeoJson) => GeoJsonQuakeParser::new().parse(input),
        None => Err(FeedError::InvalidFormat(
            "expected an Atom or GeoJSON document".to_string(),
        )),
    }
}
