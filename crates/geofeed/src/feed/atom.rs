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

//! USGS Atom earthquake feed parser.
//!
//! Entry format (only the elements we read):
//! ```text
//! <entry>
//!   <title>M 4.6 - 85km SSW of Nuku`alofa, Tonga</title>
//!   <updated>2015-08-07T03:51:17.040Z</updated>
//!   <georss:point>-21.9 -175.3</georss:point>
//!   <georss:elev>-10000</georss:elev>
//!   <category label="Age" term="Past Week"/>
//! </entry>
//! ```

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{FeedError, QuakeFeed};
use crate::feature::PointFeature;
use crate::geo::Location;

/// Parser for the USGS Atom summary feeds.
#[derive(Debug, Default)]
pub struct AtomQuakeParser;

impl AtomQuakeParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Fields collected for one `<entry>` before it becomes a feature.
#[derive(Debug, Default)]
struct EntryFields {
    id: Option<String>,
    title: Option<String>,
    updated: Option<String>,
    point: Option<String>,
    elev: Option<String>,
    age: Option<String>,
}

impl EntryFields {
    fn set(&mut self, tag: &[u8], text: String) {
        let slot = match tag {
            b"id" => &mut self.id,
            b"title" => &mut self.title,
            b"updated" => &mut self.updated,
            b"georss:point" => &mut self.point,
            b"georss:elev" => &mut self.elev,
            _ => return,
        };
        slot.get_or_insert_with(String::new).push_str(&text);
    }

    /// Build the feature, or `None` for entries without a position.
    fn into_feature(self) -> Result<Option<PointFeature>, FeedError> {
        let Some(point) = self.point else {
            debug!("Skipping Atom entry without georss:point: {:?}", self.title);
            return Ok(None);
        };

        let mut feature = PointFeature::new(parse_point(&point)?);
        feature.id = self.id;

        if let Some(title) = self.title {
            feature.properties.insert("magnitude", parse_title_magnitude(&title)?);
            feature.properties.insert("title", title);
        }

        if let Some(elev) = self.elev {
            feature.properties.insert("depth", parse_depth_km(&elev)?);
        }

        if let Some(age) = self.age {
            feature.properties.insert("age", age);
        }

        if let Some(updated) = self.updated {
            feature.properties.insert("time", updated);
        }

        Ok(Some(feature))
    }
}

impl QuakeFeed for AtomQuakeParser {
    fn parse(&mut self, input: &[u8]) -> Result<Vec<PointFeature>, FeedError> {
        let text = std::str::from_utf8(input)
            .map_err(|e| FeedError::InvalidFormat(format!("invalid UTF-8: {e}")))?;

        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut features = Vec::new();
        let mut entry: Option<EntryFields> = None;
        let mut current_tag: Option<Vec<u8>> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name().as_ref().to_vec();
                    if name == b"entry" {
                        entry = Some(EntryFields::default());
                    } else if let Some(fields) = entry.as_mut() {
                        if name == b"category" {
                            read_age_category(&e, fields)?;
                        }
                        current_tag = Some(name);
                    }
                }
                Event::Empty(e) => {
                    if let Some(fields) = entry.as_mut() {
                        if e.name().as_ref() == b"category" {
                            read_age_category(&e, fields)?;
                        }
                    }
                }
                Event::Text(t) => {
                    if let (Some(fields), Some(tag)) = (entry.as_mut(), current_tag.as_deref()) {
                        let text = t
                            .unescape()
                            .map_err(|e| FeedError::InvalidFormat(e.to_string()))?;
                        fields.set(tag, text.into_owned());
                    }
                }
                Event::CData(t) => {
                    if let (Some(fields), Some(tag)) = (entry.as_mut(), current_tag.as_deref()) {
                        fields.set(tag, String::from_utf8_lossy(&t.into_inner()).into_owned());
                    }
                }
                Event::End(e) => {
                    if e.name().as_ref() == b"entry" {
                        if let Some(fields) = entry.take() {
                            if let Some(feature) = fields.into_feature()? {
                                features.push(feature);
                            }
                        }
                    }
                    current_tag = None;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        debug!("Parsed {} earthquakes from Atom feed", features.len());
        Ok(features)
    }
}

fn read_age_category(e: &BytesStart<'_>, fields: &mut EntryFields) -> Result<(), FeedError> {
    let mut label = None;
    let mut term = None;
    for attr in e.attributes().flatten() {
        let value = attr
            .unescape_value()
            .map_err(|err| FeedError::InvalidFormat(err.to_string()))?
            .into_owned();
        match attr.key.as_ref() {
            b"label" => label = Some(value),
            b"term" => term = Some(value),
            _ => {}
        }
    }

    if label.as_deref() == Some("Age") {
        fields.age = term;
    }
    Ok(())
}

/// Parse a `georss:point` body ("lat lon").
fn parse_point(text: &str) -> Result<Location, FeedError> {
    let invalid = || FeedError::InvalidValue {
        field: "georss:point".to_string(),
        value: text.to_string(),
    };

    let mut parts = text.split_whitespace();
    let lat = parts.next().and_then(|v| v.parse::<f32>().ok()).ok_or_else(invalid)?;
    let lon = parts.next().and_then(|v| v.parse::<f32>().ok()).ok_or_else(invalid)?;

    let location = Location::new(lat, lon);
    if location.is_valid() {
        Ok(location)
    } else {
        Err(invalid())
    }
}

/// Pull the magnitude out of a title such as `"M 4.6 - 85km SSW of ..."`.
fn parse_title_magnitude(title: &str) -> Result<f64, FeedError> {
    let invalid = || FeedError::InvalidValue {
        field: "magnitude".to_string(),
        value: title.to_string(),
    };

    let rest = title.trim_start().strip_prefix('M').ok_or_else(invalid)?;
    let token = rest.split_whitespace().next().ok_or_else(invalid)?;
    token.parse::<f64>().ok().filter(|m| m.is_finite()).ok_or_else(invalid)
}

/// Convert `georss:elev` (metres, negative below sea level) to a depth in
/// kilometres truncated to one decimal.
fn parse_depth_km(text: &str) -> Result<f64, FeedError> {
    let metres = text.trim().parse::<f64>().map_err(|e| FeedError::InvalidValue {
        field: "depth".to_string(),
        value: format!("{text} ({e})"),
    })?;
    Ok(((metres / 100.0).trunc() / 10.0).abs())
}
