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

//! Parsed geo-records and their property bags.

use std::collections::BTreeMap;
use std::fmt;

use crate::feed::FeedError;
use crate::geo::Location;

/// A single property value as it came out of a feed.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(text) => f.write_str(text),
            PropertyValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

/// Named properties of a feature, kept in key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(BTreeMap<String, PropertyValue>);

impl Properties {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(PropertyValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Read a numeric property.
    ///
    /// Text values are accepted when they parse as a number; anything else
    /// is an error, never a default.
    pub fn number(&self, key: &str) -> Result<f64, FeedError> {
        match self.0.get(key) {
            Some(PropertyValue::Number(n)) => Ok(*n),
            Some(PropertyValue::Text(text)) => {
                text.trim()
                    .parse::<f64>()
                    .map_err(|e| FeedError::InvalidValue {
                        field: key.to_string(),
                        value: format!("{text} ({e})"),
                    })
            }
            None => Err(FeedError::MissingField(key.to_string())),
        }
    }

    /// Read an integer property (ids in the OpenFlights tables).
    pub fn int(&self, key: &str) -> Result<i64, FeedError> {
        let invalid = |value: String| FeedError::InvalidValue {
            field: key.to_string(),
            value,
        };

        match self.0.get(key) {
            Some(PropertyValue::Text(text)) => {
                text.trim().parse::<i64>().map_err(|e| invalid(format!("{text} ({e})")))
            }
            #[allow(clippy::cast_possible_truncation, reason = "fract() == 0 checked first")]
            Some(PropertyValue::Number(n)) if n.fract() == 0.0 && n.is_finite() => Ok(*n as i64),
            Some(PropertyValue::Number(n)) => Err(invalid(n.to_string())),
            None => Err(FeedError::MissingField(key.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

/// A feature with a single location (an earthquake, an airport).
#[derive(Debug, Clone, PartialEq)]
pub struct PointFeature {
    pub id: Option<String>,
    pub location: Location,
    pub properties: Properties,
}

impl PointFeature {
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self {
            id: None,
            location,
            properties: Properties::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key, value);
        self
    }
}

/// A feature made of an ordered list of locations (a route polyline).
///
/// Routes come out of the parser with no locations; they are filled in
/// once both endpoints resolve against the airport registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeFeature {
    pub locations: Vec<Location>,
    pub properties: Properties,
}

impl ShapeFeature {
    #[must_use]
    pub fn new(properties: Properties) -> Self {
        Self {
            locations: Vec::new(),
            properties,
        }
    }

    pub fn add_location(&mut self, location: Location) {
        self.locations.push(location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_accepts_numeric_text() {
        let props = Properties::new().with("magnitude", "4.5").with("depth", 10.0);
        assert!((props.number("magnitude").unwrap() - 4.5).abs() < 1e-9);
        assert!((props.number("depth").unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_number_rejects_garbage() {
        let props = Properties::new().with("magnitude", "big");
        assert!(matches!(
            props.number("magnitude"),
            Err(FeedError::InvalidValue { field, .. }) if field == "magnitude"
        ));
        assert!(matches!(props.number("depth"), Err(FeedError::MissingField(f)) if f == "depth"));
    }

    #[test]
    fn test_int_parsing() {
        let props = Properties::new()
            .with("source", "3484")
            .with("stops", 0.0)
            .with("bad", 1.5);
        assert_eq!(props.int("source").unwrap(), 3484);
        assert_eq!(props.int("stops").unwrap(), 0);
        assert!(props.int("bad").is_err());
    }

    #[test]
    fn test_properties_display() {
        let props = Properties::new().with("name", "Lindbergh").with("altitude", 17.0);
        assert_eq!(props.to_string(), "{altitude=17, name=Lindbergh}");
    }
}
