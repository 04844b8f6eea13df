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

//! Map rendering glue.
//!
//! This module wires the `walkers` slippy map (tiles, pan and zoom) to the
//! marker model: the tile source, the projection adapter used for
//! hit-testing, and the overlay plugins that draw markers.

pub mod carto;
pub mod overlay;

pub use carto::{CartoStyle, CartoTileSource};

use geofeed::{Location, Projection, Rgb, ScreenPoint};
use log::warn;
use walkers::{HttpOptions, HttpTiles, Map, MapMemory, Plugin, Position, Projector, Tiles};

use crate::config::AppConfig;

/// Convert a marker colour to egui.
pub fn color32(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

pub fn to_position(location: Location) -> Position {
    walkers::lat_lon(f64::from(location.lat), f64::from(location.lon))
}

/// [`Projection`] backed by the walkers projector of the current frame.
pub struct WalkersProjection<'a>(pub &'a Projector);

impl Projection for WalkersProjection<'_> {
    fn project(&self, location: Location) -> ScreenPoint {
        let v = self.0.project(to_position(location));
        ScreenPoint::new(v.x, v.y)
    }
}

impl std::fmt::Debug for WalkersProjection<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkersProjection").finish_non_exhaustive()
    }
}

/// Base map state shared by both applets: tiles, zoom and pan.
pub struct MapView {
    tiles: HttpTiles,
    memory: MapMemory,
    center: Position,
}

impl std::fmt::Debug for MapView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapView")
            .field("center", &self.center)
            .finish_non_exhaustive()
    }
}

impl MapView {
    pub fn new(ctx: &egui::Context, config: &AppConfig, style: CartoStyle) -> Self {
        let http_options = HttpOptions {
            cache: config.tile_cache_dir(),
            ..Default::default()
        };

        let mut memory = MapMemory::default();
        if let Err(e) = memory.set_zoom(config.default_zoom) {
            warn!("Ignoring default zoom {}: {:?}", config.default_zoom, e);
        }

        Self {
            tiles: HttpTiles::with_options(CartoTileSource::new(style), http_options, ctx.clone()),
            memory,
            center: walkers::lat_lon(config.start_latitude, config.start_longitude),
        }
    }

    /// Draw the base map with a marker overlay on top.
    pub fn show(&mut self, ui: &mut egui::Ui, overlay: impl Plugin) -> egui::Response {
        let tiles: &mut dyn Tiles = &mut self.tiles;
        ui.add(Map::new(Some(tiles), &mut self.memory, self.center).with_plugin(overlay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color32_keeps_channels() {
        assert_eq!(color32(Rgb::YELLOW), egui::Color32::from_rgb(255, 255, 0));
        assert_eq!(color32(Rgb::NEAR_BLACK), egui::Color32::from_rgb(11, 11, 11));
    }

    #[test]
    fn test_to_position() {
        let position = to_position(Location::new(37.5, -122.25));
        assert!((position.y() - 37.5).abs() < 1e-9);
        assert!((position.x() + 122.25).abs() < 1e-9);
    }
}
