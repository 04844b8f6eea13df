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

use walkers::sources::{Attribution, TileSource};
use walkers::TileId;

/// Basemap style served by the Carto CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartoStyle {
    /// Dark background, used behind the bright quake and airport markers.
    Dark,
    /// Light background without labels.
    LightNoLabels,
}

impl CartoStyle {
    fn path(self) -> &'static str {
        match self {
            CartoStyle::Dark => "dark_all",
            CartoStyle::LightNoLabels => "light_nolabels",
        }
    }
}

/// Tile source for Carto CDN basemap tiles
/// Uses subdomain load balancing across a-d.basemaps.cartocdn.com
#[derive(Debug)]
pub struct CartoTileSource {
    style: CartoStyle,
}

impl CartoTileSource {
    pub fn new(style: CartoStyle) -> Self {
        Self { style }
    }
}

impl TileSource for CartoTileSource {
    fn tile_url(&self, tile_id: TileId) -> String {
        let subdomain = ['a', 'b', 'c', 'd'][((tile_id.x + tile_id.y) % 4) as usize];

        format!(
            "https://{}.basemaps.cartocdn.com/{}/{}/{}/{}.png",
            subdomain,
            self.style.path(),
            tile_id.zoom,
            tile_id.x,
            tile_id.y
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "© OpenStreetMap contributors, © CARTO",
            url: "https://carto.com/attributions",
            logo_light: None,
            logo_dark: None,
        }
    }
}
