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

//! Fixed-position map key.

use geofeed::Legend;

use crate::map::color32;

const LEGEND_WIDTH: f32 = 170.0;
const LEGEND_MARGIN: f32 = 20.0;
const TITLE_HEIGHT: f32 = 40.0;
const ROW_HEIGHT: f32 = 34.0;

/// Height of the key box for a legend with `rows` entries.
#[allow(clippy::cast_precision_loss, reason = "a handful of rows")]
pub fn legend_height(rows: usize) -> f32 {
    TITLE_HEIGHT + ROW_HEIGHT * rows as f32 + 10.0
}

/// Paint the key in the top-left corner of `map_rect`, every frame,
/// regardless of marker state.
pub fn paint_legend(painter: &egui::Painter, map_rect: egui::Rect, legend: &Legend) {
    let origin = map_rect.left_top() + egui::vec2(LEGEND_MARGIN, LEGEND_MARGIN);
    let rect = egui::Rect::from_min_size(
        origin,
        egui::vec2(LEGEND_WIDTH, legend_height(legend.entries.len())),
    );

    painter.rect_filled(rect, 4.0, egui::Color32::from_rgb(255, 250, 240));
    painter.rect_stroke(
        rect,
        4.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(120)),
        egui::StrokeKind::Inside,
    );

    painter.text(
        egui::pos2(rect.center().x, origin.y + TITLE_HEIGHT / 2.0),
        egui::Align2::CENTER_CENTER,
        legend.title,
        egui::FontId::proportional(15.0),
        egui::Color32::BLACK,
    );

    let mut row_y = origin.y + TITLE_HEIGHT + ROW_HEIGHT / 2.0;
    for entry in &legend.entries {
        let swatch = egui::pos2(origin.x + 25.0, row_y);
        let radius = (entry.size / 2.0).min(ROW_HEIGHT / 2.0 - 2.0);
        painter.circle_filled(swatch, radius, color32(entry.color));
        painter.circle_stroke(swatch, radius, egui::Stroke::new(0.5, egui::Color32::from_gray(60)));

        painter.text(
            egui::pos2(origin.x + 50.0, row_y),
            egui::Align2::LEFT_CENTER,
            entry.label,
            egui::FontId::proportional(12.0),
            egui::Color32::BLACK,
        );
        row_y += ROW_HEIGHT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_height_grows_with_rows() {
        assert!(legend_height(3) > legend_height(2));
        assert!((legend_height(0) - (TITLE_HEIGHT + 10.0)).abs() < f32::EPSILON);
    }
}
