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

//! Marker overlays drawn on top of the base map.

use geofeed::{
    Interaction, InteractionOutcome, Marker, MarkerShape, PointerButton, Projection, RouteMap,
    ScreenPoint,
};
use log::debug;
use walkers::{MapMemory, Plugin, Projector};

use super::{color32, WalkersProjection};

const ROUTE_STROKE_WIDTH: f32 = 1.5;
const SELECTED_RING_WIDTH: f32 = 2.0;

fn to_pos2(point: ScreenPoint) -> egui::Pos2 {
    egui::pos2(point.x, point.y)
}

fn to_screen_point(pos: egui::Pos2) -> ScreenPoint {
    ScreenPoint::new(pos.x, pos.y)
}

/// Draw one marker unless it is hidden.
fn draw_marker(painter: &egui::Painter, projection: &dyn Projection, marker: &Marker) {
    if marker.hidden {
        return;
    }

    let color = color32(marker.color);
    match &marker.shape {
        MarkerShape::Point { location, radius } => {
            let pos = to_pos2(projection.project(*location));
            if !painter.clip_rect().expand(*radius).contains(pos) {
                return;
            }
            painter.circle_filled(pos, *radius, color);
            painter.circle_stroke(pos, *radius, egui::Stroke::new(0.5, egui::Color32::from_gray(60)));
            if marker.selected {
                painter.circle_stroke(
                    pos,
                    *radius + 3.0,
                    egui::Stroke::new(SELECTED_RING_WIDTH, egui::Color32::WHITE),
                );
            }
        }
        MarkerShape::Lines { locations } => {
            let points: Vec<egui::Pos2> = locations
                .iter()
                .map(|l| to_pos2(projection.project(*l)))
                .collect();
            for pair in points.windows(2) {
                painter.line_segment([pair[0], pair[1]], egui::Stroke::new(ROUTE_STROKE_WIDTH, color));
            }
        }
    }
}

/// Label with a dark background box, to the right of `pos`.
fn draw_label(painter: &egui::Painter, pos: egui::Pos2, text: &str) {
    let font = egui::FontId::proportional(11.0);
    let text_pos = pos + egui::vec2(10.0, 0.0);

    let galley = painter.layout_no_wrap(text.to_string(), font.clone(), egui::Color32::WHITE);
    let padding = egui::vec2(3.0, 2.0);
    let box_rect = egui::Rect::from_min_size(
        text_pos - egui::vec2(padding.x, galley.size().y / 2.0 + padding.y),
        galley.size() + padding * 2.0,
    );
    painter.rect_filled(box_rect, 2.0, egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180));
    painter.text(text_pos, egui::Align2::LEFT_CENTER, text, font, egui::Color32::WHITE);
}

/// Draws earthquake markers in slice order. The quake map has no pointer
/// interaction.
#[derive(Debug)]
pub struct QuakeOverlay<'a> {
    markers: &'a [Marker],
}

impl<'a> QuakeOverlay<'a> {
    pub fn new(markers: &'a [Marker]) -> Self {
        Self { markers }
    }
}

impl Plugin for QuakeOverlay<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        _response: &egui::Response,
        projector: &Projector,
        _map_memory: &MapMemory,
    ) {
        let projection = WalkersProjection(projector);
        let painter = ui.painter();

        for marker in self.markers {
            draw_marker(painter, &projection, marker);
        }
    }
}

/// Draws airports and routes and feeds pointer events to the interaction
/// controller before drawing, so the frame reflects the new state.
#[derive(Debug)]
pub struct AirportOverlay<'a> {
    route_map: &'a mut RouteMap,
    interaction: &'a mut Interaction,
}

impl<'a> AirportOverlay<'a> {
    pub fn new(route_map: &'a mut RouteMap, interaction: &'a mut Interaction) -> Self {
        Self {
            route_map,
            interaction,
        }
    }

    fn handle_pointer(&mut self, ui: &egui::Ui, response: &egui::Response, projection: &dyn Projection) {
        let outcome = match response.hover_pos() {
            Some(pos) => self
                .interaction
                .pointer_moved(self.route_map, projection, to_screen_point(pos)),
            None => self.interaction.pointer_left(self.route_map),
        };
        if outcome.changed() {
            debug!("Pointer move: {:?}", outcome);
        }

        let button = if response.clicked() {
            Some(PointerButton::Primary)
        } else if response.secondary_clicked() {
            Some(PointerButton::Secondary)
        } else if response.middle_clicked() {
            Some(PointerButton::Middle)
        } else {
            None
        };

        if let (Some(button), Some(pos)) = (button, response.interact_pointer_pos()) {
            let outcome = self
                .interaction
                .clicked(self.route_map, projection, to_screen_point(pos), button);
            if outcome != InteractionOutcome::Unchanged {
                debug!("Click {:?}: {:?}", button, outcome);
                ui.ctx().request_repaint();
            }
        }
    }
}

impl Plugin for AirportOverlay<'_> {
    fn run(
        mut self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _map_memory: &MapMemory,
    ) {
        let projection = WalkersProjection(projector);
        self.handle_pointer(ui, response, &projection);

        let painter = ui.painter();
        for route in &self.route_map.routes {
            draw_marker(painter, &projection, &route.marker);
        }
        for airport in &self.route_map.airports {
            draw_marker(painter, &projection, &airport.marker);
        }

        if let Some(index) = self.interaction.hovered() {
            let airport = &self.route_map.airports[index];
            if airport.marker.hidden {
                return;
            }
            let pos = to_pos2(projection.project(airport.location()));
            draw_label(painter, pos, &format!("{} ({})", airport.label(), airport.category));
        }
    }
}
