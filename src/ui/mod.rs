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

//! The two map applets.

pub mod legend;

use eframe::egui;
use geofeed::airport::airport_legend;
use geofeed::quake::{quake_legend, sort_for_drawing};
use geofeed::{FilterMode, Interaction, Legend, Marker, RouteMap};

use crate::config::AppConfig;
use crate::map::overlay::{AirportOverlay, QuakeOverlay};
use crate::map::{CartoStyle, MapView};

/// Earthquake map: static markers sized and coloured by magnitude.
#[derive(Debug)]
pub struct QuakeMapApp {
    view: MapView,
    markers: Vec<Marker>,
    legend: Legend,
}

impl QuakeMapApp {
    pub fn new(ctx: &egui::Context, config: &AppConfig, mut markers: Vec<Marker>) -> Self {
        sort_for_drawing(&mut markers);
        Self {
            view: MapView::new(ctx, config, CartoStyle::LightNoLabels),
            markers,
            legend: quake_legend(),
        }
    }
}

impl eframe::App for QuakeMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let response = self.view.show(ui, QuakeOverlay::new(&self.markers));
                legend::paint_legend(ui.painter(), response.rect, &self.legend);
            });
    }
}

/// Airport map: routes stay hidden until an airport is clicked.
#[derive(Debug)]
pub struct AirportMapApp {
    view: MapView,
    route_map: RouteMap,
    interaction: Interaction,
    legend: Legend,
}

impl AirportMapApp {
    pub fn new(ctx: &egui::Context, config: &AppConfig, route_map: RouteMap) -> Self {
        Self {
            view: MapView::new(ctx, config, CartoStyle::Dark),
            route_map,
            interaction: Interaction::new(),
            legend: airport_legend(),
        }
    }

    fn status_text(&self) -> String {
        let stats = self.route_map.stats();
        let mut text = format!(
            "{} airports, {} routes ({} dropped)",
            self.route_map.airports.len(),
            stats.resolved,
            stats.dropped
        );
        if let Some(index) = self.interaction.clicked_airport() {
            let airport = &self.route_map.airports[index];
            let showing = match self.interaction.filter_mode() {
                Some(FilterMode::Routes) => "routes",
                Some(FilterMode::Category) => "same category",
                None => "all",
            };
            text.push_str(&format!(
                "  |  {}: showing {}  (click again to reset)",
                airport.label(),
                showing
            ));
        }
        text
    }
}

impl eframe::App for AirportMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status_text());
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let overlay = AirportOverlay::new(&mut self.route_map, &mut self.interaction);
                let response = self.view.show(ui, overlay);
                legend::paint_legend(ui.painter(), response.rect, &self.legend);
            });
    }
}
