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

//! Hover and click handling for the airport map.
//!
//! Two independent slots are tracked: the hovered airport (highlighted via
//! its `selected` flag) and the clicked airport (which filters what the map
//! shows). A primary click shows the clicked airport's routes and their
//! endpoints; a secondary click shows every airport of the same category.
//! Any click while a filter is active resets the map.

use std::collections::HashSet;

use log::debug;

use crate::airport::RouteMap;
use crate::geo::{Location, Projection, ScreenPoint};

/// Pointer button of a click event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// How the clicked airport filters the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Routes touching the airport, plus their endpoints.
    Routes,
    /// Airports sharing the clicked airport's category.
    Category,
}

/// What an event changed, so the caller knows whether to repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    Unchanged,
    Hovered(usize),
    HoverCleared,
    Filtered(FilterMode, usize),
    Reset,
}

impl InteractionOutcome {
    #[must_use]
    pub fn changed(self) -> bool {
        self != InteractionOutcome::Unchanged
    }
}

/// Hover and click selection slots, as indices into [`RouteMap::airports`].
#[derive(Debug, Default)]
pub struct Interaction {
    hovered: Option<usize>,
    clicked: Option<usize>,
    mode: Option<FilterMode>,
}

impl Interaction {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    #[must_use]
    pub fn clicked_airport(&self) -> Option<usize> {
        self.clicked
    }

    /// Active filter, if an airport is clicked.
    #[must_use]
    pub fn filter_mode(&self) -> Option<FilterMode> {
        self.mode
    }

    /// Move the hover highlight to the first airport under the pointer.
    pub fn pointer_moved(
        &mut self,
        map: &mut RouteMap,
        projection: &dyn Projection,
        pointer: ScreenPoint,
    ) -> InteractionOutcome {
        let previous = self.hovered.take();
        if let Some(index) = previous {
            map.airports[index].marker.selected = false;
        }

        let hit = map
            .airports
            .iter()
            .position(|a| a.marker.contains(projection, pointer));

        match (previous, hit) {
            (_, Some(index)) => {
                map.airports[index].marker.selected = true;
                self.hovered = Some(index);
                if previous == Some(index) {
                    InteractionOutcome::Unchanged
                } else {
                    InteractionOutcome::Hovered(index)
                }
            }
            (Some(_), None) => InteractionOutcome::HoverCleared,
            (None, None) => InteractionOutcome::Unchanged,
        }
    }

    /// Pointer leaves the map: drop the hover highlight.
    pub fn pointer_left(&mut self, map: &mut RouteMap) -> InteractionOutcome {
        match self.hovered.take() {
            Some(index) => {
                map.airports[index].marker.selected = false;
                InteractionOutcome::HoverCleared
            }
            None => InteractionOutcome::Unchanged,
        }
    }

    /// Handle a click: reset an active filter, or start one.
    pub fn clicked(
        &mut self,
        map: &mut RouteMap,
        projection: &dyn Projection,
        pointer: ScreenPoint,
        button: PointerButton,
    ) -> InteractionOutcome {
        if self.clicked.is_some() {
            self.reset(map);
            return InteractionOutcome::Reset;
        }

        let mode = match button {
            PointerButton::Primary => FilterMode::Routes,
            PointerButton::Secondary => FilterMode::Category,
            PointerButton::Middle => return InteractionOutcome::Unchanged,
        };

        let Some(index) = map
            .airports
            .iter()
            .position(|a| !a.marker.hidden && a.marker.contains(projection, pointer))
        else {
            return InteractionOutcome::Unchanged;
        };

        self.clicked = Some(index);
        self.mode = Some(mode);
        match mode {
            FilterMode::Routes => show_routes_of(map, index),
            FilterMode::Category => show_category_of(map, index),
        }

        debug!(
            "Filter {:?} on airport {} ({})",
            mode,
            map.airports[index].airport_id,
            map.airports[index].label()
        );
        InteractionOutcome::Filtered(mode, index)
    }

    /// Clear the click and restore the default render state.
    pub fn reset(&mut self, map: &mut RouteMap) {
        self.clicked = None;
        self.mode = None;
        map.show_defaults();
    }
}

fn show_routes_of(map: &mut RouteMap, index: usize) {
    let clicked = map.airports[index].location();
    let mut visited: HashSet<Location> = HashSet::new();

    for route in &mut map.routes {
        if route.touches(clicked) {
            route.marker.hidden = false;
            visited.extend(route.marker.locations().iter().copied());
        } else {
            route.marker.hidden = true;
        }
    }

    for airport in &mut map.airports {
        airport.marker.hidden = !visited.contains(&airport.location());
    }

    // The clicked airport never disappears from its own selection.
    let airport = &mut map.airports[index];
    if visited.is_empty() && airport.marker.hidden {
        airport.marker.hidden = false;
    }
}

fn show_category_of(map: &mut RouteMap, index: usize) {
    let category = map.airports[index].category.clone();

    for route in &mut map.routes {
        route.marker.hidden = true;
    }
    for airport in &mut map.airports {
        airport.marker.hidden = airport.category != category;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::tests::{airport, route};
    use crate::geo::tests::FlatProjection;

    const PROJECTION: FlatProjection = FlatProjection { scale: 100.0 };

    fn screen(lat: f32, lon: f32) -> ScreenPoint {
        PROJECTION.project(Location::new(lat, lon))
    }

    /// A(1,(0,0),"large"), B(2,(1,1),"small"), C(3,(2,2),"large"),
    /// D(4,(3,3),"small"); routes A-B and C-D.
    fn sample_map() -> RouteMap {
        let airports = vec![
            airport(1, 0.0, 0.0, "large"),
            airport(2, 1.0, 1.0, "small"),
            airport(3, 2.0, 2.0, "large"),
            airport(4, 3.0, 3.0, "small"),
        ];
        RouteMap::build(&airports, vec![route("1", "2"), route("3", "4")], "type").unwrap()
    }

    fn visible_airports(map: &RouteMap) -> Vec<i64> {
        map.airports
            .iter()
            .filter(|a| !a.marker.hidden)
            .map(|a| a.airport_id)
            .collect()
    }

    fn visible_routes(map: &RouteMap) -> Vec<(i64, i64)> {
        map.routes
            .iter()
            .filter(|r| !r.marker.hidden)
            .map(|r| (r.source, r.destination))
            .collect()
    }

    fn is_default(map: &RouteMap) -> bool {
        map.airports.iter().all(|a| !a.marker.hidden) && map.routes.iter().all(|r| r.marker.hidden)
    }

    #[test]
    fn test_left_click_shows_routes_and_endpoints() {
        let mut map = sample_map();
        let mut interaction = Interaction::new();

        let outcome = interaction.clicked(&mut map, &PROJECTION, screen(0.0, 0.0), PointerButton::Primary);
        assert_eq!(outcome, InteractionOutcome::Filtered(FilterMode::Routes, 0));
        assert_eq!(visible_routes(&map), [(1, 2)]);
        assert_eq!(visible_airports(&map), [1, 2]);
        assert_eq!(interaction.clicked_airport(), Some(0));
    }

    #[test]
    fn test_right_click_shows_category() {
        let mut map = sample_map();
        let mut interaction = Interaction::new();

        let outcome = interaction.clicked(&mut map, &PROJECTION, screen(0.0, 0.0), PointerButton::Secondary);
        assert_eq!(outcome, InteractionOutcome::Filtered(FilterMode::Category, 0));
        assert!(visible_routes(&map).is_empty());
        assert_eq!(visible_airports(&map), [1, 3]);
        assert_eq!(interaction.filter_mode(), Some(FilterMode::Category));
    }

    #[test]
    fn test_second_click_resets() {
        let mut map = sample_map();
        let mut interaction = Interaction::new();

        interaction.clicked(&mut map, &PROJECTION, screen(0.0, 0.0), PointerButton::Primary);
        assert!(!is_default(&map));

        let outcome = interaction.clicked(&mut map, &PROJECTION, screen(0.0, 0.0), PointerButton::Primary);
        assert_eq!(outcome, InteractionOutcome::Reset);
        assert!(is_default(&map));
        assert_eq!(interaction.clicked_airport(), None);
        assert_eq!(interaction.filter_mode(), None);
    }

    #[test]
    fn test_click_anywhere_resets_active_filter() {
        let mut map = sample_map();
        let mut interaction = Interaction::new();

        interaction.clicked(&mut map, &PROJECTION, screen(2.0, 2.0), PointerButton::Secondary);
        let outcome = interaction.clicked(&mut map, &PROJECTION, screen(50.0, 50.0), PointerButton::Middle);
        assert_eq!(outcome, InteractionOutcome::Reset);
        assert!(is_default(&map));
    }

    #[test]
    fn test_click_on_empty_space_is_noop() {
        let mut map = sample_map();
        let mut interaction = Interaction::new();

        let outcome = interaction.clicked(&mut map, &PROJECTION, screen(40.0, 40.0), PointerButton::Primary);
        assert_eq!(outcome, InteractionOutcome::Unchanged);
        assert!(is_default(&map));
        assert_eq!(interaction.clicked_airport(), None);
    }

    #[test]
    fn test_middle_click_without_filter_is_noop() {
        let mut map = sample_map();
        let mut interaction = Interaction::new();

        let outcome = interaction.clicked(&mut map, &PROJECTION, screen(0.0, 0.0), PointerButton::Middle);
        assert_eq!(outcome, InteractionOutcome::Unchanged);
        assert!(is_default(&map));
    }

    #[test]
    fn test_left_click_on_airport_without_routes_keeps_it_visible() {
        let airports = vec![airport(1, 0.0, 0.0, "large"), airport(2, 1.0, 1.0, "small")];
        let mut map = RouteMap::build(&airports, Vec::new(), "type").unwrap();
        let mut interaction = Interaction::new();

        interaction.clicked(&mut map, &PROJECTION, screen(1.0, 1.0), PointerButton::Primary);
        assert_eq!(visible_airports(&map), [2]);
    }

    #[test]
    fn test_hover_selects_single_airport() {
        let mut map = sample_map();
        let mut interaction = Interaction::new();

        let outcome = interaction.pointer_moved(&mut map, &PROJECTION, screen(1.0, 1.0));
        assert_eq!(outcome, InteractionOutcome::Hovered(1));
        assert!(map.airports[1].marker.selected);

        let outcome = interaction.pointer_moved(&mut map, &PROJECTION, screen(3.0, 3.0));
        assert_eq!(outcome, InteractionOutcome::Hovered(3));
        assert_eq!(map.airports.iter().filter(|a| a.marker.selected).count(), 1);
        assert!(map.airports[3].marker.selected);

        let outcome = interaction.pointer_moved(&mut map, &PROJECTION, screen(3.0, 3.0));
        assert_eq!(outcome, InteractionOutcome::Unchanged);
        assert!(map.airports[3].marker.selected);
    }

    #[test]
    fn test_hover_cleared_over_empty_space() {
        let mut map = sample_map();
        let mut interaction = Interaction::new();

        interaction.pointer_moved(&mut map, &PROJECTION, screen(0.0, 0.0));
        let outcome = interaction.pointer_moved(&mut map, &PROJECTION, screen(20.0, 20.0));
        assert_eq!(outcome, InteractionOutcome::HoverCleared);
        assert!(map.airports.iter().all(|a| !a.marker.selected));
        assert_eq!(interaction.hovered(), None);

        let outcome = interaction.pointer_moved(&mut map, &PROJECTION, screen(20.0, 20.0));
        assert_eq!(outcome, InteractionOutcome::Unchanged);
    }

    #[test]
    fn test_hover_first_match_wins() {
        // Two airports close enough that their hit circles overlap.
        let airports = vec![airport(1, 0.0, 0.0, "a"), airport(2, 0.0, 0.02, "b")];
        let mut map = RouteMap::build(&airports, Vec::new(), "type").unwrap();
        let mut interaction = Interaction::new();

        interaction.pointer_moved(&mut map, &PROJECTION, screen(0.0, 0.01));
        assert_eq!(interaction.hovered(), Some(0));
        assert!(!map.airports[1].marker.selected);
    }

    #[test]
    fn test_pointer_left_clears_hover() {
        let mut map = sample_map();
        let mut interaction = Interaction::new();

        interaction.pointer_moved(&mut map, &PROJECTION, screen(2.0, 2.0));
        assert_eq!(interaction.pointer_left(&mut map), InteractionOutcome::HoverCleared);
        assert!(map.airports.iter().all(|a| !a.marker.selected));
        assert_eq!(interaction.pointer_left(&mut map), InteractionOutcome::Unchanged);
    }

    #[test]
    fn test_hidden_airport_cannot_be_clicked() {
        let mut map = sample_map();
        let mut interaction = Interaction::new();

        // Category filter on A hides B; a fresh interaction cannot click B.
        interaction.clicked(&mut map, &PROJECTION, screen(0.0, 0.0), PointerButton::Secondary);
        let mut other = Interaction::new();
        let outcome = other.clicked(&mut map, &PROJECTION, screen(1.0, 1.0), PointerButton::Primary);
        assert_eq!(outcome, InteractionOutcome::Unchanged);
    }
}
