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

//! Legend (map key) content, drawn by the renderer in a fixed box.

use crate::marker::Rgb;

/// One swatch and its caption.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: Rgb,
    /// Swatch diameter in pixels.
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: &'static str,
    pub entries: Vec<LegendEntry>,
}
