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

mod config;
mod loader;
mod map;
mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eframe::egui;
use log::{error, info, warn};

use config::{AppConfig, FeedSource};
use ui::{AirportMapApp, QuakeMapApp};

#[derive(Parser, Debug)]
#[command(version, about = "Interactive earthquake and airport maps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Initial zoom level
    #[arg(long, global = true)]
    zoom: Option<f64>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the config file location and exit
    #[arg(long, global = true)]
    print_config_path: bool,

    /// Write the effective configuration back to the config file
    #[arg(long, global = true)]
    save_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// Earthquakes from a USGS feed (Atom or GeoJSON)
    Quakes {
        /// Feed URL or local file
        #[arg(long)]
        feed: Option<String>,
    },
    /// Airports and routes from OpenFlights tables
    Airports {
        #[arg(long)]
        airports: Option<PathBuf>,
        #[arg(long)]
        routes: Option<PathBuf>,
        /// Airport property used for the right-click category filter
        #[arg(long)]
        category_property: Option<String>,
    },
}

impl Cli {
    fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Quakes { feed: None })
    }

    /// Apply command line overrides on top of the stored configuration.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(zoom) = self.zoom {
            config.default_zoom = zoom;
        }

        match self.command() {
            Command::Quakes { feed } => {
                if let Some(feed) = feed {
                    match FeedSource::parse(&feed) {
                        FeedSource::Url(url) => {
                            config.quake_feed_url = url;
                            config.quake_feed_path = None;
                        }
                        FeedSource::File(path) => config.quake_feed_path = Some(path),
                    }
                }
            }
            Command::Airports {
                airports,
                routes,
                category_property,
            } => {
                if let Some(path) = airports {
                    config.airports_path = path;
                }
                if let Some(path) = routes {
                    config.routes_path = path;
                }
                if let Some(property) = category_property {
                    config.airport_category_property = property;
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}

fn main() -> Result<(), eframe::Error> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.print_config_path {
        match AppConfig::get_config_path() {
            Ok(path) => println!("{}", path.display()),
            Err(e) => {
                error!("Could not determine config path: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });
    cli.apply(&mut config);

    if cli.save_config {
        match config.save() {
            Ok(()) => info!("Saved configuration"),
            Err(e) => warn!("Failed to save config: {}", e),
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([950.0, 600.0])
            .with_title("Feedmap"),
        ..Default::default()
    };

    match cli.command() {
        Command::Quakes { .. } => {
            let source = config.quake_feed();
            let markers = loader::load_quakes(&source).unwrap_or_else(|e| {
                error!("Failed to load earthquake feed {}: {}", source, e);
                std::process::exit(1);
            });

            eframe::run_native(
                "Feedmap - Earthquakes",
                options,
                Box::new(move |cc| Ok(Box::new(QuakeMapApp::new(&cc.egui_ctx, &config, markers)))),
            )
        }
        Command::Airports { .. } => {
            let route_map = loader::load_route_map(
                &config.airports_path,
                &config.routes_path,
                &config.airport_category_property,
            )
            .unwrap_or_else(|e| {
                error!("Failed to load airport data: {}", e);
                std::process::exit(1);
            });

            eframe::run_native(
                "Feedmap - Airports",
                options,
                Box::new(move |cc| Ok(Box::new(AirportMapApp::new(&cc.egui_ctx, &config, route_map)))),
            )
        }
    }
}
