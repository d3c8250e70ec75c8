//! Map surface: view state, the single address marker and its popup.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use eframe::egui;
use tracing::warn;
use walkers::sources::{Attribution, TileSource};
use walkers::{HttpTiles, Map, MapMemory, Plugin, Projector};

use crate::address::Coordinates;
use crate::popup::PopupContent;
use crate::statics;

/// What the selection flow needs from a map.
pub trait MapSurface {
    /// Creates the marker on first call, moves it afterwards.
    fn set_marker_position(&mut self, coordinates: Coordinates);

    /// Binds `content` to the marker and opens it, replacing any previous popup.
    fn show_popup(&mut self, content: PopupContent, max_width: f32);

    fn recenter(&mut self, coordinates: Coordinates, zoom: f64);
}

/// Slippy-map tiles from a `{z}/{x}/{y}` URL pattern.
#[derive(Debug, Clone)]
pub struct TemplateTiles {
    pub url_pattern: String,
}

impl TileSource for TemplateTiles {
    fn tile_url(&self, tile_id: walkers::TileId) -> String {
        self.url_pattern
            .replace("{z}", &tile_id.zoom.to_string())
            .replace("{x}", &tile_id.x.to_string())
            .replace("{y}", &tile_id.y.to_string())
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: statics::OSM_ATTRIBUTION,
            url: statics::OSM_ATTRIBUTION_URL,
            logo_light: None,
            logo_dark: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub content: PopupContent,
    pub max_width: f32,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinates: Coordinates,
    pub popup: Option<Popup>,
}

pub struct MapView {
    memory: MapMemory,
    tiles: Option<HttpTiles>,
    tile_source: TemplateTiles,
    center: Coordinates,
    zoom: f64,
    marker: Option<Marker>,
}

impl MapView {
    /// Tiles are created lazily on the first `show`, once an egui context exists.
    pub fn new(center: Coordinates, zoom: f64, tile_url: &str) -> Self {
        let mut view = Self {
            memory: MapMemory::default(),
            tiles: None,
            tile_source: TemplateTiles {
                url_pattern: tile_url.to_string(),
            },
            center,
            zoom,
            marker: None,
        };
        view.recenter(center, zoom);
        view
    }

    pub fn denmark(tile_url: &str) -> Self {
        let (lat, lon) = statics::DENMARK_CENTER;
        Self::new(Coordinates::new(lat, lon), statics::DENMARK_ZOOM, tile_url)
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    pub fn close_popup(&mut self) {
        if let Some(popup) = self.marker.as_mut().and_then(|m| m.popup.as_mut()) {
            popup.open = false;
        }
    }

    fn ensure_tiles(&mut self, ctx: &egui::Context) {
        if self.tiles.is_none() {
            self.tiles = Some(HttpTiles::new(self.tile_source.clone(), ctx.clone()));
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        self.ensure_tiles(ui.ctx());
        let map_rect = ui.available_rect_before_wrap();
        let closed = Arc::new(AtomicBool::new(false));

        let plugin = MarkerPlugin {
            marker: self.marker.clone(),
            map_rect,
            closed: closed.clone(),
        };
        let my_position = self.center.position();
        if let Some(tiles) = self.tiles.as_mut() {
            let map = Map::new(Some(tiles), &mut self.memory, my_position).with_plugin(plugin);
            ui.add(map);
        }

        ui.painter().text(
            map_rect.max - egui::vec2(5.0, 5.0),
            egui::Align2::RIGHT_BOTTOM,
            statics::OSM_ATTRIBUTION,
            egui::FontId::proportional(10.0),
            egui::Color32::from_black_alpha(150),
        );

        if closed.load(Ordering::Relaxed) {
            self.close_popup();
        }
    }
}

impl MapSurface for MapView {
    fn set_marker_position(&mut self, coordinates: Coordinates) {
        match self.marker.as_mut() {
            Some(marker) => marker.coordinates = coordinates,
            None => {
                self.marker = Some(Marker {
                    coordinates,
                    popup: None,
                })
            }
        }
    }

    fn show_popup(&mut self, content: PopupContent, max_width: f32) {
        let Some(marker) = self.marker.as_mut() else {
            warn!("popup requested before any marker was placed");
            return;
        };
        marker.popup = Some(Popup {
            content,
            max_width,
            open: true,
        });
    }

    fn recenter(&mut self, coordinates: Coordinates, zoom: f64) {
        let zoom = zoom.clamp(0.0, f64::from(statics::MAX_TILE_ZOOM));
        self.center = coordinates;
        self.zoom = zoom;
        self.memory.center_at(coordinates.position());
        if let Err(err) = self.memory.set_zoom(zoom) {
            warn!(zoom, error = ?err, "map rejected zoom level");
        }
    }
}

/// Draws the marker and, when open, its popup anchored just above it.
struct MarkerPlugin {
    marker: Option<Marker>,
    map_rect: egui::Rect,
    closed: Arc<AtomicBool>,
}

impl Plugin for MarkerPlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        _response: &egui::Response,
        projector: &Projector,
        _memory: &MapMemory,
    ) {
        let MarkerPlugin {
            marker,
            map_rect,
            closed,
        } = *self;
        let Some(marker) = marker else {
            return;
        };
        let painter = ui.painter().with_clip_rect(map_rect);
        let screen = projector.project(marker.coordinates.position());
        let pin = egui::pos2(screen.x, screen.y);

        painter.circle_filled(pin, 8.0, egui::Color32::from_rgb(37, 99, 235));
        painter.circle_stroke(pin, 8.0, egui::Stroke::new(2.0, egui::Color32::WHITE));

        let Some(popup) = marker.popup.filter(|p| p.open) else {
            return;
        };
        if !map_rect.contains(pin) {
            return;
        }

        egui::Area::new(egui::Id::new("marker_popup"))
            .fixed_pos(pin - egui::vec2(0.0, 14.0))
            .pivot(egui::Align2::CENTER_BOTTOM)
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(popup.max_width);
                    ui.horizontal(|ui| {
                        if ui.small_button(statics::DA_BTN_CLOSE).clicked() {
                            closed.store(true, Ordering::Relaxed);
                        }
                        if ui.small_button(statics::DA_BTN_COPY_HTML).clicked() {
                            ui.ctx().copy_text(popup.content.to_html());
                        }
                    });
                    popup.content.ui(ui);
                });
            });
    }
}
