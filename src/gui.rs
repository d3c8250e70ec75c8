use crate::address::DawaClient;
use crate::grid::ProxyClient;
use crate::map::MapView;
use crate::selection::SelectionState;
use crate::session::Session;
use crate::worker::ThreadSpawner;
use crate::{Config, statics};
use anyhow::Context;
use eframe::egui;
use std::{sync::Arc, time::Instant};
use tracing::info;

pub fn run_gui(config: Config) -> anyhow::Result<()> {
    let http = reqwest::blocking::Client::builder()
        .user_agent(statics::USER_AGENT)
        .build()
        .context("building HTTP client")?;
    let address = Arc::new(DawaClient::new(http.clone(), config.registry_base.clone()));
    let grid = Arc::new(ProxyClient::new(http, config.proxy_base.clone()));
    if config.grid_operator_enabled() {
        info!(proxy = ?config.proxy_base, "grid operator lookup enabled");
    } else {
        info!("grid operator lookup disabled (no proxy base URL)");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 900.0]),
        ..Default::default()
    };
    eframe::run_native(
        statics::DA_APP_TITLE,
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            let ctx = cc.egui_ctx.clone();
            let session = Session::new(
                address,
                grid,
                Box::new(ThreadSpawner),
                MapView::denmark(&config.tile_url),
            )
            .with_waker(move || ctx.request_repaint());
            Ok(Box::new(DanmarkskortApp {
                session,
                search_rect: None,
            }))
        }),
    )
    .map_err(|err| anyhow::anyhow!("running the map window: {err}"))
}

/// The window: search bar on top, map below, dropdown and alert layered above both.
struct DanmarkskortApp {
    session: Session<MapView>,
    // Where the search field was drawn last frame; anchors the dropdown.
    search_rect: Option<egui::Rect>,
}

impl DanmarkskortApp {
    fn status_text(&self) -> Option<&'static str> {
        if self.session.is_searching() {
            return Some(statics::DA_STATUS_SEARCHING);
        }
        match self.session.selection_state() {
            SelectionState::Resolving | SelectionState::Positioned => {
                Some(statics::DA_STATUS_RESOLVING)
            }
            SelectionState::OperatorLookup => Some(statics::DA_STATUS_OPERATOR),
            _ if !self.session.grid_operator_enabled() => Some(statics::DA_STATUS_GRID_DISABLED),
            _ => None,
        }
    }

    fn show_suggestions(&mut self, ctx: &egui::Context) -> Option<egui::Rect> {
        let list = self.session.suggestions();
        if !list.is_visible() {
            return None;
        }
        let anchor = self.search_rect?;

        let mut picked = None;
        let response = egui::Area::new(egui::Id::new("address_suggestions"))
            .fixed_pos(anchor.left_bottom())
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_min_width(anchor.width());
                    for (i, s) in list.items().iter().enumerate() {
                        if ui.selectable_label(false, s.display_text.as_str()).clicked() {
                            picked = Some(i);
                        }
                    }
                });
            });

        if let Some(i) = picked {
            self.session.pick(i);
        }
        Some(response.response.rect)
    }

    fn dismiss_on_outside_click(&mut self, ctx: &egui::Context, dropdown: Option<egui::Rect>) {
        if !self.session.suggestions().is_visible() {
            return;
        }
        let click = ctx.input(|i| {
            if i.pointer.any_click() {
                i.pointer.interact_pos()
            } else {
                None
            }
        });
        let Some(pos) = click else {
            return;
        };
        let inside = |rect: Option<egui::Rect>| rect.is_some_and(|r| r.contains(pos));
        if !inside(dropdown) && !inside(self.search_rect) {
            self.session.dismiss_suggestions();
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.session.alert().map(str::to_owned) else {
            return;
        };
        let mut acknowledged = false;
        egui::Modal::new(egui::Id::new("lookup_alert")).show(ctx, |ui| {
            ui.set_max_width(360.0);
            ui.label(message);
            ui.add_space(8.0);
            if ui.button(statics::DA_BTN_OK).clicked() {
                acknowledged = true;
            }
        });
        if acknowledged {
            self.session.acknowledge_alert();
        }
    }
}

impl eframe::App for DanmarkskortApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.session.drain();
        self.session.tick(now);
        if let Some(wait) = self.session.next_deadline(now) {
            ctx.request_repaint_after(wait);
        }

        egui::TopBottomPanel::top("search_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(statics::DA_LABEL_SEARCH);
                let response = ui.add(
                    egui::TextEdit::singleline(self.session.search_text_mut())
                        .hint_text(statics::DA_HINT_SEARCH)
                        .desired_width(480.0),
                );
                if response.changed() {
                    self.session.on_search_input(now);
                }
                self.search_rect = Some(response.rect);

                if let Some(status) = self.status_text() {
                    ui.separator();
                    ui.weak(status);
                }
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.session.map_mut().show(ui);
            });

        let dropdown = self.show_suggestions(ctx);
        self.dismiss_on_outside_click(ctx, dropdown);
        self.show_alert(ctx);
    }
}
