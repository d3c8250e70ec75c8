//! Popup content shown on the address marker.
//!
//! The content is a plain record with optional fields; both renditions (native egui and
//! HTML) include a field only when it carries data.

use eframe::egui;

use crate::grid::GridOperator;
use crate::{html, statics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteLink {
    pub href: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorCard {
    pub name: Option<String>,
    /// Already prefixed with `Tlf.: `.
    pub phone: Option<String>,
    pub website: Option<WebsiteLink>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    pub address: String,
    /// `None` renders the "disabled or not found" placeholder.
    pub operator: Option<OperatorCard>,
}

/// Prepend `https://` unless the value already starts with an http(s) scheme.
pub fn normalize_website(raw: &str) -> String {
    if raw.starts_with("http") {
        raw.to_string()
    } else {
        format!("{}{raw}", statics::WEBSITE_SCHEME)
    }
}

impl PopupContent {
    pub fn build(address: &str, operator: Option<GridOperator>) -> Self {
        let operator = operator.map(|op| OperatorCard {
            name: Some(op.name).filter(|n| !n.is_empty()),
            phone: op
                .phone_number
                .map(|p| format!("{}{p}", statics::DA_PHONE_PREFIX)),
            website: op.website_url.map(|w| WebsiteLink {
                href: normalize_website(&w),
                text: w,
            }),
            logo_url: op.logo_url,
        });
        Self {
            address: address.to_string(),
            operator,
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::from(r#"<div class="info">"#);
        out.push_str(&format!(
            r#"<div class="addr" data-bind="address">{}</div>"#,
            html::escape(&self.address)
        ));
        out.push_str(r#"<div class="net">"#);
        match &self.operator {
            Some(card) => {
                if let Some(name) = &card.name {
                    out.push_str(&format!(
                        r#"<strong data-bind="name">{}</strong>"#,
                        html::escape(name)
                    ));
                }
                if let Some(phone) = &card.phone {
                    out.push_str(&format!(
                        r#"<div data-bind="phone">{}</div>"#,
                        html::escape(phone)
                    ));
                }
                if let Some(link) = &card.website {
                    out.push_str(&format!(
                        r#"<a data-bind="website" href="{}" target="_blank" rel="noopener">{}</a>"#,
                        html::escape(&link.href),
                        html::escape(&link.text)
                    ));
                }
                if let Some(logo) = &card.logo_url {
                    out.push_str(&format!(
                        r#"<img data-bind="logo" src="{}" alt="">"#,
                        html::escape(logo)
                    ));
                }
            }
            None => {
                out.push_str(&format!(
                    "<strong>{}</strong><br><em>{}</em>",
                    statics::DA_GRID_HEADING,
                    statics::DA_GRID_PLACEHOLDER
                ));
            }
        }
        out.push_str("</div></div>");
        out
    }

    /// Native rendition inside the marker popup.
    pub fn ui(&self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new(self.address.as_str()).strong());
        ui.separator();
        match &self.operator {
            Some(card) => {
                if let Some(logo) = &card.logo_url {
                    ui.add(
                        egui::Image::new(logo.as_str())
                            .max_height(48.0)
                            .max_width(statics::POPUP_MAX_WIDTH - 16.0),
                    );
                }
                if let Some(name) = &card.name {
                    ui.label(egui::RichText::new(name.as_str()).strong());
                }
                if let Some(phone) = &card.phone {
                    ui.label(phone.as_str());
                }
                if let Some(link) = &card.website {
                    ui.hyperlink_to(link.text.as_str(), &link.href);
                }
            }
            None => {
                ui.label(egui::RichText::new(statics::DA_GRID_HEADING).strong());
                ui.label(egui::RichText::new(statics::DA_GRID_PLACEHOLDER).italics());
            }
        }
    }
}
