use indexmap::IndexMap;

use crate::address::AddressSuggestion;
use crate::{html, statics};

/// The autocomplete dropdown: at most `MAX_SUGGESTIONS` rows plus show/hide state.
/// Every `render` fully replaces the previous rows.
#[derive(Debug, Default)]
pub struct SuggestionList {
    items: Vec<AddressSuggestion>,
    visible: bool,
}

impl SuggestionList {
    /// Empty input hides and clears; otherwise keeps the first rows (unique by id) in order.
    pub fn render(&mut self, suggestions: impl IntoIterator<Item = AddressSuggestion>) {
        let mut unique: IndexMap<String, AddressSuggestion> = IndexMap::new();
        for s in suggestions {
            if unique.len() == statics::MAX_SUGGESTIONS {
                break;
            }
            unique.entry(s.id.clone()).or_insert(s);
        }
        self.items = unique.into_values().collect();
        self.visible = !self.items.is_empty();
    }

    /// Hide without forgetting the rows (click outside the dropdown).
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn items(&self) -> &[AddressSuggestion] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&AddressSuggestion> {
        self.items.get(index)
    }

    /// Rows as markup, one `.item` div per suggestion carrying its id and text.
    pub fn to_html(&self) -> String {
        self.items
            .iter()
            .map(|s| {
                let text = html::escape(&s.display_text);
                format!(
                    r#"<div class="item" data-id="{}" data-tekst="{text}">{text}</div>"#,
                    html::escape(&s.id)
                )
            })
            .collect()
    }
}
