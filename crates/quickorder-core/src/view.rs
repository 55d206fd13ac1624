//! Presentation model.
//!
//! [`AutocompleteView::render`] is a pure function of the selection state. UI
//! layers read the view model; [`AutocompleteView::to_html`] renders it as a
//! server-side fragment.

use crate::ids::SkuId;
use crate::selection::SelectionState;
use serde::{Deserialize, Serialize};

/// Message id of the block title.
pub const TITLE_MESSAGE: &str = "quickorder.autocomplete.label";
/// Message id of the block subtitle.
pub const SUBTITLE_MESSAGE: &str = "quickorder.autocomplete.helper";
/// Message id of the add button label.
pub const ADD_BUTTON_MESSAGE: &str = "quickorder.autocomplete.addButton";

/// CSS handles exposed for store theming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CssHandle {
    SkuSelection,
    ProductThumb,
    ProductLabel,
    InputQuantity,
    ButtonAdd,
}

impl CssHandle {
    pub const ALL: [CssHandle; 5] = [
        CssHandle::SkuSelection,
        CssHandle::ProductThumb,
        CssHandle::ProductLabel,
        CssHandle::InputQuantity,
        CssHandle::ButtonAdd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CssHandle::SkuSelection => "skuSelection",
            CssHandle::ProductThumb => "productThumb",
            CssHandle::ProductLabel => "productLabel",
            CssHandle::InputQuantity => "inputQuantity",
            CssHandle::ButtonAdd => "buttonAdd",
        }
    }
}

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    /// Thumbnail width and height in pixels.
    pub thumbnail_size: u32,
    /// Background of the chosen SKU tag.
    pub selected_tag_color: String,
    /// Background of the other SKU tags.
    pub idle_tag_color: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            thumbnail_size: 25,
            selected_tag_color: "#8bc34a".to_string(),
            idle_tag_color: "#979899".to_string(),
        }
    }
}

/// A clickable SKU tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkuTag {
    pub sku_id: SkuId,
    pub name: String,
    pub selected: bool,
    pub color: String,
}

/// The staged product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedView {
    pub thumbnail_url: String,
    pub thumbnail_size: u32,
    pub label: String,
    /// Quantity text exactly as typed.
    pub quantity: String,
    pub quantity_valid: bool,
    /// The add button shows a spinner.
    pub button_loading: bool,
    /// One tag per variant; empty unless the product has several.
    pub sku_tags: Vec<SkuTag>,
}

/// Everything a UI layer needs to draw the block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutocompleteView {
    pub title_message: &'static str,
    pub subtitle_message: &'static str,
    pub add_button_message: &'static str,
    /// The search box is shown only while nothing is selected.
    pub show_search: bool,
    /// A lookup is in flight.
    pub searching: bool,
    pub selected: Option<SelectedView>,
    /// Display text of the last error.
    pub error: Option<String>,
}

impl AutocompleteView {
    /// Build the view model for `state`.
    pub fn render(state: &SelectionState, options: &ViewOptions) -> Self {
        let selected = state.selected.as_ref().map(|product| {
            let sku_tags = if product.has_multiple_variants() {
                product
                    .variants
                    .iter()
                    .map(|variant| {
                        let selected = product.chosen_sku.as_ref() == Some(&variant.sku_id);
                        SkuTag {
                            sku_id: variant.sku_id.clone(),
                            name: variant.display_name.clone(),
                            selected,
                            color: if selected {
                                options.selected_tag_color.clone()
                            } else {
                                options.idle_tag_color.clone()
                            },
                        }
                    })
                    .collect()
            } else {
                Vec::new()
            };

            SelectedView {
                thumbnail_url: product.thumbnail_url.clone(),
                thumbnail_size: options.thumbnail_size,
                label: product.label.clone(),
                quantity: state.quantity.raw().to_string(),
                quantity_valid: state.quantity.is_valid(),
                button_loading: state.is_submitting(),
                sku_tags,
            }
        });

        Self {
            title_message: TITLE_MESSAGE,
            subtitle_message: SUBTITLE_MESSAGE,
            add_button_message: ADD_BUTTON_MESSAGE,
            show_search: selected.is_none(),
            searching: state.is_lookup_pending(),
            selected,
            error: state.last_error.as_ref().map(ToString::to_string),
        }
    }

    /// Render the selected-product row as an HTML fragment.
    ///
    /// Message ids are emitted as `data-message` attributes for the host page
    /// to translate. Returns the search placeholder when nothing is selected.
    pub fn to_html(&self) -> String {
        let error = self
            .error
            .as_ref()
            .map(|e| format!(r#"<p class="quickorder-error" role="alert">{}</p>"#, html_escape(e)))
            .unwrap_or_default();

        let subtitle = format!(
            r#"<p class="quickorder-subtitle" data-message="{}"></p>"#,
            self.subtitle_message
        );

        let Some(selected) = &self.selected else {
            return format!(
                r#"<div class="quickorder-autocomplete" data-message="{}">
    {}
    <div class="quickorder-search" data-searching="{}"></div>
    {}
</div>"#,
                self.title_message, subtitle, self.searching, error
            );
        };

        let tags: String = selected
            .sku_tags
            .iter()
            .map(|tag| {
                format!(
                    r#"<span class="mr4 {}" data-sku="{}" data-selected="{}" style="background-color: {}">{}</span>"#,
                    CssHandle::SkuSelection.as_str(),
                    html_escape(tag.sku_id.as_str()),
                    tag.selected,
                    html_escape(&tag.color),
                    html_escape(&tag.name)
                )
            })
            .collect();

        format!(
            r#"<div class="quickorder-autocomplete" data-message="{}">
    {}
    <div class="{}"><img src="{}" width="{}" height="{}" alt=""></div>
    <div class="{}">{}</div>
    <div class="{}"><input value="{}" size="3" aria-invalid="{}"></div>
    <div class="{}"><button data-message="{}" {}></button></div>
    <div>{}</div>
    {}
</div>"#,
            self.title_message,
            subtitle,
            CssHandle::ProductThumb.as_str(),
            html_escape(&selected.thumbnail_url),
            selected.thumbnail_size,
            selected.thumbnail_size,
            CssHandle::ProductLabel.as_str(),
            html_escape(&selected.label),
            CssHandle::InputQuantity.as_str(),
            html_escape(&selected.quantity),
            !selected.quantity_valid,
            CssHandle::ButtonAdd.as_str(),
            self.add_button_message,
            if selected.button_loading { "disabled" } else { "" },
            tags,
            error
        )
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
