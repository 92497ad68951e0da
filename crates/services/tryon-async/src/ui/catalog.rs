use crate::{Client, config::Config, error::TryOnError, types::ClothingItem};

use super::ImagePreview;

/// One entry of the clothing select control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOption {
    /// Clothing id submitted with the form
    pub value: String,
    /// Text shown to the user
    pub label: String,
    /// Preview image for this item
    pub image: Option<String>,
}

/// The clothing select control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSelect {
    options: Vec<CatalogOption>,
    selected: Option<usize>,
}

impl CatalogSelect {
    /// Appends one option per item, in the given order
    pub fn populate(&mut self, items: impl IntoIterator<Item = ClothingItem>) {
        self.options.extend(items.into_iter().map(|item| CatalogOption {
            value: item.id,
            label: item.name,
            image: Some(item.image_url).filter(|url| !url.is_empty()),
        }));
    }

    /// All options
    #[must_use]
    pub fn options(&self) -> &[CatalogOption] {
        &self.options
    }

    /// Selects the option whose value is `value`; returns false if there is none
    pub fn select(&mut self, value: &str) -> bool {
        self.selected = self.options.iter().position(|o| o.value == value);
        self.selected.is_some()
    }

    /// Clears the selection
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected option, if any
    #[must_use]
    pub fn selected(&self) -> Option<&CatalogOption> {
        self.selected.and_then(|i| self.options.get(i))
    }

    /// Value of the selected option, if any
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected().map(|o| o.value.as_str())
    }
}

/// Fetches the catalog once and fills `select`.
///
/// Image URLs are resolved against the client's base URL. On failure the control is
/// left as it was and the error is returned for the caller to report.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched or decoded.
pub async fn load_catalog<C: Config>(
    client: &Client<C>,
    select: &mut CatalogSelect,
) -> Result<usize, TryOnError> {
    let items = client.catalog().list().await.inspect_err(|e| {
        tracing::warn!(error = %e, "failed to load clothing catalog");
    })?;

    let images = client.images();
    let count = items.len();
    select.populate(items.into_iter().map(|mut item| {
        if !item.image_url.is_empty() {
            item.image_url = images.resolve(&item.image_url);
        }
        item
    }));
    tracing::info!(count, "loaded clothing catalog");
    Ok(count)
}

/// Shows the selected option's image, or hides the preview when there is nothing to show
pub fn on_clothing_change(select: &CatalogSelect, preview: &mut ImagePreview) {
    match select.selected().and_then(|o| o.image.as_deref()) {
        Some(image) => preview.show(image),
        None => preview.hide(),
    }
}
