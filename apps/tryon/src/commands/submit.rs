use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use tryon_async::{
    Client, TryOnConfig,
    types::TryOnForm,
    ui::{
        CatalogSelect, CustomerPreview, ImagePreview, ResultView, Submitter, load_catalog,
        on_clothing_change,
    },
};

use crate::terminal::TerminalUi;

#[derive(Args)]
pub struct SubmitArgs {
    /// Customer photo to upload
    #[arg(long)]
    image: Option<PathBuf>,

    /// Clothing item id (see `tryon catalog`)
    #[arg(long)]
    clothing: Option<String>,

    /// Save the result image here
    #[arg(long)]
    output: Option<PathBuf>,
}

pub async fn execute(client: &Client<TryOnConfig>, args: SubmitArgs) -> Result<()> {
    let mut customer_preview = ImagePreview::default();
    let image = CustomerPreview::new()
        .on_change(args.image.as_deref(), &mut customer_preview)
        .await
        .context("Failed to read customer image")?;
    if let Some(image) = &image {
        println!(
            "{} {} ({}, {} bytes)",
            "Photo:".bold(),
            image.file_name,
            image.mime,
            image.bytes.len()
        );
    }

    let mut form = TryOnForm::new();
    form.customer_image = image;
    form.clothing_id = args.clothing;

    if let Some((_, clothing_id)) = form.complete() {
        show_clothing(client, clothing_id).await;
    }

    let mut view = ResultView::default();
    let mut ui = TerminalUi::default();
    let result = Submitter::new(client)
        .submit(&form, &mut view, &mut ui)
        .await
        .context("Try-on failed")?;
    drop(ui);

    let Some(src) = result else {
        bail!("Try-on ended without a result");
    };

    let images = client.images();
    if src.starts_with("data:") {
        println!("{} inline image", "Result:".green().bold());
    } else {
        println!("{} {}", "Result:".green().bold(), images.resolve(&src));
    }

    if let Some(output) = args.output {
        let bytes = images
            .fetch(&src)
            .await
            .context("Failed to download result image")?;
        tokio::fs::write(&output, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("{} {}", "Saved:".green(), output.display());
    }
    Ok(())
}

/// Prints the chosen item's name and preview. Failures only cost the preview.
async fn show_clothing(client: &Client<TryOnConfig>, clothing_id: &str) {
    let mut select = CatalogSelect::default();
    if let Err(e) = load_catalog(client, &mut select).await {
        tracing::warn!(error = %e, "continuing without clothing preview");
        return;
    }
    if !select.select(clothing_id) {
        tracing::warn!(clothing_id, "clothing id not in catalog");
        return;
    }

    let mut preview = ImagePreview::default();
    on_clothing_change(&select, &mut preview);
    if let Some(option) = select.selected() {
        println!(
            "{} {}  {}",
            "Clothing:".bold(),
            option.label,
            preview.displayed().unwrap_or("-").dimmed()
        );
    }
}
