use anyhow::{Context, Result};
use colored::Colorize;
use tryon_async::{
    Client, TryOnConfig,
    ui::{CatalogSelect, load_catalog},
};

pub async fn execute(client: &Client<TryOnConfig>, json: bool) -> Result<()> {
    if json {
        let items = client
            .catalog()
            .list()
            .await
            .context("Failed to load clothing catalog")?;
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    let mut select = CatalogSelect::default();
    load_catalog(client, &mut select)
        .await
        .context("Failed to load clothing catalog")?;

    if select.options().is_empty() {
        println!("{}", "Catalog is empty".yellow());
        return Ok(());
    }
    for option in select.options() {
        println!(
            "{:>4}  {}  {}",
            option.value.bold(),
            option.label,
            option.image.as_deref().unwrap_or("-").dimmed()
        );
    }
    Ok(())
}
