use anyhow::{Context, Result};
use colored::Colorize;
use tryon_async::{Client, TryOnConfig, types::Feedback};

pub async fn execute(client: &Client<TryOnConfig>, score: u8, comment: String) -> Result<()> {
    let resp = client
        .feedback()
        .create(&Feedback::new(score, comment))
        .await
        .context("Failed to send feedback")?;
    println!("{} {}", "Feedback recorded:".green(), resp.status);
    Ok(())
}
