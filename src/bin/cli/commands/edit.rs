use anyhow::{Context, Result};

use ica_shopping_list_lib::services;
use ica_shopping_list_lib::shopping::ItemUpdate;

use crate::app::App;
use crate::commands::items::print_items;
use crate::OutputFormat;

pub async fn run_add(app: &App, name: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let items = services::add_item(&app.state, name)
        .await
        .with_context(|| format!("Failed to add '{}'", name))?;
    print_items(&items, format, use_color)
}

pub async fn run_complete(app: &App, name: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let items = services::complete_item(&app.state, name)
        .await
        .with_context(|| format!("Failed to complete '{}'", name))?;
    print_items(&items, format, use_color)
}

pub async fn run_rename(
    app: &App,
    item_id: &str,
    name: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let items = services::update_item(&app.state, item_id, &ItemUpdate::rename(name))
        .await
        .with_context(|| format!("Failed to rename item {}", item_id))?;
    print_items(&items, format, use_color)
}

pub async fn run_remove(app: &App, name: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let items = services::clear_item(&app.state, name)
        .await
        .with_context(|| format!("Failed to remove '{}'", name))?;
    print_items(&items, format, use_color)
}

pub async fn run_clear_completed(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let items = services::clear_completed(&app.state)
        .await
        .context("Failed to clear completed items")?;
    print_items(&items, format, use_color)
}
