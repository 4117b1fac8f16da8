use anyhow::Result;

use ica_shopping_list_lib::shopping::Item;

use crate::app::App;
use crate::render::terminal::render_items;
use crate::OutputFormat;

pub fn print_items(items: &[Item], format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
        OutputFormat::Plain => println!("{}", render_items(items, use_color)),
    }
    Ok(())
}

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let items = app.state.shopping.items();
    if let OutputFormat::Plain = format {
        println!("{} ({} items)\n", app.config.list_name, items.len());
    }
    print_items(&items, format, use_color)
}

pub fn run_last(app: &App, count: usize, format: &OutputFormat, use_color: bool) -> Result<()> {
    let items = app.state.shopping.last_items(count);
    print_items(&items, format, use_color)
}
