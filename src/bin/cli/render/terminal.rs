use ica_shopping_list_lib::shopping::Item;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const STRIKETHROUGH: &str = "\x1b[9m";
    pub const GREEN: &str = "\x1b[32m";
    pub const GRAY: &str = "\x1b[90m";
}

/// One line per item: checkbox, name, id
pub fn render_item(item: &Item, use_color: bool) -> String {
    let check = if item.complete { "[x]" } else { "[ ]" };
    if !use_color {
        return format!("{} {}  ({})", check, item.name, item.id);
    }
    if item.complete {
        format!(
            "{}{}{} {}{}{}  {}({}){}",
            Color::GREEN,
            check,
            Color::RESET,
            Color::STRIKETHROUGH,
            item.name,
            Color::RESET,
            Color::GRAY,
            item.id,
            Color::RESET
        )
    } else {
        format!("{} {}  {}({}){}", check, item.name, Color::DIM, item.id, Color::RESET)
    }
}

pub fn render_items(items: &[Item], use_color: bool) -> String {
    if items.is_empty() {
        return "(no items)".to_string();
    }
    items
        .iter()
        .map(|item| render_item(item, use_color))
        .collect::<Vec<_>>()
        .join("\n")
}
