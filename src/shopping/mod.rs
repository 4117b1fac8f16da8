mod data;
mod groups;
mod item;

pub use data::{Items, ShoppingData};
pub use groups::{ArticleGroupLookup, ArticleGroups, DEFAULT_ARTICLE_GROUP};
pub use item::{capitalize, Item, ItemUpdate};
