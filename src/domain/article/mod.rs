pub mod body;
pub mod entity;
pub mod text;
pub mod value_objects;

pub use body::{Block, Body};
pub use entity::{Article, ArticleDraft};
pub use value_objects::{ArticleSlug, FocusKeyphrase};
