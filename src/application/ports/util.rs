// src/application/ports/util.rs

/// Turns a product name into the path segment used by the shop's product URLs.
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}
