// src/infrastructure/util.rs
use crate::application::ports::util::SlugGenerator;
use slug::slugify;

#[derive(Debug, Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slugify(input)
    }
}
