// src/application/composers/mod.rs
//! Field composers. Each is pure and never fails on malformed input.
pub mod meta;
pub mod slug;
pub mod tags;
pub mod title;

pub use meta::MetaComposer;
pub use slug::SlugComposer;
pub use tags::TagComposer;
pub use title::TitleComposer;
