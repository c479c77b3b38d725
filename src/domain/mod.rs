pub mod article;
pub mod errors;
pub mod fingerprint;
pub mod grammar;
pub mod keyphrase;
pub mod rules;
pub mod selection;
pub mod vocabulary;
