// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod repos;
pub mod time;

pub use repos::{
    FailingFingerprintRepo, FailingKeyphraseRepo, FlakyKeyphraseRepo, SlowFingerprintRepo,
    SlowKeyphraseRepo,
};
pub use time::{FixedClock, fixed_now};
