// src/domain/rules.rs
use serde::{Deserialize, Serialize};

/// Share of non-leading sentences that must carry a transition word.
pub const TRANSITION_RATIO_TARGET: f64 = 0.30;

/// Numeric bounds shared by the composers, the rewrite passes and the validator.
///
/// Passes establish these bounds and the validator checks the same values, so the
/// two must always be built from one instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub title_min_chars: usize,
    pub title_max_chars: usize,
    pub meta_min_chars: usize,
    pub meta_max_chars: usize,
    pub meta_source_min_chars: usize,
    pub slug_max_chars: usize,
    pub min_words: usize,
    pub lead_window_chars: usize,
    pub link_host_min_words: usize,
    pub sentence_max_words: usize,
    pub split_window_start: usize,
    pub split_window_end: usize,
    pub transition_ratio: f64,
    pub opener_run: usize,
    pub list_min_items: usize,
    pub list_max_items: usize,
    pub list_item_max_words: usize,
    pub paragraph_max_words: usize,
    pub paragraph_preferred_min_words: usize,
    pub density_min_percent: f64,
    pub density_max_percent: f64,
    pub pass_score: f64,
    pub max_tags: usize,
    pub max_filler_sections: usize,
    pub max_density_insertions: usize,
    pub max_dilution_paragraphs: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            title_min_chars: 30,
            title_max_chars: 60,
            meta_min_chars: 120,
            meta_max_chars: 155,
            meta_source_min_chars: 50,
            slug_max_chars: 50,
            min_words: 300,
            lead_window_chars: 100,
            link_host_min_words: 15,
            sentence_max_words: 20,
            split_window_start: 8,
            split_window_end: 20,
            transition_ratio: TRANSITION_RATIO_TARGET,
            opener_run: 3,
            list_min_items: 3,
            list_max_items: 6,
            list_item_max_words: 15,
            paragraph_max_words: 100,
            paragraph_preferred_min_words: 85,
            density_min_percent: 0.5,
            density_max_percent: 2.5,
            pass_score: 90.0,
            max_tags: 8,
            max_filler_sections: 12,
            max_density_insertions: 40,
            max_dilution_paragraphs: 30,
        }
    }
}

impl Thresholds {
    pub fn with_transition_ratio(mut self, ratio: f64) -> Self {
        self.transition_ratio = ratio;
        self
    }

    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    /// `true` when `with` out of `eligible` sentences meets the transition target.
    /// An empty eligible set passes vacuously.
    pub fn transition_ratio_met(&self, with: usize, eligible: usize) -> bool {
        eligible == 0 || with as f64 + 1e-9 >= self.transition_ratio * eligible as f64
    }

    pub fn density_in_range(&self, percent: f64) -> bool {
        percent + 1e-9 >= self.density_min_percent && percent <= self.density_max_percent + 1e-9
    }
}
