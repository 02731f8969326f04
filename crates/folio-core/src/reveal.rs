//! Word-by-word text reveal driven by scroll progress
//!
//! A block of text is split into [`Word`]s. Word `i` of `n` owns the progress
//! sub-range `[i/n, (i+1)/n)` and fades from the profile's dim baseline to its
//! full baseline while progress crosses that range.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::content::Messages;
use crate::error::Result;
use crate::motion::{lerp, EasingType};
use crate::progress::{Progress, ScrollWindow};

/// One whitespace-delimited token of a text block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub index: usize,
    pub text: String,
}

/// Split text on whitespace into indexed words
pub fn split_words(text: &str) -> Vec<Word> {
    text.split_whitespace()
        .enumerate()
        .map(|(index, text)| Word {
            index,
            text: text.to_string(),
        })
        .collect()
}

/// Progress sub-range owned by word `index` out of `count`
///
/// Both ends use the same `i / n` formula so neighbouring ranges share their
/// boundary exactly.
pub fn word_range(index: usize, count: usize) -> Range<f64> {
    debug_assert!(count > 0 && index < count);
    let n = count as f64;
    (index as f64 / n)..((index + 1) as f64 / n)
}

/// Emphasis baselines for a reveal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RevealProfile {
    /// Fully transparent to fully opaque
    Binary,
    /// Never fully invisible: from `floor` to fully opaque
    Dimmed { floor: f64 },
}

impl Default for RevealProfile {
    fn default() -> Self {
        RevealProfile::Dimmed { floor: 0.3 }
    }
}

impl RevealProfile {
    pub fn dim(&self) -> f64 {
        match self {
            RevealProfile::Binary => 0.0,
            RevealProfile::Dimmed { floor } => floor.clamp(0.0, 1.0),
        }
    }

    pub fn full(&self) -> f64 {
        1.0
    }
}

/// Configuration of one reveal call site
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default)]
    pub profile: RevealProfile,
    #[serde(default = "default_reveal_window")]
    pub window: ScrollWindow,
    #[serde(default)]
    pub easing: EasingType,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            profile: RevealProfile::default(),
            window: default_reveal_window(),
            easing: EasingType::Linear,
        }
    }
}

fn default_reveal_window() -> ScrollWindow {
    ScrollWindow::through_center()
}

/// Maps progress to an emphasis level per word
#[derive(Debug, Clone)]
pub struct WordRevealAnimator {
    words: Vec<Word>,
    profile: RevealProfile,
    easing: EasingType,
}

impl WordRevealAnimator {
    pub fn new(text: &str, profile: RevealProfile) -> Self {
        Self {
            words: split_words(text),
            profile,
            easing: EasingType::Linear,
        }
    }

    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    pub fn from_config(text: &str, config: &RevealConfig) -> Self {
        Self::new(text, config.profile).with_easing(config.easing)
    }

    /// Build from a catalog message, failing if the value is not a string
    pub fn from_message(messages: &Messages, key: &str, config: &RevealConfig) -> Result<Self> {
        let text = messages.reveal_text(key)?;
        Ok(Self::from_config(text, config))
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn profile(&self) -> RevealProfile {
        self.profile
    }

    /// Emphasis of one word. Undefined progress yields the neutral (fully
    /// shown) level.
    pub fn emphasis(&self, index: usize, progress: Option<Progress>) -> f64 {
        let Some(progress) = progress else {
            return self.profile.full();
        };
        let count = self.words.len();
        if index >= count {
            return self.profile.dim();
        }
        let range = word_range(index, count);
        let span = range.end - range.start;
        let t = ((progress.value() - range.start) / span).clamp(0.0, 1.0);
        lerp(self.profile.dim(), self.profile.full(), self.easing.apply(t))
    }

    /// Emphasis for every word in order; empty for an empty block
    pub fn levels(&self, progress: Option<Progress>) -> Vec<f64> {
        (0..self.words.len())
            .map(|i| self.emphasis(i, progress))
            .collect()
    }

    /// Words paired with their emphasis
    pub fn render(&self, progress: Option<Progress>) -> impl Iterator<Item = (&Word, f64)> + '_ {
        self.words
            .iter()
            .map(move |word| (word, self.emphasis(word.index, progress)))
    }

    /// Index of the word whose range contains `progress` (inclusive lower
    /// bound). Progress 1.0 maps to the last word.
    pub fn active_word(&self, progress: Progress) -> Option<usize> {
        let count = self.words.len();
        if count == 0 {
            return None;
        }
        let idx = (progress.value() * count as f64).floor() as usize;
        Some(idx.min(count - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn binary(text: &str) -> WordRevealAnimator {
        WordRevealAnimator::new(text, RevealProfile::Binary)
    }

    #[test]
    fn test_split_words_on_any_whitespace() {
        let words = split_words("  A\tB\n C  D ");
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, ["A", "B", "C", "D"]);
        assert_eq!(words[3].index, 3);
    }

    #[test]
    fn test_half_progress_binary() {
        let anim = binary("A B C D");
        let levels = anim.levels(Some(Progress::new(0.5)));
        assert_eq!(levels, vec![1.0, 1.0, 0.0, 0.0]);
        assert_eq!(anim.active_word(Progress::new(0.5)), Some(2));
    }

    #[test]
    fn test_dimmed_profile_never_invisible() {
        let anim = WordRevealAnimator::new("one two three", RevealProfile::Dimmed { floor: 0.3 });
        let levels = anim.levels(Some(Progress::START));
        assert!(levels.iter().all(|&l| (l - 0.3).abs() < 1e-9));
        let levels = anim.levels(Some(Progress::END));
        assert!(levels.iter().all(|&l| (l - 1.0).abs() < 1e-9));
    }

    #[test]
    fn test_partial_word() {
        let anim = binary("A B");
        // word 1 owns [0.5, 1.0); 0.75 is halfway through it
        assert!((anim.emphasis(1, Some(Progress::new(0.75))) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_text_renders_nothing() {
        let anim = binary("   ");
        assert!(anim.is_empty());
        assert!(anim.levels(Some(Progress::new(0.5))).is_empty());
        assert_eq!(anim.render(None).count(), 0);
        assert_eq!(anim.active_word(Progress::END), None);
    }

    #[test]
    fn test_undefined_progress_is_neutral() {
        let anim = WordRevealAnimator::new("a b c", RevealProfile::Dimmed { floor: 0.2 });
        assert_eq!(anim.levels(None), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_active_word_end() {
        let anim = binary("A B C D");
        assert_eq!(anim.active_word(Progress::END), Some(3));
        assert_eq!(anim.active_word(Progress::START), Some(0));
    }

    #[test]
    fn test_profile_deserializes() {
        let config: RevealConfig = toml::from_str(
            r#"
            profile = { kind = "binary" }
            window = { enter = "start end", exit = "end center" }
            "#,
        )
        .unwrap();
        assert_eq!(config.profile, RevealProfile::Binary);
        assert_eq!(config.easing, EasingType::Linear);
    }

    proptest! {
        #[test]
        fn ranges_partition_unit_interval(count in 1usize..500) {
            prop_assert_eq!(word_range(0, count).start, 0.0);
            prop_assert_eq!(word_range(count - 1, count).end, 1.0);
            for i in 1..count {
                prop_assert_eq!(word_range(i - 1, count).end, word_range(i, count).start);
                prop_assert!(word_range(i, count).start < word_range(i, count).end);
            }
        }

        #[test]
        fn out_of_range_progress_matches_boundary(raw in -10.0f64..10.0, words in 1usize..40) {
            let text = vec!["w"; words].join(" ");
            let anim = binary(&text);
            let levels = anim.levels(Some(Progress::new(raw)));
            if raw <= 0.0 {
                prop_assert_eq!(levels, anim.levels(Some(Progress::START)));
            } else if raw >= 1.0 {
                prop_assert_eq!(levels, anim.levels(Some(Progress::END)));
            }
        }

        #[test]
        fn emphasis_is_monotonic_in_progress(a in 0.0f64..1.0, b in 0.0f64..1.0, words in 1usize..20) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let text = vec!["w"; words].join(" ");
            let anim = binary(&text);
            for i in 0..words {
                prop_assert!(anim.emphasis(i, Some(Progress::new(lo))) <= anim.emphasis(i, Some(Progress::new(hi))));
            }
        }
    }
}
