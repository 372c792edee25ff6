//! Numeric helpers the calendar grid renders with.
//!
//! One rem of height is one 15-minute quarter, matching the 96-cell grid the
//! lane assignment works on.

use std::borrow::Cow;

use unicode_width::UnicodeWidthStr;

use crate::splitter::MINUTES_PER_DAY;

pub const MINUTES_PER_QUARTER: u32 = 15;

const ELLIPSIS: &str = "...";

/// Vertical offset in rem for a block starting `start_mins` after midnight.
pub fn minutes_to_rems(start_mins: i64) -> f64 {
    (start_mins as f64 / f64::from(MINUTES_PER_QUARTER)).max(0.0)
}

/// Whole quarters a block occupies, capped at the end of the day, never less than one.
pub fn duration_in_quarters(minutes_since_start_of_day: i64, duration_mins: u32) -> u32 {
    let start = minutes_since_start_of_day.clamp(0, i64::from(MINUTES_PER_DAY));
    let until_midnight = i64::from(MINUTES_PER_DAY) - start;
    let effective = i64::from(duration_mins).min(until_midnight);
    ((effective / i64::from(MINUTES_PER_QUARTER)) as u32).max(1)
}

/// Source of rendered text widths, in pixels.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f64) -> f64;
}

/// Width estimate from display columns times an average glyph advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedTextMeasure {
    /// Average glyph advance as a fraction of the font size.
    pub advance_ratio: f64,
}

impl Default for EstimatedTextMeasure {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl TextMeasure for EstimatedTextMeasure {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.width() as f64 * font_size * self.advance_ratio
    }
}

/// Truncate `text` with an ellipsis so it fits `container_width` pixels.
///
/// Measures once, then scales the character count linearly by
/// `container_width / text_width`. Approximate by construction.
pub fn clip_label_to_width<'a, M: TextMeasure + ?Sized>(
    text: &'a str,
    font_size: f64,
    container_width: f64,
    measure: &M,
) -> Cow<'a, str> {
    let text_width = measure.text_width(text, font_size);
    if text_width <= container_width {
        return Cow::Borrowed(text);
    }

    let char_count = text.chars().count();
    let ratio = (container_width / text_width).max(0.0);
    let budget = (char_count as f64 * ratio).floor() as usize;
    let keep = budget.saturating_sub(ELLIPSIS.len());

    let mut clipped: String = text.chars().take(keep).collect();
    clipped.push_str(ELLIPSIS);
    Cow::Owned(clipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAdvance(f64);

    impl TextMeasure for FixedAdvance {
        fn text_width(&self, text: &str, _font_size: f64) -> f64 {
            text.chars().count() as f64 * self.0
        }
    }

    #[test]
    fn short_text_is_borrowed_unchanged() {
        let clipped = clip_label_to_width("Gym", 12.0, 100.0, &FixedAdvance(10.0));
        assert!(matches!(clipped, Cow::Borrowed("Gym")));
    }

    #[test]
    fn long_text_scales_to_container() {
        // 20 chars at 10px = 200px into 100px → budget 10, keep 7.
        let clipped = clip_label_to_width("abcdefghijklmnopqrst", 12.0, 100.0, &FixedAdvance(10.0));
        assert_eq!(clipped, "abcdefg...");
    }

    #[test]
    fn estimate_counts_wide_glyphs_twice() {
        let m = EstimatedTextMeasure::default();
        assert!((m.text_width("ab", 10.0) - 12.0).abs() < 1e-9);
        assert!((m.text_width("日本", 10.0) - 24.0).abs() < 1e-9);
    }
}
