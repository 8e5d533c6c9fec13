use paged_scroll::{ScrollEffect, ScrollEffectUpdate};

/// A page whose opacity can be set by [`FadeScrollEffect`].
pub trait FadeTarget {
    fn set_alpha(&mut self, alpha: f64);
}

/// A page whose horizontal position can be set by [`TranslateScrollEffect`].
pub trait TranslateTarget {
    fn set_translation(&mut self, x: f64);
}

/// Fades pages out as they move away from the scroll offset.
///
/// A page centered on the offset is opaque and a page one spacing away has `min_alpha`. Without
/// looping, the first and last pages stay opaque while dragged past their edge so overscroll does
/// not fade the only page on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FadeScrollEffect {
    min_alpha: f64,
    pub enabled: bool,
}

impl Default for FadeScrollEffect {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl FadeScrollEffect {
    /// `min_alpha` is clamped to `0..=1`.
    pub fn new(min_alpha: f64) -> Self {
        Self {
            min_alpha: min_alpha.clamp(0.0, 1.0),
            enabled: true,
        }
    }

    pub fn min_alpha(&self) -> f64 {
        self.min_alpha
    }

    pub fn alpha_for(&self, update: &ScrollEffectUpdate) -> f64 {
        let difference = update.scroll_offset - update.page_offset;

        if !update.looping {
            let last = update.page_count as i64 - 1;
            if (update.real_index == 0 && difference < 0.0)
                || (update.real_index == last && difference > 0.0)
            {
                return 1.0;
            }
        }

        if update.spacing <= 0.0 {
            return 1.0;
        }
        let alpha = 1.0 - difference.abs() / update.spacing;
        (alpha * (1.0 - self.min_alpha) + self.min_alpha).clamp(0.0, 1.0)
    }
}

impl<H: FadeTarget> ScrollEffect<H> for FadeScrollEffect {
    fn apply(&mut self, page: &mut H, update: &ScrollEffectUpdate) {
        page.set_alpha(self.alpha_for(update));
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

/// Positions each page at its offset relative to the scroll offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranslateScrollEffect {
    pub enabled: bool,
}

impl Default for TranslateScrollEffect {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl TranslateScrollEffect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translation_for(update: &ScrollEffectUpdate) -> f64 {
        update.page_offset - update.scroll_offset
    }
}

impl<H: TranslateTarget> ScrollEffect<H> for TranslateScrollEffect {
    fn apply(&mut self, page: &mut H, update: &ScrollEffectUpdate) {
        page.set_translation(Self::translation_for(update));
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}
