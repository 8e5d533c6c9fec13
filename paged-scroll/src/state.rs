use crate::{RealIndex, ScrollPhase};

/// A lightweight, serializable snapshot of the engine's scroll state.
///
/// Useful for restoring a carousel position across frames or sessions without holding on to the
/// engine. With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollSnapshot {
    pub scroll_offset: f64,
    pub target_offset: f64,
    pub active_real_index: Option<RealIndex>,
    pub phase: ScrollPhase,
    pub is_moving: bool,
}
