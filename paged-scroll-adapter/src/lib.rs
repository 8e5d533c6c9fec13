//! Adapter utilities for the `paged-scroll` crate.
//!
//! The `paged-scroll` engine is UI-agnostic and only owns gesture, snap and virtualization state.
//! This crate provides small, framework-neutral helpers commonly needed around it:
//!
//! - A scroll bar that mirrors the active page and drags the engine through an offset override
//! - Fade and translate scroll effects
//! - Reference page providers (fixed children, pooled objects)
//! - A per-frame touchpad state that derives touch edges
//!
//! This crate is intentionally framework-agnostic (no bindings to a particular UI toolkit).
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

mod effects;
mod input;
mod providers;
mod scrollbar;

#[cfg(test)]
mod tests;

pub use effects::{FadeScrollEffect, FadeTarget, TranslateScrollEffect, TranslateTarget};
pub use input::TouchpadState;
pub use providers::{ChildPage, ChildrenPageProvider, DEFAULT_PAGE_SPACING, PooledPageProvider};
pub use scrollbar::{SCROLL_BAR_LERP_SPEED, ScrollBarAdapter};
