//! A headless paged scroll engine.
//!
//! For adapter-level utilities (scroll bar, scroll effects, reference page providers), see the
//! `paged-scroll-adapter` crate.
//!
//! This crate implements the core of a horizontally paged carousel driven by a single touch
//! pointer: low-pass filtered velocity tracking, click-vs-swipe detection, eased snapping to pages,
//! page virtualization around the scroll offset, and looping wrap-around indexing.
//!
//! It is UI-agnostic. A host is expected to provide:
//! - a [`PageProvider`] that builds and tears down page visuals
//! - touch input, either through a [`TouchInputSource`] or the `touch_*` methods
//! - a frame tick calling [`PagedScrollEngine::update`]
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

mod engine;
mod error;
mod offset;
mod options;
mod pages;
mod provider;
mod state;
mod types;
mod velocity;


pub use engine::{PagedScrollEngine, PagedScrollEngineBuilder};
pub use error::Error;
pub use offset::{OffsetMode, ScrollOffsetController};
pub use options::{GestureTuning, OnEventCallback, PagedScrollOptions};
pub use pages::{ActivePageChange, PageVirtualizer, PageWindow, VirtualizeOutcome, VisiblePage};
pub use provider::{NoTouchInput, PageProvider, ScrollEffect, ScrollEffectUpdate, TouchInputSource};
pub use state::ScrollSnapshot;
pub use types::{
    IndexLookup, LogicalIndex, PageRef, RealIndex, ScrollEvent, ScrollPhase, SnapDirection,
    TouchSample, index_from_offset, logical_index, offset_from_index,
};
pub use velocity::TouchVelocityTracker;

pub use kurbo::{Point, Vec2};
