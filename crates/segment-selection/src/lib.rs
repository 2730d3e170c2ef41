//! Tab Segment - Selection
//!
//! State machine deciding which tab is selected:
//! ```text
//! None
//!   ↓ select (first)
//! Selected(i)
//!   ↓ select(j), animated          ↓ select(j), no animation
//! Transition(i -> j) ──cancel──→ Selected(i)
//!   ↓ last tick
//! Selected(j) ──pending k──→ Selected(k)
//! ```
//! Requests arriving during a transition or while an external gesture holds
//! the segment are parked as a single pending index.

mod controller;
mod error;
mod host;
mod scroll;
mod transition;

pub use controller::{SelectionController, SelectionSnapshot};
pub use error::SelectionError;
pub use host::{PagerScrollState, SegmentHost, TabSelectedListener};
pub use scroll::reveal_scroll_delta;
pub use transition::{Transition, DEFAULT_TRANSITION_DURATION};

pub type Result<T> = std::result::Result<T, SelectionError>;
