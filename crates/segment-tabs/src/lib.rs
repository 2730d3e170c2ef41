//! Tab Segment - Tabs
//!
//! The data side of a tab segment: tab records, their colors, the ordered
//! collection with its realized views, and the layout pass that assigns
//! each tab its content geometry.

mod collection;
mod color;
mod error;
mod layout;
mod tab;

pub use collection::{TabCollection, TabView};
pub use color::{blend, Argb};
pub use error::TabError;
pub use layout::{LayoutMode, LayoutParams, LayoutResult, TabMeasure};
pub use tab::{ColorResolver, Gravity, IconPosition, SignCount, Tab, TabBuilder, TabColor, TabIcon};

pub type Result<T> = std::result::Result<T, TabError>;
