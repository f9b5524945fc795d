//! View state exposed to the rendering layer

pub mod coordinator;
pub mod selection;

pub use coordinator::{ActiveView, ViewCoordinator, ViewSnapshot};
pub use selection::{EMPTY_LABEL, FilterSelect, Menu, Selectable, SelectionOutcome};
