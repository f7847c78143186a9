//! The constraint-propagation engine: size/location primitives,
//! the option-set algebra, the dense board and its section views, the
//! find/appearance utilities, the option-removal and option-setting
//! primitives, the propagation rules, and the search driver, in that
//! dependency order.

pub mod board;
pub mod error;
pub mod find;
pub mod location;
pub mod options;
pub mod remove;
pub mod rules;
pub mod search;
pub mod set;
pub mod size;
pub mod value;
