//! Rowdesk Library
//!
//! Terminal browser for typed CSV records: a sortable, filterable,
//! selectable table plus a multi-field editor form, wired together by a
//! mode-aware focus router.

pub mod cli;
pub mod tui;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::domain::error::{RowdeskError, RowdeskResult};
pub use crate::domain::config::RowdeskConfig;
pub use crate::core::router::{FocusRouter, Flow, InputEvent, Mode};
pub use crate::core::table::TableModel;
