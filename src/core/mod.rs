// Core module - Mode routing, editor form, filter and table model
pub mod editor;
pub mod filter;
pub mod keys;
pub mod router;
pub mod table;

pub use editor::{EditorOutcome, EditorReport, EditorSignal, Field, FieldEditor, Focus};
pub use filter::{FilterAccumulator, FilterState};
pub use keys::{Key, KeyBindings};
pub use router::{FocusRouter, Flow, Geometry, InputEvent, Mode};
pub use table::{Record, SortOrder, SortState, TableModel, Value};
