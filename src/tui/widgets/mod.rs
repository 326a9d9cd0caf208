// Widgets - one render function per screen element
pub mod editor;
pub mod status;
pub mod styles;
pub mod table;
