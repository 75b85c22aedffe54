pub mod demo_view;
pub mod keymap;
pub mod plain;
pub mod terminal_check;
pub mod theme;

pub use demo_view::*;
pub use keymap::*;
pub use plain::*;
pub use terminal_check::*;
pub use theme::*;
