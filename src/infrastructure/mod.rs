pub mod clock;
pub mod formatter;
pub mod hooks;
pub mod interpreter;
pub mod plugins;

#[cfg(test)]
pub mod test_utils;

pub use clock::*;
pub use formatter::*;
pub use hooks::*;
pub use interpreter::*;
pub use plugins::*;
