//! TUI widgets for the search screen.

mod input;
mod results;

pub use input::SearchInput;
pub use results::ResultsWidget;
