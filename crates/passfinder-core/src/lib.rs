//! # passfinder-core
//!
//! Presentation layer for passfinder: turns a query and the rows the store
//! returned into a [`ResultsView`] of facility cards, and renders that view
//! as markdown or colored terminal text.
//!
//! ## Key Types
//!
//! - [`ResultsView`] - Status line plus either a notice or a list of cards
//! - [`FacilityCard`] - Title, pass badge and the fixed field set
//! - [`Badge`] - Included / excluded indicator

mod render;
mod search;
mod view;

pub use render::{render_markdown, render_terminal};
pub use search::run_search;
pub use view::{
    display_or, escape_open_hours, status_line, Badge, CardField, FacilityCard, ResultsBody, ResultsView,
    INPUT_HELP, INPUT_LABEL, INPUT_PLACEHOLDER, LABEL_ADDRESS, LABEL_CATEGORY, LABEL_CAUTION,
    LABEL_COST, LABEL_LAST_ENTRY, LABEL_NOTES, LABEL_OPEN_DAYS, LABEL_OPEN_HOURS, LABEL_QR_PASS,
    LABEL_REGION, LABEL_RESERVATION, NO_RESULTS, PAGE_SUBTITLE, PAGE_TITLE,
};
