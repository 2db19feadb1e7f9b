//! Interactive search screen.
//!
//! One text input and a live result list. Every edit of the query triggers
//! a full re-fetch; only the latest request is ever displayed.

mod app;
mod layout;
mod state;
mod widgets;

use anyhow::Result;

use passfinder_db::FacilityStore;
use passfinder_logging::Logger;

use app::App;

/// Run the search screen until the user quits.
pub async fn run_tui(store: FacilityStore, logger: Logger) -> Result<()> {
    let mut app = App::new(store, logger)?;
    app.run().await
}
