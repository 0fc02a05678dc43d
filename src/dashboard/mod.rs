//! Dashboard module
//!
//! Provides the page for reviewing transactions by risk level, with charts
//! of how the selection breaks down and a form for labelling a transaction.

mod aggregation;
mod api;
mod charts;
mod forms;
mod handlers;
mod risk_endpoint;
mod tables;

pub use api::get_transactions_json;
pub use handlers::get_dashboard_page;
pub use risk_endpoint::update_risk_endpoint;
