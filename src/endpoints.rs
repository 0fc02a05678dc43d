//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page with the transactions table, charts and update form.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for getting the filtered transactions and their summary as JSON.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for updating the risk level and comment of a transaction.
pub const RISK_UPDATE_API: &str = "/api/transactions/risk";
