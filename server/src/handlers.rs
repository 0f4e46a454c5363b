pub mod analytics_handlers;
pub mod auth_handlers;
pub mod current_session;
pub mod dashboard_handlers;
