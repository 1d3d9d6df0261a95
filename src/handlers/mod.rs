pub mod auth;
pub mod call_plans;
pub mod interactions;
pub mod orders;
pub mod performance;
pub mod restaurants;
pub mod users;
