pub mod auth;
pub mod call_plan;
pub mod interaction;
pub mod order;
pub mod performance;
pub mod restaurant;
pub mod user;

pub use auth::AuthService;
pub use call_plan::CallPlanService;
pub use interaction::InteractionService;
pub use order::OrderService;
pub use performance::PerformanceService;
pub use restaurant::RestaurantService;
pub use user::UserService;
