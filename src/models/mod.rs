pub mod call_plan;
pub mod interaction;
pub mod order;
pub mod performance;
pub mod restaurant;
pub mod user;

pub use call_plan::CallPlan;
pub use interaction::{Interaction, InteractionType};
pub use order::{Order, OrderStatus};
pub use performance::PerformanceMetric;
pub use restaurant::{Restaurant, RestaurantStatus};
pub use user::{User, UserRole};
