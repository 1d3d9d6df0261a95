pub mod authenticator;
pub mod controller;
pub mod filter;
pub mod password;
pub mod token;

pub use authenticator::{Authenticator, DatabaseAuthenticator};
pub use controller::{AuthController, CurrentUser, TokenResponse};
pub use filter::{
    all_of, any_of, AuthorizationFilter, CompositeFilter, CustomFilter, PermissionFilter,
    RoleFilter,
};
pub use token::{Claims, JwtTokenStrategy, TokenError, TokenStrategy};
