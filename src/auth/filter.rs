use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::Request;

use crate::error::ApiError;
use crate::models::{User, UserRole};

/// A composable authorization predicate over (principal, request).
///
/// Filters form trees: atomic role/permission/custom checks combined with
/// [`any_of`] / [`all_of`]. Evaluation errors propagate - a failing filter
/// rejects the request, it never silently authorizes.
#[async_trait]
pub trait AuthorizationFilter: Send + Sync {
    async fn authorize(&self, user: &User, request: &Request) -> Result<bool, ApiError>;
}

/// Membership check against the principal's role.
///
/// With `match_any` the principal's role must appear in the required set;
/// without it every required role must match. A principal carries exactly
/// one role, so an "all" filter over more than one role can never pass -
/// that follows from the single-role data model.
pub struct RoleFilter {
    required_roles: Vec<UserRole>,
    match_any: bool,
}

impl RoleFilter {
    pub fn new(required_roles: Vec<UserRole>, match_any: bool) -> Self {
        Self { required_roles, match_any }
    }

    pub fn any_of(required_roles: Vec<UserRole>) -> Self {
        Self::new(required_roles, true)
    }

    pub fn all_of(required_roles: Vec<UserRole>) -> Self {
        Self::new(required_roles, false)
    }
}

#[async_trait]
impl AuthorizationFilter for RoleFilter {
    async fn authorize(&self, user: &User, _request: &Request) -> Result<bool, ApiError> {
        let authorized = if self.match_any {
            self.required_roles.iter().any(|role| *role == user.role)
        } else {
            self.required_roles.iter().all(|role| *role == user.role)
        };
        Ok(authorized)
    }
}

/// Membership check against the principal's permission set
pub struct PermissionFilter {
    required_permissions: Vec<String>,
    match_any: bool,
}

impl PermissionFilter {
    pub fn new(required_permissions: Vec<impl Into<String>>, match_any: bool) -> Self {
        Self {
            required_permissions: required_permissions.into_iter().map(Into::into).collect(),
            match_any,
        }
    }

    pub fn any_of(required_permissions: Vec<impl Into<String>>) -> Self {
        Self::new(required_permissions, true)
    }

    pub fn all_of(required_permissions: Vec<impl Into<String>>) -> Self {
        Self::new(required_permissions, false)
    }
}

#[async_trait]
impl AuthorizationFilter for PermissionFilter {
    async fn authorize(&self, user: &User, _request: &Request) -> Result<bool, ApiError> {
        let granted = user.permissions();
        let has = |perm: &String| granted.iter().any(|g| g == perm);

        let authorized = if self.match_any {
            self.required_permissions.iter().any(has)
        } else {
            self.required_permissions.iter().all(has)
        };
        Ok(authorized)
    }
}

/// Ordered list of child filters reduced with OR (`match_any`) or AND.
/// Every child is evaluated; there is no boolean short-circuit, but an
/// evaluation error aborts immediately.
pub struct CompositeFilter {
    filters: Vec<Arc<dyn AuthorizationFilter>>,
    match_any: bool,
}

impl CompositeFilter {
    pub fn new(filters: Vec<Arc<dyn AuthorizationFilter>>, match_any: bool) -> Self {
        Self { filters, match_any }
    }
}

impl AuthorizationFilter for CompositeFilter {
    // Hand-written to match the `#[async_trait]`-desugared signature. The
    // child futures are constructed *outside* the returned `async move` block
    // so the `&Request` reference (axum's `Request` is not `Sync`) is not
    // captured as generator state, keeping the future `Send`. The child
    // futures are themselves `Send` trait objects, and they are lazy, so
    // evaluation order and short-circuit-on-error behavior are unchanged.
    fn authorize<'a, 'b, 'c, 'async_trait>(
        &'a self,
        user: &'b User,
        request: &'c Request,
    ) -> Pin<Box<dyn Future<Output = Result<bool, ApiError>> + Send + 'async_trait>>
    where
        'a: 'async_trait,
        'b: 'async_trait,
        'c: 'async_trait,
        Self: 'async_trait,
    {
        let pending: Vec<_> = self
            .filters
            .iter()
            .map(|filter| filter.authorize(user, request))
            .collect();
        let match_any = self.match_any;
        Box::pin(async move {
            let mut results = Vec::with_capacity(pending.len());
            for future in pending {
                results.push(future.await?);
            }

            let authorized = if match_any {
                results.iter().any(|r| *r)
            } else {
                results.iter().all(|r| *r)
            };
            Ok(authorized)
        })
    }
}

/// Wraps an arbitrary predicate for conditions not expressible as
/// role/permission sets
pub struct CustomFilter {
    predicate: Box<dyn Fn(&User, &Request) -> Result<bool, ApiError> + Send + Sync>,
}

impl CustomFilter {
    pub fn new(
        predicate: impl Fn(&User, &Request) -> Result<bool, ApiError> + Send + Sync + 'static,
    ) -> Self {
        Self { predicate: Box::new(predicate) }
    }
}

impl AuthorizationFilter for CustomFilter {
    // Hand-written to match the `#[async_trait]`-desugared signature. The
    // predicate is synchronous, so it is evaluated eagerly and only its
    // `Result` (which is `Send`) is moved into the returned future. This
    // avoids capturing `&Request` (axum's `Request` is not `Sync`) in the
    // future's state, keeping it `Send`. Behavior is identical to calling the
    // predicate directly.
    fn authorize<'a, 'b, 'c, 'async_trait>(
        &'a self,
        user: &'b User,
        request: &'c Request,
    ) -> Pin<Box<dyn Future<Output = Result<bool, ApiError>> + Send + 'async_trait>>
    where
        'a: 'async_trait,
        'b: 'async_trait,
        'c: 'async_trait,
        Self: 'async_trait,
    {
        let result = (self.predicate)(user, request);
        Box::pin(async move { result })
    }
}

/// At least one of `filters` must authorize
pub fn any_of(filters: Vec<Arc<dyn AuthorizationFilter>>) -> CompositeFilter {
    CompositeFilter::new(filters, true)
}

/// Every one of `filters` must authorize
pub fn all_of(filters: Vec<Arc<dyn AuthorizationFilter>>) -> CompositeFilter {
    CompositeFilter::new(filters, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use chrono::Utc;
    use uuid::Uuid;

    fn user_with_role(role: UserRole) -> User {
        let now = Utc::now();
        User {
            user_id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "user@example.com".to_string(),
            phone: "5550100200".to_string(),
            role,
            hashed_password: "irrelevant".to_string(),
            restaurant_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    fn request() -> Request {
        Request::new(Body::empty())
    }

    #[tokio::test]
    async fn role_filter_match_any() {
        let filter = RoleFilter::any_of(vec![UserRole::Staff, UserRole::Admin]);
        let staff = user_with_role(UserRole::Staff);
        let owner = user_with_role(UserRole::Owner);

        assert!(filter.authorize(&staff, &request()).await.unwrap());
        assert!(!filter.authorize(&owner, &request()).await.unwrap());
    }

    #[tokio::test]
    async fn role_filter_match_all_cannot_pass_with_single_role() {
        // A single-role principal cannot satisfy an "all" filter of size two
        let filter = RoleFilter::all_of(vec![UserRole::Staff, UserRole::Admin]);
        let staff = user_with_role(UserRole::Staff);

        assert!(!filter.authorize(&staff, &request()).await.unwrap());
    }

    #[tokio::test]
    async fn role_filter_match_all_of_one() {
        let filter = RoleFilter::all_of(vec![UserRole::Staff]);
        let staff = user_with_role(UserRole::Staff);

        assert!(filter.authorize(&staff, &request()).await.unwrap());
    }

    #[tokio::test]
    async fn permission_filter_uses_role_derived_permissions() {
        let read_and_write = PermissionFilter::all_of(vec!["orders:read", "orders:write"]);
        let metrics_write = PermissionFilter::any_of(vec!["metrics:write"]);

        let staff = user_with_role(UserRole::Staff);
        let admin = user_with_role(UserRole::Admin);

        assert!(read_and_write.authorize(&staff, &request()).await.unwrap());
        assert!(!metrics_write.authorize(&staff, &request()).await.unwrap());
        assert!(metrics_write.authorize(&admin, &request()).await.unwrap());
    }

    #[tokio::test]
    async fn composite_or_passes_when_one_child_passes() {
        let filter = any_of(vec![
            Arc::new(RoleFilter::any_of(vec![UserRole::Admin])),
            Arc::new(RoleFilter::any_of(vec![UserRole::Owner])),
        ]);
        let owner = user_with_role(UserRole::Owner);

        assert!(filter.authorize(&owner, &request()).await.unwrap());
    }

    #[tokio::test]
    async fn composite_and_requires_every_child() {
        let filter = all_of(vec![
            Arc::new(RoleFilter::any_of(vec![UserRole::Admin])),
            Arc::new(RoleFilter::any_of(vec![UserRole::Owner])),
        ]);
        let owner = user_with_role(UserRole::Owner);

        assert!(!filter.authorize(&owner, &request()).await.unwrap());
    }

    #[tokio::test]
    async fn composite_trees_nest() {
        // (Admin OR Owner) AND orders:read
        let filter = all_of(vec![
            Arc::new(any_of(vec![
                Arc::new(RoleFilter::any_of(vec![UserRole::Admin])),
                Arc::new(RoleFilter::any_of(vec![UserRole::Owner])),
            ])),
            Arc::new(PermissionFilter::any_of(vec!["orders:read"])),
        ]);

        let owner = user_with_role(UserRole::Owner);
        let staff = user_with_role(UserRole::Staff);

        assert!(filter.authorize(&owner, &request()).await.unwrap());
        assert!(!filter.authorize(&staff, &request()).await.unwrap());
    }

    #[tokio::test]
    async fn custom_filter_sees_request_context() {
        let filter = CustomFilter::new(|_user, request| {
            Ok(request.headers().contains_key("x-internal-call"))
        });
        let user = user_with_role(UserRole::Staff);

        let mut with_header = request();
        with_header
            .headers_mut()
            .insert("x-internal-call", "1".parse().unwrap());

        assert!(filter.authorize(&user, &with_header).await.unwrap());
        assert!(!filter.authorize(&user, &request()).await.unwrap());
    }

    #[tokio::test]
    async fn failing_filter_propagates_error_not_authorization() {
        // Fail closed: an erroring child makes the whole tree error
        let filter = any_of(vec![
            Arc::new(RoleFilter::any_of(vec![UserRole::Staff])),
            Arc::new(CustomFilter::new(|_, _| {
                Err(ApiError::internal_server_error("filter backend down"))
            })),
        ]);
        let staff = user_with_role(UserRole::Staff);

        let result = filter.authorize(&staff, &request()).await;
        assert!(result.is_err());
    }
}
