use async_trait::async_trait;
use futures::future::BoxFuture;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::ApiError;

/// Session/transaction-provider capability. The production implementation
/// hands out real database transactions; tests substitute a spy to observe
/// the lifecycle.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Session: Send;

    async fn begin(&self) -> Result<Self::Session, ApiError>;
    async fn commit(&self, session: Self::Session) -> Result<(), ApiError>;
    async fn rollback(&self, session: Self::Session) -> Result<(), ApiError>;
}

/// Unit of work backed by a Postgres connection pool. Each `begin` checks
/// out one connection and opens one transaction on it; the connection goes
/// back to the pool when the transaction is committed, rolled back, or
/// dropped (a cancelled request can never leak an open session).
#[derive(Clone)]
pub struct PgUnitOfWork {
    pool: PgPool,
}

impl PgUnitOfWork {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    type Session = Transaction<'static, Postgres>;

    async fn begin(&self) -> Result<Self::Session, ApiError> {
        Ok(self.pool.begin().await?)
    }

    async fn commit(&self, session: Self::Session) -> Result<(), ApiError> {
        Ok(session.commit().await?)
    }

    async fn rollback(&self, session: Self::Session) -> Result<(), ApiError> {
        Ok(session.rollback().await?)
    }
}

/// Runs an operation inside exactly one transaction.
///
/// The operation receives the open session as an explicit argument, so a
/// service method can pass the same session through several repository
/// calls and have them commit or roll back as one unit - only the
/// outermost `run` decides.
#[derive(Clone)]
pub struct TransactionScope<U: UnitOfWork> {
    provider: U,
}

/// The scope type used by the application proper
pub type PgScope = TransactionScope<PgUnitOfWork>;

impl PgScope {
    pub fn from_pool(pool: PgPool) -> Self {
        TransactionScope::new(PgUnitOfWork::new(pool))
    }
}

impl<U: UnitOfWork> TransactionScope<U> {
    pub fn new(provider: U) -> Self {
        Self { provider }
    }

    /// Execute `op` in a fresh transaction.
    ///
    /// On `Ok` the transaction is committed and the value returned. On
    /// `Err` the transaction is rolled back and the error propagates
    /// unchanged - repositories classify failures before they reach the
    /// scope, so an already-typed `ApiError` is never re-wrapped here. A
    /// failure during rollback is logged but never replaces the
    /// operation's own error.
    pub async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send,
        F: for<'s> FnOnce(&'s mut U::Session) -> BoxFuture<'s, Result<T, ApiError>> + Send,
    {
        let mut session = self.provider.begin().await?;

        match op(&mut session).await {
            Ok(value) => {
                self.provider.commit(session).await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.provider.rollback(session).await {
                    tracing::error!("Rollback failed after operation error: {}", rollback_err);
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct SpyCounts {
        begun: AtomicUsize,
        committed: AtomicUsize,
        rolled_back: AtomicUsize,
    }

    #[derive(Clone)]
    struct SpyUnitOfWork {
        counts: Arc<SpyCounts>,
    }

    impl SpyUnitOfWork {
        fn new() -> Self {
            Self { counts: Arc::new(SpyCounts::default()) }
        }
    }

    struct SpySession;

    #[async_trait]
    impl UnitOfWork for SpyUnitOfWork {
        type Session = SpySession;

        async fn begin(&self) -> Result<SpySession, ApiError> {
            self.counts.begun.fetch_add(1, Ordering::SeqCst);
            Ok(SpySession)
        }

        async fn commit(&self, _session: SpySession) -> Result<(), ApiError> {
            self.counts.committed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn rollback(&self, _session: SpySession) -> Result<(), ApiError> {
            self.counts.rolled_back.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    async fn first_step(_session: &mut SpySession) -> Result<u32, ApiError> {
        Ok(1)
    }

    async fn second_step(_session: &mut SpySession) -> Result<u32, ApiError> {
        Ok(2)
    }

    #[tokio::test]
    async fn commits_exactly_once_on_success() {
        let spy = SpyUnitOfWork::new();
        let scope = TransactionScope::new(spy.clone());

        let value = scope
            .run(|_session| Box::pin(async { Ok(42u32) }))
            .await
            .unwrap();

        assert_eq!(value, 42);
        assert_eq!(spy.counts.begun.load(Ordering::SeqCst), 1);
        assert_eq!(spy.counts.committed.load(Ordering::SeqCst), 1);
        assert_eq!(spy.counts.rolled_back.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rolls_back_exactly_once_on_failure() {
        let spy = SpyUnitOfWork::new();
        let scope = TransactionScope::new(spy.clone());

        let result: Result<u32, ApiError> = scope
            .run(|_session| Box::pin(async { Err(ApiError::not_found("missing order")) }))
            .await;

        let err = result.unwrap_err();
        assert_eq!(spy.counts.begun.load(Ordering::SeqCst), 1);
        assert_eq!(spy.counts.committed.load(Ordering::SeqCst), 0);
        assert_eq!(spy.counts.rolled_back.load(Ordering::SeqCst), 1);
        // Typed failures propagate unchanged
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "missing order");
    }

    #[tokio::test]
    async fn joined_operations_share_one_transaction() {
        let spy = SpyUnitOfWork::new();
        let scope = TransactionScope::new(spy.clone());

        let total = scope
            .run(|session| {
                Box::pin(async move {
                    let a = first_step(&mut *session).await?;
                    let b = second_step(&mut *session).await?;
                    Ok(a + b)
                })
            })
            .await
            .unwrap();

        assert_eq!(total, 3);
        // Two repository-style calls, still one begin and one commit
        assert_eq!(spy.counts.begun.load(Ordering::SeqCst), 1);
        assert_eq!(spy.counts.committed.load(Ordering::SeqCst), 1);
        assert_eq!(spy.counts.rolled_back.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sequential_scopes_each_get_their_own_transaction() {
        let spy = SpyUnitOfWork::new();
        let scope = TransactionScope::new(spy.clone());

        scope.run(|_s| Box::pin(async { Ok(()) })).await.unwrap();
        scope.run(|_s| Box::pin(async { Ok(()) })).await.unwrap();

        assert_eq!(spy.counts.begun.load(Ordering::SeqCst), 2);
        assert_eq!(spy.counts.committed.load(Ordering::SeqCst), 2);
    }
}
