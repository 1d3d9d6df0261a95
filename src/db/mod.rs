pub mod pool;
pub mod scope;

pub use scope::{PgScope, PgUnitOfWork, TransactionScope, UnitOfWork};
