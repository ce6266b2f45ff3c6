//! Postgres-backed keyset execution.

mod postgres;

pub use postgres::{
    AccessPolicy, AccountOwnership, PostgresKeysetExecutor, Unrestricted, build_select,
};
