//! Generic client trait for unified database access.

use crate::error::{RepoError, RepoResult};
use tokio_postgres::Row;
use tokio_postgres::types::{ToSql, Type};

/// A trait that unifies database clients and transactions.
///
/// Parameters are passed with their declared PostgreSQL type so the server
/// never has to infer one. Implemented for [`tokio_postgres::Client`] and
/// [`tokio_postgres::Transaction`]; a repository can run inside a transaction
/// by borrowing the transaction instead of the client.
pub trait GenericClient: Send + Sync {
    /// Execute a query with explicitly typed parameters and return all rows.
    fn query_typed(
        &self,
        sql: &str,
        params: &[(&(dyn ToSql + Sync), Type)],
    ) -> impl std::future::Future<Output = RepoResult<Vec<Row>>> + Send;

    /// Execute a statement with explicitly typed parameters and return the
    /// number of affected rows.
    fn execute_typed(
        &self,
        sql: &str,
        params: &[(&(dyn ToSql + Sync), Type)],
    ) -> impl std::future::Future<Output = RepoResult<u64>> + Send;
}

fn split_typed<'a>(
    params: &[(&'a (dyn ToSql + Sync), Type)],
) -> (Vec<Type>, Vec<&'a (dyn ToSql + Sync)>) {
    params.iter().map(|(value, ty)| (ty.clone(), *value)).unzip()
}

impl GenericClient for tokio_postgres::Client {
    async fn query_typed(
        &self,
        sql: &str,
        params: &[(&(dyn ToSql + Sync), Type)],
    ) -> RepoResult<Vec<Row>> {
        tokio_postgres::Client::query_typed(self, sql, params)
            .await
            .map_err(RepoError::from_db_error)
    }

    async fn execute_typed(
        &self,
        sql: &str,
        params: &[(&(dyn ToSql + Sync), Type)],
    ) -> RepoResult<u64> {
        let (types, values) = split_typed(params);
        let stmt = tokio_postgres::Client::prepare_typed(self, sql, &types)
            .await
            .map_err(RepoError::from_db_error)?;
        tokio_postgres::Client::execute(self, &stmt, &values)
            .await
            .map_err(RepoError::from_db_error)
    }
}

impl GenericClient for tokio_postgres::Transaction<'_> {
    async fn query_typed(
        &self,
        sql: &str,
        params: &[(&(dyn ToSql + Sync), Type)],
    ) -> RepoResult<Vec<Row>> {
        tokio_postgres::Transaction::query_typed(self, sql, params)
            .await
            .map_err(RepoError::from_db_error)
    }

    async fn execute_typed(
        &self,
        sql: &str,
        params: &[(&(dyn ToSql + Sync), Type)],
    ) -> RepoResult<u64> {
        let (types, values) = split_typed(params);
        let stmt = tokio_postgres::Transaction::prepare_typed(self, sql, &types)
            .await
            .map_err(RepoError::from_db_error)?;
        tokio_postgres::Transaction::execute(self, &stmt, &values)
            .await
            .map_err(RepoError::from_db_error)
    }
}
