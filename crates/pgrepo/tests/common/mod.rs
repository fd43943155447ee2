#![allow(dead_code)]

use pgrepo::{Entity, GenericClient, RepoResult};
use std::sync::Mutex;
use tokio_postgres::Row;
use tokio_postgres::types::{ToSql, Type};

#[derive(Debug, Clone, Entity)]
pub struct User {
    #[orm(id)]
    pub id: uuid::Uuid,
    pub name: String,
    pub age: i32,
}

/// One statement as the driver would have received it.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub sql: String,
    pub types: Vec<Type>,
    pub values: Vec<String>,
}

/// A client that records statements instead of sending them.
///
/// Queries return no rows; commands report `affected` rows.
#[derive(Debug, Default)]
pub struct RecordingClient {
    pub affected: u64,
    calls: Mutex<Vec<Call>>,
}

impl RecordingClient {
    pub fn affecting(affected: u64) -> Self {
        Self {
            affected,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, sql: &str, params: &[(&(dyn ToSql + Sync), Type)]) {
        self.calls.lock().unwrap().push(Call {
            sql: sql.to_string(),
            types: params.iter().map(|(_, ty)| ty.clone()).collect(),
            values: params.iter().map(|(v, _)| format!("{v:?}")).collect(),
        });
    }
}

impl GenericClient for RecordingClient {
    async fn query_typed(
        &self,
        sql: &str,
        params: &[(&(dyn ToSql + Sync), Type)],
    ) -> RepoResult<Vec<Row>> {
        self.record(sql, params);
        Ok(Vec::new())
    }

    async fn execute_typed(
        &self,
        sql: &str,
        params: &[(&(dyn ToSql + Sync), Type)],
    ) -> RepoResult<u64> {
        self.record(sql, params);
        Ok(self.affected)
    }
}

pub async fn try_connect() -> Option<tokio_postgres::Client> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").ok()?;
    let (client, connection) = tokio_postgres::connect(&database_url, tokio_postgres::NoTls)
        .await
        .expect("Failed to connect to DATABASE_URL with NoTls");
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("tokio-postgres connection error: {e}");
        }
    });
    Some(client)
}
