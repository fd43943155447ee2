//! Closed parameter value model.
//!
//! A bound parameter is always one of a fixed set of scalar shapes, each with
//! an explicit [`DbType`] tag. NULL carries its own tag so the driver never has
//! to guess a parameter type.

use bytes::BytesMut;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type};
use uuid::Uuid;

/// Coarse database type tag of a bound parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbType {
    Guid,
    Int32,
    Decimal,
    Boolean,
    DateTime,
    /// An instant in UTC, bound as `timestamptz`.
    DateTimeUtc,
    String,
}

impl DbType {
    /// The PostgreSQL type the parameter is declared with when the statement is prepared.
    pub fn pg_type(self) -> Type {
        match self {
            DbType::Guid => Type::UUID,
            DbType::Int32 => Type::INT4,
            DbType::Decimal => Type::NUMERIC,
            DbType::Boolean => Type::BOOL,
            DbType::DateTime => Type::TIMESTAMP,
            DbType::DateTimeUtc => Type::TIMESTAMPTZ,
            DbType::String => Type::TEXT,
        }
    }
}

/// A parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum DbValue {
    Guid(Uuid),
    Integer(i32),
    Decimal(Decimal),
    Boolean(bool),
    Timestamp(NaiveDateTime),
    TimestampUtc(DateTime<Utc>),
    Text(String),
    /// SQL NULL of the given type.
    Null(DbType),
}

impl DbValue {
    /// The type tag this value binds with.
    pub fn db_type(&self) -> DbType {
        match self {
            DbValue::Guid(_) => DbType::Guid,
            DbValue::Integer(_) => DbType::Int32,
            DbValue::Decimal(_) => DbType::Decimal,
            DbValue::Boolean(_) => DbType::Boolean,
            DbValue::Timestamp(_) => DbType::DateTime,
            DbValue::TimestampUtc(_) => DbType::DateTimeUtc,
            DbValue::Text(_) => DbType::String,
            DbValue::Null(ty) => *ty,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DbValue::Null(_))
    }
}

impl ToSql for DbValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            DbValue::Guid(v) => v.to_sql(ty, out),
            DbValue::Integer(v) => v.to_sql(ty, out),
            DbValue::Decimal(v) => v.to_sql(ty, out),
            DbValue::Boolean(v) => v.to_sql(ty, out),
            DbValue::Timestamp(v) => v.to_sql(ty, out),
            DbValue::TimestampUtc(v) => v.to_sql(ty, out),
            DbValue::Text(v) => v.to_sql(ty, out),
            DbValue::Null(_) => Ok(IsNull::Yes),
        }
    }

    fn accepts(ty: &Type) -> bool {
        <Uuid as ToSql>::accepts(ty)
            || <i32 as ToSql>::accepts(ty)
            || <Decimal as ToSql>::accepts(ty)
            || <bool as ToSql>::accepts(ty)
            || <NaiveDateTime as ToSql>::accepts(ty)
            || <DateTime<Utc> as ToSql>::accepts(ty)
            || <String as ToSql>::accepts(ty)
    }

    tokio_postgres::types::to_sql_checked!();
}

/// Conversion of a Rust field value into a [`DbValue`].
///
/// Implemented for the scalar types the value model supports and for `Option`
/// of them, which maps `None` to a NULL of the inner type.
pub trait ToDbValue {
    /// Type tag used for this type, including when it is NULL.
    const DB_TYPE: DbType;

    fn to_db_value(&self) -> DbValue;
}

impl ToDbValue for Uuid {
    const DB_TYPE: DbType = DbType::Guid;

    fn to_db_value(&self) -> DbValue {
        DbValue::Guid(*self)
    }
}

impl ToDbValue for i32 {
    const DB_TYPE: DbType = DbType::Int32;

    fn to_db_value(&self) -> DbValue {
        DbValue::Integer(*self)
    }
}

impl ToDbValue for Decimal {
    const DB_TYPE: DbType = DbType::Decimal;

    fn to_db_value(&self) -> DbValue {
        DbValue::Decimal(*self)
    }
}

impl ToDbValue for bool {
    const DB_TYPE: DbType = DbType::Boolean;

    fn to_db_value(&self) -> DbValue {
        DbValue::Boolean(*self)
    }
}

impl ToDbValue for NaiveDateTime {
    const DB_TYPE: DbType = DbType::DateTime;

    fn to_db_value(&self) -> DbValue {
        DbValue::Timestamp(*self)
    }
}

impl ToDbValue for DateTime<Utc> {
    const DB_TYPE: DbType = DbType::DateTimeUtc;

    fn to_db_value(&self) -> DbValue {
        DbValue::TimestampUtc(*self)
    }
}

impl ToDbValue for String {
    const DB_TYPE: DbType = DbType::String;

    fn to_db_value(&self) -> DbValue {
        DbValue::Text(self.clone())
    }
}

impl ToDbValue for str {
    const DB_TYPE: DbType = DbType::String;

    fn to_db_value(&self) -> DbValue {
        DbValue::Text(self.to_string())
    }
}

impl<T: ToDbValue + ?Sized> ToDbValue for &T {
    const DB_TYPE: DbType = T::DB_TYPE;

    fn to_db_value(&self) -> DbValue {
        (**self).to_db_value()
    }
}

impl<T: ToDbValue> ToDbValue for Option<T> {
    const DB_TYPE: DbType = T::DB_TYPE;

    fn to_db_value(&self) -> DbValue {
        match self {
            Some(v) => v.to_db_value(),
            None => DbValue::Null(T::DB_TYPE),
        }
    }
}

macro_rules! impl_from_for_db_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for DbValue {
                fn from(value: $ty) -> Self {
                    value.to_db_value()
                }
            }
        )*
    };
}

impl_from_for_db_value!(
    Uuid,
    i32,
    Decimal,
    bool,
    NaiveDateTime,
    DateTime<Utc>,
    String,
    &str,
    Option<Uuid>,
    Option<i32>,
    Option<Decimal>,
    Option<bool>,
    Option<NaiveDateTime>,
    Option<DateTime<Utc>>,
    Option<String>,
    Option<&str>,
);
