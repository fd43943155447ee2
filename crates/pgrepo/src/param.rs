//! Request arguments and parameter binding.

use crate::error::{RepoError, RepoResult};
use crate::ident::upper_case_first_char;
use crate::value::{DbType, DbValue};

/// Ordered `(name, value)` arguments for one statement execution.
///
/// # Example
///
/// ```ignore
/// use pgrepo::Request;
///
/// let request = Request::new()
///     .with("name", "Alice")
///     .with("id", user_id);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    properties: Vec<(String, DbValue)>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument (chainable).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<DbValue>) -> Self {
        self.push(name, value);
        self
    }

    /// Append an argument.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<DbValue>) -> &mut Self {
        self.properties.push((name.into(), value.into()));
        self
    }

    pub fn properties(&self) -> &[(String, DbValue)] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, DbValue)> {
        self.properties.iter()
    }
}

impl<N: Into<String>, V: Into<DbValue>> FromIterator<(N, V)> for Request {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            properties: iter
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }
}

impl From<Vec<(String, DbValue)>> for Request {
    fn from(properties: Vec<(String, DbValue)>) -> Self {
        Self { properties }
    }
}

/// A value bound under a normalized parameter name.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParam {
    pub value: DbValue,
    pub db_type: DbType,
}

/// Named, typed parameters ready for execution, in request order.
///
/// Names are stored without the `@` marker (`Id`, not `@Id`).
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParams {
    params: Vec<(String, BoundParam)>,
}

impl BoundParams {
    /// Look up a parameter by its normalized name.
    pub fn get(&self, name: &str) -> Option<&BoundParam> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundParam)> {
        self.params.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// An empty request binds to `None`, so a constructed set is never empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Bind request arguments.
///
/// Returns `Ok(None)` when `input` is absent or empty, so "bind nothing" is never
/// confused with "bind an empty set". Each name is normalized with
/// [`upper_case_first_char`] and tagged with its value's [`DbType`].
/// A name that normalizes to one already bound is rejected.
pub fn create_parameters(input: Option<&[(String, DbValue)]>) -> RepoResult<Option<BoundParams>> {
    let Some(input) = input.filter(|i| !i.is_empty()) else {
        return Ok(None);
    };

    let mut params: Vec<(String, BoundParam)> = Vec::with_capacity(input.len());
    for (name, value) in input {
        let name = upper_case_first_char(name)?;
        if params.iter().any(|(n, _)| *n == name) {
            return Err(RepoError::DuplicateParameter(name));
        }
        params.push((
            name,
            BoundParam {
                db_type: value.db_type(),
                value: value.clone(),
            },
        ));
    }

    Ok(Some(BoundParams { params }))
}

impl Request {
    /// Bind this request's arguments (see [`create_parameters`]).
    pub fn bind(&self) -> RepoResult<Option<BoundParams>> {
        create_parameters(Some(self.properties.as_slice()))
    }
}
