//! Custom Axum extractors

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;
use srcloc_core::{SymbolName, ValidationError};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
struct NameQuery {
    name: Option<String>,
}

/// Extract and validate `?name=` from the query string
///
/// Rejects before the handler runs, so an invalid name never reaches the
/// locator or the filesystem.
pub struct ValidSymbolName(pub SymbolName);

impl<S> FromRequestParts<S> for ValidSymbolName
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query): Query<NameQuery> = Query::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                ApiError::InvalidName(ValidationError::InvalidFormat {
                    field: "query",
                    reason: "malformed query string",
                })
            })?;

        let name = query.name.ok_or(ValidationError::Empty {
            field: "component name",
        })?;

        Ok(Self(SymbolName::new(&name)?))
    }
}
