//! Query parameter types for the project handlers.
//!
//! These never reject a request over a parameter's value. Keys may repeat
//! (`?page=1&page=2`); the first occurrence wins and the rest are ignored.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use crate::error::AppError;

/// Pagination parameters (`?page=&limit=`).
///
/// Kept as raw strings so an unparseable value falls back to its default
/// instead of rejecting the request. See [`estoes_core::pagination`].
#[derive(Debug, Default)]
pub struct PaginationParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Name search parameters (`?name=`). A missing name matches everything.
#[derive(Debug, Default)]
pub struct SearchParams {
    pub name: Option<String>,
}

impl<S> FromRequestParts<S> for PaginationParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pairs = query_pairs(parts, state).await?;
        Ok(Self {
            page: first_value(&pairs, "page"),
            limit: first_value(&pairs, "limit"),
        })
    }
}

impl<S> FromRequestParts<S> for SearchParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pairs = query_pairs(parts, state).await?;
        Ok(Self {
            name: first_value(&pairs, "name"),
        })
    }
}

/// Decode the query string into its key/value pairs, in order.
async fn query_pairs<S>(parts: &mut Parts, state: &S) -> Result<Vec<(String, String)>, AppError>
where
    S: Send + Sync,
{
    let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
        .await
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(pairs)
}

fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn pagination(uri: &str) -> PaginationParams {
        let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        PaginationParams::from_request_parts(&mut parts, &()).await.unwrap()
    }

    async fn search(uri: &str) -> SearchParams {
        let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        SearchParams::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn absent_parameters_are_none() {
        let params = pagination("/projects").await;
        assert_eq!(params.page, None);
        assert_eq!(params.limit, None);
    }

    #[tokio::test]
    async fn repeated_keys_keep_the_first_value() {
        let params = pagination("/projects?page=1&page=2&limit=5&limit=abc").await;
        assert_eq!(params.page.as_deref(), Some("1"));
        assert_eq!(params.limit.as_deref(), Some("5"));
    }

    #[tokio::test]
    async fn unrelated_keys_are_ignored() {
        let params = pagination("/projects?sort=name&limit=3").await;
        assert_eq!(params.page, None);
        assert_eq!(params.limit.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn search_name_is_percent_decoded() {
        let params = search("/projects/search?name=big%20proj&name=other").await;
        assert_eq!(params.name.as_deref(), Some("big proj"));
    }
}
