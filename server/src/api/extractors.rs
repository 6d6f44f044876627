//! Request extractors that reject with the standard error envelope
//!
//! - [`StrainPath`] parses `{id}` into a positive integer
//! - [`QueryMap`] keeps the query string as loose key/value pairs
//! - [`ValidatedQuery`] / [`ValidatedJson`] run `validator` rules after deserializing

use std::collections::{BTreeMap, HashMap};

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::types::ApiError;

/// `{id}` segment of a strain route
#[derive(Debug)]
pub struct StrainPath {
    pub id: i64,
}

impl<S> FromRequestParts<S> for StrainPath
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Path)?;

        raw.trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(|id| Self { id })
            .ok_or(ValidationRejection::InvalidStrainId)
    }
}

/// Why an extractor refused the request; always a 400
#[derive(Debug)]
pub enum ValidationRejection {
    Path(PathRejection),
    InvalidStrainId,
    Query(QueryRejection),
    Json(JsonRejection),
    Validation(ValidationErrors),
}

impl From<ValidationRejection> for ApiError {
    fn from(rejection: ValidationRejection) -> Self {
        match rejection {
            ValidationRejection::Path(r) => ApiError::bad_request("PATH_PARSE_ERROR", r.body_text()),
            ValidationRejection::InvalidStrainId => ApiError::bad_request(
                "INVALID_STRAIN_ID",
                "Invalid strain id: must be a positive integer",
            ),
            ValidationRejection::Query(r) => {
                ApiError::bad_request("QUERY_PARSE_ERROR", r.body_text())
            }
            ValidationRejection::Json(r) => ApiError::bad_request("JSON_PARSE_ERROR", r.body_text()),
            ValidationRejection::Validation(errors) => {
                ApiError::bad_request("VALIDATION_ERROR", describe(&errors))
            }
        }
    }
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// One message per failed rule, ordered by field name
fn describe(errors: &ValidationErrors) -> String {
    let by_field: BTreeMap<_, _> = errors.field_errors().into_iter().collect();
    by_field
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{}: invalid value", field),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn checked<T: Validate>(value: T) -> Result<T, ValidationRejection> {
    value.validate().map_err(ValidationRejection::Validation)?;
    Ok(value)
}

/// Raw query pairs for handlers that normalize values themselves
#[derive(Debug)]
pub struct QueryMap(pub HashMap<String, String>);

impl<S> FromRequestParts<S> for QueryMap
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Query)?;
        Ok(Self(pairs))
    }
}

/// Query string deserialized into `T` and validated
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Query)?;
        checked(value).map(Self)
    }
}

/// JSON body deserialized into `T` and validated
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)?;
        checked(value).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{StatusCode, Uri};
    use serde::Deserialize;
    use validator::ValidationError;

    #[test]
    fn invalid_strain_id_is_bad_request() {
        let err = ApiError::from(ValidationRejection::InvalidStrainId);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "INVALID_STRAIN_ID");
    }

    #[test]
    fn query_rejection_uses_the_envelope_code() {
        #[derive(Debug, Deserialize)]
        struct Page {
            #[allow(dead_code)]
            limit: u32,
        }

        let uri: Uri = "/api/v1/strains?limit=ten".parse().unwrap();
        let rejection = Query::<Page>::try_from_uri(&uri).unwrap_err();
        let err = ApiError::from(ValidationRejection::Query(rejection));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "QUERY_PARSE_ERROR");
    }

    #[tokio::test]
    async fn query_map_keeps_raw_pairs() {
        let request = axum::http::Request::builder()
            .uri("/api/v1/strains?thc_min=15mg&sort_by=price&sort_by=name")
            .body(())
            .unwrap();
        let (mut parts, ()) = request.into_parts();
        let QueryMap(pairs) = QueryMap::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(pairs["thc_min"], "15mg");
        assert!(pairs.contains_key("sort_by"));
    }

    #[test]
    fn validation_messages_are_ordered_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "thc_content",
            ValidationError::new("range").with_message("THC out of range".into()),
        );
        errors.add("price", ValidationError::new("range"));

        assert_eq!(describe(&errors), "price: invalid value; THC out of range");
    }
}
