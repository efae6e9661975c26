use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body extractor that also runs `validator` rules.
///
/// Every rejection is a 422: unparseable JSON, a missing `application/json`
/// content type, missing or mistyped fields, and failed validation rules.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection.body_text(), "Rejected request body");
            AppError::InvalidPayload(rejection.body_text())
        })?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Greeting {
        #[validate(length(min = 1))]
        name: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        let ValidatedJson(greeting) =
            ValidatedJson::<Greeting>::from_request(json_request(r#"{"name":"vinyl"}"#), &())
                .await
                .unwrap();
        assert_eq!(greeting.name, "vinyl");
    }

    #[tokio::test]
    async fn missing_field_is_invalid_payload() {
        let err = ValidatedJson::<Greeting>::from_request(json_request("{}"), &())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn rule_violation_is_validation_error() {
        let err = ValidatedJson::<Greeting>::from_request(json_request(r#"{"name":""}"#), &())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn missing_content_type_is_invalid_payload() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"name":"vinyl"}"#))
            .unwrap();
        let err = ValidatedJson::<Greeting>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::InvalidPayload(_)));
    }
}
