use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
  #[error("Validation error: {0}")]
  ValidationError(String),

  #[error("Not found: {0}")]
  NotFoundError(String),

  #[error("Upstream error ({status}): {message}")]
  UpstreamError { status: u16, message: String },

  #[error("Upstream timeout: {0}")]
  UpstreamTimeout(String),

  #[error("Request timed out")]
  RequestTimeout,

  #[error("Config error: {0}")]
  ConfigError(String),

  #[error("Internal server error: {0}")]
  InternalError(String),
}

impl AppError {
  pub fn upstream(status: u16, message: impl Into<String>) -> Self {
      Self::UpstreamError {
          status,
          message: message.into(),
      }
  }

  pub fn status_code(&self) -> StatusCode {
      match self {
          AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
          AppError::NotFoundError(_) => StatusCode::NOT_FOUND,
          // Rate limiting and missing resources keep their meaning for the caller,
          // anything else from upstream is a bad gateway.
          AppError::UpstreamError { status: 404, .. } => StatusCode::NOT_FOUND,
          AppError::UpstreamError { status: 429, .. } => StatusCode::TOO_MANY_REQUESTS,
          AppError::UpstreamError { .. } => StatusCode::BAD_GATEWAY,
          AppError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
          AppError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
          AppError::ConfigError(_) | AppError::InternalError(_) => {
              StatusCode::INTERNAL_SERVER_ERROR
          }
      }
  }
}

impl From<reqwest::Error> for AppError {
  fn from(err: reqwest::Error) -> Self {
      if err.is_timeout() {
          return Self::UpstreamTimeout(err.to_string());
      }
      match err.status() {
          Some(status) => Self::upstream(status.as_u16(), err.to_string()),
          None => Self::upstream(StatusCode::BAD_GATEWAY.as_u16(), err.to_string()),
      }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
      let status = self.status_code();
      let error_message = match &self {
          AppError::ConfigError(_) => "A configuration error occurred".to_string(),
          AppError::InternalError(err) => {
              format!("An internal server error occurred: {}", err)
          }
          _ => self.to_string(),
      };

      if status.is_server_error() {
          tracing::warn!("{}", self);
      }

      let body = Json(json!({
          "status": "error",
          "message": error_message,
      }));

      (status, body).into_response()
  }
}
