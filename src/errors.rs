//! Error types for dynoprune.
//!
//! `ApiError` classifies a single failed DynamoDB call. `SweepError` is what a
//! sweep run surfaces to the caller: which step failed and why.
//! Service errors are classified from typed `SdkError` variants and error
//! codes, not by parsing debug output.

use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// A classified failure of one DynamoDB API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("connection to DynamoDB failed: {0}")]
    Connection(String),

    #[error("connection to DynamoDB timed out. Check your network or endpoint.")]
    Timeout,

    #[error("{0}")]
    Credentials(String),

    #[error("access denied to DynamoDB: {0}")]
    AccessDenied(String),

    #[error("DynamoDB request rate too high. Try again later.")]
    Throttled,

    #[error("{0}")]
    ResourceNotFound(String),

    #[error("{0}")]
    ResourceInUse(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("DynamoDB request failed: {0}")]
    Service(String),
}

/// Failure of a sweep run.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Credentials or region could not be resolved. Raised before any API call.
    #[error("error loading AWS configuration: {0}")]
    Config(String),

    /// The table enumeration call failed.
    #[error("error listing tables: {0}")]
    List(#[source] ApiError),

    /// A delete call failed. `deleted` holds the tables accepted for deletion
    /// before `table` failed; those are not rolled back.
    #[error(
        "error deleting table '{table}' ({} deleted before the failure: [{}]): {source}",
        .deleted.len(),
        .deleted.join(", ")
    )]
    Delete {
        table: String,
        deleted: Vec<String>,
        #[source]
        source: ApiError,
    },

    /// Tables were still present after the polling budget ran out.
    #[error(
        "tables still exist after {attempts} attempts waiting for deletion: [{}]",
        .remaining.join(", ")
    )]
    DeletionTimeout {
        attempts: u32,
        remaining: Vec<String>,
    },

    /// Writing the report to the output stream failed.
    #[error("error writing output: {0}")]
    Output(#[from] std::io::Error),
}

impl SweepError {
    /// Tables that were accepted for deletion before this error, if any.
    pub fn deleted_tables(&self) -> &[String] {
        match self {
            SweepError::Delete { deleted, .. } => deleted,
            _ => &[],
        }
    }
}

// ========== TYPED ERROR MAPPING ==========

/// Map non-service `SdkError` variants (dispatch failures, timeouts, etc.).
///
/// Returns `Some(ApiError)` for non-service errors, `None` for `ServiceError`.
fn map_outer_sdk_error<E, R>(err: &SdkError<E, R>) -> Option<ApiError>
where
    E: std::fmt::Debug,
    R: std::fmt::Debug,
{
    match err {
        SdkError::DispatchFailure(dispatch) => {
            if dispatch.is_timeout() {
                Some(ApiError::Timeout)
            } else if dispatch.is_io() {
                Some(ApiError::Connection(
                    "I/O error. Check if the endpoint is reachable.".to_string(),
                ))
            } else {
                Some(ApiError::Connection(
                    "check if the endpoint is reachable.".to_string(),
                ))
            }
        }
        SdkError::TimeoutError(_) => Some(ApiError::Timeout),
        SdkError::ConstructionFailure(err) => {
            let msg = format!("{:?}", err);
            if msg.contains("credentials")
                || msg.contains("Credentials")
                || msg.contains("NoCredentialsError")
            {
                Some(ApiError::Credentials(NO_CREDENTIALS.to_string()))
            } else {
                Some(ApiError::Service(format!("failed to build request: {}", msg)))
            }
        }
        SdkError::ResponseError(err) => Some(ApiError::Service(format!(
            "invalid response from DynamoDB: {:?}",
            err
        ))),
        SdkError::ServiceError(_) => None,
        _ => Some(ApiError::Service(format!(
            "unknown error from DynamoDB: {:?}",
            err
        ))),
    }
}

pub(crate) const NO_CREDENTIALS: &str = "No AWS credentials found. Configure credentials via \
    environment variables (AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY), AWS profile, or IAM role.";

/// Map a DynamoDB service error code + message to an `ApiError`.
///
/// `table` is the table the request targeted, used to word not-found and
/// in-use errors.
pub(crate) fn map_dynamodb_code(
    code: Option<&str>,
    message: Option<&str>,
    display: &str,
    table: Option<&str>,
) -> ApiError {
    let Some(code) = code else {
        return ApiError::Service(message.unwrap_or(display).to_string());
    };

    match code {
        "UnrecognizedClientException" => ApiError::Credentials(
            "Invalid AWS credentials. Check your access key and secret.".to_string(),
        ),
        "InvalidSignatureException" | "SignatureDoesNotMatch" => ApiError::Credentials(
            "AWS signature mismatch. Check your secret access key.".to_string(),
        ),
        "ExpiredTokenException" | "ExpiredToken" => ApiError::Credentials(
            "AWS credentials have expired. Refresh your session token.".to_string(),
        ),
        "AccessDeniedException" | "AccessDenied" => ApiError::AccessDenied(
            message.unwrap_or("Check your IAM permissions.").to_string(),
        ),
        "ProvisionedThroughputExceededException"
        | "LimitExceededException"
        | "RequestLimitExceeded"
        | "Throttling"
        | "ThrottlingException" => ApiError::Throttled,
        "ResourceNotFoundException" => ApiError::ResourceNotFound(match table {
            Some(t) => format!("table '{}' not found", t),
            None => "resource not found".to_string(),
        }),
        "ResourceInUseException" => ApiError::ResourceInUse(match table {
            Some(t) => format!("table '{}' is in use (being created, updated or deleted)", t),
            None => "resource in use".to_string(),
        }),
        "ValidationException" => ApiError::Validation(message.unwrap_or(display).to_string()),
        _ => ApiError::Service(message.unwrap_or(display).to_string()),
    }
}

/// Map DynamoDB errors using typed `SdkError` variants.
///
/// For `ServiceError`, uses `ProvideErrorMetadata` to get the error code and
/// message instead of parsing debug strings.
pub fn map_sdk_error<E, R>(err: SdkError<E, R>, table: Option<&str>) -> ApiError
where
    E: ProvideErrorMetadata + std::fmt::Debug + std::fmt::Display,
    R: std::fmt::Debug,
{
    if let Some(api_err) = map_outer_sdk_error(&err) {
        return api_err;
    }

    if let Some(service_err) = err.as_service_error() {
        let meta = ProvideErrorMetadata::meta(service_err);
        let display = service_err.to_string();
        return map_dynamodb_code(meta.code(), meta.message(), &display, table);
    }

    // map_outer_sdk_error handles every non-service variant
    ApiError::Service(format!("unexpected DynamoDB error: {:?}", err))
}
