use thiserror::Error;

pub type Result<T> = std::result::Result<T, AtlanError>;

/// Stable identifiers for the failures the SDK raises itself, as opposed to
/// transport failures reported by the tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MissingRequiredUpdateParam,
    MissingRequiredRelationshipParam,
    MissingRequiredCreateParam,
    InvalidQualifiedName,
    NoAdminsProvided,
    RejectedByServer,
    AssetNotFoundByGuid,
    AssetNotFoundByQualifiedName,
    AssetNotTypeRequested,
    AtlanTagNotFoundByName,
    AtlanTagNotFoundById,
    NotFoundOnServer,
}

impl ErrorCode {
    pub fn id(&self) -> &'static str {
        match self {
            Self::MissingRequiredUpdateParam => "ATLAN-SDK-400-001",
            Self::MissingRequiredRelationshipParam => "ATLAN-SDK-400-002",
            Self::MissingRequiredCreateParam => "ATLAN-SDK-400-003",
            Self::InvalidQualifiedName => "ATLAN-SDK-400-004",
            Self::NoAdminsProvided => "ATLAN-SDK-400-005",
            Self::RejectedByServer => "ATLAN-SDK-400-000",
            Self::AssetNotFoundByGuid => "ATLAN-SDK-404-001",
            Self::AssetNotFoundByQualifiedName => "ATLAN-SDK-404-002",
            Self::AssetNotTypeRequested => "ATLAN-SDK-404-003",
            Self::AtlanTagNotFoundByName => "ATLAN-SDK-404-004",
            Self::AtlanTagNotFoundById => "ATLAN-SDK-404-005",
            Self::NotFoundOnServer => "ATLAN-SDK-404-000",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingRequiredUpdateParam
            | Self::MissingRequiredRelationshipParam
            | Self::MissingRequiredCreateParam
            | Self::InvalidQualifiedName
            | Self::NoAdminsProvided
            | Self::RejectedByServer => 400,
            Self::AssetNotFoundByGuid
            | Self::AssetNotFoundByQualifiedName
            | Self::AssetNotTypeRequested
            | Self::AtlanTagNotFoundByName
            | Self::AtlanTagNotFoundById
            | Self::NotFoundOnServer => 404,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Error)]
pub enum AtlanError {
    #[error("invalid request [{code}]: {message}")]
    InvalidRequest { code: ErrorCode, message: String },

    #[error("not found [{code}]: {message}")]
    NotFound { code: ErrorCode, message: String },

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("permission denied: {0}")]
    Permission(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("rate limited: retry after {0} seconds")]
    RateLimited(u64),

    #[error("server error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AtlanError {
    pub fn invalid_request(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
        }
    }

    /// Missing identifying attributes on an updater.
    pub fn missing_update_params(type_name: &str, missing: &[&str]) -> Self {
        Self::invalid_request(
            ErrorCode::MissingRequiredUpdateParam,
            format!(
                "required parameter(s) {} missing when building an updater for {}",
                missing.join(", "),
                type_name
            ),
        )
    }

    pub fn missing_relationship_param(type_name: &str) -> Self {
        Self::invalid_request(
            ErrorCode::MissingRequiredRelationshipParam,
            format!(
                "a reference to {} needs either a GUID or a qualifiedName",
                type_name
            ),
        )
    }

    pub fn missing_create_params(type_name: &str, missing: &[&str]) -> Self {
        Self::invalid_request(
            ErrorCode::MissingRequiredCreateParam,
            format!(
                "required parameter(s) {} missing when creating {}",
                missing.join(", "),
                type_name
            ),
        )
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::InvalidRequest { code, .. } | Self::NotFound { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Transient failures the HTTP layer retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited(_) | Self::Connection(_) | Self::Timeout(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidRequest { code, .. } | Self::NotFound { code, .. } => code.http_status(),
            Self::Authentication(_) => 401,
            Self::Permission(_) => 403,
            Self::Conflict(_) => 409,
            Self::RateLimited(_) => 429,
            Self::Api { status, .. } => *status,
            Self::Connection(_) | Self::Timeout(_) => 503,
            Self::Serialization(_) | Self::Config(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_follows_error_code() {
        let err = AtlanError::missing_update_params("Table", &["qualifiedName"]);
        assert_eq!(err.http_status(), 400);
        let err = AtlanError::not_found(ErrorCode::AssetNotFoundByGuid, "gone");
        assert_eq!(err.http_status(), 404);
    }

    #[test]
    fn http_status_transport_variants() {
        assert_eq!(AtlanError::Authentication("x".into()).http_status(), 401);
        assert_eq!(AtlanError::Permission("x".into()).http_status(), 403);
        assert_eq!(AtlanError::Conflict("x".into()).http_status(), 409);
        assert_eq!(AtlanError::RateLimited(5).http_status(), 429);
        let err = AtlanError::Api {
            status: 502,
            message: "bad gateway".into(),
        };
        assert_eq!(err.http_status(), 502);
    }

    #[test]
    fn display_missing_update_params_lists_fields() {
        let err = AtlanError::missing_update_params("PowerBIColumn", &["qualifiedName", "name"]);
        assert_eq!(
            err.to_string(),
            "invalid request [ATLAN-SDK-400-001]: required parameter(s) qualifiedName, name missing when building an updater for PowerBIColumn"
        );
        assert_eq!(err.code(), Some(ErrorCode::MissingRequiredUpdateParam));
    }

    #[test]
    fn display_rate_limited() {
        assert_eq!(
            AtlanError::RateLimited(30).to_string(),
            "rate limited: retry after 30 seconds"
        );
    }

    #[test]
    fn retryable_only_for_transient_failures() {
        assert!(AtlanError::RateLimited(1).is_retryable());
        assert!(AtlanError::Timeout("slow".into()).is_retryable());
        assert!(AtlanError::Api {
            status: 503,
            message: String::new()
        }
        .is_retryable());
        assert!(!AtlanError::Conflict("dup".into()).is_retryable());
        assert!(!AtlanError::not_found(ErrorCode::NotFoundOnServer, "x").is_retryable());
    }

    #[test]
    fn code_is_absent_for_transport_errors() {
        assert_eq!(AtlanError::Connection("refused".into()).code(), None);
        assert!(AtlanError::not_found(ErrorCode::AssetNotTypeRequested, "x").is_not_found());
    }
}
