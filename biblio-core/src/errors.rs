//! Structured errors for the routing core.
//!
//! Goals:
//! - consistent status codes + class names across transports
//! - can be carried through `anyhow::Error` (service and handler plumbing)
//! - transport-agnostic (the server crate decides how to serialize)

use std::fmt;

use anyhow::Error as AnyError;

/// A convenience result type for biblio core APIs.
pub type BiblioResult<T> = std::result::Result<T, AnyError>;

/// Status-coded error classes the routing core emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotAuthenticated, // 401
    Forbidden,        // 403
    NotFound,         // 404
    Conflict,         // 409
    Unprocessable,    // 422
    GeneralError,     // 500
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::NotAuthenticated => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Unprocessable => 422,
            ErrorKind::GeneralError => 500,
        }
    }

    /// Error `name` as it appears in client payloads (e.g. "NotFound").
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::NotAuthenticated => "NotAuthenticated",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Unprocessable => "Unprocessable",
            ErrorKind::GeneralError => "GeneralError",
        }
    }

    /// Kebab-cased `className` for client payloads.
    pub fn class_name(&self) -> &'static str {
        match self {
            ErrorKind::NotAuthenticated => "not-authenticated",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not-found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Unprocessable => "unprocessable",
            ErrorKind::GeneralError => "general-error",
        }
    }
}

/// A structured error that can live inside `anyhow::Error`.
///
/// Fields mirror what the transport serializes:
/// - name
/// - message
/// - code (HTTP status)
/// - class_name
/// - data (optional)
/// - errors (optional, field-level details)
#[derive(Debug)]
pub struct BiblioError {
    pub kind: ErrorKind,
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub errors: Option<serde_json::Value>,
    pub source: Option<AnyError>,
}

impl BiblioError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            data: None,
            errors: None,
            source: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_errors(mut self, errors: serde_json::Value) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_source(mut self, source: AnyError) -> Self {
        self.source = Some(source);
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn class_name(&self) -> &'static str {
        self.kind.class_name()
    }

    /// Convert into `anyhow::Error` so it flows through service results.
    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    /// Downcast an `anyhow::Error` to a `BiblioError` if possible.
    pub fn from_anyhow(err: &AnyError) -> Option<&BiblioError> {
        err.downcast_ref::<BiblioError>()
    }

    /// Turn any error into a BiblioError:
    /// - if it is already one, keep it (lossless)
    /// - otherwise wrap as GeneralError
    pub fn normalize(err: AnyError) -> BiblioError {
        match err.downcast::<BiblioError>() {
            Ok(known) => known,
            Err(other) => {
                BiblioError::new(ErrorKind::GeneralError, other.to_string()).with_source(other)
            }
        }
    }

    /// A version safe to return to clients: keeps kind/message/data/errors,
    /// drops the inner `source` (stack and secret details).
    pub fn sanitize_for_client(&self) -> BiblioError {
        BiblioError {
            kind: self.kind,
            message: self.message.clone(),
            data: self.data.clone(),
            errors: self.errors.clone(),
            source: None,
        }
    }

    /// Client payload shape.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;

        let mut base = json!({
            "name": self.name(),
            "message": self.message,
            "code": self.code(),
            "className": self.class_name(),
        });

        if let Some(d) = &self.data {
            base["data"] = d.clone();
        }
        if let Some(e) = &self.errors {
            base["errors"] = e.clone();
        }
        base
    }

    // ---- Generic constructors ----

    pub fn not_authenticated(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotAuthenticated, msg)
    }
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, msg)
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, msg)
    }
    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unprocessable, msg)
    }
    pub fn general_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::GeneralError, msg)
    }

    // ---- Domain constructors (taxonomy of the routing core) ----

    /// Wrong email or password; one message for both halves.
    pub fn invalid_credentials(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotAuthenticated, msg)
    }

    /// Registration collision on an existing tenant identifier.
    pub fn duplicate_tenant(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, msg)
    }

    /// Dispatch or landing-page lookup miss.
    pub fn tenant_not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }
}

impl fmt::Display for BiblioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message)
    }
}

impl std::error::Error for BiblioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Convenience helper for bailing out of a `BiblioResult` function.
#[macro_export]
macro_rules! bail_biblio {
    ($ctor:ident, $msg:expr) => {
        return Err($crate::errors::BiblioError::$ctor($msg).into_anyhow());
    };
    ($ctor:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::errors::BiblioError::$ctor(format!($fmt, $($arg)*)).into_anyhow());
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_status_and_names() {
        assert_eq!(ErrorKind::NotAuthenticated.status_code(), 401);
        assert_eq!(ErrorKind::Conflict.name(), "Conflict");
        assert_eq!(ErrorKind::NotFound.class_name(), "not-found");
    }

    #[test]
    fn normalize_keeps_structured_errors() {
        let err = BiblioError::duplicate_tenant("taken").into_anyhow();
        let back = BiblioError::normalize(err);
        assert_eq!(back.kind, ErrorKind::Conflict);
        assert_eq!(back.message, "taken");
    }

    #[test]
    fn normalize_wraps_plain_errors_as_general() {
        let back = BiblioError::normalize(anyhow::anyhow!("boom"));
        assert_eq!(back.kind, ErrorKind::GeneralError);
        assert_eq!(back.message, "boom");
        assert!(back.source.is_some());
    }

    #[test]
    fn sanitize_drops_source_but_keeps_fields() {
        let err = BiblioError::tenant_not_found("missing")
            .with_errors(serde_json::json!({ "email": ["missing"] }))
            .with_source(anyhow::anyhow!("db offline"));
        let safe = err.sanitize_for_client();
        assert!(safe.source.is_none());
        assert_eq!(safe.to_json()["errors"]["email"][0], "missing");
        assert_eq!(safe.to_json()["code"], 404);
    }

    #[test]
    fn survives_anyhow_context_chains() {
        let err = BiblioError::invalid_credentials("nope").into_anyhow();
        let wrapped = err.context("while logging in");
        let found = wrapped
            .chain()
            .find_map(|e| e.downcast_ref::<BiblioError>())
            .expect("still downcastable");
        assert_eq!(found.code(), 401);
    }
}
