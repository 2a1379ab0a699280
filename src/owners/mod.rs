//! Owner resolution
//!
//! Resolves owner references recorded in exported manifests to the live
//! objects currently held by the cluster, and memoizes the results for the
//! duration of a run.

mod cache;

pub use cache::OwnerCache;

use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::core::DynamicObject;

/// Boxed error from the remote access layer
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Classification of a failed owner resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveErrorKind {
    /// The owner does not exist
    NotFound,
    /// Any other per-reference failure
    Other,
    /// The reference itself is unusable and the run must stop
    Fatal,
}

/// Errors resolving an owner reference against the cluster
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("unexpected GroupVersion string: {0}")]
    MalformedGroupVersion(String),

    #[error("no resource mapping for {kind} in {api_version}")]
    MappingNotFound {
        api_version: String,
        kind: String,
        #[source]
        source: BoxError,
    },

    #[error("{kind} {name} not found in namespace {namespace:?}")]
    NotFound {
        kind: String,
        name: String,
        namespace: String,
    },

    #[error("failed to fetch {kind} {name}")]
    Fetch {
        kind: String,
        name: String,
        #[source]
        source: BoxError,
    },
}

impl ResolveError {
    pub fn kind(&self) -> ResolveErrorKind {
        match self {
            ResolveError::MalformedGroupVersion(_) => ResolveErrorKind::Fatal,
            ResolveError::NotFound { .. } => ResolveErrorKind::NotFound,
            ResolveError::MappingNotFound { .. } | ResolveError::Fetch { .. } => {
                ResolveErrorKind::Other
            }
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind() == ResolveErrorKind::Fatal
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ResolveErrorKind::NotFound
    }
}

/// Fetches the live object an owner reference points to
///
/// The lookup is scoped to `namespace`, the namespace of the object that
/// carries the reference (empty for cluster-scoped children).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnerResolver: Send + Sync {
    async fn resolve(
        &self,
        owner: &OwnerReference,
        namespace: &str,
    ) -> Result<DynamicObject, ResolveError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let malformed = ResolveError::MalformedGroupVersion("a/b/c".to_string());
        assert!(malformed.is_fatal());
        assert!(!malformed.is_not_found());

        let not_found = ResolveError::NotFound {
            kind: "ReplicaSet".to_string(),
            name: "rs-a".to_string(),
            namespace: "ns1".to_string(),
        };
        assert_eq!(not_found.kind(), ResolveErrorKind::NotFound);
        assert!(!not_found.is_fatal());

        let mapping = ResolveError::MappingNotFound {
            api_version: "example.com/v1".to_string(),
            kind: "Widget".to_string(),
            source: "no matches".into(),
        };
        assert_eq!(mapping.kind(), ResolveErrorKind::Other);

        let fetch = ResolveError::Fetch {
            kind: "ReplicaSet".to_string(),
            name: "rs-a".to_string(),
            source: "connection refused".into(),
        };
        assert_eq!(fetch.kind(), ResolveErrorKind::Other);
    }

    #[test]
    fn test_error_messages() {
        let err = ResolveError::MalformedGroupVersion("apps/v1/x".to_string());
        assert_eq!(err.to_string(), "unexpected GroupVersion string: apps/v1/x");

        let err = ResolveError::NotFound {
            kind: "ReplicaSet".to_string(),
            name: "rs-a".to_string(),
            namespace: "ns1".to_string(),
        };
        assert_eq!(err.to_string(), "ReplicaSet rs-a not found in namespace \"ns1\"");
    }
}
