//! Kubernetes cluster access
//!
//! Builds the client used to look up live owners and provides the
//! discovery-backed [`OwnerResolver`](crate::owners::OwnerResolver).
//!
//! Uses the default kubeconfig loading strategy unless a context is given:
//! 1. In-cluster config (if running in a pod)
//! 2. KUBECONFIG environment variable
//! 3. ~/.kube/config

mod resolver;

pub use resolver::KubeOwnerResolver;

use kube::config::{InferConfigError, KubeConfigOptions, KubeconfigError};
use kube::{Client, Config};

/// Errors that can occur when connecting to a cluster
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("failed to infer cluster configuration")]
    Infer(#[from] InferConfigError),

    #[error("failed to load kubeconfig")]
    Kubeconfig(#[from] KubeconfigError),

    #[error("failed to create Kubernetes client")]
    Client(#[from] kube::Error),
}

/// Create a Kubernetes client, optionally pinned to a kubeconfig context
pub async fn create_client(context: Option<&str>) -> Result<Client, ConnectError> {
    let config = match context {
        Some(name) => {
            tracing::debug!("Loading kubeconfig context: {}", name);
            let options = KubeConfigOptions {
                context: Some(name.to_string()),
                ..Default::default()
            };
            Config::from_kubeconfig(&options).await?
        }
        None => Config::infer().await?,
    };

    tracing::debug!("Connecting to cluster at {}", config.cluster_url);
    Ok(Client::try_from(config)?)
}
