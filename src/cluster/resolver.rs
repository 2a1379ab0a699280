//! Discovery-backed owner resolver
//!
//! Maps an owner reference's apiVersion and kind to an API resource through
//! the cluster's discovery API, then fetches the named object.

use crate::models::GroupVersion;
use crate::owners::{OwnerResolver, ResolveError};
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::core::{DynamicObject, GroupVersionKind};
use kube::discovery::{ApiCapabilities, ApiResource, Scope, oneshot::pinned_kind};
use kube::{Api, Client};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Resolves owners against a live cluster
///
/// Resource mappings are discovered lazily and kept for the lifetime of the
/// resolver, so each kind costs one discovery request per run.
pub struct KubeOwnerResolver {
    client: Client,
    mappings: Mutex<HashMap<GroupVersionKind, (ApiResource, ApiCapabilities)>>,
}

impl KubeOwnerResolver {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            mappings: Mutex::new(HashMap::new()),
        }
    }

    /// Look up the API resource for a group/version/kind
    async fn mapping(
        &self,
        gvk: &GroupVersionKind,
    ) -> Result<(ApiResource, ApiCapabilities), kube::Error> {
        let mut mappings = self.mappings.lock().await;
        if let Some(mapping) = mappings.get(gvk) {
            return Ok(mapping.clone());
        }

        tracing::debug!("Discovering resource for {}/{}", gvk.api_version(), gvk.kind);
        let mapping = pinned_kind(&self.client, gvk).await?;
        mappings.insert(gvk.clone(), mapping.clone());
        Ok(mapping)
    }

    /// Api handle scoped to the owner's namespace, or cluster-wide
    fn api_for(
        &self,
        resource: &ApiResource,
        capabilities: &ApiCapabilities,
        namespace: &str,
    ) -> Api<DynamicObject> {
        match capabilities.scope {
            Scope::Namespaced if !namespace.is_empty() => {
                Api::namespaced_with(self.client.clone(), namespace, resource)
            }
            _ => Api::all_with(self.client.clone(), resource),
        }
    }
}

#[async_trait]
impl OwnerResolver for KubeOwnerResolver {
    async fn resolve(
        &self,
        owner: &OwnerReference,
        namespace: &str,
    ) -> Result<DynamicObject, ResolveError> {
        let gv: GroupVersion = owner
            .api_version
            .parse()
            .map_err(|_| ResolveError::MalformedGroupVersion(owner.api_version.clone()))?;
        let gvk = GroupVersionKind::gvk(&gv.group, &gv.version, &owner.kind);

        let (resource, capabilities) =
            self.mapping(&gvk)
                .await
                .map_err(|e| ResolveError::MappingNotFound {
                    api_version: owner.api_version.clone(),
                    kind: owner.kind.clone(),
                    source: Box::new(e),
                })?;

        let api = self.api_for(&resource, &capabilities, namespace);
        tracing::debug!(
            "Fetching owner {} {} in namespace {:?}",
            owner.kind,
            owner.name,
            namespace
        );

        match api.get(&owner.name).await {
            Ok(object) => Ok(object),
            Err(kube::Error::Api(ref err)) if err.code == 404 => Err(ResolveError::NotFound {
                kind: owner.kind.clone(),
                name: owner.name.clone(),
                namespace: namespace.to_string(),
            }),
            Err(e) => Err(ResolveError::Fetch {
                kind: owner.kind.clone(),
                name: owner.name.clone(),
                source: Box::new(e),
            }),
        }
    }
}
