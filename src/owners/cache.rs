//! Run-scoped owner cache
//!
//! Many exported objects usually share the same owner (every pod of a
//! ReplicaSet, for example). The cache keeps each successfully resolved
//! owner for the rest of the run so it is fetched once. Failures are never
//! stored; a later reference to the same owner triggers a fresh lookup.

use super::{OwnerResolver, ResolveError};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::core::DynamicObject;
use std::collections::HashMap;
use std::sync::Arc;

/// Memoized owner lookups keyed by namespace, declared apiVersion and name
#[derive(Debug, Default)]
pub struct OwnerCache {
    owners: HashMap<String, Arc<DynamicObject>>,
}

impl OwnerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the cache key for an owner
    ///
    /// The key uses the apiVersion as declared on the reference, so two
    /// references spelling the version differently are cached separately.
    pub fn key(namespace: &str, api_version: &str, name: &str) -> String {
        format!("{}#{}#{}", namespace, api_version, name)
    }

    /// Return the cached owner, resolving and storing it on a miss
    pub async fn get_or_resolve(
        &mut self,
        resolver: &dyn OwnerResolver,
        owner: &OwnerReference,
        namespace: &str,
    ) -> Result<Arc<DynamicObject>, ResolveError> {
        let key = Self::key(namespace, &owner.api_version, &owner.name);
        if let Some(cached) = self.owners.get(&key) {
            tracing::debug!("Owner cache hit: {}", key);
            return Ok(Arc::clone(cached));
        }

        tracing::debug!("Owner cache miss, resolving: {}", key);
        let resolved = Arc::new(resolver.resolve(owner, namespace).await?);
        self.owners.insert(key, Arc::clone(&resolved));
        Ok(resolved)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owners::MockOwnerResolver;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn reference(api_version: &str, name: &str) -> OwnerReference {
        OwnerReference {
            api_version: api_version.to_string(),
            kind: "ReplicaSet".to_string(),
            name: name.to_string(),
            uid: "old-uid".to_string(),
            ..Default::default()
        }
    }

    fn live(name: &str, uid: &str) -> DynamicObject {
        DynamicObject {
            types: None,
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                uid: Some(uid.to_string()),
                ..Default::default()
            },
            data: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_key_format() {
        assert_eq!(OwnerCache::key("ns1", "apps/v1", "rs-a"), "ns1#apps/v1#rs-a");
        assert_eq!(OwnerCache::key("", "v1", "node-1"), "#v1#node-1");
    }

    #[tokio::test]
    async fn test_hit_skips_resolver() {
        let mut resolver = MockOwnerResolver::new();
        resolver
            .expect_resolve()
            .times(1)
            .returning(|owner, _| Ok(live(&owner.name, "new-uid")));

        let mut cache = OwnerCache::new();
        let first = cache
            .get_or_resolve(&resolver, &reference("apps/v1", "rs-a"), "ns1")
            .await
            .unwrap();
        let second = cache
            .get_or_resolve(&resolver, &reference("apps/v1", "rs-a"), "ns1")
            .await
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.metadata.uid.as_deref(), Some("new-uid"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let mut resolver = MockOwnerResolver::new();
        resolver.expect_resolve().times(2).returning(|owner, ns| {
            Err(ResolveError::NotFound {
                kind: owner.kind.clone(),
                name: owner.name.clone(),
                namespace: ns.to_string(),
            })
        });

        let mut cache = OwnerCache::new();
        for _ in 0..2 {
            let err = cache
                .get_or_resolve(&resolver, &reference("apps/v1", "gone"), "ns1")
                .await
                .unwrap_err();
            assert!(err.is_not_found());
        }
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_key_distinguishes_namespace_and_api_version() {
        let mut resolver = MockOwnerResolver::new();
        resolver
            .expect_resolve()
            .times(3)
            .returning(|owner, _| Ok(live(&owner.name, "uid")));

        let mut cache = OwnerCache::new();
        cache
            .get_or_resolve(&resolver, &reference("apps/v1", "rs-a"), "ns1")
            .await
            .unwrap();
        cache
            .get_or_resolve(&resolver, &reference("apps/v1", "rs-a"), "ns2")
            .await
            .unwrap();
        cache
            .get_or_resolve(&resolver, &reference("extensions/v1beta1", "rs-a"), "ns1")
            .await
            .unwrap();

        assert_eq!(cache.len(), 3);
    }
}
