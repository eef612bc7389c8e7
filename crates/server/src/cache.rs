//! Explicit response cache for read-heavy catalog endpoints.
//!
//! Replaces the old implicit endpoint-keyed query cache with an explicit
//! service: keys are endpoint + params, and every mutating handler calls
//! [`ResponseCache::invalidate`] with the tags it dirties as a documented
//! side effect. Backed by a bounded `moka` future cache.

use std::time::Duration;

use moka::future::Cache;

use tazabag_core::{BagTemplate, Product, ProductCategory};

use crate::models::StatsSummary;

/// Cache key: endpoint plus its query parameters.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Products {
        category: Option<ProductCategory>,
        available: bool,
    },
    BagTypes,
    Stats,
}

impl CacheKey {
    /// The invalidation tag this key belongs to.
    #[must_use]
    pub const fn tag(&self) -> CacheTag {
        match self {
            Self::Products { .. } => CacheTag::Products,
            Self::BagTypes => CacheTag::BagTypes,
            Self::Stats => CacheTag::Stats,
        }
    }
}

/// Invalidation tag grouping all keys of one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTag {
    Products,
    BagTypes,
    Stats,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Vec<Product>),
    BagTypes(Vec<BagTemplate>),
    Stats(StatsSummary),
}

/// Bounded cache over catalog and stats responses.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Cache<CacheKey, CacheValue>,
}

impl ResponseCache {
    const MAX_ENTRIES: u64 = 64;
    const TTL: Duration = Duration::from_secs(300);

    /// Create the cache with invalidation-closure support enabled.
    #[must_use]
    pub fn new() -> Self {
        let inner = Cache::builder()
            .max_capacity(Self::MAX_ENTRIES)
            .time_to_live(Self::TTL)
            .support_invalidation_closures()
            .build();
        Self { inner }
    }

    /// Look up a cached response.
    pub async fn get(&self, key: &CacheKey) -> Option<CacheValue> {
        self.inner.get(key).await
    }

    /// Store a response.
    pub async fn insert(&self, key: CacheKey, value: CacheValue) {
        self.inner.insert(key, value).await;
    }

    /// Drop every entry carrying the given tag.
    ///
    /// Called by mutating handlers after the write commits, so readers
    /// never observe a stale list past the mutation that changed it.
    pub fn invalidate(&self, tag: CacheTag) {
        // Closure support is enabled in `new`; the predicate cannot fail.
        if let Err(e) = self.inner.invalidate_entries_if(move |k, _| k.tag() == tag) {
            tracing::warn!(error = %e, ?tag, "cache invalidation failed");
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn stats() -> StatsSummary {
        StatsSummary {
            total_orders: 3,
            total_revenue: Decimal::new(150_000, 2),
            total_customers: 2,
            total_products: 10,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = ResponseCache::new();
        cache
            .insert(CacheKey::Stats, CacheValue::Stats(stats()))
            .await;

        let hit = cache.get(&CacheKey::Stats).await;
        assert!(matches!(hit, Some(CacheValue::Stats(s)) if s.total_orders == 3));
    }

    #[tokio::test]
    async fn test_invalidate_drops_only_tagged_keys() {
        let cache = ResponseCache::new();
        cache
            .insert(CacheKey::Stats, CacheValue::Stats(stats()))
            .await;
        cache
            .insert(CacheKey::BagTypes, CacheValue::BagTypes(Vec::new()))
            .await;

        cache.invalidate(CacheTag::Stats);
        // moka applies invalidation predicates lazily; run_pending_tasks
        // makes the effect observable immediately.
        cache.inner.run_pending_tasks().await;

        assert!(cache.get(&CacheKey::Stats).await.is_none());
        assert!(cache.get(&CacheKey::BagTypes).await.is_some());
    }

    #[tokio::test]
    async fn test_product_keys_vary_by_params() {
        let cache = ResponseCache::new();
        let all = CacheKey::Products {
            category: None,
            available: false,
        };
        let fruit = CacheKey::Products {
            category: Some(ProductCategory::Fruit),
            available: false,
        };
        cache
            .insert(all.clone(), CacheValue::Products(Vec::new()))
            .await;

        assert!(cache.get(&all).await.is_some());
        assert!(cache.get(&fruit).await.is_none());
    }
}
