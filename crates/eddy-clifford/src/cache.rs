//! Read-through cache of bases and product tables.
//!
//! A basis depends only on the generator count and a table only on the
//! signature, so one instance of each is shared by every multivector of that
//! algebra. Each key owns a slot; the first caller to lock an empty slot
//! builds the value while later callers for the same key wait on that slot,
//! and builds for different keys proceed in parallel.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use eddy_core::Result;

use crate::basis::Basis;
use crate::blade::check_max_gen;
use crate::config::EngineConfig;
use crate::product::ProductTable;
use crate::signature::Signature;

type Slot<T> = Arc<Mutex<Option<Arc<T>>>>;

/// Cache of [`Basis`] per generator count and [`ProductTable`] per signature.
///
/// Owned by the caller; there is no process-wide instance.
pub struct AlgebraCache {
    config: EngineConfig,
    bases: Mutex<HashMap<u8, Slot<Basis>>>,
    tables: Mutex<HashMap<String, Slot<ProductTable>>>,
    counters: Mutex<Counters>,
}

#[derive(Default)]
struct Counters {
    hits: u64,
    misses: u64,
}

impl fmt::Debug for AlgebraCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        f.debug_struct("AlgebraCache")
            .field("bases", &stats.bases)
            .field("tables", &stats.tables)
            .field("hits", &stats.hits)
            .field("misses", &stats.misses)
            .finish()
    }
}

impl Default for AlgebraCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AlgebraCache {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Cache whose tables are built with `config`.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            bases: Mutex::new(HashMap::new()),
            tables: Mutex::new(HashMap::new()),
            counters: Mutex::new(Counters::default()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Basis for `n` generators, built on first request.
    pub fn basis(&self, n: u8) -> Result<Arc<Basis>> {
        check_max_gen(n)?;
        let slot = self.bases.lock().entry(n).or_default().clone();

        let mut guard = slot.lock();
        if let Some(basis) = guard.as_ref() {
            self.record(true);
            tracing::trace!("basis cache hit: {} generators", n);
            return Ok(basis.clone());
        }

        let basis = Arc::new(Basis::new(n)?);
        *guard = Some(basis.clone());
        self.record(false);
        Ok(basis)
    }

    /// Product table for `signature`, built on first request.
    pub fn product(&self, signature: &str) -> Result<Arc<ProductTable>> {
        let signature = Signature::parse(signature)?;
        let slot = self
            .tables
            .lock()
            .entry(signature.as_str().to_string())
            .or_default()
            .clone();

        let mut guard = slot.lock();
        if let Some(table) = guard.as_ref() {
            self.record(true);
            tracing::trace!("product table cache hit: {:?}", signature.as_str());
            return Ok(table.clone());
        }

        let basis = self.basis(signature.generator_count())?;
        let table = Arc::new(ProductTable::build(signature, basis, &self.config)?);
        *guard = Some(table.clone());
        self.record(false);
        Ok(table)
    }

    fn record(&self, hit: bool) {
        let mut counters = self.counters.lock();
        if hit {
            counters.hits += 1;
        } else {
            counters.misses += 1;
        }
    }

    /// Drop every cached basis and table. Outstanding `Arc`s stay valid.
    pub fn clear(&self) {
        self.bases.lock().clear();
        self.tables.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        let counters = self.counters.lock();
        let total = counters.hits + counters.misses;
        CacheStats {
            bases: self.bases.lock().len(),
            tables: self.tables.lock().len(),
            hits: counters.hits,
            misses: counters.misses,
            hit_rate: if total > 0 { counters.hits as f64 / total as f64 } else { 0.0 },
        }
    }
}

/// Cache statistics for monitoring.
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub bases: usize,
    pub tables: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AlgebraCache: {} bases, {} tables, hit rate {:.1}% ({} hits, {} misses)",
            self.bases,
            self.tables,
            self.hit_rate * 100.0,
            self.hits,
            self.misses,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_is_shared() {
        let cache = AlgebraCache::new();
        let a = cache.basis(4).unwrap();
        let b = cache.basis(4).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let stats = cache.stats();
        assert_eq!(stats.bases, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_table_reuses_basis() {
        let cache = AlgebraCache::new();
        let t1 = cache.product("+++").unwrap();
        let t2 = cache.product("-++").unwrap();
        let t3 = cache.product("+++").unwrap();
        assert!(Arc::ptr_eq(&t1, &t3));
        assert!(!Arc::ptr_eq(&t1, &t2));
        assert!(Arc::ptr_eq(t1.basis(), t2.basis()));
        assert_eq!(cache.stats().tables, 2);
    }

    #[test]
    fn test_invalid_keys_leave_no_slot() {
        let cache = AlgebraCache::new();
        assert!(cache.basis(15).is_err());
        assert!(cache.product("+?").is_err());
        let stats = cache.stats();
        assert_eq!(stats.bases, 0);
        assert_eq!(stats.tables, 0);
    }

    #[test]
    fn test_concurrent_single_construction() {
        let cache = Arc::new(AlgebraCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || cache.product("++-+").unwrap())
            })
            .collect();
        let tables: Vec<Arc<ProductTable>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for t in &tables[1..] {
            assert!(Arc::ptr_eq(&tables[0], t));
        }
        // one table build plus one basis build
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_clear() {
        let cache = AlgebraCache::new();
        let t = cache.product("++").unwrap();
        cache.clear();
        assert_eq!(cache.stats().tables, 0);
        assert_eq!(t.blade_count(), 4);
        let again = cache.product("++").unwrap();
        assert!(!Arc::ptr_eq(&t, &again));
    }

    #[test]
    fn test_stats_display() {
        let cache = AlgebraCache::new();
        cache.basis(2).unwrap();
        cache.basis(2).unwrap();
        let text = cache.stats().to_string();
        assert!(text.contains("1 bases"));
        assert!(text.contains("50.0%"));
    }
}
