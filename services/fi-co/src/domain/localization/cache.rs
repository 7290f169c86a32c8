//! 按辖区组合缓存目录

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use cuba_domain_core::{CountryCode, Currency};

use super::{LocalizationManager, VarianceCatalog};

type CatalogKey = (CountryCode, Currency);

/// 进程内目录缓存
///
/// 目录只依赖 (国家, 本位币)，一经构建不再变化
#[derive(Debug, Default)]
pub struct VarianceCatalogCache {
    entries: RwLock<HashMap<CatalogKey, Arc<VarianceCatalog>>>,
}

impl VarianceCatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&self, country: &CountryCode, currency: &Currency) -> Arc<VarianceCatalog> {
        let key = (country.clone(), currency.clone());

        if let Some(catalog) = self
            .entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
        {
            return catalog.clone();
        }

        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries
            .entry(key)
            .or_insert_with(|| Arc::new(VarianceCatalog::build(country, currency)))
            .clone()
    }

    pub fn manager(&self, country: &CountryCode, currency: &Currency) -> LocalizationManager {
        LocalizationManager::from_catalog(self.get_or_build(country, currency))
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::super::tables::REVALUATION;
    use super::*;

    #[test]
    fn test_cache_shares_catalog_per_key() {
        let cache = VarianceCatalogCache::new();
        let de = CountryCode::new("DE").unwrap();
        let eur = Currency::new("EUR").unwrap();

        let first = cache.get_or_build(&de, &eur);
        let second = cache.get_or_build(&de, &eur);
        assert!(Arc::ptr_eq(&first, &second));

        cache.get_or_build(&de, &Currency::new("USD").unwrap());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_manager_reads_cached_catalog() {
        let cache = VarianceCatalogCache::new();
        let us = CountryCode::new("US").unwrap();
        let usd = Currency::new("USD").unwrap();

        let manager = cache.manager(&us, &usd);
        assert!(Arc::ptr_eq(&manager.catalog(), &cache.get_or_build(&us, &usd)));
        assert_eq!(
            manager
                .get_variance_gl_account_mapping()
                .get(REVALUATION)
                .map(String::as_str),
            Some("1410")
        );
        assert_eq!(cache.len(), 1);
    }
}
