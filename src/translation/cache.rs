//! 翻译结果缓存
//!
//! 进程级共享缓存，键为（源语言、目标语言、源文本）三元组。
//! 带容量上限（LRU 淘汰）和 TTL，长时间运行的服务内存有界。

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::locales::Locale;

// ============================================================================
// 核心类型
// ============================================================================

/// 生成缓存键
///
/// 分隔符 `->` 与 `::` 不会出现在语言代码中，因此不同的三元组
/// 不会产生相同的键。
pub fn cache_key(source: Locale, target: Locale, text: &str) -> String {
    format!("{}->{}::{}", source.code(), target.code(), text)
}

/// 缓存条目
#[derive(Debug, Clone)]
struct CacheEntry {
    translated_text: String,
    created_at: Instant,
    last_accessed: Instant,
    access_count: u64,
}

impl CacheEntry {
    fn new(translated_text: String) -> Self {
        let now = Instant::now();
        Self {
            translated_text,
            created_at: now,
            last_accessed: now,
            access_count: 0,
        }
    }

    fn access(&mut self) {
        self.access_count += 1;
        self.last_accessed = Instant::now();
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// 缓存配置
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub max_size: usize,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: 1024,
            ttl: Duration::from_secs(3600),
        }
    }
}

/// 缓存统计信息
#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    pub total_requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub total_entries: usize,
    pub evictions: u64,
}

impl CacheStats {
    /// 计算缓存命中率
    pub fn hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.total_requests as f64
        }
    }
}

/// 翻译缓存
///
/// 内部用 `RwLock` 保护，可在并发请求间共享。put 竞争时
/// 后写覆盖先写，重复的引擎调用只是效率损失，不影响正确性。
pub struct TranslationCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    max_size: usize,
    ttl: Duration,
    stats: Arc<RwLock<CacheStats>>,
}

// ============================================================================
// 实现
// ============================================================================

impl TranslationCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            max_size: config.max_size,
            ttl: config.ttl,
            stats: Arc::new(RwLock::new(CacheStats::default())),
        }
    }

    /// 查询缓存的翻译结果
    ///
    /// 过期条目在读取时惰性删除并计为未命中。
    /// 锁顺序：先 entries 后 stats，与写路径保持一致。
    pub fn get(&self, source: Locale, target: Locale, text: &str) -> Option<String> {
        let key = cache_key(source, target, text);

        let result = {
            let mut entries = self.entries.write().unwrap();

            let expired = entries
                .get(&key)
                .map(|entry| entry.is_expired(self.ttl))
                .unwrap_or(false);
            if expired {
                entries.remove(&key);
            }

            entries.get_mut(&key).map(|entry| {
                entry.access();
                entry.translated_text.clone()
            })
        };

        let mut stats = self.stats.write().unwrap();
        stats.total_requests += 1;
        if result.is_some() {
            stats.cache_hits += 1;
        } else {
            stats.cache_misses += 1;
        }

        result
    }

    /// 写入翻译结果
    ///
    /// 容量满时先淘汰最久未访问的条目。
    pub fn put(&self, source: Locale, target: Locale, text: &str, translated: &str) {
        let key = cache_key(source, target, text);

        let mut entries = self.entries.write().unwrap();
        if !entries.contains_key(&key) && entries.len() >= self.max_size {
            self.evict_lru(&mut entries);
        }
        entries.insert(key, CacheEntry::new(translated.to_string()));

        let mut stats = self.stats.write().unwrap();
        stats.total_entries = entries.len();
    }

    /// 清空缓存
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap();
        entries.clear();

        let mut stats = self.stats.write().unwrap();
        stats.total_entries = 0;
    }

    /// 清理过期条目，返回删除数量
    pub fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().unwrap();
        let initial_size = entries.len();

        let ttl = self.ttl;
        entries.retain(|_, entry| !entry.is_expired(ttl));

        let removed = initial_size - entries.len();

        let mut stats = self.stats.write().unwrap();
        stats.total_entries = entries.len();
        stats.evictions += removed as u64;

        removed
    }

    /// 当前条目数量
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 获取统计信息快照
    pub fn stats(&self) -> CacheStats {
        let total_entries = self.entries.read().unwrap().len();

        let mut result = self.stats.read().unwrap().clone();
        result.total_entries = total_entries;
        result
    }

    /// LRU 淘汰：删除最久未访问的条目
    fn evict_lru(&self, entries: &mut HashMap<String, CacheEntry>) {
        if entries.is_empty() {
            return;
        }

        let oldest_key = entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_accessed)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest_key {
            entries.remove(&key);
            let mut stats = self.stats.write().unwrap();
            stats.evictions += 1;
        }
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_unambiguous() {
        let a = cache_key(Locale::En, Locale::Es, "hello");
        let b = cache_key(Locale::Es, Locale::En, "hello");
        let c = cache_key(Locale::En, Locale::Es, "hello ");
        assert_eq!(a, "en->es::hello");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cache_basic_operations() {
        let cache = TranslationCache::default();

        // 插入和获取
        cache.put(Locale::En, Locale::Es, "hello", "hola");
        assert_eq!(
            cache.get(Locale::En, Locale::Es, "hello"),
            Some("hola".to_string())
        );
        assert_eq!(cache.get(Locale::En, Locale::Es, "world"), None);

        // 方向相反的语言对是不同的键
        assert_eq!(cache.get(Locale::Es, Locale::En, "hello"), None);

        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(Locale::En, Locale::Es, "hello"), None);
    }

    #[test]
    fn test_cache_stats() {
        let cache = TranslationCache::default();

        cache.put(Locale::En, Locale::De, "hello", "hallo");

        cache.get(Locale::En, Locale::De, "hello"); // 命中
        cache.get(Locale::En, Locale::De, "world"); // 未命中

        let stats = cache.stats();
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.cache_misses, 1);
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_cache_expiration() {
        let cache = TranslationCache::new(CacheConfig {
            max_size: 100,
            ttl: Duration::from_millis(1),
        });

        cache.put(Locale::En, Locale::Ar, "hello", "مرحبا");
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(cache.get(Locale::En, Locale::Ar, "hello"), None);
    }

    #[test]
    fn test_lru_eviction() {
        let cache = TranslationCache::new(CacheConfig {
            max_size: 2,
            ttl: Duration::from_secs(3600),
        });

        cache.put(Locale::En, Locale::Es, "one", "uno");
        cache.put(Locale::En, Locale::Es, "two", "dos");
        assert_eq!(cache.len(), 2);

        // 访问第一个，使其成为最近使用的
        cache.get(Locale::En, Locale::Es, "one");

        // 插入第三个，应该淘汰第二个
        cache.put(Locale::En, Locale::Es, "three", "tres");
        assert_eq!(cache.len(), 2);

        assert_eq!(
            cache.get(Locale::En, Locale::Es, "one"),
            Some("uno".to_string())
        );
        assert_eq!(cache.get(Locale::En, Locale::Es, "two"), None);
        assert_eq!(
            cache.get(Locale::En, Locale::Es, "three"),
            Some("tres".to_string())
        );
    }

    #[test]
    fn test_overwrite_existing_key_does_not_evict() {
        let cache = TranslationCache::new(CacheConfig {
            max_size: 2,
            ttl: Duration::from_secs(3600),
        });

        cache.put(Locale::En, Locale::Es, "one", "uno");
        cache.put(Locale::En, Locale::Es, "two", "dos");
        // 覆盖已有键不应触发淘汰
        cache.put(Locale::En, Locale::Es, "one", "UNO");

        assert_eq!(cache.len(), 2);
        assert_eq!(
            cache.get(Locale::En, Locale::Es, "one"),
            Some("UNO".to_string())
        );
        assert_eq!(
            cache.get(Locale::En, Locale::Es, "two"),
            Some("dos".to_string())
        );
    }

    #[test]
    fn test_cleanup_expired() {
        let cache = TranslationCache::new(CacheConfig {
            max_size: 100,
            ttl: Duration::from_millis(1),
        });

        cache.put(Locale::En, Locale::Es, "a", "1");
        cache.put(Locale::En, Locale::Es, "b", "2");
        std::thread::sleep(Duration::from_millis(10));

        let removed = cache.cleanup_expired();
        assert_eq!(removed, 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(TranslationCache::default());
        let mut handles = vec![];

        for i in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(std::thread::spawn(move || {
                let text = format!("text-{}", i);
                cache.put(Locale::En, Locale::Es, &text, "translated");
                assert_eq!(
                    cache.get(Locale::En, Locale::Es, &text),
                    Some("translated".to_string())
                );
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 8);
    }
}
