//! 翻译历史记录
//!
//! 客户端本地的有界审计日志：每次翻译尝试（无论成败）都追加
//! 一条记录，最新的在最前，超出容量的旧条目被截断。存储后端
//! 通过 `HistoryStorage` 抽象，持久化失败被静默容忍：历史
//! 记录永远不会把存储错误上抛为翻译失败。
//!
//! 读取-修改-写回不加锁，假定单一写入者；多个进程并发追加
//! 可能相互覆盖，这一点明确不在保证范围内。

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::locales::Locale;

/// 存储键，版本号变更时整体作废旧数据
pub const STORAGE_KEY: &str = "langos:translation-history:v1";

/// 历史记录容量
pub const HISTORY_LIMIT: usize = 8;

const HISTORY_VERSION: u64 = 1;

/// 翻译尝试的结果状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    Success,
    Error,
}

/// 一条历史记录
///
/// 失败的尝试也会记录，`output` 存放错误消息本身，
/// 与成功记录同等呈现。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub created_at: String,
    pub locale: Locale,
    pub input: String,
    pub output: String,
    pub status: HistoryStatus,
}

impl HistoryEntry {
    /// 创建一条新记录，id 取随机 UUID，时间为当前 UTC
    pub fn new(locale: Locale, input: &str, output: &str, status: HistoryStatus) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            locale,
            input: input.to_string(),
            output: output.to_string(),
            status,
        }
    }
}

/// 持久化负载，带版本号
#[derive(Debug, Serialize, Deserialize)]
struct StoredHistory {
    version: u64,
    items: Vec<HistoryEntry>,
}

/// 持久化存储边界
///
/// 对应浏览器 localStorage 的最小接口。实现必须静默容忍失败：
/// 配额耗尽、目录不可写等情况既不 panic 也不上抛。
pub trait HistoryStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// 基于文件的存储
///
/// 每个键对应目录下的一个 JSON 文件。所有 I/O 失败都只记录
/// debug 日志后忽略。
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // 冒号在部分文件系统上不可用
        self.dir.join(format!("{}.json", key.replace(':', "-")))
    }
}

impl HistoryStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            tracing::debug!("历史目录创建失败，跳过持久化: {}", e);
            return;
        }
        if let Err(e) = std::fs::write(self.path_for(key), value) {
            tracing::debug!("历史写入失败，跳过持久化: {}", e);
        }
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.path_for(key));
    }
}

/// 内存存储，用于测试和不需要持久化的场景
#[derive(Default)]
pub struct MemoryStorage {
    map: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.map.write().unwrap().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.map.write().unwrap().remove(key);
    }
}

/// 有界的翻译历史日志
pub struct HistoryLog<S: HistoryStorage> {
    storage: S,
}

impl<S: HistoryStorage> HistoryLog<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// 加载当前历史，最新的在最前
    ///
    /// 负载缺失、解析失败或版本不匹配都返回空列表；
    /// 单条反序列化失败的记录被丢弃，其余保留。
    pub fn load(&self) -> Vec<HistoryEntry> {
        let raw = match self.storage.get(STORAGE_KEY) {
            Some(raw) => raw,
            None => return Vec::new(),
        };

        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(_) => return Vec::new(),
        };

        if parsed.get("version").and_then(Value::as_u64) != Some(HISTORY_VERSION) {
            return Vec::new();
        }

        match parsed.get("items").and_then(Value::as_array) {
            Some(items) => items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect(),
            None => Vec::new(),
        }
    }

    /// 保存历史，超出容量的部分被截断
    pub fn save(&self, items: &[HistoryEntry]) {
        let payload = StoredHistory {
            version: HISTORY_VERSION,
            items: items.iter().take(HISTORY_LIMIT).cloned().collect(),
        };

        match serde_json::to_string(&payload) {
            Ok(serialized) => self.storage.set(STORAGE_KEY, &serialized),
            Err(e) => tracing::debug!("历史序列化失败，跳过持久化: {}", e),
        }
    }

    /// 追加一条记录：加载、前插、截断、写回
    ///
    /// 返回追加后的完整历史。
    pub fn append(&self, entry: HistoryEntry) -> Vec<HistoryEntry> {
        let mut items = self.load();
        items.insert(0, entry);
        items.truncate(HISTORY_LIMIT);
        self.save(&items);
        items
    }

    /// 清空历史
    pub fn clear(&self) {
        self.storage.remove(STORAGE_KEY);
    }
}

impl Default for HistoryLog<FileStorage> {
    fn default() -> Self {
        use crate::env::{client, EnvVar};
        let dir = client::HistoryDir::get().unwrap_or_else(|_| ".langos".to_string());
        Self::new(FileStorage::new(dir))
    }
}
