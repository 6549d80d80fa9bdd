//! 翻译历史集成测试
//!
//! 验证有界追加、新旧排序和跨「重新加载」的持久化行为。

use langos::client::{
    FileStorage, HistoryEntry, HistoryLog, HistoryStatus, MemoryStorage, HISTORY_LIMIT,
};
use langos::locales::Locale;

fn entry(input: &str, status: HistoryStatus) -> HistoryEntry {
    let output = match status {
        HistoryStatus::Success => format!("translated: {}", input),
        HistoryStatus::Error => "Translation timed out.".to_string(),
    };
    HistoryEntry::new(Locale::Es, input, &output, status)
}

/// 追加 N 次后长度为 min(N, 8)，最新记录始终在第 0 位
#[test]
fn test_append_length_is_bounded() {
    let log = HistoryLog::new(MemoryStorage::new());

    for n in 1..=(HISTORY_LIMIT * 2) {
        let input = format!("attempt-{}", n);
        let items = log.append(entry(&input, HistoryStatus::Success));

        assert_eq!(items.len(), usize::min(n, HISTORY_LIMIT));
        assert_eq!(items[0].input, input);
    }
}

/// 追加后重新加载（模拟页面刷新），首条与追加的记录一致
#[test]
fn test_reload_round_trip() {
    let dir = tempfile::tempdir().unwrap();

    let appended = {
        let log = HistoryLog::new(FileStorage::new(dir.path()));
        log.append(entry("older", HistoryStatus::Success));
        let items = log.append(entry("newest", HistoryStatus::Success));
        items[0].clone()
    };

    // 新实例指向同一目录，相当于重新打开页面
    let reloaded = HistoryLog::new(FileStorage::new(dir.path()));
    let items = reloaded.load();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0], appended);
    assert_eq!(items[1].input, "older");
}

/// 成功与失败记录交替出现，审计轨迹完整保留
#[test]
fn test_failures_are_recorded_like_successes() {
    let log = HistoryLog::new(MemoryStorage::new());

    log.append(entry("first", HistoryStatus::Success));
    log.append(entry("second", HistoryStatus::Error));
    log.append(entry("third", HistoryStatus::Success));

    let items = log.load();
    assert_eq!(items.len(), 3);
    assert_eq!(items[1].status, HistoryStatus::Error);
    assert_eq!(items[1].output, "Translation timed out.");
}

/// 存储负载使用带版本号的 camelCase JSON 线格式
#[test]
fn test_persisted_wire_format() {
    let dir = tempfile::tempdir().unwrap();
    let log = HistoryLog::new(FileStorage::new(dir.path()));
    log.append(entry("wire check", HistoryStatus::Success));

    let file = dir
        .path()
        .join("langos-translation-history-v1.json");
    let raw = std::fs::read_to_string(file).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(parsed["version"], 1);
    let item = &parsed["items"][0];
    assert_eq!(item["input"], "wire check");
    assert_eq!(item["locale"], "es");
    assert_eq!(item["status"], "success");
    assert!(item["createdAt"].is_string());
    assert!(item["id"].is_string());
}
