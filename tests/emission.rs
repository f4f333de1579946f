use serde_json::json;
use std::time::Duration;

use logsim::generator::fields::HTTP_STATUSES;
use logsim::{Category, EmissionLoop, FileSink, RateStore, Rotation};

/// `IP - USER [TS] "METHOD PATH HTTP/1.1" STATUS BYTES "REF" "UA"`
fn access_status(line: &str) -> Option<u16> {
    let (ip, rest) = line.split_once(" - ")?;
    if ip.split('.').count() != 4 {
        return None;
    }
    let (_, rest) = rest.split_once(" HTTP/1.1\" ")?;
    let status = rest.split(' ').next()?.parse().ok()?;
    rest.ends_with('"').then_some(status)
}

#[tokio::test]
async fn access_only_run_writes_only_access_log() {
    let dir = tempfile::tempdir().unwrap();
    let store = RateStore::new();

    let update = json!({"access": 100});
    let table = store
        .set_rates(update.as_object().unwrap().iter().map(|(k, v)| (k.as_str(), v)))
        .unwrap();
    assert_eq!(table.access.value(), 100);

    let engine = EmissionLoop::new(store.clone(), FileSink::new(dir.path(), Rotation::Never));
    let stats = engine.stats();
    let cancel = engine.cancellation();
    let handle = engine.spawn();

    tokio::time::sleep(Duration::from_secs(2)).await;
    cancel.cancel();
    handle.await.unwrap();

    let content = std::fs::read_to_string(dir.path().join("access.log")).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert!(lines.len() >= 15, "only {} access lines", lines.len());
    for line in &lines {
        let status = access_status(line).unwrap_or_else(|| panic!("bad access line: {line}"));
        assert!(HTTP_STATUSES.contains(&status));
    }

    for other in ["system.log", "error.log", "application.log"] {
        assert!(!dir.path().join(other).exists(), "{other} should not exist");
    }
    assert_eq!(stats.emitted(Category::Access), lines.len() as u64);
    assert_eq!(stats.failed(Category::Access), 0);
}

#[tokio::test]
async fn tagged_categories_share_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let store = RateStore::new();
    let update = json!({"system": 100, "error": 100, "application": 100});
    store
        .set_rates(update.as_object().unwrap().iter().map(|(k, v)| (k.as_str(), v)))
        .unwrap();

    let engine = EmissionLoop::new(store, FileSink::new(dir.path(), Rotation::Never))
        .with_idle_interval(Duration::from_millis(20));
    let cancel = engine.cancellation();
    let handle = engine.spawn();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    cancel.cancel();
    handle.await.unwrap();

    for (file, tag) in [
        ("system.log", "[SYSTEM]"),
        ("error.log", "[ERROR]"),
        ("application.log", "[INFO]"),
    ] {
        let content = std::fs::read_to_string(dir.path().join(file)).unwrap();
        assert!(content.lines().count() >= 2, "{file}");
        assert!(content.lines().all(|l| l.contains(tag)), "{file}");
    }
    assert!(!dir.path().join("access.log").exists());
}
