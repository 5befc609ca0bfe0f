use officials_core::{init_logging, EmploymentStatus, LifecycleService, SqliteRecordStore};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

fn read_logs(dir: &Path) -> String {
    log::logger().flush();
    let mut contents = String::new();
    for entry in std::fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_file() {
            contents.push_str(&std::fs::read_to_string(path).unwrap());
        }
    }
    contents
}

#[tokio::test]
async fn missing_official_failures_are_logged_with_cause() {
    let dir = tempfile::tempdir().unwrap();
    init_logging("info", dir.path().to_str().unwrap()).unwrap();
    let service = LifecycleService::new(Arc::new(SqliteRecordStore::open_in_memory().unwrap()));
    let missing = Uuid::new_v4();

    assert!(service
        .change_status(missing, EmploymentStatus::Inactive)
        .await
        .is_err());
    assert!(service.delete_official(missing).await.is_err());
    assert!(service.list_for(Some(missing)).await.is_err());

    let logs = read_logs(dir.path());
    for event in ["official_status", "official_delete", "official_list"] {
        let line = logs
            .lines()
            .find(|line| line.contains(&format!("event={event} ")))
            .unwrap_or_else(|| panic!("no {event} record in:\n{logs}"));
        assert!(line.contains("status=error"), "{line}");
        assert!(line.contains(&format!("official_id={missing}")), "{line}");
        assert!(line.contains("official not found"), "{line}");
    }
}
