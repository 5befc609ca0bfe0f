use chrono::NaiveDate;
use officials_core::{
    AssignmentService, EmploymentStatus, LifecycleService, OfficialDraft, SqliteRecordStore,
    SystemService, SystemServiceError,
};
use std::sync::Arc;
use uuid::Uuid;

fn service() -> SystemService<SqliteRecordStore> {
    SystemService::new(Arc::new(SqliteRecordStore::open_in_memory().unwrap()))
}

#[tokio::test]
async fn systems_are_listed_by_name() {
    let systems = service();
    systems.create_system("Payroll", "HR").await.unwrap();
    systems.create_system("Archive", "Documents").await.unwrap();
    systems.create_system("Mail", "").await.unwrap();

    let names: Vec<String> = systems
        .list_systems()
        .await
        .unwrap()
        .into_iter()
        .map(|system| system.name)
        .collect();
    assert_eq!(names, vec!["Archive", "Mail", "Payroll"]);
}

#[tokio::test]
async fn create_and_update_require_a_name() {
    let systems = service();
    let err = systems.create_system("  ", "nameless").await.unwrap_err();
    assert!(matches!(err, SystemServiceError::Validation(_)));
    assert!(err.to_string().contains("name"));

    let created = systems.create_system("ERP", "old").await.unwrap();
    let updated = systems
        .update_system(created.id, " ERP Cloud ", "new")
        .await
        .unwrap();
    assert_eq!(updated.name, "ERP Cloud");
    assert_eq!(systems.get_system(created.id).await.unwrap(), updated);

    let blank = systems.update_system(created.id, "", "x").await.unwrap_err();
    assert!(matches!(blank, SystemServiceError::Validation(_)));
}

#[tokio::test]
async fn missing_systems_are_not_found() {
    let systems = service();
    let missing = Uuid::new_v4();

    assert!(matches!(
        systems.get_system(missing).await,
        Err(SystemServiceError::NotFound(id)) if id == missing
    ));
    assert!(matches!(
        systems.update_system(missing, "X", "").await,
        Err(SystemServiceError::NotFound(_))
    ));
    assert!(matches!(
        systems.delete_system(missing).await,
        Err(SystemServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn system_with_role_grants_cannot_be_deleted() {
    let store = Arc::new(SqliteRecordStore::open_in_memory().unwrap());
    let systems = SystemService::new(store.clone());
    let system = systems.create_system("VPN", "").await.unwrap();
    let official_id = LifecycleService::new(store.clone())
        .create_official(OfficialDraft {
            full_name: "Omar".to_string(),
            age: None,
            document_id: "P-9".to_string(),
            position: "Technician".to_string(),
            profession: String::new(),
            procedure: "Transfer".to_string(),
            status: Some(EmploymentStatus::FollowUp),
            entry_date: NaiveDate::from_ymd_opt(2022, 10, 1),
        })
        .await
        .unwrap();
    AssignmentService::new(store.clone())
        .grant_role(official_id, system.id)
        .await
        .unwrap();

    let err = systems.delete_system(system.id).await.unwrap_err();
    assert!(matches!(err, SystemServiceError::Store(_)));
    assert_eq!(systems.list_systems().await.unwrap().len(), 1);
}
