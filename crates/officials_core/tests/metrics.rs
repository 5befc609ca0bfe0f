use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use officials_core::db::open_db_in_memory;
use officials_core::{
    AssignmentService, DashboardMetrics, EmploymentStatus, LifecycleService, MetricsService,
    NewInventoryItem, OfficialDraft, OfficialId, SqliteRecordStore, StatusCounts, SystemService,
};
use std::sync::Arc;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

fn store_with(sql: &str) -> Arc<SqliteRecordStore> {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(sql).unwrap();
    Arc::new(SqliteRecordStore::new(conn))
}

async fn create(
    service: &LifecycleService<SqliteRecordStore>,
    name: &str,
    status: EmploymentStatus,
    entry_date: NaiveDate,
) -> OfficialId {
    service
        .create_official(OfficialDraft {
            full_name: name.to_string(),
            age: None,
            document_id: format!("DOC-{name}"),
            position: "Clerk".to_string(),
            profession: String::new(),
            procedure: "Contest".to_string(),
            status: Some(status),
            entry_date: Some(entry_date),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn empty_store_reports_all_zero_metrics() {
    let metrics = MetricsService::new(Arc::new(SqliteRecordStore::open_in_memory().unwrap()));

    let report = metrics.aggregate().await;
    assert!(report.is_ok());
    assert_eq!(report.metrics, DashboardMetrics::default());
}

#[tokio::test]
async fn aggregates_counts_values_statuses_and_upcoming_events() {
    let store = Arc::new(SqliteRecordStore::open_in_memory().unwrap());
    let lifecycle = LifecycleService::new(store.clone());
    let assignments = AssignmentService::new(store.clone());
    let systems = SystemService::new(store.clone());

    // Follow-up on 2024-04-01 falls in the window; later events do not.
    let positioned = create(&lifecycle, "Ana", EmploymentStatus::Positioned, date(2024, 1, 1)).await;
    // Annual evaluation on 2024-04-10 falls in the window.
    let provisional =
        create(&lifecycle, "Ben", EmploymentStatus::Provisional, date(2023, 4, 10)).await;
    create(&lifecycle, "Cai", EmploymentStatus::Inactive, date(2020, 1, 1)).await;

    let system = systems.create_system("Mail", "").await.unwrap();
    assignments.grant_role(positioned, system.id).await.unwrap();
    assignments.grant_role(provisional, system.id).await.unwrap();
    for (official_id, value) in [(positioned, 1200), (positioned, 300), (provisional, 45)] {
        assignments
            .add_inventory_item(NewInventoryItem {
                official_id: Some(official_id),
                description: "Desk".to_string(),
                code: format!("D-{value}"),
                value: Some(value),
            })
            .await
            .unwrap();
    }

    let metrics = MetricsService::new(store.clone());
    let now = at(2024, 3, 20, 12);
    let report = metrics.aggregate_at(now).await;
    assert!(report.error.is_none());
    assert_eq!(
        report.metrics,
        DashboardMetrics {
            officials_count: 3,
            active_roles_count: 2,
            total_inventory_value: 1545,
            status_counts: StatusCounts {
                provisional: 1,
                positioned: 1,
                inactive: 1,
                follow_up: 0,
            },
            upcoming_events: 2,
        }
    );

    let annual = lifecycle
        .list_events(Some(provisional))
        .await
        .unwrap()
        .remove(0);
    lifecycle.complete_event(annual.id, None).await.unwrap();
    let after_completion = metrics.try_aggregate_at(now).await.unwrap();
    assert_eq!(after_completion.upcoming_events, 1);
}

#[tokio::test]
async fn upcoming_window_excludes_both_bounds() {
    let store = Arc::new(SqliteRecordStore::open_in_memory().unwrap());
    let lifecycle = LifecycleService::new(store.clone());
    create(&lifecycle, "Dan", EmploymentStatus::Positioned, date(2024, 1, 1)).await;
    create(&lifecycle, "Eva", EmploymentStatus::Provisional, date(2023, 4, 10)).await;
    let metrics = MetricsService::new(store);

    // Follow-up sits exactly on `now`.
    let on_lower_bound = metrics
        .try_aggregate_at(at(2024, 4, 1, 0))
        .await
        .unwrap();
    assert_eq!(on_lower_bound.upcoming_events, 1);

    // Annual evaluation sits exactly on `now + 30 days`.
    let on_upper_bound = metrics
        .try_aggregate_at(at(2024, 3, 11, 0))
        .await
        .unwrap();
    assert_eq!(on_upper_bound.upcoming_events, 1);
}

#[tokio::test]
async fn events_scheduled_before_now_are_not_upcoming() {
    let store = Arc::new(SqliteRecordStore::open_in_memory().unwrap());
    let lifecycle = LifecycleService::new(store.clone());
    // Follow-up on 2024-04-01 is pending but already past.
    let id = create(&lifecycle, "Gil", EmploymentStatus::Positioned, date(2024, 1, 1)).await;
    let metrics = MetricsService::new(store);

    let report = metrics.aggregate_at(at(2024, 4, 2, 0)).await;
    assert!(report.is_ok());
    assert_eq!(report.metrics.upcoming_events, 0);

    let events = lifecycle.list_events(Some(id)).await.unwrap();
    assert!(events.iter().all(|event| !event.completed));
}

#[tokio::test]
async fn null_values_and_unknown_statuses_are_tolerated() {
    let store = store_with(
        "INSERT INTO officials (id, full_name, document_id, position, procedure, status, entry_date, created_at)
         VALUES ('legacy-1', 'Legacy', 'L-1', 'Clerk', 'Contest', 'RETIRED', '2010-01-01', 0),
                ('legacy-2', 'Legacy Two', 'L-2', 'Clerk', 'Contest', 'FOLLOW_UP', '2010-01-01', 0);
         INSERT INTO inventory (id, official_id, description, code, value, assigned_at)
         VALUES ('i-1', 'legacy-1', 'Chair', 'C-1', NULL, 0),
                ('i-2', 'legacy-2', 'Lamp', 'L-1', 80, 0);",
    );
    let metrics = MetricsService::new(store);

    let report = metrics.aggregate_at(at(2024, 1, 1, 0)).await;
    assert!(report.is_ok());
    assert_eq!(report.metrics.officials_count, 2);
    assert_eq!(report.metrics.total_inventory_value, 80);
    assert_eq!(report.metrics.status_counts.follow_up, 1);
    assert_eq!(report.metrics.status_counts.total(), 1);
}

#[tokio::test]
async fn any_read_failure_zeroes_every_metric() {
    let store = store_with(
        "INSERT INTO officials (id, full_name, document_id, position, procedure, status, entry_date, created_at)
         VALUES ('o-1', 'Fox', 'F-1', 'Clerk', 'Contest', 'POSITIONED', '2024-01-01', 0);
         DROP TABLE official_roles;",
    );
    let metrics = MetricsService::new(store);

    let report = metrics.aggregate_at(at(2024, 1, 1, 0)).await;
    assert_eq!(report.metrics, DashboardMetrics::default());
    assert!(report.error.is_some());
    assert!(!report.is_ok());

    assert!(metrics.try_aggregate_at(at(2024, 1, 1, 0)).await.is_err());
}
