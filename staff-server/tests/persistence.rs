//! Records survive reopening an embedded RocksDB store
//! Run: cargo test -p staff-server --test persistence

use std::time::Duration;

use shared::{EmployeeFilter, EmployeeInput, SalaryValue};
use staff_server::db::repository::EmployeeRepository;
use staff_server::{DatabaseConfig, DbService};

/// RocksDB 的文件锁在旧连接的后台任务退出后才释放，重试直到拿到锁
async fn reopen(config: &DatabaseConfig) -> DbService {
    let mut last_err = None;
    for _ in 0..100 {
        match DbService::connect(config).await {
            Ok(db) => return db,
            Err(e) => {
                last_err = Some(e);
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        }
    }
    panic!("store did not reopen: {last_err:?}");
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: format!("rocksdb://{}", tmp.path().join("staff.db").display()),
        ..DatabaseConfig::in_memory()
    };

    let id = {
        let db = DbService::connect(&config).await.unwrap();
        let repo = EmployeeRepository::new(db.db);
        let created = repo
            .create(EmployeeInput {
                name: Some("Jane".into()),
                department: Some("Sales".into()),
                role: Some("Rep".into()),
                salary: Some(SalaryValue::Number(50000.0)),
                status: None,
            })
            .await
            .unwrap();
        drop(repo);
        created.id
    };

    let db = reopen(&config).await;
    let repo = EmployeeRepository::new(db.db);
    let all = repo.find_all(EmployeeFilter::default()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, id);
    assert_eq!(all[0].name, "Jane");
}
