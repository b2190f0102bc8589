mod common;

use common::create_test_store;
use stepwise_core::{services::PlanStore, ImportPlan, StudyError};

fn import(title: &str, content_md: &str) -> ImportPlan {
    ImportPlan {
        title: title.to_string(),
        content_md: content_md.to_string(),
    }
}

#[tokio::test]
async fn test_import_list_get_delete() {
    let (_temp_dir, store) = create_test_store().await;

    let first = store
        .import_plan(&import("Fractions", "1. Halves\n2. Thirds"))
        .await
        .expect("Failed to import plan");
    let second = store
        .import_plan(&import("  Decimals  ", "1. Tenths"))
        .await
        .expect("Failed to import plan");
    assert_eq!(second.title, "Decimals");

    let listed = store.list_plans(0).await.unwrap();
    assert_eq!(
        listed.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![second.id, first.id]
    );

    let summaries = store.plan_summaries().await.unwrap();
    assert_eq!(summaries[1].total_steps, 2);

    let fetched = store.get_plan(0, first.id).await.unwrap();
    assert_eq!(fetched.content_md, "1. Halves\n2. Thirds");

    store.delete_plan(first.id).await.unwrap();
    assert!(matches!(
        store.get_plan(0, first.id).await,
        Err(StudyError::PlanNotFound { id }) if id == first.id
    ));
}

#[tokio::test]
async fn test_delete_missing_plan() {
    let (_temp_dir, store) = create_test_store().await;

    let result = store.remove_plan(99).await;

    assert!(matches!(result, Err(StudyError::PlanNotFound { id: 99 })));
}

#[tokio::test]
async fn test_import_rejects_empty_content() {
    let (_temp_dir, store) = create_test_store().await;

    let result = store.import_plan(&import("Empty", "   ")).await;

    assert!(matches!(result, Err(StudyError::InvalidInput { .. })));
    assert!(store.all_plans().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_store_creates_missing_directories() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("dir").join("plans.db");

    let store = stepwise_core::StoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .unwrap();

    assert!(db_path.exists());
    assert_eq!(store.database_path(), db_path.as_path());
}
