mod common;

use anyhow::Result;
use spendbook::domain::Transaction;
use spendbook::storage::TransactionStore;

use common::test_store;

#[tokio::test]
async fn test_insert_and_list_in_insertion_order() -> Result<()> {
    let (store, _temp) = test_store().await?;

    let salary = store
        .insert(&Transaction::new("Salary", 5000000).with_description("June"))
        .await?;
    let rent = store.insert(&Transaction::new("Rent", -1200000)).await?;
    assert!(rent > salary);

    let all = store.list_all().await?;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, salary);
    assert_eq!(all[0].label, "Salary");
    assert_eq!(all[0].description, "June");
    assert_eq!(all[1].id, rent);
    assert_eq!(all[1].amount_cents, -1200000);

    Ok(())
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() -> Result<()> {
    let (store, _temp) = test_store().await?;

    let first = store.insert(&Transaction::new("a", 1)).await?;
    let second = store.insert(&Transaction::new("b", 2)).await?;
    store.delete(second).await?;

    let third = store.insert(&Transaction::new("c", 3)).await?;
    assert!(third > second, "AUTOINCREMENT must not hand out {} again", second);
    assert!(store.get(second).await?.is_none());
    assert!(store.get(first).await?.is_some());

    Ok(())
}

#[tokio::test]
async fn test_insert_with_explicit_id() -> Result<()> {
    let (store, _temp) = test_store().await?;

    let id = store.insert(&Transaction::new("Coffee", -450)).await?;
    store.delete(id).await?;

    // Restoring under the original id
    let restored = store
        .insert(&Transaction::new("Coffee", -450).with_id(id))
        .await?;
    assert_eq!(restored, id);

    // The id is now taken
    let duplicate = store.insert(&Transaction::new("Tea", -200).with_id(id)).await;
    assert!(duplicate.is_err());
    assert_eq!(store.list_all().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_update_replaces_whole_record() -> Result<()> {
    let (store, _temp) = test_store().await?;

    let id = store
        .insert(&Transaction::new("Groceries", -3000).with_description("weekly"))
        .await?;
    let matched = store
        .update(&Transaction::new("Market", -3500).with_id(id))
        .await?;
    assert!(matched);

    let stored = store.get(id).await?.expect("transaction exists");
    assert_eq!(stored.label, "Market");
    assert_eq!(stored.amount_cents, -3500);
    assert_eq!(stored.description, "");

    Ok(())
}

#[tokio::test]
async fn test_update_missing_id_matches_nothing() -> Result<()> {
    let (store, _temp) = test_store().await?;

    let matched = store
        .update(&Transaction::new("Ghost", 100).with_id(404))
        .await?;
    assert!(!matched);
    assert!(store.list_all().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_delete_missing_id_is_noop() -> Result<()> {
    let (store, _temp) = test_store().await?;

    store.insert(&Transaction::new("a", 1)).await?;
    store.delete(999).await?;
    assert_eq!(store.list_all().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_empty_label_rejected_by_schema() -> Result<()> {
    let (store, _temp) = test_store().await?;

    let result = store.insert(&Transaction::new("", 100)).await;
    assert!(result.is_err());

    Ok(())
}

#[tokio::test]
async fn test_init_is_idempotent() -> Result<()> {
    let temp = tempfile::TempDir::new()?;
    let url = format!(
        "sqlite:{}?mode=rwc",
        temp.path().join("ledger.db").to_str().unwrap()
    );

    let store = spendbook::storage::SqliteStore::init(&url).await?;
    store.insert(&Transaction::new("Salary", 100)).await?;
    drop(store);

    let reopened = spendbook::storage::SqliteStore::init(&url).await?;
    assert_eq!(reopened.list_all().await?.len(), 1);

    Ok(())
}
