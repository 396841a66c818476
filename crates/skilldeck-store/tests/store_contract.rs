use skilldeck_store::{CompetencyStore, MemoryStore, StoreError};
use skilldeck_model::{CompetencyDraft, SubItemDraft};

fn draft(code: &str, name: &str, items: &[(&str, bool)]) -> CompetencyDraft {
    CompetencyDraft {
        code: code.to_string(),
        name: name.to_string(),
        sub_items: items
            .iter()
            .map(|(n, v)| SubItemDraft {
                name: (*n).to_string(),
                validated: *v,
            })
            .collect(),
    }
}

#[tokio::test]
async fn create_then_get_by_id_round_trips() {
    let store = MemoryStore::new();
    let created = store
        .create(draft("C1", "Rust basics", &[("ownership", true), ("traits", false)]))
        .await
        .expect("create");

    let fetched = store.get_by_id(created.id.as_str()).await.expect("get");
    assert_eq!(fetched.code.as_str(), "C1");
    assert_eq!(fetched.name.as_str(), "Rust basics");
    assert_eq!(fetched.sub_items.len(), 2);
    assert_eq!(fetched.sub_items[0].name(), "ownership");
    assert!(fetched.sub_items[0].validated());
    assert_eq!(fetched.sub_items[1].name(), "traits");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_all_preserves_insertion_order() {
    let store = MemoryStore::new();
    for code in ["C3", "C1", "C2"] {
        store
            .create(draft(code, &format!("competency {code}"), &[]))
            .await
            .expect("create");
    }
    let all = store.get_all().await.expect("get_all");
    let codes: Vec<&str> = all.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["C3", "C1", "C2"]);
}

#[tokio::test]
async fn duplicate_code_is_rejected_without_a_write() {
    let store = MemoryStore::new();
    store.create(draft("C2", "first", &[])).await.expect("create");

    let err = store
        .create(draft("C2", "second", &[("x", true)]))
        .await
        .expect_err("duplicate must fail");
    assert_eq!(err, StoreError::DuplicateCode("C2".to_string()));

    let all = store.get_all().await.expect("get_all");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name.as_str(), "first");
}

#[tokio::test]
async fn invalid_code_and_empty_names_are_validation_errors() {
    let store = MemoryStore::new();
    assert!(matches!(
        store.create(draft("C9", "out of range", &[])).await,
        Err(StoreError::Validation(_))
    ));
    assert!(matches!(
        store.create(draft("C1", "   ", &[])).await,
        Err(StoreError::Validation(_))
    ));
    assert!(matches!(
        store.create(draft("C1", "ok", &[("", false)])).await,
        Err(StoreError::Validation(_))
    ));
    assert!(store.get_all().await.expect("get_all").is_empty());
}

#[tokio::test]
async fn replace_sub_items_swaps_the_whole_list() {
    let store = MemoryStore::new();
    let created = store
        .create(draft("C4", "replaceable", &[("old", true)]))
        .await
        .expect("create");

    let updated = store
        .replace_sub_items(
            created.id.as_str(),
            vec![
                SubItemDraft {
                    name: "new-a".to_string(),
                    validated: false,
                },
                SubItemDraft {
                    name: "new-b".to_string(),
                    validated: true,
                },
            ],
        )
        .await
        .expect("replace");

    assert_eq!(updated.sub_items.len(), 2);
    assert_eq!(updated.sub_items[0].name(), "new-a");
    assert!(updated.updated_at_ms >= created.updated_at_ms);

    let err = store
        .replace_sub_items("missing-id", vec![])
        .await
        .expect_err("unknown id");
    assert_eq!(err, StoreError::NotFound("missing-id".to_string()));
}

#[tokio::test]
async fn replace_with_invalid_sub_item_leaves_document_untouched() {
    let store = MemoryStore::new();
    let created = store
        .create(draft("C5", "guarded", &[("keep", true)]))
        .await
        .expect("create");

    let err = store
        .replace_sub_items(
            created.id.as_str(),
            vec![SubItemDraft {
                name: "  ".to_string(),
                validated: false,
            }],
        )
        .await
        .expect_err("invalid sub item");
    assert!(matches!(err, StoreError::Validation(_)));

    let fetched = store.get_by_id(created.id.as_str()).await.expect("get");
    assert_eq!(fetched.sub_items.len(), 1);
    assert_eq!(fetched.sub_items[0].name(), "keep");
}

#[tokio::test]
async fn delete_is_idempotent_failure_not_idempotent_success() {
    let store = MemoryStore::new();
    let created = store.create(draft("C6", "doomed", &[])).await.expect("create");

    store.delete(created.id.as_str()).await.expect("first delete");
    let err = store
        .delete(created.id.as_str())
        .await
        .expect_err("second delete must fail");
    assert_eq!(err, StoreError::NotFound(created.id.as_str().to_string()));
}

#[tokio::test]
async fn delete_unknown_id_leaves_store_unchanged() {
    let store = MemoryStore::new();
    store.create(draft("C7", "survivor", &[])).await.expect("create");

    let err = store.delete("no-such-id").await.expect_err("unknown id");
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(store.get_all().await.expect("get_all").len(), 1);
}
