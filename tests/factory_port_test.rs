use loancalc::domain::calculation::NewCalculation;
use loancalc::domain::loan::compute_loan_summary;
use loancalc::domain::ports::{CalculationStoreBox, CalculationStoreFactory};
use loancalc::infrastructure::in_memory::InMemoryCalculationStore;

fn record(name: &str) -> loancalc::domain::calculation::SavedCalculation {
    let summary = compute_loan_summary(25_000.0, 4.5, 5.0).unwrap();
    NewCalculation::new(name, summary)
        .into_record("alice", chrono::Utc::now())
        .unwrap()
}

#[tokio::test]
async fn test_factory_instantiation() {
    let factory: CalculationStoreFactory =
        Box::new(|| Box::new(InMemoryCalculationStore::new()) as CalculationStoreBox);

    let store = factory();
    let saved = record("Car");

    // Verify it works
    store.store(saved.clone()).await.unwrap();
    let retrieved = store.get("alice", saved.id).await.unwrap().unwrap();
    assert_eq!(retrieved.name, "Car");
}

#[tokio::test]
async fn test_factory_in_task() {
    let factory: CalculationStoreFactory =
        Box::new(|| Box::new(InMemoryCalculationStore::new()) as CalculationStoreBox);

    let handle = tokio::spawn(async move {
        let store = factory();
        let saved = record("Boat");
        store.store(saved.clone()).await.unwrap();
        store.get("alice", saved.id).await.unwrap().unwrap()
    });

    let retrieved = handle.await.unwrap();
    assert_eq!(retrieved.name, "Boat");
}

#[tokio::test]
async fn test_factory_creates_independent_stores() {
    let factory: CalculationStoreFactory =
        Box::new(|| Box::new(InMemoryCalculationStore::new()) as CalculationStoreBox);

    let first = factory();
    let second = factory();
    first.store(record("House")).await.unwrap();

    assert_eq!(first.list("alice").await.unwrap().len(), 1);
    assert!(second.list("alice").await.unwrap().is_empty());
}
