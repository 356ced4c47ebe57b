//! End-to-end tests over the service, the in-memory repositories, and the
//! file-backed preset storage.

use async_trait::async_trait;
use chrono::Utc;

use stockroom_catalog::{LocationStock, Product, WarehouseLocation};
use stockroom_core::{DomainError, LocationCode, ProductId};
use stockroom_filters::{
    FilterConfig, MovementFilter, PresetStore, ProductFilter, StateStorage, PRESETS_KEY,
};
use stockroom_ledger::quantity_at;
use stockroom_movements::{MovementStatus, TransferRequest};

use crate::error::{ServiceError, TransportError};
use crate::memory::{
    InMemoryLocationRepository, InMemoryMovementRepository, InMemoryProductRepository,
};
use crate::repository::{Envelope, ProductRepository, QueryParams};
use crate::service::MovementService;
use crate::storage::JsonFileStorage;

type TestService =
    MovementService<InMemoryProductRepository, InMemoryLocationRepository, InMemoryMovementRepository>;

fn code(c: &str) -> LocationCode {
    LocationCode::new(c)
}

fn test_product(id: ProductId, stock: i64, entries: &[(&str, i64)]) -> Product {
    Product {
        id,
        sku: "SKU-1".to_string(),
        name: "Boxed widget".to_string(),
        stock,
        min_stock: 2,
        reserved_stock: 0,
        available_stock: stock,
        location: code("A"),
        location_stock: if entries.is_empty() {
            None
        } else {
            Some(LocationStock::from_entries(
                entries.iter().map(|(c, q)| (code(c), *q)),
            ))
        },
        category: None,
        supplier: None,
        purchase_price: 100,
        sale_price: 250,
        created_at: Utc::now(),
    }
}

fn test_locations() -> Vec<WarehouseLocation> {
    vec![
        WarehouseLocation::new("A", "Rack A", 100),
        WarehouseLocation::new("B", "Rack B", 100),
        WarehouseLocation::new("C", "Rack C", 100),
    ]
}

/// Service over a single product holding 10 units at A, plus repo handles.
async fn seeded_service() -> (TestService, ProductId, InMemoryMovementRepository) {
    let product_id = ProductId::new();
    let movements = InMemoryMovementRepository::default();
    let mut service = MovementService::new(
        InMemoryProductRepository::new(vec![test_product(product_id, 10, &[("A", 10)])]),
        InMemoryLocationRepository::new(test_locations()),
        movements.clone(),
    );
    service.load_all().await.unwrap();
    (service, product_id, movements)
}

fn draft_request(product_id: ProductId, quantity: i64, batch: &str) -> TransferRequest {
    TransferRequest {
        product_id,
        quantity,
        from_location: code("A"),
        to_location: code("B"),
        batch_number: Some(batch.to_string()),
        notes: String::new(),
        initial_status: MovementStatus::Draft,
    }
}

fn stock_at(service: &TestService, product_id: &ProductId, location: &str) -> u64 {
    let product = service.snapshot().product(product_id).unwrap();
    quantity_at(product, &code(location))
}

fn total_stock(service: &TestService, product_id: &ProductId) -> u64 {
    let product = service.snapshot().product(product_id).unwrap();
    match &product.location_stock {
        Some(stock) => stock.total(),
        None => product.stock.max(0) as u64,
    }
}

#[tokio::test]
async fn draft_transfer_is_ledger_neutral_until_completion() {
    let (mut service, product_id, movements) = seeded_service().await;

    service
        .create_transfer(draft_request(product_id, 3, "TRF-1"), None)
        .await
        .unwrap();

    // Nothing applied yet.
    assert_eq!(stock_at(&service, &product_id, "A"), 10);
    assert_eq!(stock_at(&service, &product_id, "B"), 0);

    let completed = service.complete_batch("TRF-1").await.unwrap();
    assert_eq!(completed, 1);

    assert_eq!(stock_at(&service, &product_id, "A"), 7);
    assert_eq!(stock_at(&service, &product_id, "B"), 3);
    assert_eq!(total_stock(&service, &product_id), 10);

    // Both sides agree on the terminal status.
    assert!(service
        .snapshot()
        .movements()
        .iter()
        .all(|m| m.status == MovementStatus::Completed));
    assert!(movements
        .records()
        .iter()
        .all(|m| m.status == MovementStatus::Completed));
}

#[tokio::test]
async fn completing_a_batch_twice_equals_once() {
    let (mut service, product_id, _movements) = seeded_service().await;

    service
        .create_transfer(draft_request(product_id, 3, "TRF-1"), None)
        .await
        .unwrap();

    assert_eq!(service.complete_batch("TRF-1").await.unwrap(), 1);
    let after_first = (
        stock_at(&service, &product_id, "A"),
        stock_at(&service, &product_id, "B"),
    );

    // Re-invocation is a no-op, not an error.
    assert_eq!(service.complete_batch("TRF-1").await.unwrap(), 0);
    let after_second = (
        stock_at(&service, &product_id, "A"),
        stock_at(&service, &product_id, "B"),
    );

    assert_eq!(after_first, after_second);
    assert_eq!(total_stock(&service, &product_id), 10);
}

#[tokio::test]
async fn stock_is_conserved_across_batches() {
    let (mut service, product_id, _movements) = seeded_service().await;

    service
        .create_transfer(draft_request(product_id, 4, "TRF-1"), None)
        .await
        .unwrap();
    service.complete_batch("TRF-1").await.unwrap();

    let mut second = draft_request(product_id, 2, "TRF-2");
    second.from_location = code("B");
    second.to_location = code("C");
    service.create_transfer(second, None).await.unwrap();
    service.complete_batch("TRF-2").await.unwrap();

    assert_eq!(stock_at(&service, &product_id, "A"), 6);
    assert_eq!(stock_at(&service, &product_id, "B"), 2);
    assert_eq!(stock_at(&service, &product_id, "C"), 2);
    assert_eq!(total_stock(&service, &product_id), 10);
}

#[tokio::test]
async fn single_step_transfer_applies_immediately() {
    let (mut service, product_id, _movements) = seeded_service().await;

    let mut request = draft_request(product_id, 5, "TRF-1");
    request.initial_status = MovementStatus::Completed;
    service.create_transfer(request, None).await.unwrap();

    assert_eq!(stock_at(&service, &product_id, "A"), 5);
    assert_eq!(stock_at(&service, &product_id, "B"), 5);
    assert_eq!(total_stock(&service, &product_id), 10);

    let groups = service.grouped_movements();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].status, MovementStatus::Completed);
}

#[tokio::test]
async fn failed_create_leaves_no_phantom_record() {
    let (mut service, product_id, movements) = seeded_service().await;

    movements.fail_next_with("connection reset");
    let err = service
        .create_transfer(draft_request(product_id, 3, "TRF-1"), None)
        .await
        .unwrap_err();

    match err {
        ServiceError::Transport(TransportError { message }) => {
            assert_eq!(message, "connection reset")
        }
        other => panic!("expected Transport, got {other:?}"),
    }

    assert!(service.snapshot().movements().is_empty());
    assert!(movements.records().is_empty());
}

#[tokio::test]
async fn failed_completion_is_fail_closed() {
    let (mut service, product_id, movements) = seeded_service().await;

    service
        .create_transfer(draft_request(product_id, 3, "TRF-1"), None)
        .await
        .unwrap();

    movements.fail_next_with("backend unavailable");
    let err = service.complete_batch("TRF-1").await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport(_)));

    // No local state moved: status still open, stock untouched.
    assert_eq!(
        service.snapshot().movements()[0].status,
        MovementStatus::Draft
    );
    assert_eq!(stock_at(&service, &product_id, "A"), 10);
    assert_eq!(stock_at(&service, &product_id, "B"), 0);

    // The next attempt goes through.
    assert_eq!(service.complete_batch("TRF-1").await.unwrap(), 1);
    assert_eq!(stock_at(&service, &product_id, "B"), 3);
}

#[tokio::test]
async fn deleting_a_draft_never_touches_stock() {
    let (mut service, product_id, _movements) = seeded_service().await;

    let record = service
        .create_transfer(draft_request(product_id, 3, "TRF-1"), None)
        .await
        .unwrap();

    service.delete_record(record.id).await.unwrap();

    assert!(service.snapshot().movements().is_empty());
    assert_eq!(stock_at(&service, &product_id, "A"), 10);
}

#[tokio::test]
async fn deleting_a_completed_record_keeps_its_applied_effect() {
    let (mut service, product_id, _movements) = seeded_service().await;

    let record = service
        .create_transfer(draft_request(product_id, 3, "TRF-1"), None)
        .await
        .unwrap();
    service.complete_batch("TRF-1").await.unwrap();

    service.delete_record(record.id).await.unwrap();

    // The record is gone; its stock effect stays.
    assert!(service.snapshot().movements().is_empty());
    assert_eq!(stock_at(&service, &product_id, "A"), 7);
    assert_eq!(stock_at(&service, &product_id, "B"), 3);
}

#[tokio::test]
async fn edit_batch_merges_items_and_locks_after_completion() {
    let (mut service, product_id, _movements) = seeded_service().await;

    let mut first = draft_request(product_id, 2, "TRF-1");
    first.notes = "top shelf".to_string();
    service.create_transfer(first, None).await.unwrap();

    let mut second = draft_request(product_id, 3, "TRF-1");
    second.notes = "bottom shelf".to_string();
    service.create_transfer(second, None).await.unwrap();

    let items = service.edit_batch("TRF-1").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 5);
    assert_eq!(items[0].notes, "top shelf; bottom shelf");

    service.complete_batch("TRF-1").await.unwrap();
    let err = service.edit_batch("TRF-1").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::InvariantViolation(_))
    ));
}

#[tokio::test]
async fn create_transfer_validation_rejects_before_any_repository_call() {
    let (mut service, product_id, movements) = seeded_service().await;

    let unknown_location = TransferRequest {
        to_location: code("Z"),
        ..draft_request(product_id, 3, "TRF-1")
    };
    let insufficient = draft_request(product_id, 25, "TRF-1");
    let unknown_product = draft_request(ProductId::new(), 1, "TRF-1");
    let same_location = TransferRequest {
        to_location: code("A"),
        ..draft_request(product_id, 3, "TRF-1")
    };

    for request in [unknown_location, insufficient, unknown_product, same_location] {
        let err = service.create_transfer(request, None).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::Validation(_))
        ));
    }

    assert!(movements.records().is_empty());
}

#[tokio::test]
async fn grouped_movements_surface_unfinished_batches_first() {
    let (mut service, product_id, _movements) = seeded_service().await;

    service
        .create_transfer(draft_request(product_id, 1, "DONE"), None)
        .await
        .unwrap();
    service.complete_batch("DONE").await.unwrap();

    service
        .create_transfer(draft_request(product_id, 1, "OPEN"), None)
        .await
        .unwrap();

    let groups = service.grouped_movements();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key, "OPEN");
    assert_eq!(groups[0].status, MovementStatus::Draft);
    assert_eq!(groups[1].key, "DONE");
    assert_eq!(groups[1].status, MovementStatus::Completed);
}

#[tokio::test]
async fn default_source_prefills_the_largest_holding() {
    let product_id = ProductId::new();
    let mut service = MovementService::new(
        InMemoryProductRepository::new(vec![test_product(product_id, 7, &[("A", 2), ("B", 5)])]),
        InMemoryLocationRepository::new(test_locations()),
        InMemoryMovementRepository::default(),
    );
    service.load_all().await.unwrap();

    assert_eq!(service.default_source(&product_id), Some(code("B")));
}

#[tokio::test]
async fn amend_notes_stays_open_after_completion() {
    let (mut service, product_id, movements) = seeded_service().await;

    let record = service
        .create_transfer(draft_request(product_id, 3, "TRF-1"), None)
        .await
        .unwrap();
    service.complete_batch("TRF-1").await.unwrap();

    let updated = service
        .amend_notes(record.id, "counted during audit")
        .await
        .unwrap();
    assert_eq!(updated.notes, "counted during audit");
    assert_eq!(
        service.snapshot().movement(&record.id).unwrap().notes,
        "counted during audit"
    );
    assert_eq!(movements.records()[0].notes, "counted during audit");
}

/// Repository whose envelope reports failure despite transport success.
struct RejectingProductRepository;

#[async_trait]
impl ProductRepository for RejectingProductRepository {
    async fn get_all(
        &self,
        _params: &QueryParams,
    ) -> Result<Envelope<Vec<Product>>, TransportError> {
        Ok(Envelope {
            success: false,
            data: Vec::new(),
            pagination: None,
        })
    }

    async fn get_categories(
        &self,
    ) -> Result<Envelope<Vec<stockroom_catalog::NamedRef>>, TransportError> {
        Ok(Envelope {
            success: false,
            data: Vec::new(),
            pagination: None,
        })
    }
}

#[tokio::test]
async fn store_reported_failure_surfaces_as_transport_error() {
    let mut service = MovementService::new(
        RejectingProductRepository,
        InMemoryLocationRepository::new(test_locations()),
        InMemoryMovementRepository::default(),
    );

    let err = service.load_products().await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport(_)));
    assert!(service.snapshot().products().is_empty());
}

#[tokio::test]
async fn preset_store_round_trips_through_file_storage() {
    let dir = std::env::temp_dir().join(format!("stockroom-test-{}", uuid::Uuid::now_v7()));
    let storage = JsonFileStorage::new(dir.clone());

    let mut store = PresetStore::open(storage.clone());
    let saved = store
        .save_preset(
            "expensive laptops",
            FilterConfig::Products(ProductFilter {
                name: "laptop".to_string(),
                ..Default::default()
            }),
        )
        .unwrap();
    store
        .record_search(
            "damaged",
            FilterConfig::Movements(MovementFilter {
                notes: "damaged".to_string(),
                ..Default::default()
            }),
        )
        .unwrap();

    // A fresh store over the same directory sees everything.
    let reopened = PresetStore::open(JsonFileStorage::new(dir.clone()));
    assert_eq!(reopened.presets().len(), 1);
    assert_eq!(reopened.presets()[0].id, saved.id);
    assert_eq!(reopened.recent().len(), 1);
    assert_eq!(reopened.recent()[0].query, "damaged");

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn corrupt_preset_file_degrades_to_empty() {
    let dir = std::env::temp_dir().join(format!("stockroom-test-{}", uuid::Uuid::now_v7()));
    let storage = JsonFileStorage::new(dir.clone());
    storage.write(PRESETS_KEY, "{definitely not json").unwrap();

    let store = PresetStore::open(storage);
    assert!(store.presets().is_empty());

    let _ = std::fs::remove_dir_all(dir);
}
