//! Substitutability tests for the order repository port.
//!
//! The same use-case script is run against the in-memory adapter and a
//! minimal fake; the service must observe identical results on both.

use std::collections::BTreeMap;
use std::sync::Mutex;

use application::{OrderRepository, OrderService, RepositoryError, ServiceError};
use async_trait::async_trait;
use common::OrderId;
use domain::{Money, Order, OrderItem, OrderStatus};
use order_store::InMemoryOrderRepository;

/// Ordered-map fake that also records the calls it receives.
#[derive(Default)]
struct RecordingRepository {
    orders: Mutex<BTreeMap<OrderId, Order>>,
    calls: Mutex<Vec<&'static str>>,
}

impl RecordingRepository {
    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl OrderRepository for RecordingRepository {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        self.record("save");
        self.orders
            .lock()
            .unwrap()
            .insert(order.id().clone(), order.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        self.record("get_by_id");
        Ok(self.orders.lock().unwrap().get(id).cloned())
    }

    async fn delete(&self, id: &OrderId) -> Result<(), RepositoryError> {
        self.record("delete");
        self.orders.lock().unwrap().remove(id);
        Ok(())
    }
}

fn item(name: &str, quantity: u32, price: &str) -> OrderItem {
    OrderItem::new(name, quantity, price.parse::<Money>().unwrap())
}

/// What the service reported at each step of the script.
#[derive(Debug, PartialEq)]
enum Step {
    Created { total: Money, status: OrderStatus },
    Conflict,
    Canceled(bool),
    Completed(Result<bool, String>),
    Loaded(Option<(OrderStatus, usize)>),
}

async fn run_script<R: OrderRepository>(service: &OrderService<R>) -> Vec<Step> {
    let first = OrderId::new("order-1");
    let second = OrderId::new("order-2");
    let mut steps = Vec::new();

    let order = service
        .create_order(
            vec![item("book", 2, "12.5"), item("pen", 3, "1.2")],
            first.clone(),
        )
        .await
        .unwrap();
    steps.push(Step::Created {
        total: order.total().unwrap(),
        status: order.status(),
    });

    match service
        .create_order(vec![item("mug", 1, "4")], first.clone())
        .await
    {
        Err(ServiceError::OrderAlreadyExists(_)) => steps.push(Step::Conflict),
        other => panic!("unexpected create result: {other:?}"),
    }

    service
        .create_order(vec![item("mug", 1, "4")], second.clone())
        .await
        .unwrap();

    steps.push(Step::Canceled(service.cancel_order(&first).await.unwrap()));
    steps.push(Step::Canceled(service.cancel_order(&first).await.unwrap()));
    steps.push(Step::Canceled(
        service
            .cancel_order(&OrderId::new("nonexistent-id"))
            .await
            .unwrap(),
    ));

    for id in [&first, &second] {
        let result = service
            .complete_order(id)
            .await
            .map_err(|e| e.to_string());
        steps.push(Step::Completed(result));
    }

    for id in [&first, &second, &OrderId::new("nonexistent-id")] {
        let loaded = service.get_order(id).await.unwrap();
        steps.push(Step::Loaded(
            loaded.map(|o| (o.status(), o.item_count())),
        ));
    }

    steps
}

#[tokio::test]
async fn service_behaves_identically_on_both_repositories() {
    let in_memory = OrderService::new(InMemoryOrderRepository::new());
    let fake = OrderService::new(RecordingRepository::default());

    let in_memory_steps = run_script(&in_memory).await;
    let fake_steps = run_script(&fake).await;

    assert_eq!(in_memory_steps, fake_steps);
    assert_eq!(
        in_memory_steps[0],
        Step::Created {
            total: "28.6".parse().unwrap(),
            status: OrderStatus::Open,
        }
    );
    assert_eq!(
        &in_memory_steps[2..5],
        &[Step::Canceled(true), Step::Canceled(true), Step::Canceled(false)]
    );
    assert_eq!(in_memory_steps[7], Step::Loaded(Some((OrderStatus::Canceled, 2))));
    assert_eq!(in_memory_steps[8], Step::Loaded(Some((OrderStatus::Completed, 1))));
    assert_eq!(in_memory_steps[9], Step::Loaded(None));
}

#[tokio::test]
async fn service_only_uses_the_port_and_never_deletes() {
    let service = OrderService::new(RecordingRepository::default());
    run_script(&service).await;

    let calls = service.repository().calls();
    assert!(!calls.is_empty());
    assert!(!calls.contains(&"delete"));
}

#[tokio::test]
async fn missing_cancel_leaves_store_empty() {
    let service = OrderService::new(InMemoryOrderRepository::new());

    let ok = service
        .cancel_order(&OrderId::new("nonexistent-id"))
        .await
        .unwrap();

    assert!(!ok);
    assert!(service.repository().is_empty().await);
}

#[tokio::test]
async fn create_then_get_by_id_round_trips() {
    let repo = InMemoryOrderRepository::new();
    let service = OrderService::new(repo.clone());
    let order_id = OrderId::generate();
    let items = vec![item("book", 2, "12.5"), item("pen", 3, "1.2")];

    service
        .create_order(items.clone(), order_id.clone())
        .await
        .unwrap();

    let stored = repo.get_by_id(&order_id).await.unwrap().unwrap();
    assert_eq!(stored.id(), &order_id);
    assert_eq!(stored.items(), items.as_slice());
    assert_eq!(stored.status(), OrderStatus::Open);
}

#[tokio::test]
async fn cancel_is_visible_through_the_repository() {
    let repo = InMemoryOrderRepository::new();
    let service = OrderService::new(repo.clone());
    let order_id = OrderId::generate();
    service
        .create_order(vec![item("book", 1, "10.0")], order_id.clone())
        .await
        .unwrap();

    assert!(service.cancel_order(&order_id).await.unwrap());

    let stored = repo.get_by_id(&order_id).await.unwrap().unwrap();
    assert_eq!(stored.status(), OrderStatus::Canceled);
    assert_eq!(stored.status().as_str(), "CANCELED");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_cancels_on_shared_service_all_succeed() {
    let repo = InMemoryOrderRepository::new();
    let service = std::sync::Arc::new(OrderService::new(repo.clone()));

    let mut ids = Vec::new();
    for _ in 0..8 {
        let id = OrderId::generate();
        service
            .create_order(vec![item("book", 1, "1")], id.clone())
            .await
            .unwrap();
        ids.push(id);
    }

    let mut handles = Vec::new();
    for id in ids.clone() {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.cancel_order(&id).await.unwrap()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    for id in &ids {
        let stored = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status(), OrderStatus::Canceled);
    }
}
