use order_tx::application::order_service::OrderService;
use order_tx::domain::order::{NewOrder, PayStatus};
use order_tx::domain::payment::ScenarioPaymentGateway;
use order_tx::domain::ports::{OrderStoreBox, OrderStoreFactory};
use order_tx::infrastructure::in_memory::InMemoryOrderStore;

#[tokio::test]
async fn test_factory_instantiation() {
    let factory: OrderStoreFactory =
        Box::new(|| Box::new(InMemoryOrderStore::new()) as OrderStoreBox);

    let service = OrderService::new(factory(), Box::new(ScenarioPaymentGateway::new()));
    let order = service.order(NewOrder::new("정상")).await.unwrap();

    let found = service.find_by_id(order.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(found.pay_status, PayStatus::Completed);
}

#[tokio::test]
async fn test_factory_stores_are_independent() {
    let factory: OrderStoreFactory =
        Box::new(|| Box::new(InMemoryOrderStore::new()) as OrderStoreBox);

    let handle = tokio::spawn(async move {
        let first = OrderService::new(factory(), Box::new(ScenarioPaymentGateway::new()));
        let second = OrderService::new(factory(), Box::new(ScenarioPaymentGateway::new()));
        first.order(NewOrder::new("정상")).await.unwrap();
        (
            first.into_orders().await.unwrap(),
            second.into_orders().await.unwrap(),
        )
    });

    let (first, second) = handle.await.unwrap();
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}
