//! MongoDB repository tests
//!
//! Each test starts its own MongoDB container, so they need Docker:
//!
//! ```sh
//! cargo test -p domain_products --test mongo_repository_test -- --ignored
//! ```

use domain_products::*;
use test_utils::{assertions::assert_close, TestDataBuilder, TestMongo};

async fn service(mongo: &TestMongo) -> ProductService<MongoProductRepository> {
    let repository = MongoProductRepository::new(&mongo.database());
    repository.init_indexes().await.unwrap();
    ProductService::new(repository)
}

fn product(builder: &TestDataBuilder, index: u64, category: &str) -> CreateProduct {
    CreateProduct {
        name: builder.name("product", &index.to_string()),
        description: "Integration test product".to_string(),
        price: builder.price(index),
        category: category.to_string(),
        stock_quantity: index as i64,
        image_url: None,
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_and_read_back() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo).await;
    let builder = TestDataBuilder::from_test_name("mongo_create_read");

    let input = product(&builder, 1, "Kitchen");
    let created = service.create_product(input.clone()).await.unwrap();
    assert_close(created.price, input.price, "price");

    let fetched = service.get_product(&created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_list_sort_filter_and_paging() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo).await;
    let builder = TestDataBuilder::from_test_name("mongo_list");

    for (index, category) in [(0, "Kitchen"), (1, "Garden"), (2, "kitchenware")] {
        service
            .create_product(product(&builder, index, category))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let all = service
        .list_products(ProductFilter::default())
        .await
        .unwrap();
    let names: Vec<_> = all.iter().map(|p| p.name.clone()).collect();
    assert_eq!(
        names,
        [
            builder.name("product", "2"),
            builder.name("product", "1"),
            builder.name("product", "0"),
        ]
    );

    let kitchen = service
        .list_by_category("KITCHEN", PageQuery::default())
        .await
        .unwrap();
    assert_eq!(kitchen.len(), 2);

    let page = service
        .list_products(ProductFilter {
            skip: 1,
            limit: 1,
            category: None,
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, builder.name("product", "1"));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_category_filter_is_literal() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo).await;
    let builder = TestDataBuilder::from_test_name("mongo_literal");

    service
        .create_product(product(&builder, 0, "Kitchen"))
        .await
        .unwrap();

    let products = service
        .list_by_category(".*", PageQuery::default())
        .await
        .unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_and_delete() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo).await;
    let builder = TestDataBuilder::from_test_name("mongo_update_delete");

    let created = service
        .create_product(product(&builder, 0, "Kitchen"))
        .await
        .unwrap();

    let unchanged = service
        .update_product(&created.id, UpdateProduct::default())
        .await
        .unwrap();
    assert_eq!(unchanged.updated_at, created.updated_at);

    let updated = service
        .update_product(
            &created.id,
            UpdateProduct {
                price: Some(42.0),
                image_url: Some("https://img.example.com/1.png".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_close(updated.price, 42.0, "price");
    assert_eq!(updated.name, created.name);
    assert!(updated.updated_at > created.updated_at);

    service.delete_product(&created.id).await.unwrap();
    assert!(matches!(
        service.get_product(&created.id).await,
        Err(ProductError::NotFound(_))
    ));
    assert!(matches!(
        service.delete_product(&created.id).await,
        Err(ProductError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_health_and_index_creation_is_idempotent() {
    let mongo = TestMongo::new().await;
    let repository = MongoProductRepository::new(&mongo.database());
    repository.init_indexes().await.unwrap();
    repository.init_indexes().await.unwrap();

    let service = ProductService::new(repository);
    assert_eq!(service.health().await.unwrap(), HealthStatus::healthy());
}
