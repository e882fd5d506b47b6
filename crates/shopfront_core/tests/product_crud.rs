use rusqlite::Connection;
use rust_decimal_macros::dec;
use shopfront_core::db::open_db_in_memory;
use shopfront_core::{Product, ProductRepository, RepoError, SqliteProductRepository};

#[test]
fn insert_and_get_roundtrip_preserves_every_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let mut product = Product::new("PRD_Desk Lamp", dec!(49.90));
    product.description = Some("Warm light".to_string());
    product.image_path = Some("images/lamp.svg".to_string());
    product.category = Some("Home".to_string());
    product.in_stock = false;
    repo.insert_product(&product).unwrap();

    let loaded = repo.get_product(product.id).unwrap().unwrap();
    assert_eq!(loaded, product);
    assert_eq!(loaded.price.to_string(), "49.90");
}

#[test]
fn get_unknown_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let missing = Product::new("PRD_Ghost", dec!(30));
    assert!(repo.get_product(missing.id).unwrap().is_none());
}

#[test]
fn list_follows_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let names = ["PRD_Zebra", "PRD_Apple", "PRD_Mango"];
    for name in names {
        repo.insert_product(&Product::new(name, dec!(25))).unwrap();
    }

    let listed: Vec<String> = repo
        .list_products()
        .unwrap()
        .into_iter()
        .map(|product| product.name)
        .collect();
    assert_eq!(listed, names);
}

#[test]
fn overwrite_replaces_mutable_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let mut product = Product::new("PRD_Chair", dec!(120));
    product.category = Some("Furniture".to_string());
    repo.insert_product(&product).unwrap();

    product.name = "PRD_Office Chair".to_string();
    product.price = dec!(140.50);
    product.category = None;
    product.in_stock = false;
    repo.overwrite_product(&product).unwrap();

    let loaded = repo.get_product(product.id).unwrap().unwrap();
    assert_eq!(loaded, product);
}

#[test]
fn overwrite_and_delete_unknown_id_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let product = Product::new("PRD_Missing", dec!(30));
    let err = repo.overwrite_product(&product).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == product.id));

    let err = repo.delete_product(product.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == product.id));
}

#[test]
fn delete_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let product = Product::new("PRD_Kettle", dec!(35));
    repo.insert_product(&product).unwrap();
    repo.delete_product(product.id).unwrap();

    assert!(repo.get_product(product.id).unwrap().is_none());
    assert!(repo.list_products().unwrap().is_empty());
}

#[test]
fn reads_return_independent_copies() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let product = Product::new("PRD_Vase", dec!(60));
    repo.insert_product(&product).unwrap();

    let mut copy = repo.get_product(product.id).unwrap().unwrap();
    copy.name = "PRD_Changed locally".to_string();

    let stored = repo.get_product(product.id).unwrap().unwrap();
    assert_eq!(stored.name, "PRD_Vase");
}

#[test]
fn corrupted_price_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let product = Product::new("PRD_Broken", dec!(30));
    repo.insert_product(&product).unwrap();
    conn.execute(
        "UPDATE products SET price = 'not-a-number' WHERE uuid = ?1;",
        [product.id.to_string()],
    )
    .unwrap();

    let err = repo.get_product(product.id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("products.price")));
}

#[test]
fn repository_rejects_connection_without_products_table() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteProductRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("products"))
    ));
}

#[test]
fn repository_rejects_connection_missing_optional_columns() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE products (
            uuid TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            price TEXT NOT NULL
        );",
    )
    .unwrap();

    let result = SqliteProductRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "products",
            column: "description",
        })
    ));
}
