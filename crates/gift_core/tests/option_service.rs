use gift_core::db::open_db_in_memory;
use gift_core::{
    EntityKind, ModelValidationError, NewProduct, OptionRepository, OptionRequest,
    OptionService, OptionServiceError, Product, ProductRepository, RepoError,
    SqliteOptionRepository, SqliteProductRepository, SqliteUserRepository, UserRepository,
};
use rusqlite::Connection;
use serde_json::json;

const OWNER: &str = "owner@example.com";

type Service<'c> = OptionService<
    SqliteProductRepository<'c>,
    SqliteOptionRepository<'c>,
    SqliteUserRepository<'c>,
>;

fn service(conn: &Connection) -> Service<'_> {
    OptionService::new(
        SqliteProductRepository::new(conn),
        SqliteOptionRepository::new(conn),
        SqliteUserRepository::new(conn),
    )
}

fn seed(conn: &Connection) -> Product {
    SqliteUserRepository::new(conn).create_user(OWNER).unwrap();
    SqliteProductRepository::new(conn)
        .create_product(&NewProduct::new("Gift box", 5_000))
        .unwrap()
}

fn option_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM options;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn add_option_creates_one_option_linked_to_product() {
    let conn = open_db_in_memory().unwrap();
    let product = seed(&conn);
    let service = service(&conn);

    let response = service
        .add_option(&OptionRequest::new("Red", 3), product.id)
        .unwrap();
    assert_eq!(response.name, "Red");
    assert_eq!(response.quantity, 3);
    assert_eq!(option_count(&conn), 1);

    let stored = SqliteOptionRepository::new(&conn)
        .find_by_id(response.id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.product_id, product.id);
}

#[test]
fn add_option_for_missing_product_fails_and_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let service = service(&conn);

    let err = service
        .add_option(&OptionRequest::new("Red", 3), 999)
        .unwrap_err();
    assert!(matches!(err, OptionServiceError::ProductNotFound(999)));
    assert_eq!(option_count(&conn), 0);
}

#[test]
fn add_option_rejects_duplicate_name_within_product() {
    let conn = open_db_in_memory().unwrap();
    let product = seed(&conn);
    let other = SqliteProductRepository::new(&conn)
        .create_product(&NewProduct::new("Card", 900))
        .unwrap();
    let service = service(&conn);

    service
        .add_option(&OptionRequest::new("Red", 3), product.id)
        .unwrap();
    let err = service
        .add_option(&OptionRequest::new(" Red ", 1), product.id)
        .unwrap_err();
    assert!(matches!(err, OptionServiceError::DuplicateOption(ref name) if name == "Red"));

    // Same name under another product is fine.
    service
        .add_option(&OptionRequest::new("Red", 1), other.id)
        .unwrap();
    assert_eq!(option_count(&conn), 2);
}

#[test]
fn add_option_validates_name() {
    let conn = open_db_in_memory().unwrap();
    let product = seed(&conn);
    let service = service(&conn);

    let err = service
        .add_option(&OptionRequest::new("   ", 3), product.id)
        .unwrap_err();
    assert!(matches!(
        err,
        OptionServiceError::Validation(ModelValidationError::BlankOptionName)
    ));
    assert_eq!(option_count(&conn), 0);
}

#[test]
fn delete_option_removes_option() {
    let conn = open_db_in_memory().unwrap();
    let product = seed(&conn);
    let service = service(&conn);
    let created = service
        .add_option(&OptionRequest::new("Red", 3), product.id)
        .unwrap();

    let deleted = service.delete_option(created.id, OWNER).unwrap();
    assert_eq!(deleted, created.id);
    assert!(SqliteOptionRepository::new(&conn)
        .find_by_id(created.id)
        .unwrap()
        .is_none());
}

#[test]
fn delete_missing_option_fails_and_deletes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let product = seed(&conn);
    let service = service(&conn);
    service
        .add_option(&OptionRequest::new("Red", 3), product.id)
        .unwrap();

    let err = service.delete_option(4_242, OWNER).unwrap_err();
    assert!(matches!(err, OptionServiceError::OptionNotFound(4_242)));
    assert_eq!(option_count(&conn), 1);
}

#[test]
fn delete_option_requires_known_actor() {
    let conn = open_db_in_memory().unwrap();
    let product = seed(&conn);
    let service = service(&conn);
    let created = service
        .add_option(&OptionRequest::new("Red", 3), product.id)
        .unwrap();

    let err = service
        .delete_option(created.id, "stranger@example.com")
        .unwrap_err();
    assert!(matches!(err, OptionServiceError::UserNotFound(_)));

    let err = service.delete_option(created.id, "not-an-email").unwrap_err();
    assert!(matches!(err, OptionServiceError::UserNotFound(_)));
    assert_eq!(option_count(&conn), 1);
}

#[test]
fn delete_missing_option_reports_option_before_unknown_actor() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let service = service(&conn);

    let err = service
        .delete_option(42, "nobody@example.com")
        .unwrap_err();
    assert!(matches!(err, OptionServiceError::OptionNotFound(42)));
}

#[test]
fn change_option_overwrites_in_place() {
    let conn = open_db_in_memory().unwrap();
    let product = seed(&conn);
    let service = service(&conn);
    let created = service
        .add_option(&OptionRequest::new("Red", 3), product.id)
        .unwrap();

    let changed = service
        .change_option(&OptionRequest::new("Navy", 8), product.id, created.id)
        .unwrap();
    assert_eq!(changed.id, created.id);
    assert_eq!(changed.name, "Navy");
    assert_eq!(changed.quantity, 8);

    let stored = SqliteOptionRepository::new(&conn)
        .find_by_id(created.id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "Navy");
    assert_eq!(stored.quantity, 8);
    assert_eq!(stored.product_id, product.id);
    assert_eq!(option_count(&conn), 1);
}

#[test]
fn change_option_checks_product_and_option_independently() {
    let conn = open_db_in_memory().unwrap();
    let product = seed(&conn);
    let service = service(&conn);
    let created = service
        .add_option(&OptionRequest::new("Red", 3), product.id)
        .unwrap();

    let err = service
        .change_option(&OptionRequest::new("Navy", 8), 999, created.id)
        .unwrap_err();
    assert!(matches!(err, OptionServiceError::ProductNotFound(999)));

    let err = service
        .change_option(&OptionRequest::new("Navy", 8), product.id, 999)
        .unwrap_err();
    assert!(matches!(err, OptionServiceError::OptionNotFound(999)));

    let stored = SqliteOptionRepository::new(&conn)
        .find_by_id(created.id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "Red");
}

#[test]
fn change_option_is_addressed_by_option_id_only() {
    let conn = open_db_in_memory().unwrap();
    let product = seed(&conn);
    let other = SqliteProductRepository::new(&conn)
        .create_product(&NewProduct::new("Card", 900))
        .unwrap();
    let service = service(&conn);
    let created = service
        .add_option(&OptionRequest::new("Red", 3), product.id)
        .unwrap();

    service
        .change_option(&OptionRequest::new("Green", 1), other.id, created.id)
        .unwrap();

    let stored = SqliteOptionRepository::new(&conn)
        .find_by_id(created.id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.product_id, product.id);
    assert_eq!(stored.name, "Green");
}

#[test]
fn change_option_to_taken_name_is_duplicate() {
    let conn = open_db_in_memory().unwrap();
    let product = seed(&conn);
    let service = service(&conn);
    service
        .add_option(&OptionRequest::new("Red", 3), product.id)
        .unwrap();
    let blue = service
        .add_option(&OptionRequest::new("Blue", 3), product.id)
        .unwrap();

    let err = service
        .change_option(&OptionRequest::new("Red", 5), product.id, blue.id)
        .unwrap_err();
    assert!(matches!(err, OptionServiceError::DuplicateOption(_)));
}

#[test]
fn list_options_returns_product_options_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let product = seed(&conn);
    let service = service(&conn);
    let first = service
        .add_option(&OptionRequest::new("Small", 1), product.id)
        .unwrap();
    let second = service
        .add_option(&OptionRequest::new("Large", 2), product.id)
        .unwrap();

    let listed = service.list_options(product.id).unwrap();
    assert_eq!(listed, vec![first, second]);

    let err = service.list_options(999).unwrap_err();
    assert!(matches!(err, OptionServiceError::ProductNotFound(999)));
}

#[test]
fn option_response_serializes_as_flat_projection() {
    let conn = open_db_in_memory().unwrap();
    let product = seed(&conn);
    let response = service(&conn)
        .add_option(&OptionRequest::new("Red", 3), product.id)
        .unwrap();

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(
        value,
        json!({ "id": response.id, "name": "Red", "quantity": 3 })
    );
}

#[test]
fn only_missing_options_map_to_option_not_found() {
    let err = OptionServiceError::from(RepoError::NotFound {
        entity: EntityKind::Option,
        id: 7,
    });
    assert!(matches!(err, OptionServiceError::OptionNotFound(7)));

    let err = OptionServiceError::from(RepoError::NotFound {
        entity: EntityKind::Wish,
        id: 7,
    });
    assert!(matches!(
        err,
        OptionServiceError::Repo(RepoError::NotFound {
            entity: EntityKind::Wish,
            id: 7
        })
    ));
}
