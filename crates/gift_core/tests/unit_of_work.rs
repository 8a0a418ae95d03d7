use gift_core::db::{open_db, open_db_in_memory, with_transaction, DbError, TxStage};
use gift_core::{
    NewProduct, OptionRequest, OptionService, OptionServiceError, ProductRepository,
    SqliteOptionRepository, SqliteProductRepository, SqliteUserRepository,
};
use rusqlite::Connection;
use std::time::Duration;

fn option_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM options;", [], |row| row.get(0))
        .unwrap()
}

fn seed_product(conn: &Connection) -> i64 {
    SqliteProductRepository::new(conn)
        .create_product(&NewProduct::new("Puzzle", 1_500))
        .unwrap()
        .id
}

#[test]
fn successful_work_is_committed() {
    let mut conn = open_db_in_memory().unwrap();
    let product_id = seed_product(&conn);

    let created = with_transaction(&mut conn, |tx| {
        OptionService::new(
            SqliteProductRepository::new(tx),
            SqliteOptionRepository::new(tx),
            SqliteUserRepository::new(tx),
        )
        .add_option(&OptionRequest::new("500 pieces", 4), product_id)
    })
    .unwrap();

    assert_eq!(created.name, "500 pieces");
    assert_eq!(option_count(&conn), 1);
}

#[test]
fn failing_work_rolls_back_earlier_writes() {
    let mut conn = open_db_in_memory().unwrap();
    let product_id = seed_product(&conn);

    let result: Result<(), OptionServiceError> = with_transaction(&mut conn, |tx| {
        let service = OptionService::new(
            SqliteProductRepository::new(tx),
            SqliteOptionRepository::new(tx),
            SqliteUserRepository::new(tx),
        );
        service.add_option(&OptionRequest::new("500 pieces", 4), product_id)?;
        service.add_option(&OptionRequest::new("1000 pieces", 2), 999)?;
        Ok(())
    });

    assert!(matches!(result, Err(OptionServiceError::ProductNotFound(999))));
    assert_eq!(option_count(&conn), 0);
}

#[test]
fn begin_failure_is_reported_as_transaction_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locked.sqlite3");
    let mut conn = open_db(&path).unwrap();
    conn.busy_timeout(Duration::ZERO).unwrap();

    let holder = open_db(&path).unwrap();
    holder.execute_batch("BEGIN IMMEDIATE;").unwrap();

    let result: Result<(), DbError> = with_transaction(&mut conn, |_tx| Ok(()));
    assert!(matches!(
        result,
        Err(DbError::Transaction {
            stage: TxStage::Begin,
            ..
        })
    ));

    holder.execute_batch("ROLLBACK;").unwrap();
}
