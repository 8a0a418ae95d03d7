//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `gift_core` linkage and database bootstrap from the shell.
//! - With `demo`, seed one product and user and run a wishlist round trip.

use gift_core::db::{open_db, with_transaction};
use gift_core::{
    init_logging, CoreConfig, NewProduct, OptionRequest, OptionService, PageRequest,
    ProductRepository, SqliteOptionRepository, SqliteProductRepository, SqliteUserRepository,
    SqliteWishRepository, UserRepository, WishRequest, WishService, WishServiceError,
};
use log::info;
use rusqlite::Connection;
use std::error::Error;

const DEMO_EMAIL: &str = "demo@gift.local";

fn main() -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env()?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(config.log_level, log_dir)?;
    }

    println!("gift_core ping={}", gift_core::ping());
    println!("gift_core version={}", gift_core::core_version());

    let mut conn = open_db(&config.db_path)?;
    println!("gift_core db={}", config.db_path.display());

    if std::env::args().nth(1).as_deref() == Some("demo") {
        run_demo(&mut conn)?;
    }
    Ok(())
}

fn run_demo(conn: &mut Connection) -> Result<(), Box<dyn Error>> {
    let (product, option) = with_transaction(conn, |tx| -> Result<_, Box<dyn Error>> {
        let products = SqliteProductRepository::new(tx);
        let product = products.create_product(&NewProduct::new("Demo mug", 12_000))?;

        let users = SqliteUserRepository::new(tx);
        if users.find_by_email(DEMO_EMAIL)?.is_none() {
            users.create_user(DEMO_EMAIL)?;
        }

        let options = OptionService::new(
            SqliteProductRepository::new(tx),
            SqliteOptionRepository::new(tx),
            SqliteUserRepository::new(tx),
        );
        let option = options.add_option(&OptionRequest::new("Blue", 20), product.id)?;
        Ok((product, option))
    })?;
    println!(
        "demo product_id={} option_id={} option_name={}",
        product.id, option.id, option.name
    );

    let page = with_transaction(conn, |tx| -> Result<_, WishServiceError> {
        let wishes = WishService::new(
            SqliteWishRepository::new(tx),
            SqliteUserRepository::new(tx),
            SqliteProductRepository::new(tx),
        );
        wishes.add_to_wishlist(DEMO_EMAIL, &WishRequest::new(product.id, 2))?;
        wishes.change_to_wishlist(DEMO_EMAIL, &WishRequest::new(product.id, 3))?;
        wishes.get_wishlist_products(DEMO_EMAIL, &PageRequest::default())
    })?;
    println!(
        "demo wishlist total={} first_page_items={}",
        page.total_elements,
        page.items.len()
    );

    info!(
        "event=cli_demo module=cli status=ok product_id={} wishes={}",
        product.id, page.total_elements
    );
    Ok(())
}
