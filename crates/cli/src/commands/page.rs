//! Inspect the pagination engine against a live database.

use std::sync::Arc;

use rust_decimal::Decimal;

use ordergraph_api::db::PgStore;
use ordergraph_api::services::{OrderResolver, OrderService, orders_page_with_shipping};
use ordergraph_core::{CustomerId, PageRequest};

use super::{CommandError, connect};

pub struct PageArgs {
    pub customer: i32,
    pub first: i32,
    pub after: Option<String>,
    pub min_price: Option<Decimal>,
    pub sort: Option<String>,
}

impl PageArgs {
    fn request(self) -> PageRequest {
        PageRequest {
            customer_id: CustomerId::new(self.customer),
            first: self.first,
            after: self.after,
            min_price: self.min_price,
            sort_order: self.sort,
        }
    }
}

/// Fetch one page, with shipping attached, and print it as JSON.
///
/// # Errors
///
/// Returns an error for invalid page arguments or database failures.
pub async fn run(args: PageArgs) -> Result<(), CommandError> {
    let pool = connect().await?;
    let service = OrderResolver::new(Arc::new(PgStore::new(pool.clone())));
    let loader = service.shipping_loader();

    let page = orders_page_with_shipping(&service, &loader, &args.request()).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&page)?);
    }

    pool.close().await;
    Ok(())
}
