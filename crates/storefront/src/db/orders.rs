//! Order repository: customers and the checkout transaction.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use sqlx::prelude::FromRow;

use voltshop_core::{
    BuyingType, CartId, CustomerId, OrderId, OrderStatus, UserId,
};

use super::{RepositoryError, cart};
use crate::models::customer::Customer;
use crate::models::order::{Order, OrderDraft};

#[derive(FromRow)]
struct CustomerRow {
    id: i64,
    user_id: i64,
    phone: Option<String>,
    address: Option<String>,
}

impl From<CustomerRow> for Customer {
    fn from(r: CustomerRow) -> Self {
        Self {
            id: CustomerId::new(r.id),
            user_id: UserId::new(r.user_id),
            phone: r.phone,
            address: r.address,
        }
    }
}

#[derive(FromRow)]
struct OrderRow {
    id: i64,
    customer_id: i64,
    cart_id: Option<i64>,
    first_name: String,
    last_name: String,
    phone: String,
    address: String,
    status: String,
    buying_type: String,
    comment: Option<String>,
    created_at: DateTime<Utc>,
    order_date: NaiveDate,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, RepositoryError> {
        let status = self.status.parse::<OrderStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status: {e}"))
        })?;
        let buying_type = self.buying_type.parse::<BuyingType>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid buying type: {e}"))
        })?;
        Ok(Order {
            id: OrderId::new(self.id),
            customer_id: CustomerId::new(self.customer_id),
            cart_id: self.cart_id.map(CartId::new),
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            address: self.address,
            status,
            buying_type,
            comment: self.comment,
            created_at: self.created_at,
            order_date: self.order_date,
        })
    }
}

/// Repository for customers and orders.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn customer_by_id(
        &self,
        id: CustomerId,
    ) -> Result<Option<Customer>, RepositoryError> {
        let row: Option<CustomerRow> = sqlx::query_as("SELECT * FROM customer WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Customer::from))
    }

    /// Get a customer by their external user identity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn customer_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<Customer>, RepositoryError> {
        let row: Option<CustomerRow> = sqlx::query_as("SELECT * FROM customer WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Customer::from))
    }

    /// All orders placed by a customer, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails,
    /// `RepositoryError::DataCorruption` if a stored enum code is
    /// invalid.
    pub async fn orders_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> =
            sqlx::query_as("SELECT * FROM orders WHERE customer_id = $1 ORDER BY id DESC")
                .bind(customer_id)
                .fetch_all(self.pool)
                .await?;
        rows.into_iter().map(OrderRow::into_order).collect()
    }

    /// Run the checkout transaction: convert the cart into an order.
    ///
    /// One atomic unit, all-or-nothing:
    /// 1. insert the order row (status `new`) with the validated form
    ///    snapshot,
    /// 2. freeze the cart (`in_order` FALSE -> TRUE; a cart that is
    ///    already frozen aborts with `Conflict`, so the transition
    ///    happens exactly once),
    /// 3. re-run the aggregator inside the transaction to freeze the
    ///    final totals,
    /// 4. bind the order to the frozen cart.
    ///
    /// A partially written order is never visible: any failure before
    /// commit rolls the whole unit back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the cart was already
    /// ordered, `RepositoryError::Database` if any statement fails.
    pub async fn place_order(
        &self,
        customer: &Customer,
        cart_id: CartId,
        draft: &OrderDraft,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row: OrderRow = sqlx::query_as(
            r"
            INSERT INTO orders
                (customer_id, first_name, last_name, phone, address,
                 status, buying_type, comment, order_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            ",
        )
        .bind(customer.id)
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.phone)
        .bind(&draft.address)
        .bind(OrderStatus::New.as_str())
        .bind(draft.buying_type.as_str())
        .bind(draft.comment.as_deref())
        .bind(draft.order_date)
        .fetch_one(&mut *tx)
        .await?;

        let frozen = sqlx::query("UPDATE cart SET in_order = TRUE WHERE id = $1 AND in_order = FALSE")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;
        if frozen.rows_affected() == 0 {
            // Dropping the transaction rolls back the inserted order.
            return Err(RepositoryError::Conflict(format!(
                "cart {cart_id} is already attached to an order"
            )));
        }

        cart::recalc(&mut *tx, cart_id).await?;

        sqlx::query("UPDATE orders SET cart_id = $1 WHERE id = $2")
            .bind(cart_id)
            .bind(row.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let mut order = row.into_order()?;
        order.cart_id = Some(cart_id);
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::CartRepository;
    use crate::models::order::OrderForm;

    /// These tests require a running `PostgreSQL` database with
    /// migrations applied (cargo run -p voltshop-cli -- migrate).
    ///
    /// Run with: cargo test -p voltshop-storefront -- --ignored
    async fn test_pool() -> PgPool {
        dotenvy::dotenv().ok();
        let database_url = std::env::var("STOREFRONT_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .expect("STOREFRONT_DATABASE_URL must be set for database tests");
        PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to test database")
    }

    /// Insert a throwaway customer with a unique external identity.
    async fn test_customer(pool: &PgPool) -> Customer {
        let user_id = Utc::now().timestamp_micros();
        let row: CustomerRow = sqlx::query_as(
            "INSERT INTO customer (user_id, phone, address) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(user_id)
        .bind("+1 555 0100")
        .bind("12 Analytical St")
        .fetch_one(pool)
        .await
        .expect("Failed to insert test customer");
        row.into()
    }

    fn test_draft() -> OrderDraft {
        OrderDraft {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            phone: "+1 555 0100".to_owned(),
            address: "12 Analytical St".to_owned(),
            buying_type: BuyingType::Delivery,
            order_date: NaiveDate::from_ymd_opt(2026, 9, 15).expect("valid date"),
            comment: None,
        }
    }

    async fn cart_in_order(pool: &PgPool, cart_id: CartId) -> bool {
        let (in_order,): (bool,) = sqlx::query_as("SELECT in_order FROM cart WHERE id = $1")
            .bind(cart_id)
            .fetch_one(pool)
            .await
            .expect("Failed to load cart row");
        in_order
    }

    async fn order_count(pool: &PgPool, customer_id: CustomerId) -> i64 {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM orders WHERE customer_id = $1")
                .bind(customer_id)
                .fetch_one(pool)
                .await
                .expect("Failed to count orders");
        count
    }

    #[tokio::test]
    #[ignore = "Requires a migrated PostgreSQL test database"]
    async fn checkout_freezes_the_cart_exactly_once() {
        let pool = test_pool().await;
        let customer = test_customer(&pool).await;
        let cart = CartRepository::new(&pool)
            .create_cart(Some(customer.id))
            .await
            .expect("Failed to create cart");
        assert!(!cart.in_order);

        let repo = OrderRepository::new(&pool);
        let order = repo
            .place_order(&customer, cart.id, &test_draft())
            .await
            .expect("Checkout should succeed");

        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.customer_id, customer.id);
        assert_eq!(order.cart_id, Some(cart.id));
        assert!(cart_in_order(&pool, cart.id).await);

        // The frozen cart cannot be ordered a second time
        let err = repo
            .place_order(&customer, cart.id, &test_draft())
            .await
            .expect_err("Second checkout on the same cart must fail");
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(order_count(&pool, customer.id).await, 1);

        // The order is reachable from the customer
        let orders = repo
            .orders_for_customer(customer.id)
            .await
            .expect("Failed to list orders");
        assert_eq!(orders.len(), 1);
        assert_eq!(orders.first().map(|o| o.id), Some(order.id));
    }

    #[tokio::test]
    #[ignore = "Requires a migrated PostgreSQL test database"]
    async fn rejected_form_never_reaches_the_database() {
        let pool = test_pool().await;
        let customer = test_customer(&pool).await;
        let cart = CartRepository::new(&pool)
            .create_cart(Some(customer.id))
            .await
            .expect("Failed to create cart");

        // Validation gates the checkout transaction: an empty phone
        // produces no draft, so place_order is never reached
        let form = OrderForm {
            first_name: Some("Ada".to_owned()),
            last_name: Some("Lovelace".to_owned()),
            phone: Some("   ".to_owned()),
            address: Some("12 Analytical St".to_owned()),
            buying_type: Some("delivery".to_owned()),
            order_date: Some("2026-09-15".to_owned()),
            comment: None,
        };
        assert!(form.validate().is_err());

        assert_eq!(order_count(&pool, customer.id).await, 0);
        assert!(!cart_in_order(&pool, cart.id).await);
    }
}
