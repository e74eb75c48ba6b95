//! Cart repository: line-item resolution and the cart aggregator.
//!
//! The aggregator ([`recalc`]) is not automatic: every operation that
//! adds, removes, or requantifies a line item calls it explicitly, and
//! the checkout transaction calls it once more to freeze final totals.

use rust_decimal::Decimal;
use sqlx::prelude::FromRow;
use sqlx::{PgExecutor, PgPool};

use voltshop_core::{CartId, CartItemId, CustomerId, ProductId, ProductKind, line_total};

use super::RepositoryError;
use crate::models::cart::{Cart, CartItem, CartLine};
use crate::models::catalog::ProductRef;

#[derive(FromRow)]
struct CartRow {
    id: i64,
    owner_id: Option<i64>,
    total_products: i64,
    total_price: Decimal,
    in_order: bool,
    for_anonymous: bool,
}

impl From<CartRow> for Cart {
    fn from(r: CartRow) -> Self {
        Self {
            id: CartId::new(r.id),
            owner_id: r.owner_id.map(CustomerId::new),
            total_products: r.total_products,
            total_price: r.total_price,
            in_order: r.in_order,
            for_anonymous: r.for_anonymous,
        }
    }
}

#[derive(FromRow)]
struct CartLineRow {
    id: i64,
    customer_id: Option<i64>,
    cart_id: i64,
    product_kind: String,
    product_id: i64,
    quantity: i64,
    total_price: Decimal,
    title: Option<String>,
    slug: Option<String>,
    unit_price: Option<Decimal>,
    image: Option<String>,
}

impl CartLineRow {
    fn into_line(self) -> Result<CartLine, RepositoryError> {
        let kind = self.product_kind.parse::<ProductKind>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid product kind tag: {e}"))
        })?;
        let (Some(title), Some(slug), Some(unit_price), Some(image)) =
            (self.title, self.slug, self.unit_price, self.image)
        else {
            return Err(RepositoryError::DataCorruption(format!(
                "cart item {} references missing {} {}",
                self.id, self.product_kind, self.product_id
            )));
        };
        Ok(CartLine {
            item: CartItem {
                id: CartItemId::new(self.id),
                customer_id: self.customer_id.map(CustomerId::new),
                cart_id: CartId::new(self.cart_id),
                kind,
                product_id: ProductId::new(self.product_id),
                quantity: self.quantity,
                total_price: self.total_price,
            },
            title,
            slug,
            unit_price,
            image,
        })
    }
}

/// Recompute a cart's denormalized totals from its line items.
///
/// `total_price` becomes the sum of the line items' `total_price` (zero
/// when there are none - the empty cart is the zero state, not an error)
/// and `total_products` becomes the line-item count. Accepts any
/// executor so checkout can run it inside its transaction.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn recalc<'e, E>(executor: E, cart_id: CartId) -> Result<(), RepositoryError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r"
        UPDATE cart SET
            total_price = COALESCE(
                (SELECT SUM(total_price) FROM cart_item WHERE cart_id = $1), 0),
            total_products =
                (SELECT COUNT(*) FROM cart_item WHERE cart_id = $1)
        WHERE id = $1
        ",
    )
    .bind(cart_id)
    .execute(executor)
    .await?;
    Ok(())
}

/// Repository for cart operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load a cart by id, skipping carts already frozen by checkout.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn active_cart_by_id(
        &self,
        cart_id: CartId,
    ) -> Result<Option<Cart>, RepositoryError> {
        let row: Option<CartRow> =
            sqlx::query_as("SELECT * FROM cart WHERE id = $1 AND in_order = FALSE")
                .bind(cart_id)
                .fetch_optional(self.pool)
                .await?;
        Ok(row.map(Cart::from))
    }

    /// The customer's active (not yet ordered) cart, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn active_cart_for_owner(
        &self,
        owner_id: CustomerId,
    ) -> Result<Option<Cart>, RepositoryError> {
        let row: Option<CartRow> = sqlx::query_as(
            "SELECT * FROM cart WHERE owner_id = $1 AND in_order = FALSE ORDER BY id LIMIT 1",
        )
        .bind(owner_id)
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(Cart::from))
    }

    /// Create a fresh cart, owned or anonymous.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_cart(
        &self,
        owner_id: Option<CustomerId>,
    ) -> Result<Cart, RepositoryError> {
        let row: CartRow = sqlx::query_as(
            "INSERT INTO cart (owner_id, for_anonymous) VALUES ($1, $2) RETURNING *",
        )
        .bind(owner_id)
        .bind(owner_id.is_none())
        .fetch_one(self.pool)
        .await?;
        Ok(row.into())
    }

    /// The cart's line items joined with product display data.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails,
    /// `RepositoryError::DataCorruption` for dangling product references.
    pub async fn lines(&self, cart_id: CartId) -> Result<Vec<CartLine>, RepositoryError> {
        let rows: Vec<CartLineRow> = sqlx::query_as(
            r"
            SELECT ci.id, ci.customer_id, ci.cart_id, ci.product_kind,
                   ci.product_id, ci.quantity, ci.total_price,
                   COALESCE(n.title, s.title) AS title,
                   COALESCE(n.slug, s.slug) AS slug,
                   COALESCE(n.price, s.price) AS unit_price,
                   COALESCE(n.image, s.image) AS image
            FROM cart_item ci
            LEFT JOIN notebook n
                ON ci.product_kind = 'notebook' AND n.id = ci.product_id
            LEFT JOIN smartphone s
                ON ci.product_kind = 'smartphone' AND s.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY ci.id
            ",
        )
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartLineRow::into_line).collect()
    }

    /// Add a product to the cart: find-or-create the line item.
    ///
    /// A new line item starts at quantity 1 with
    /// `total_price = product price`. The uniqueness constraint on
    /// (cart, kind, product) makes a concurrent duplicate add collapse
    /// into the existing row - the second add reuses, never duplicates.
    /// Runs the aggregator either way. Returns whether a new line item
    /// was created.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a statement fails.
    pub async fn add_item(
        &self,
        cart: &Cart,
        product: &ProductRef,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO cart_item
                (customer_id, cart_id, product_kind, product_id, quantity, total_price)
            VALUES ($1, $2, $3, $4, 1, $5)
            ON CONFLICT (cart_id, product_kind, product_id) DO NOTHING
            ",
        )
        .bind(cart.owner_id)
        .bind(cart.id)
        .bind(product.kind.as_str())
        .bind(product.id)
        .bind(line_total(product.price, 1))
        .execute(self.pool)
        .await?;

        recalc(self.pool, cart.id).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a product's line item from the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the cart has no line item
    /// for this product, `RepositoryError::Database` if a statement
    /// fails.
    pub async fn remove_item(
        &self,
        cart_id: CartId,
        product: &ProductRef,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM cart_item WHERE cart_id = $1 AND product_kind = $2 AND product_id = $3",
        )
        .bind(cart_id)
        .bind(product.kind.as_str())
        .bind(product.id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "cart item for {} '{}'",
                product.kind, product.slug
            )));
        }

        recalc(self.pool, cart_id).await
    }

    /// Overwrite a line item's quantity.
    ///
    /// The caller validates that `quantity` is a positive integer;
    /// saving recomputes `total_price = quantity x unit price` so the
    /// line-item invariant holds after every write.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the cart has no line item
    /// for this product, `RepositoryError::Database` if a statement
    /// fails.
    pub async fn set_quantity(
        &self,
        cart_id: CartId,
        product: &ProductRef,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE cart_item SET quantity = $4, total_price = $5
            WHERE cart_id = $1 AND product_kind = $2 AND product_id = $3
            ",
        )
        .bind(cart_id)
        .bind(product.kind.as_str())
        .bind(product.id)
        .bind(i64::from(quantity))
        .bind(line_total(product.price, quantity))
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "cart item for {} '{}'",
                product.kind, product.slug
            )));
        }

        recalc(self.pool, cart_id).await
    }
}
