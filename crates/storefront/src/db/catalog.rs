//! Catalog repository: categories and products.
//!
//! The two product kinds live in separate tables sharing the common
//! product shape. Kind-generic queries go through
//! [`ProductKind::table`]; listing queries that span both kinds use a
//! `UNION ALL` with a kind tag column.

use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::prelude::FromRow;

use voltshop_core::{CategoryId, ProductId, ProductKind};

use super::RepositoryError;
use crate::models::catalog::{
    Category, CategoryCounts, Notebook, ProductDetail, ProductRef, ProductSummary, Smartphone,
};

/// How many products of each kind the home page shows.
const LATEST_PER_KIND: i64 = 5;

#[derive(FromRow)]
struct CategoryCountRow {
    id: i64,
    name: String,
    slug: String,
    notebook_count: i64,
    smartphone_count: i64,
}

#[derive(FromRow)]
struct ProductRow {
    id: i64,
    title: String,
    slug: String,
    price: Decimal,
    image: String,
}

#[derive(FromRow)]
struct TaggedProductRow {
    kind: String,
    id: i64,
    title: String,
    slug: String,
    price: Decimal,
    image: String,
}

#[derive(FromRow)]
struct NotebookRow {
    id: i64,
    category_id: i64,
    title: String,
    slug: String,
    price: Decimal,
    image: String,
    description: Option<String>,
    diagonal: String,
    display_type: String,
    processor_freq: String,
    ram: String,
    video: String,
    time_without_charge: String,
}

#[derive(FromRow)]
struct SmartphoneRow {
    id: i64,
    category_id: i64,
    title: String,
    slug: String,
    price: Decimal,
    image: String,
    description: Option<String>,
    diagonal: String,
    display_type: String,
    resolution: String,
    accum_volume: String,
    ram: String,
    sd: bool,
    sd_volume_max: Option<String>,
    main_cam: String,
    frontal_cam: String,
}

impl TaggedProductRow {
    fn into_summary(self) -> Result<ProductSummary, RepositoryError> {
        let kind = self.kind.parse::<ProductKind>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid product kind tag: {e}"))
        })?;
        Ok(ProductSummary {
            kind,
            id: ProductId::new(self.id),
            title: self.title,
            slug: self.slug,
            price: self.price,
            image: self.image,
        })
    }
}

/// Repository for catalog reads.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All categories with per-kind product counts, for the sidebar.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn sidebar_categories(&self) -> Result<Vec<CategoryCounts>, RepositoryError> {
        let rows: Vec<CategoryCountRow> = sqlx::query_as(
            r"
            SELECT c.id, c.name, c.slug,
                   (SELECT COUNT(*) FROM notebook n WHERE n.category_id = c.id) AS notebook_count,
                   (SELECT COUNT(*) FROM smartphone s WHERE s.category_id = c.id) AS smartphone_count
            FROM category c
            ORDER BY c.name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CategoryCounts {
                category: Category {
                    id: CategoryId::new(r.id),
                    name: r.name,
                    slug: r.slug,
                },
                notebook_count: r.notebook_count,
                smartphone_count: r.smartphone_count,
            })
            .collect())
    }

    /// The newest products for the home page: five per kind, newest
    /// first. When `priority` is given, that kind's products come first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn latest_products(
        &self,
        priority: Option<ProductKind>,
    ) -> Result<Vec<ProductSummary>, RepositoryError> {
        let kinds = kind_order(priority);

        let mut products = Vec::with_capacity(kinds.len() * LATEST_PER_KIND as usize);
        for kind in kinds {
            let query = format!(
                "SELECT id, title, slug, price, image FROM {} ORDER BY id DESC LIMIT {}",
                kind.table(),
                LATEST_PER_KIND
            );
            let rows: Vec<ProductRow> = sqlx::query_as(&query).fetch_all(self.pool).await?;
            products.extend(rows.into_iter().map(|r| ProductSummary {
                kind,
                id: ProductId::new(r.id),
                title: r.title,
                slug: r.slug,
                price: r.price,
                image: r.image,
            }));
        }
        Ok(products)
    }

    /// Resolve a (kind, slug) pair to a concrete product reference.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product of that kind has
    /// the slug, `RepositoryError::Database` if the query fails.
    pub async fn product_by_slug(
        &self,
        kind: ProductKind,
        slug: &str,
    ) -> Result<ProductRef, RepositoryError> {
        let query = format!(
            "SELECT id, title, slug, price, image FROM {} WHERE slug = $1",
            kind.table()
        );
        let row: Option<ProductRow> = sqlx::query_as(&query)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;

        row.map(|r| ProductRef {
            kind,
            id: ProductId::new(r.id),
            title: r.title,
            slug: r.slug,
            price: r.price,
        })
        .ok_or_else(|| RepositoryError::NotFound(format!("{kind} '{slug}'")))
    }

    /// Load the full detail record for a (kind, slug) pair.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist,
    /// `RepositoryError::Database` if the query fails.
    pub async fn product_detail(
        &self,
        kind: ProductKind,
        slug: &str,
    ) -> Result<ProductDetail, RepositoryError> {
        match kind {
            ProductKind::Notebook => {
                let row: Option<NotebookRow> =
                    sqlx::query_as("SELECT * FROM notebook WHERE slug = $1")
                        .bind(slug)
                        .fetch_optional(self.pool)
                        .await?;
                row.map(|r| {
                    ProductDetail::Notebook(Notebook {
                        id: ProductId::new(r.id),
                        category_id: CategoryId::new(r.category_id),
                        title: r.title,
                        slug: r.slug,
                        price: r.price,
                        image: r.image,
                        description: r.description,
                        diagonal: r.diagonal,
                        display_type: r.display_type,
                        processor_freq: r.processor_freq,
                        ram: r.ram,
                        video: r.video,
                        time_without_charge: r.time_without_charge,
                    })
                })
                .ok_or_else(|| RepositoryError::NotFound(format!("{kind} '{slug}'")))
            }
            ProductKind::Smartphone => {
                let row: Option<SmartphoneRow> =
                    sqlx::query_as("SELECT * FROM smartphone WHERE slug = $1")
                        .bind(slug)
                        .fetch_optional(self.pool)
                        .await?;
                row.map(|r| {
                    ProductDetail::Smartphone(Smartphone {
                        id: ProductId::new(r.id),
                        category_id: CategoryId::new(r.category_id),
                        title: r.title,
                        slug: r.slug,
                        price: r.price,
                        image: r.image,
                        description: r.description,
                        diagonal: r.diagonal,
                        display_type: r.display_type,
                        resolution: r.resolution,
                        accum_volume: r.accum_volume,
                        ram: r.ram,
                        sd: r.sd,
                        sd_volume_max: r.sd_volume_max,
                        main_cam: r.main_cam,
                        frontal_cam: r.frontal_cam,
                    })
                })
                .ok_or_else(|| RepositoryError::NotFound(format!("{kind} '{slug}'")))
            }
        }
    }

    /// Get a category by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category does not
    /// exist, `RepositoryError::Database` if the query fails.
    pub async fn category_by_slug(&self, slug: &str) -> Result<Category, RepositoryError> {
        #[derive(FromRow)]
        struct CategoryRow {
            id: i64,
            name: String,
            slug: String,
        }

        let row: Option<CategoryRow> =
            sqlx::query_as("SELECT id, name, slug FROM category WHERE slug = $1")
                .bind(slug)
                .fetch_optional(self.pool)
                .await?;

        row.map(|r| Category {
            id: CategoryId::new(r.id),
            name: r.name,
            slug: r.slug,
        })
        .ok_or_else(|| RepositoryError::NotFound(format!("category '{slug}'")))
    }

    /// All products in a category, both kinds, newest first per kind.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails,
    /// `RepositoryError::DataCorruption` if a stored kind tag is invalid.
    pub async fn products_in_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<ProductSummary>, RepositoryError> {
        let rows: Vec<TaggedProductRow> = sqlx::query_as(
            r"
            SELECT 'notebook' AS kind, id, title, slug, price, image
            FROM notebook WHERE category_id = $1
            UNION ALL
            SELECT 'smartphone' AS kind, id, title, slug, price, image
            FROM smartphone WHERE category_id = $1
            ORDER BY kind, id DESC
            ",
        )
        .bind(category_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TaggedProductRow::into_summary).collect()
    }
}

/// The order the home page queries product kinds in: the prioritized
/// kind first, the rest in declaration order.
fn kind_order(priority: Option<ProductKind>) -> Vec<ProductKind> {
    let mut kinds = ProductKind::ALL.to_vec();
    if let Some(first) = priority {
        kinds.sort_by_key(|k| *k != first);
    }
    kinds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prioritized_kind_sorts_first() {
        assert_eq!(
            kind_order(None),
            vec![ProductKind::Notebook, ProductKind::Smartphone]
        );
        assert_eq!(
            kind_order(Some(ProductKind::Smartphone)),
            vec![ProductKind::Smartphone, ProductKind::Notebook]
        );
        assert_eq!(
            kind_order(Some(ProductKind::Notebook)),
            vec![ProductKind::Notebook, ProductKind::Smartphone]
        );
    }
}
