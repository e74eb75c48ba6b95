//! Seed command: sample catalog data for local development.
//!
//! # Usage
//!
//! ```bash
//! vs-cli seed
//! ```
//!
//! Idempotent: rows are keyed by slug and existing rows are left alone,
//! so the command can be re-run safely.

use rust_decimal::Decimal;
use sqlx::PgPool;

use voltshop_core::ProductKind;

use super::{CommandError, connect};

struct NotebookSeed {
    title: &'static str,
    slug: &'static str,
    price: Decimal,
    image: &'static str,
    description: &'static str,
    diagonal: &'static str,
    display_type: &'static str,
    processor_freq: &'static str,
    ram: &'static str,
    video: &'static str,
    time_without_charge: &'static str,
}

struct SmartphoneSeed {
    title: &'static str,
    slug: &'static str,
    price: Decimal,
    image: &'static str,
    description: &'static str,
    diagonal: &'static str,
    display_type: &'static str,
    resolution: &'static str,
    accum_volume: &'static str,
    ram: &'static str,
    sd: bool,
    sd_volume_max: Option<&'static str>,
    main_cam: &'static str,
    frontal_cam: &'static str,
}

const NOTEBOOKS: &[NotebookSeed] = &[
    NotebookSeed {
        title: "Volt Aero 14",
        slug: "volt-aero-14",
        price: Decimal::from_parts(89999, 0, 0, false, 2),
        image: "/static/img/volt-aero-14.jpg",
        description: "Thin-and-light 14-inch workhorse.",
        diagonal: "14\"",
        display_type: "IPS",
        processor_freq: "3.8 GHz",
        ram: "16 GB",
        video: "Integrated",
        time_without_charge: "12 h",
    },
    NotebookSeed {
        title: "Volt Forge 16",
        slug: "volt-forge-16",
        price: Decimal::from_parts(149999, 0, 0, false, 2),
        image: "/static/img/volt-forge-16.jpg",
        description: "16-inch creator notebook with discrete graphics.",
        diagonal: "16\"",
        display_type: "OLED",
        processor_freq: "4.2 GHz",
        ram: "32 GB",
        video: "GeForce RTX 4060",
        time_without_charge: "8 h",
    },
];

const SMARTPHONES: &[SmartphoneSeed] = &[
    SmartphoneSeed {
        title: "Volt One",
        slug: "volt-one",
        price: Decimal::from_parts(59999, 0, 0, false, 2),
        image: "/static/img/volt-one.jpg",
        description: "Compact flagship.",
        diagonal: "6.1\"",
        display_type: "AMOLED",
        resolution: "2556x1179",
        accum_volume: "4200 mAh",
        ram: "8 GB",
        sd: false,
        sd_volume_max: None,
        main_cam: "50 MP",
        frontal_cam: "12 MP",
    },
    SmartphoneSeed {
        title: "Volt One Max",
        slug: "volt-one-max",
        price: Decimal::from_parts(79999, 0, 0, false, 2),
        image: "/static/img/volt-one-max.jpg",
        description: "Big-screen flagship with expandable storage.",
        diagonal: "6.7\"",
        display_type: "AMOLED",
        resolution: "2796x1290",
        accum_volume: "5000 mAh",
        ram: "12 GB",
        sd: true,
        sd_volume_max: Some("1 TB"),
        main_cam: "108 MP",
        frontal_cam: "12 MP",
    },
];

/// Seed the catalog with sample categories and products.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let notebooks_category = upsert_category(&pool, "Notebooks", "notebooks").await?;
    let smartphones_category = upsert_category(&pool, "Smartphones", "smartphones").await?;

    tracing::info!(kind = %ProductKind::Notebook, count = NOTEBOOKS.len(), "seeding products");
    for n in NOTEBOOKS {
        sqlx::query(
            r"
            INSERT INTO notebook
                (category_id, title, slug, price, image, description,
                 diagonal, display_type, processor_freq, ram, video,
                 time_without_charge)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (slug) DO NOTHING
            ",
        )
        .bind(notebooks_category)
        .bind(n.title)
        .bind(n.slug)
        .bind(n.price)
        .bind(n.image)
        .bind(n.description)
        .bind(n.diagonal)
        .bind(n.display_type)
        .bind(n.processor_freq)
        .bind(n.ram)
        .bind(n.video)
        .bind(n.time_without_charge)
        .execute(&pool)
        .await?;
    }

    tracing::info!(kind = %ProductKind::Smartphone, count = SMARTPHONES.len(), "seeding products");
    for s in SMARTPHONES {
        sqlx::query(
            r"
            INSERT INTO smartphone
                (category_id, title, slug, price, image, description,
                 diagonal, display_type, resolution, accum_volume, ram,
                 sd, sd_volume_max, main_cam, frontal_cam)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                    $13, $14, $15)
            ON CONFLICT (slug) DO NOTHING
            ",
        )
        .bind(smartphones_category)
        .bind(s.title)
        .bind(s.slug)
        .bind(s.price)
        .bind(s.image)
        .bind(s.description)
        .bind(s.diagonal)
        .bind(s.display_type)
        .bind(s.resolution)
        .bind(s.accum_volume)
        .bind(s.ram)
        .bind(s.sd)
        .bind(s.sd_volume_max)
        .bind(s.main_cam)
        .bind(s.frontal_cam)
        .execute(&pool)
        .await?;
    }

    tracing::info!(
        notebooks = NOTEBOOKS.len(),
        smartphones = SMARTPHONES.len(),
        "Seed complete!"
    );
    Ok(())
}

/// Insert a category if absent and return its id.
async fn upsert_category(pool: &PgPool, name: &str, slug: &str) -> Result<i64, CommandError> {
    sqlx::query("INSERT INTO category (name, slug) VALUES ($1, $2) ON CONFLICT (slug) DO NOTHING")
        .bind(name)
        .bind(slug)
        .execute(pool)
        .await?;

    let (id,): (i64,) = sqlx::query_as("SELECT id FROM category WHERE slug = $1")
        .bind(slug)
        .fetch_one(pool)
        .await?;
    Ok(id)
}
