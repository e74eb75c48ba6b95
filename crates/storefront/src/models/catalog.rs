//! Catalog domain types: categories and the two product kinds.

use rust_decimal::Decimal;

use voltshop_core::{CategoryId, ProductId, ProductKind};

/// A product category.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// A category together with its per-kind product counts, as rendered in
/// the sidebar.
#[derive(Debug, Clone)]
pub struct CategoryCounts {
    pub category: Category,
    pub notebook_count: i64,
    pub smartphone_count: i64,
}

impl CategoryCounts {
    /// Total number of products in the category, across kinds.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.notebook_count + self.smartphone_count
    }
}

/// A resolved reference to a concrete product: enough to price and link a
/// cart line item without loading the full spec record.
#[derive(Debug, Clone)]
pub struct ProductRef {
    pub kind: ProductKind,
    pub id: ProductId,
    pub title: String,
    pub slug: String,
    pub price: Decimal,
}

/// The shared product shape used on listing pages.
#[derive(Debug, Clone)]
pub struct ProductSummary {
    pub kind: ProductKind,
    pub id: ProductId,
    pub title: String,
    pub slug: String,
    pub price: Decimal,
    pub image: String,
}

/// A notebook with its full spec sheet.
#[derive(Debug, Clone)]
pub struct Notebook {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub title: String,
    pub slug: String,
    pub price: Decimal,
    pub image: String,
    pub description: Option<String>,
    pub diagonal: String,
    pub display_type: String,
    pub processor_freq: String,
    pub ram: String,
    pub video: String,
    pub time_without_charge: String,
}

/// A smartphone with its full spec sheet.
#[derive(Debug, Clone)]
pub struct Smartphone {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub title: String,
    pub slug: String,
    pub price: Decimal,
    pub image: String,
    pub description: Option<String>,
    pub diagonal: String,
    pub display_type: String,
    pub resolution: String,
    pub accum_volume: String,
    pub ram: String,
    pub sd: bool,
    pub sd_volume_max: Option<String>,
    pub main_cam: String,
    pub frontal_cam: String,
}

/// A full product record of either kind.
#[derive(Debug, Clone)]
pub enum ProductDetail {
    Notebook(Notebook),
    Smartphone(Smartphone),
}

impl ProductDetail {
    #[must_use]
    pub const fn kind(&self) -> ProductKind {
        match self {
            Self::Notebook(_) => ProductKind::Notebook,
            Self::Smartphone(_) => ProductKind::Smartphone,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Notebook(n) => &n.title,
            Self::Smartphone(s) => &s.title,
        }
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        match self {
            Self::Notebook(n) => &n.slug,
            Self::Smartphone(s) => &s.slug,
        }
    }

    #[must_use]
    pub const fn price(&self) -> Decimal {
        match self {
            Self::Notebook(n) => n.price,
            Self::Smartphone(s) => s.price,
        }
    }

    #[must_use]
    pub fn image(&self) -> &str {
        match self {
            Self::Notebook(n) => &n.image,
            Self::Smartphone(s) => &s.image,
        }
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Notebook(n) => n.description.as_deref(),
            Self::Smartphone(s) => s.description.as_deref(),
        }
    }

    /// Label/value rows for the spec table on the product detail page.
    #[must_use]
    pub fn spec_rows(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Notebook(n) => vec![
                ("Diagonal", n.diagonal.clone()),
                ("Display type", n.display_type.clone()),
                ("Processor frequency", n.processor_freq.clone()),
                ("RAM", n.ram.clone()),
                ("Video card", n.video.clone()),
                ("Battery life", n.time_without_charge.clone()),
            ],
            Self::Smartphone(s) => {
                let mut rows = vec![
                    ("Diagonal", s.diagonal.clone()),
                    ("Display type", s.display_type.clone()),
                    ("Resolution", s.resolution.clone()),
                    ("Battery capacity", s.accum_volume.clone()),
                    ("RAM", s.ram.clone()),
                    ("SD card slot", if s.sd { "Yes" } else { "No" }.to_owned()),
                ];
                if let Some(volume) = &s.sd_volume_max {
                    rows.push(("Max SD card volume", volume.clone()));
                }
                rows.push(("Main camera", s.main_cam.clone()));
                rows.push(("Front camera", s.frontal_cam.clone()));
                rows
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smartphone(sd: bool, sd_volume_max: Option<&str>) -> Smartphone {
        Smartphone {
            id: ProductId::new(1),
            category_id: CategoryId::new(1),
            title: "Pixel 9".to_owned(),
            slug: "pixel-9".to_owned(),
            price: Decimal::new(79_900, 2),
            image: "/static/images/pixel-9.jpg".to_owned(),
            description: None,
            diagonal: "6.3\"".to_owned(),
            display_type: "OLED".to_owned(),
            resolution: "2424x1080".to_owned(),
            accum_volume: "4700 mAh".to_owned(),
            ram: "12 Gb".to_owned(),
            sd,
            sd_volume_max: sd_volume_max.map(str::to_owned),
            main_cam: "50 MP".to_owned(),
            frontal_cam: "10.5 MP".to_owned(),
        }
    }

    #[test]
    fn sd_volume_row_only_present_with_sd_card() {
        let with_sd = ProductDetail::Smartphone(smartphone(true, Some("128 Gb")));
        assert!(
            with_sd
                .spec_rows()
                .iter()
                .any(|(label, _)| *label == "Max SD card volume")
        );

        let without_sd = ProductDetail::Smartphone(smartphone(false, None));
        assert!(
            !without_sd
                .spec_rows()
                .iter()
                .any(|(label, _)| *label == "Max SD card volume")
        );
    }

    #[test]
    fn detail_exposes_common_shape() {
        let detail = ProductDetail::Smartphone(smartphone(true, None));
        assert_eq!(detail.kind(), ProductKind::Smartphone);
        assert_eq!(detail.title(), "Pixel 9");
        assert_eq!(detail.price(), Decimal::new(79_900, 2));
    }

    #[test]
    fn category_counts_total() {
        let counts = CategoryCounts {
            category: Category {
                id: CategoryId::new(1),
                name: "Notebooks".to_owned(),
                slug: "notebooks".to_owned(),
            },
            notebook_count: 4,
            smartphone_count: 1,
        };
        assert_eq!(counts.total(), 5);
    }
}
