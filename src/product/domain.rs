//! Core product domain types.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    category::CategoryId,
    validation::{FieldErrors, WriteMode, check_price, check_text, resolve_or, resolve_required},
};

/// Database identifier for a product.
pub type ProductId = i64;

const TITLE_MAX_CHARS: usize = 255;
const SLUG_MAX_CHARS: usize = 255;

/// An item listed in the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// The ID of the product.
    pub id: ProductId,
    /// The ID of the category the product is filed under.
    pub category: CategoryId,
    /// The name the product is listed under.
    pub title: String,
    /// Free text about the product, may be empty.
    pub description: String,
    /// The URL-friendly name of the product, never empty.
    pub slug: String,
    /// The usual price of the product.
    pub regular_price: f64,
    /// The price of the product when it is on sale.
    pub discount_price: f64,
}

/// A validated product that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// The ID of the category to file the product under.
    pub category: CategoryId,
    /// The name the product is listed under.
    pub title: String,
    /// Free text about the product, may be empty.
    pub description: String,
    /// The URL-friendly name of the product, must not be empty.
    pub slug: String,
    /// The usual price of the product.
    pub regular_price: f64,
    /// The price of the product when it is on sale.
    pub discount_price: f64,
}

/// Request body for creating and editing a product.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProductFormData {
    pub category: Option<CategoryId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub regular_price: Option<f64>,
    pub discount_price: Option<f64>,
}

impl ProductFormData {
    /// Validate the form against the `stored` product, if there is one.
    ///
    /// Whether `category` refers to an existing category is checked when the
    /// product is written.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] listing every field that is missing or invalid.
    pub fn validate(self, stored: Option<&Product>, mode: WriteMode) -> Result<NewProduct, Error> {
        let mut errors = FieldErrors::new();

        let category = resolve_required(
            &mut errors,
            "category",
            self.category,
            stored.map(|p| &p.category),
            mode,
        );
        let title = resolve_required(&mut errors, "title", self.title, stored.map(|p| &p.title), mode);
        let description = resolve_or(
            self.description,
            stored.map(|p| &p.description),
            mode,
            String::new(),
        );
        let slug = resolve_required(&mut errors, "slug", self.slug, stored.map(|p| &p.slug), mode);
        let regular_price = resolve_required(
            &mut errors,
            "regular_price",
            self.regular_price,
            stored.map(|p| &p.regular_price),
            mode,
        );
        let discount_price = resolve_required(
            &mut errors,
            "discount_price",
            self.discount_price,
            stored.map(|p| &p.discount_price),
            mode,
        );

        check_text(&mut errors, "title", title.as_deref(), TITLE_MAX_CHARS);
        check_slug(&mut errors, slug.as_deref());
        check_price(&mut errors, "regular_price", regular_price);
        check_price(&mut errors, "discount_price", discount_price);

        match (category, title, slug, regular_price, discount_price) {
            (Some(category), Some(title), Some(slug), Some(regular_price), Some(discount_price))
                if errors.is_empty() =>
            {
                Ok(NewProduct {
                    category,
                    title: title.trim().to_owned(),
                    description,
                    slug: slug.trim().to_owned(),
                    regular_price,
                    discount_price,
                })
            }
            _ => Err(errors.into()),
        }
    }
}

/// A product must always have a slug to build its URL from.
fn check_slug(errors: &mut FieldErrors, slug: Option<&str>) {
    let Some(slug) = slug else {
        return;
    };

    if slug.trim().is_empty() {
        errors.add("slug", "slug is required");
    } else if slug.chars().count() > SLUG_MAX_CHARS {
        errors.add(
            "slug",
            format!("Ensure this field has no more than {SLUG_MAX_CHARS} characters."),
        );
    }
}
