//! Core category domain types.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    validation::{FieldErrors, WriteMode, check_text, resolve_required},
};

/// Database identifier for a category.
pub type CategoryId = i64;

const NAME_MAX_CHARS: usize = 255;
const SLUG_MAX_CHARS: usize = 255;

/// A group of products (e.g., 'Streaming', 'Books').
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The unique display name of the category.
    pub name: String,
    /// The URL-friendly name of the category.
    pub slug: String,
}

/// A validated category that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// The unique display name of the category.
    pub name: String,
    /// The URL-friendly name of the category.
    pub slug: String,
}

/// Request body for creating and editing a category.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CategoryFormData {
    pub name: Option<String>,
    pub slug: Option<String>,
}

impl CategoryFormData {
    /// Validate the form against the `stored` category, if there is one.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] listing every field that is missing or invalid.
    pub fn validate(self, stored: Option<&Category>, mode: WriteMode) -> Result<NewCategory, Error> {
        let mut errors = FieldErrors::new();

        let name = resolve_required(&mut errors, "name", self.name, stored.map(|c| &c.name), mode);
        let slug = resolve_required(&mut errors, "slug", self.slug, stored.map(|c| &c.slug), mode);

        check_text(&mut errors, "name", name.as_deref(), NAME_MAX_CHARS);
        check_text(&mut errors, "slug", slug.as_deref(), SLUG_MAX_CHARS);

        match (name, slug) {
            (Some(name), Some(slug)) if errors.is_empty() => Ok(NewCategory {
                name: name.trim().to_owned(),
                slug: slug.trim().to_owned(),
            }),
            _ => Err(errors.into()),
        }
    }
}

#[cfg(test)]
mod category_form_tests {
    use crate::{
        Error,
        category::{Category, CategoryFormData, NewCategory},
        validation::WriteMode,
    };

    #[test]
    fn create_requires_all_fields() {
        let result = CategoryFormData::default().validate(None, WriteMode::Create);

        let Err(Error::Validation(errors)) = result else {
            panic!("expected validation error, got {result:?}");
        };
        assert!(errors.get("name").is_some());
        assert!(errors.get("slug").is_some());
    }

    #[test]
    fn create_trims_values() {
        let form = CategoryFormData {
            name: Some(" Streaming ".to_owned()),
            slug: Some("streaming".to_owned()),
        };

        let got = form.validate(None, WriteMode::Create);

        assert_eq!(
            got,
            Ok(NewCategory {
                name: "Streaming".to_owned(),
                slug: "streaming".to_owned()
            })
        );
    }

    #[test]
    fn patch_keeps_stored_fields() {
        let stored = Category {
            id: 1,
            name: "Books".to_owned(),
            slug: "books".to_owned(),
        };
        let form = CategoryFormData {
            name: Some("Novels".to_owned()),
            slug: None,
        };

        let got = form.validate(Some(&stored), WriteMode::Patch);

        assert_eq!(
            got,
            Ok(NewCategory {
                name: "Novels".to_owned(),
                slug: "books".to_owned()
            })
        );
    }

    #[test]
    fn blank_name_is_rejected() {
        let form = CategoryFormData {
            name: Some("   ".to_owned()),
            slug: Some("blank".to_owned()),
        };

        assert!(matches!(
            form.validate(None, WriteMode::Create),
            Err(Error::Validation(_))
        ));
    }
}
