use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryFormDto;
use crate::features::categories::models::Category;
use crate::features::categories::repositories::CategoryRepository;
use crate::shared::constants::TOP_CATEGORIES_LIMIT;
use crate::shared::forms::FormErrors;
use crate::shared::slug::slugify;
use crate::shared::validation::SLUG_REGEX;

const MSG_NAME_TAKEN: &str = "Category with this name already exists.";
const MSG_NAME_UNSLUGGABLE: &str = "Enter a name containing letters or digits.";

/// Outcome of submitting the "add category" form
#[derive(Debug)]
pub enum CreateCategoryOutcome {
    Created(Category),
    Invalid(FormErrors),
}

/// Service for category operations
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// The most liked categories, for the index page
    pub async fn top_categories(&self) -> Result<Vec<Category>> {
        self.repository.top_by_likes(TOP_CATEGORIES_LIMIT).await
    }

    /// Get category by slug; `None` when there is no such category
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        if !SLUG_REGEX.is_match(slug) {
            return Ok(None);
        }
        self.repository.find_by_slug(slug).await
    }

    /// Validate and save a new category
    pub async fn create(&self, form: &CategoryFormDto) -> Result<CreateCategoryOutcome> {
        let mut errors = FormErrors::new();
        if let Err(e) = validator::Validate::validate(form) {
            errors.extend(e.into());
            return Ok(CreateCategoryOutcome::Invalid(errors));
        }

        let slug = slugify(&form.name);
        if slug.is_empty() {
            errors.add("name", MSG_NAME_UNSLUGGABLE);
            return Ok(CreateCategoryOutcome::Invalid(errors));
        }

        if self
            .repository
            .exists_by_name_or_slug(&form.name, &slug)
            .await?
        {
            errors.add("name", MSG_NAME_TAKEN);
            return Ok(CreateCategoryOutcome::Invalid(errors));
        }

        let category = Category::new(form.name.clone(), slug);
        match self.repository.insert(&category).await {
            Ok(()) => {
                tracing::info!(
                    "Category created: id={}, slug={}",
                    category.id,
                    category.slug
                );
                Ok(CreateCategoryOutcome::Created(category))
            }
            // Lost a race with a concurrent insert of the same name
            Err(AppError::Conflict(message)) => {
                errors.add("name", message);
                Ok(CreateCategoryOutcome::Invalid(errors))
            }
            Err(e) => Err(e),
        }
    }

    /// Insert a category with preset counters (sample data)
    pub async fn insert_with_counters(
        &self,
        name: &str,
        views: i32,
        likes: i32,
    ) -> Result<Category> {
        let mut category = Category::new(name.to_string(), slugify(name));
        category.views = views;
        category.likes = likes;
        self.repository.insert(&category).await?;
        Ok(category)
    }

    pub async fn count(&self) -> Result<i64> {
        self.repository.count().await
    }
}
