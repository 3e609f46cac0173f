use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::models::Category;
use crate::features::pages::dtos::PageFormDto;
use crate::features::pages::models::Page;
use crate::features::pages::repositories::PageRepository;
use crate::shared::constants::TOP_PAGES_LIMIT;
use crate::shared::forms::FormErrors;

/// Outcome of submitting the "add page" form
#[derive(Debug)]
pub enum CreatePageOutcome {
    Created(Page),
    Invalid(FormErrors),
}

/// Service for page operations
pub struct PageService {
    repository: Arc<dyn PageRepository>,
}

impl PageService {
    pub fn new(repository: Arc<dyn PageRepository>) -> Self {
        Self { repository }
    }

    /// The most viewed pages, for the index page
    pub async fn top_pages(&self) -> Result<Vec<Page>> {
        self.repository.top_by_views(TOP_PAGES_LIMIT).await
    }

    pub async fn list_for_category(&self, category: &Category) -> Result<Vec<Page>> {
        self.repository.list_by_category(category.id).await
    }

    /// Validate the form; returns the errors to show, if any
    pub fn validate(&self, form: &PageFormDto) -> FormErrors {
        match validator::Validate::validate(form) {
            Ok(()) => FormErrors::new(),
            Err(e) => e.into(),
        }
    }

    /// Save a new page under `category` with zero views
    pub async fn create(&self, category: &Category, form: &PageFormDto) -> Result<CreatePageOutcome> {
        let errors = self.validate(form);
        if !errors.is_empty() {
            return Ok(CreatePageOutcome::Invalid(errors));
        }

        let page = Page::new(category.id, form.title.clone(), form.url.clone());
        self.repository.insert(&page).await?;
        tracing::info!(
            "Page created: id={}, category={}",
            page.id,
            category.slug
        );

        Ok(CreatePageOutcome::Created(page))
    }

    /// Insert a page with a preset view count (sample data)
    pub async fn insert_with_views(
        &self,
        category: &Category,
        title: &str,
        url: &str,
        views: i32,
    ) -> Result<Page> {
        let mut page = Page::new(category.id, title.to_string(), url.to_string());
        page.views = views;
        self.repository.insert(&page).await?;
        Ok(page)
    }
}
