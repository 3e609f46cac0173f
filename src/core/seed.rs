//! Sample data for a fresh database.

use crate::core::error::Result;
use crate::features::categories::services::CategoryService;
use crate::features::pages::services::PageService;

struct SamplePage {
    title: &'static str,
    url: &'static str,
    views: i32,
}

struct SampleCategory {
    name: &'static str,
    views: i32,
    likes: i32,
    pages: &'static [SamplePage],
}

const SAMPLE_CATEGORIES: &[SampleCategory] = &[
    SampleCategory {
        name: "Python",
        views: 128,
        likes: 64,
        pages: &[
            SamplePage {
                title: "Official Python Tutorial",
                url: "http://docs.python.org/3/tutorial/",
                views: 32,
            },
            SamplePage {
                title: "How to Think like a Computer Scientist",
                url: "http://www.greenteapress.com/thinkpython/",
                views: 16,
            },
            SamplePage {
                title: "Learn Python in 10 Minutes",
                url: "http://www.korokithakis.net/tutorials/python/",
                views: 8,
            },
        ],
    },
    SampleCategory {
        name: "Django",
        views: 64,
        likes: 32,
        pages: &[
            SamplePage {
                title: "Official Django Tutorial",
                url: "https://docs.djangoproject.com/en/1.9/intro/tutorial01/",
                views: 64,
            },
            SamplePage {
                title: "Django Rocks",
                url: "http://www.djangorocks.com/",
                views: 4,
            },
            SamplePage {
                title: "How to Tango with Django",
                url: "http://www.tangowithdjango.com/",
                views: 128,
            },
        ],
    },
    SampleCategory {
        name: "Other Frameworks",
        views: 32,
        likes: 16,
        pages: &[
            SamplePage {
                title: "Bottle",
                url: "http://bottlepy.org/docs/dev/",
                views: 2,
            },
            SamplePage {
                title: "Flask",
                url: "http://flask.pocoo.org",
                views: 1,
            },
        ],
    },
];

/// Insert the sample categories and pages unless categories already exist.
///
/// Returns whether anything was inserted.
pub async fn seed_sample_data(categories: &CategoryService, pages: &PageService) -> Result<bool> {
    let existing = categories.count().await?;
    if existing > 0 {
        tracing::info!("Skipping sample data: {} categories already present", existing);
        return Ok(false);
    }

    for sample in SAMPLE_CATEGORIES {
        let category = categories
            .insert_with_counters(sample.name, sample.views, sample.likes)
            .await?;
        for page in sample.pages {
            pages
                .insert_with_views(&category, page.title, page.url, page.views)
                .await?;
        }
        tracing::info!(
            "Seeded category {} with {} pages",
            category.name,
            sample.pages.len()
        );
    }

    Ok(true)
}
