//! # Project Catalog
//!
//! Author-supplied list of projects shown in the gallery, with the category filter and the
//! filter pills derived from it.

mod error;

pub use error::{CatalogError, CatalogErrorExt};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Filter value selecting every project.
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// One filter pill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub label: String,
    pub count: usize,
}

impl CategoryCount {
    fn all(label: &str, count: usize) -> Self {
        Self { value: ALL.to_owned(), label: label.to_owned(), count }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    #[must_use]
    pub const fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// Parses a JSON array of projects.
    ///
    /// # Errors
    /// Returns [`CatalogError::Parse`] when the document is not a valid project array.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let projects: Vec<Project> =
            serde_json::from_str(json).context("Expected a JSON array of projects")?;
        debug!(projects = projects.len(), "Project catalog parsed");
        Ok(Self { projects })
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn featured(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.featured).collect()
    }

    /// Projects in `filter`'s category, or every project for [`ALL`].
    #[must_use]
    pub fn filtered(&self, filter: &str) -> Vec<&Project> {
        if filter == ALL {
            return self.projects.iter().collect();
        }
        self.projects.iter().filter(|p| p.category == filter).collect()
    }

    /// The "all" pill followed by one pill per category, in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryCount> {
        if self.projects.is_empty() {
            return vec![CategoryCount::all("All Projects", 0)];
        }

        let mut pills = vec![CategoryCount::all("All", self.projects.len())];
        let categories =
            self.projects.iter().map(|p| p.category.as_str()).filter(|c| !c.is_empty());

        for category in categories {
            match pills.iter_mut().skip(1).find(|pill| pill.value == category) {
                Some(pill) => pill.count += 1,
                None => pills.push(CategoryCount {
                    value: category.to_owned(),
                    label: category_label(category),
                    count: 1,
                }),
            }
        }

        pills
    }
}

/// Display label of a category value.
#[must_use]
pub fn category_label(category: &str) -> String {
    match category {
        "fullstack" => "Full Stack".to_owned(),
        "frontend" => "Frontend".to_owned(),
        "backend" => "Backend".to_owned(),
        other => {
            let mut chars = other.chars();
            chars
                .next()
                .map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
        },
    }
}
