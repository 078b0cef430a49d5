//! Editor form input and the validated publish payload.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categories an author can publish under.
pub const CATEGORIES: &[&str] = &["Frontend", "Backend", "Terminal", "Design", "Database"];

/// Why a form cannot be published. Checked before any store call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Please enter a title and content.")]
    MissingTitleOrContent,
    #[error("Please fill in the description.")]
    MissingDescription,
    #[error("Read time must be at least one minute.")]
    InvalidReadTime,
}

/// Raw editor form, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftForm {
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: String,
    /// Comma separated.
    pub tags: String,
    pub read_time_minutes: u32,
}

impl Default for DraftForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            content: String::new(),
            category: CATEGORIES[0].to_string(),
            tags: String::new(),
            read_time_minutes: 5,
        }
    }
}

impl DraftForm {
    /// Form prefilled with a short markdown tour, shown on a fresh editor.
    pub fn starter() -> Self {
        Self {
            title: "Introduction to Markdown".to_string(),
            content: STARTER_CONTENT.to_string(),
            ..Self::default()
        }
    }
}

const STARTER_CONTENT: &str = "# Introduction

Welcome to the new post editor. This is a live preview of what you are typing.

## Features

- **Markdown** support
- Live preview side-by-side
- Syntax highlighting for code blocks

> Code is like humor. When you have to explain it, it's bad.

### Code Example

```
const greet = (name) => {
  console.log(`Hello, ${name}!`);
};
```
";

/// Publish payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    description: String,
    content: String,
    category: String,
    tags: Vec<String>,
    read_time_minutes: u32,
}

impl PostDraft {
    /// Validates and normalizes a form.
    ///
    /// Title, description and content are trimmed; tags are split on commas
    /// with blanks dropped.
    ///
    /// # Errors
    ///
    /// - [`DraftError::MissingTitleOrContent`] if title or content is blank
    /// - [`DraftError::MissingDescription`] if description is blank
    /// - [`DraftError::InvalidReadTime`] if read time is zero
    pub fn from_form(form: &DraftForm) -> Result<Self, DraftError> {
        let title = form.title.trim();
        let content = form.content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(DraftError::MissingTitleOrContent);
        }

        let description = form.description.trim();
        if description.is_empty() {
            return Err(DraftError::MissingDescription);
        }

        if form.read_time_minutes == 0 {
            return Err(DraftError::InvalidReadTime);
        }

        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
            content: content.to_string(),
            category: form.category.clone(),
            tags: parse_tags(&form.tags),
            read_time_minutes: form.read_time_minutes,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn read_time_minutes(&self) -> u32 {
        self.read_time_minutes
    }
}

impl TryFrom<&DraftForm> for PostDraft {
    type Error = DraftError;

    fn try_from(form: &DraftForm) -> Result<Self, Self::Error> {
        Self::from_form(form)
    }
}

fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
