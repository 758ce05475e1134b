//! Post update builder.

use serde::Serialize;
use vv_core::enums::{Category, PostStatus};

#[derive(Debug, Clone, Default, Serialize)]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl PostUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.excerpt.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.image_url.is_none()
            && self.read_time.is_none()
            && self.tags.is_none()
    }
}

pub struct PostUpdateBuilder(PostUpdate);

impl PostUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(PostUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.0.excerpt = Some(excerpt.into());
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.0.content = Some(content.into());
        self
    }

    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.0.category = Some(category);
        self
    }

    #[must_use]
    pub const fn status(mut self, status: PostStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn image_url(mut self, image_url: Option<String>) -> Self {
        self.0.image_url = Some(image_url);
        self
    }

    #[must_use]
    pub const fn read_time(mut self, read_time: u32) -> Self {
        self.0.read_time = Some(read_time);
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.0.tags = Some(tags);
        self
    }

    #[must_use]
    pub fn build(self) -> PostUpdate {
        self.0
    }
}

impl Default for PostUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
