//! Author update builder.

use serde::Serialize;
use vv_core::entities::SocialLinks;

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expertise: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
}

impl AuthorUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.bio.is_none()
            && self.expertise.is_none()
            && self.avatar.is_none()
            && self.social_links.is_none()
    }
}

pub struct AuthorUpdateBuilder(AuthorUpdate);

impl AuthorUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(AuthorUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.0.bio = Some(bio.into());
        self
    }

    #[must_use]
    pub fn expertise(mut self, expertise: Option<String>) -> Self {
        self.0.expertise = Some(expertise);
        self
    }

    #[must_use]
    pub fn avatar(mut self, avatar: Option<String>) -> Self {
        self.0.avatar = Some(avatar);
        self
    }

    #[must_use]
    pub fn social_links(mut self, links: SocialLinks) -> Self {
        self.0.social_links = Some(links);
        self
    }

    #[must_use]
    pub fn build(self) -> AuthorUpdate {
        self.0
    }
}

impl Default for AuthorUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
