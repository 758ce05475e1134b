//! Shared test utilities for vv-db tests.

pub(crate) mod helpers {
    use vv_config::ContentConfig;
    use vv_core::entities::{Author, NewPost, Post, SocialLinks};
    use vv_core::enums::{Category, PostStatus, Role};
    use vv_core::identity::Identity;

    use crate::VvDb;
    use crate::service::VvService;

    pub fn admin_identity() -> Identity {
        Identity {
            uid: "user_admin".into(),
            email: "admin@voicesandviewpoints.com".into(),
            name: "Admin".into(),
            role: Role::Admin,
        }
    }

    pub fn author_identity() -> Identity {
        Identity {
            uid: "user_author".into(),
            email: "writer@example.com".into(),
            name: "Writer".into(),
            role: Role::Author,
        }
    }

    pub fn user_identity() -> Identity {
        Identity {
            uid: "user_plain".into(),
            email: "reader@example.com".into(),
            name: "Reader".into(),
            role: Role::User,
        }
    }

    /// In-memory service with no session (anonymous visitor).
    pub async fn anon_service() -> VvService {
        let db = VvDb::open_local(":memory:").await.unwrap();
        VvService::from_db(db, ContentConfig::default(), None)
    }

    /// In-memory service with an admin session and default policy.
    pub async fn admin_service() -> VvService {
        let db = VvDb::open_local(":memory:").await.unwrap();
        VvService::from_db(db, ContentConfig::default(), Some(admin_identity()))
    }

    /// In-memory service with an author-role session.
    pub async fn author_service() -> VvService {
        let db = VvDb::open_local(":memory:").await.unwrap();
        VvService::from_db(db, ContentConfig::default(), Some(author_identity()))
    }

    /// In-memory service with a plain user session.
    pub async fn user_service() -> VvService {
        let db = VvDb::open_local(":memory:").await.unwrap();
        VvService::from_db(db, ContentConfig::default(), Some(user_identity()))
    }

    /// In-memory admin service with a specific content policy.
    pub async fn admin_service_with_policy(policy: ContentConfig) -> VvService {
        let db = VvDb::open_local(":memory:").await.unwrap();
        VvService::from_db(db, policy, Some(admin_identity()))
    }

    /// Create an author for tests that need one to hang posts off.
    pub async fn seed_author(svc: &VvService) -> Author {
        svc.create_author(
            "Sarah Chen",
            "sarah@example.com",
            "Writes about art and culture.",
            Some("Art history"),
            None,
            SocialLinks::default(),
        )
        .await
        .unwrap()
    }

    /// Create a post for the given author.
    pub async fn seed_post(svc: &VvService, author_id: &str, status: PostStatus) -> Post {
        svc.create_post(
            NewPost {
                title: "The Quiet Return of the Woodcut".into(),
                excerpt: "A revival in printmaking.".into(),
                content: "Long-form body text.".into(),
                author_id: author_id.to_string(),
                category: Category::Art,
                image_url: None,
                read_time: 7,
                tags: vec!["printmaking".into()],
            },
            status,
        )
        .await
        .unwrap()
    }
}
