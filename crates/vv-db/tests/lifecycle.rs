//! End-to-end lifecycle tests across repos:
//! - Draft -> publish round-trip through the public listings
//! - Application approval producing an author, a notification, and a role
//! - Comment submission under both moderation policies
//! - Fail-closed gating for anonymous and under-privileged sessions

use vv_config::ContentConfig;
use vv_core::entities::{NewApplication, NewPost};
use vv_core::enums::{ApplicationStatus, Category, CommentStatus, NotificationKind, PostStatus, Role};
use vv_core::identity::Identity;
use vv_db::VvDb;
use vv_db::error::StoreError;
use vv_db::service::VvService;
use vv_db::updates::post::PostUpdateBuilder;

fn admin_identity() -> Identity {
    Identity {
        uid: "user_admin".into(),
        email: "admin@voicesandviewpoints.com".into(),
        name: "Admin".into(),
        role: Role::Admin,
    }
}

async fn admin_service() -> VvService {
    let db = VvDb::open_local(":memory:").await.unwrap();
    VvService::from_db(db, ContentConfig::default(), Some(admin_identity()))
}

fn new_post(author_id: &str, title: &str) -> NewPost {
    NewPost {
        title: title.into(),
        excerpt: "Excerpt".into(),
        content: "Body".into(),
        author_id: author_id.into(),
        category: Category::Art,
        image_url: None,
        read_time: 4,
        tags: vec![],
    }
}

fn jo_lee_application() -> NewApplication {
    NewApplication {
        name: "Jo Lee".into(),
        email: "jo@x.com".into(),
        bio: "Essayist.".into(),
        writing_experience: "5 years".into(),
        preferred_categories: vec![Category::Art],
        sample_title: "T".into(),
        sample_excerpt: "E".into(),
        motivation: None,
        user_id: Some("user_jo".into()),
    }
}

// ---------------------------------------------------------------------------
// Post lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn draft_publish_round_trip() {
    let svc = admin_service().await;
    let author = svc
        .create_author("Jo Lee", "jo@x.com", "Bio", None, None, Default::default())
        .await
        .unwrap();

    let draft = svc
        .create_post(new_post(&author.id, "Round trip"), PostStatus::Draft)
        .await
        .unwrap();
    assert!(svc.list_featured(10).await.unwrap().is_empty());

    svc.update_post(
        &draft.id,
        PostUpdateBuilder::new().status(PostStatus::Published).build(),
    )
    .await
    .unwrap();

    let featured = svc.list_featured(10).await.unwrap();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].id, draft.id);
    assert_eq!(featured[0].title, "Round trip");
    assert_eq!(featured[0].content, "Body");
}

// ---------------------------------------------------------------------------
// Application lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn approval_scenario_produces_exactly_one_author_and_notification() {
    let svc = admin_service().await;
    svc.upsert_user_profile("user_jo", "jo@x.com", "Jo", Role::User)
        .await
        .unwrap();

    let app = svc.submit_application(jo_lee_application()).await.unwrap();
    assert_eq!(app.status, ApplicationStatus::Pending);

    let author = svc.approve_application(&app.id).await.unwrap();
    assert_eq!(author.name, "Jo Lee");
    assert_eq!(author.email, "jo@x.com");
    assert_eq!(author.posts_count, 0);

    let decided = svc.get_application(&app.id).await.unwrap();
    assert_eq!(decided.status, ApplicationStatus::Approved);

    let notifications = svc.list_notifications("user_jo").await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::ApplicationApproved);

    // The stored role caught up with the approval.
    assert_eq!(svc.get_user_role("user_jo").await.unwrap(), Some(Role::Author));

    // Re-deciding adds nothing.
    assert!(matches!(
        svc.approve_application(&app.id).await,
        Err(StoreError::InvalidTransition(_))
    ));
    assert_eq!(svc.list_authors().await.unwrap().len(), 1);
    assert_eq!(svc.list_notifications("user_jo").await.unwrap().len(), 1);
}

#[tokio::test]
async fn approved_author_can_publish_under_their_new_record() {
    let svc = admin_service().await;
    let app = svc.submit_application(jo_lee_application()).await.unwrap();
    let author = svc.approve_application(&app.id).await.unwrap();

    svc.create_post(new_post(&author.id, "First byline"), PostStatus::Published)
        .await
        .unwrap();

    let posts = svc.list_by_author(&author.id).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].author_name, "Jo Lee");
    assert_eq!(svc.get_author(&author.id).await.unwrap().posts_count, 1);
}

// ---------------------------------------------------------------------------
// Comment lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn comment_instant_publish_end_to_end() {
    let svc = admin_service().await;
    let author = svc
        .create_author("Jo Lee", "jo@x.com", "Bio", None, None, Default::default())
        .await
        .unwrap();
    let post = svc
        .create_post(new_post(&author.id, "Post"), PostStatus::Published)
        .await
        .unwrap();

    svc.add_comment(&post.id, "Al", "Nice post", None)
        .await
        .unwrap();
    let visible = svc.list_approved(&post.id).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].author, "Al");
    assert_eq!(visible[0].status, CommentStatus::Approved);
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

#[tokio::test]
async fn anonymous_session_is_fail_closed_on_admin_surfaces() {
    let db = VvDb::open_local(":memory:").await.unwrap();
    let svc = VvService::from_db(db, ContentConfig::default(), None);

    // Anonymous visitors may still submit.
    let app = svc.submit_application(NewApplication {
        user_id: None,
        ..jo_lee_application()
    })
    .await
    .unwrap();

    // Every gated surface denies before leaking any state.
    assert!(matches!(
        svc.list_applications().await,
        Err(StoreError::AccessDenied { .. })
    ));
    assert!(matches!(
        svc.approve_application(&app.id).await,
        Err(StoreError::AccessDenied { .. })
    ));
    assert!(matches!(
        svc.list_all_posts().await,
        Err(StoreError::AccessDenied { .. })
    ));
    assert!(matches!(
        svc.list_comments().await,
        Err(StoreError::AccessDenied { .. })
    ));

    // And the application is still untouched.
    assert_eq!(
        svc.get_application(&app.id).await.unwrap().status,
        ApplicationStatus::Pending
    );
}

#[tokio::test]
async fn author_session_cannot_decide_applications() {
    let db = VvDb::open_local(":memory:").await.unwrap();
    let svc = VvService::from_db(
        db,
        ContentConfig::default(),
        Some(Identity {
            uid: "user_writer".into(),
            email: "writer@example.com".into(),
            name: "Writer".into(),
            role: Role::Author,
        }),
    );

    let app = svc.submit_application(jo_lee_application()).await.unwrap();
    assert!(matches!(
        svc.approve_application(&app.id).await,
        Err(StoreError::AccessDenied { .. })
    ));
    assert!(matches!(
        svc.reject_application(&app.id, None).await,
        Err(StoreError::AccessDenied { .. })
    ));
}
