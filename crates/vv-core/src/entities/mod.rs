//! Entity structs for all platform domain objects.
//!
//! Each entity maps to a table in the libSQL database (see `vv-db`). All
//! structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod application;
mod author;
mod comment;
mod notification;
mod post;
mod subscriber;
mod user;

pub use application::{AuthorApplication, NewApplication};
pub use author::{Author, SocialLinks};
pub use comment::Comment;
pub use notification::{Notification, NotificationData};
pub use post::{NewPost, Post};
pub use subscriber::Subscriber;
pub use user::UserProfile;
