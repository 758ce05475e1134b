//! ID prefix constants.
//!
//! Every entity id is `"<prefix>-<8 hex chars>"`, generated by the store
//! (see `vv-db`). Prefixes keep ids self-describing in logs and URLs.

pub const PREFIX_POST: &str = "pst";
pub const PREFIX_AUTHOR: &str = "aut";
pub const PREFIX_COMMENT: &str = "cmt";
pub const PREFIX_APPLICATION: &str = "apl";
pub const PREFIX_NOTIFICATION: &str = "ntf";
pub const PREFIX_SUBSCRIBER: &str = "sub";
