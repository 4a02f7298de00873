//! # Path Template Module
//!
//! Translates IDL path templates into the router-native pattern syntax the
//! generated registration tables use.
//!
//! ## Syntax
//!
//! | IDL template                 | Router pattern         | Bound names  |
//! |------------------------------|------------------------|--------------|
//! | `/users/{user_id}`           | `/users/:user_id`      | `user_id`    |
//! | `/files/{file_path=**}`      | `/files/*file_path`    | `file_path`  |
//! | `/static/{path=assets/**}`   | `/static/assets/*path` | `path`       |
//! | `/api/{version=v1}/users`    | `/api/v1/users`        | none         |
//! | `/orgs/{org.id}`             | `/orgs/:org_id`        | `org_id`     |
//!
//! A dotted placeholder keeps its field path (`["org", "id"]`) so the decode
//! contract can fill the nested request field.
//!
//! ## Example
//!
//! ```rust
//! use routegen::path::translate;
//!
//! let t = translate("/files/{file_path=**}", 8).unwrap();
//! assert_eq!(t.pattern(), "/files/*file_path");
//! assert!(t.catch_all().is_some());
//! ```

mod template;

pub use template::{shape, translate, PathBinding, PathError, PathTemplate, Segment};

#[cfg(test)]
mod tests;
