//! # Binding Resolver
//!
//! Decides, for every field of an HTTP request message, which part of the
//! request it is read from and which struct tags the generated type carries.
//!
//! ## Precedence
//!
//! 1. A top-level field named by a path placeholder is always `uri`. An explicit
//!    location other than `URI` on such a field is a `ConflictingBinding`.
//! 2. Otherwise the first present of: the field's own `location`, its oneof's
//!    `default_location`, the message's `default_location`, and the method's
//!    implicit default (`body` for verbs carrying the whole message, `query`
//!    otherwise).
//!
//! ## Tags
//!
//! Tags are built in a fixed order and rendered Go struct-tag style:
//!
//! ```text
//! json:"wire"      only for body fields
//! <loc>:"wire"     uri / query / header / form, replaced by an explicit `tag`
//! <auto tags>      field auto_tags, else oneof default, else message default
//! ```
//!
//! A key appearing twice is a `DuplicateTagKey`.

mod resolve;
mod tags;

pub use resolve::{
    implicit_default, resolve_field, resolve_message, BindingContext, BindingError, FieldBinding,
    LocationSource,
};
pub use tags::{parse_fragment, Tag, TagSet};
