//! Thumbnail encoding.
//!
//! The engine emits thumbnails as JPEG at a fixed quality target; the
//! declared mime type travels with the bytes so callers stay
//! format-agnostic.

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError, THUMBNAIL_MIME, THUMBNAIL_QUALITY};
