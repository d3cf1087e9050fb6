//! Snapscan Host
//!
//! This crate holds the vocabulary shared by every hardware capability the
//! capture workflow talks to. The capabilities themselves (camera, location,
//! storage, gallery) live in their own `snapscan-host-*` crates and depend on
//! these types so that an image captured by one capability can be handed to
//! another without conversion.

mod image;
mod permission;

pub use image::ImageHandle;
pub use permission::PermissionStatus;
