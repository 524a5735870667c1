#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use warpix_image as image;

#[doc(inline)]
pub use warpix_transform as transform;
