#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use tonejitter_image as image;

#[doc(inline)]
pub use tonejitter_augment as augment;
