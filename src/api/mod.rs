pub mod client;
pub mod traits;
pub mod wire;

pub use client::HttpPropertyApi;
pub use traits::PropertyApi;
