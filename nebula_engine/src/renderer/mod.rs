/// Renderer module - textures, views, attribute queries and backend adapters

pub mod texture;
pub mod texture_view;
pub mod attribute;
pub mod backend;
pub mod null_backend;

pub use texture::*;
pub use texture_view::*;
pub use attribute::*;
pub use backend::*;
pub use null_backend::*;
