mod handler;
mod model;

pub use handler::{categories, create_item, delete_item, get_item, list_items};
pub use model::{GalleryItem, GalleryListResponse, GalleryStore, NewGalleryItem};
