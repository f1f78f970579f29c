mod handler;
mod model;

pub use handler::{send_message, test_config};
pub use model::{ContactRequest, ContactResponse};
