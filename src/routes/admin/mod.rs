mod handler;
mod model;

pub use handler::{change_password, login, logout, profile, stats};
pub use model::{AdminProfile, AdminUser, LoginRequest, LoginResponse, MessageResponse};
