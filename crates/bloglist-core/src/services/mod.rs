//! Application services built on top of the ports.

mod blog;
mod owner_lock;
mod user;

pub use blog::BlogService;
pub use user::UserService;
