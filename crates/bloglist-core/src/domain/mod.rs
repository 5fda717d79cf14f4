//! Domain entities - the core business objects.

mod user;

mod blog;

pub use blog::{Blog, BlogWithCreator, CreateBlogInput, CreatorSummary, UpdateBlogInput};
pub use user::{LoginOutcome, NewUserInput, Principal, User, UserWithBlogs};
