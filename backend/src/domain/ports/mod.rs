//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod password_hasher;
mod post_repository;
mod posts_command;
mod posts_query;
mod user_registration;
mod user_repository;

pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostPersistenceError, PostRepository};
#[cfg(test)]
pub use posts_command::MockPostsCommand;
pub use posts_command::{CreatePostRequest, DeletePostRequest, PostsCommand, UpdatePostRequest};
#[cfg(test)]
pub use posts_query::MockPostsQuery;
pub use posts_query::PostsQuery;
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::UserRegistration;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
