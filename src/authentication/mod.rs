mod guard;
mod middleware;
mod password;
mod store;

pub use guard::Guard;
pub use middleware::{
    reject_anonymous_users, reject_unverified_users, require_recent_password_confirmation, UserId,
};
pub use password::{validate_credentials, AuthError, Credentials};
pub use store::{User, UserStore};
