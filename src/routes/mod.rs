mod dashboard;
mod health_check;
mod home;
mod login;
mod logout;
mod settings;
pub mod table;
mod web;

pub use dashboard::dashboard;
pub use health_check::health_check;
pub use home::home;
pub use login::{login, login_form};
pub use logout::log_out;
pub use settings::{appearance_page, password_page, profile_page, two_factor_page};
pub use web::web_routes;
