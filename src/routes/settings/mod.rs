mod appearance;
mod password;
mod profile;
mod two_factor;

pub use appearance::appearance_page;
pub use password::password_page;
pub use profile::profile_page;
pub use two_factor::two_factor_page;
