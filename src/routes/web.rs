use axum::routing::get;

use super::table::{Middleware, RouteEntry, RouteTable};
use super::{
    appearance_page, dashboard, health_check, home, log_out, login, login_form, password_page,
    profile_page, two_factor_page,
};
use crate::configuration::FeatureSettings;

/// Assembles the application's route table.
///
/// Feature flags are consulted here, once, so every registered middleware
/// chain stays fixed for the life of the process.
pub fn web_routes(features: &FeatureSettings) -> RouteTable {
    let confirm_two_factor = features.two_factor_requires_password_confirmation();

    let mut table = RouteTable::new();

    table.add(RouteEntry::view("/", home).name("home"));
    table.add(RouteEntry::view("/health_check", health_check));
    table.add(RouteEntry::new("/login", get(login_form).post(login)).name("login"));
    // Deliberately unguarded: logging out of an already-anonymous session
    // must still succeed and redirect home.
    table.add(RouteEntry::action("/logout", log_out).name("logout"));

    table.add(
        RouteEntry::view("/dashboard", dashboard)
            .name("dashboard")
            .middleware(Middleware::Auth)
            .middleware(Middleware::Verified),
    );

    table.group(&[Middleware::Auth], |group| {
        group.add(RouteEntry::redirect("/settings", "/settings/profile"));
        group.add(RouteEntry::view("/settings/profile", profile_page).name("profile.edit"));
        group.add(RouteEntry::view("/settings/password", password_page).name("password.edit"));
        group.add(
            RouteEntry::view("/settings/appearance", appearance_page).name("appearance.edit"),
        );

        let mut two_factor =
            RouteEntry::view("/settings/two-factor", two_factor_page).name("two-factor.show");
        if confirm_two_factor {
            two_factor = two_factor.middleware(Middleware::ConfirmPassword);
        }
        group.add(two_factor);
    });

    table
}
