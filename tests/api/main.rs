mod health_check;
mod helpers;
mod home;
mod login;
mod settings;
