use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub features: FeatureSettings,
    pub bootstrap_user: BootstrapUserSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    /// Signs session and flash cookies. Must be at least 64 bytes long.
    pub session_secret: Secret<String>,
}

/// Capability flags consulted once, when the route table is assembled.
/// Changing them afterwards requires a process restart.
#[derive(serde::Deserialize, Clone, Copy, Debug)]
pub struct FeatureSettings {
    pub two_factor_authentication: bool,
    pub two_factor_confirm_password: bool,
}

impl FeatureSettings {
    /// Whether the two-factor settings page must sit behind the password
    /// re-confirmation middleware.
    pub fn two_factor_requires_password_confirmation(&self) -> bool {
        self.two_factor_authentication && self.two_factor_confirm_password
    }
}

/// The initial account registered at startup so a fresh deployment is not
/// locked out.
#[derive(serde::Deserialize, Clone)]
pub struct BootstrapUserSettings {
    pub username: String,
    pub password: Secret<String>,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");
    let environment_filename = format!("{}.yaml", environment.as_str());
    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
