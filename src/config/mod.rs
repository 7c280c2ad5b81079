use rocket::Config as RocketConfig;
use rocket::figment::providers::{Env, Format, Serialized, Toml};
use rocket::figment::{Figment, Profile};
use serde::{Deserialize, Deserializer};

use crate::guards::{BearerCredential, CookieCredential, CredentialSource};

pub const DEFAULT_PORT: u16 = 3000;

/// Raw (unprefixed) environment variables the server understands.
const RAW_ENV: &[&str] = &[
    "port",
    "access_token_secret",
    "token_ttl_hours",
    "token_cookie",
    "token_source",
    "db_user",
    "db_password",
    "db_cluster",
    "db_name",
    "mongodb_uri",
    "cors_origins",
];

pub struct Config;

impl Config {
    /// Rocket's own layering (defaults, `Rocket.toml`, `ROCKET_*`) with the
    /// application's plain environment variables merged on top.
    pub fn figment() -> Figment {
        let profile = Profile::from_env_or("ROCKET_PROFILE", RocketConfig::DEFAULT_PROFILE);

        Figment::from(RocketConfig::default())
            .merge(Serialized::default("port", DEFAULT_PORT))
            .merge(Toml::file(Env::var_or("ROCKET_CONFIG", "Rocket.toml")).nested())
            .merge(Env::prefixed("ROCKET_").ignore(&["PROFILE"]).global())
            .merge(Env::raw().only(RAW_ENV).global())
            .select(profile)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSource {
    Cookie,
    Bearer,
}

/// Application settings, extracted once at ignition and managed as state.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub access_token_secret: String,

    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    #[serde(default = "default_token_cookie")]
    pub token_cookie: String,

    #[serde(default = "default_token_source")]
    pub token_source: TokenSource,

    pub mongodb_uri: Option<String>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,

    #[serde(default = "default_db_cluster")]
    pub db_cluster: String,

    #[serde(default = "default_db_name")]
    pub db_name: String,

    /// A list, or one comma-separated string as `CORS_ORIGINS` usually is.
    #[serde(default = "default_cors_origins", deserialize_with = "origin_list")]
    pub cors_origins: Vec<String>,
}

fn default_token_ttl_hours() -> i64 {
    10
}

fn default_token_cookie() -> String {
    "token".to_string()
}

fn default_token_source() -> TokenSource {
    TokenSource::Cookie
}

fn default_db_cluster() -> String {
    "cluster1.vnja0wm.mongodb.net".to_string()
}

fn default_db_name() -> String {
    "tourServicesDB".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "https://travello-local-guide.web.app".to_string(),
        "https://travello-local-guide.firebaseapp.com".to_string(),
    ]
}

fn origin_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Origins {
        List(Vec<String>),
        Joined(String),
    }

    let origins = match Origins::deserialize(deserializer)? {
        Origins::List(list) => list,
        Origins::Joined(joined) => joined.split(',').map(str::to_string).collect(),
    };

    Ok(origins
        .into_iter()
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect())
}

impl AppConfig {
    /// Explicit `MONGODB_URI` wins; otherwise an Atlas URI is assembled from
    /// the credential variables, falling back to a local server.
    pub fn mongodb_uri(&self) -> String {
        if let Some(uri) = &self.mongodb_uri {
            return uri.clone();
        }

        match (&self.db_user, &self.db_password) {
            (Some(user), Some(password)) => format!(
                "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
                user, password, self.db_cluster
            ),
            _ => "mongodb://localhost:27017".to_string(),
        }
    }

    pub fn credential_source(&self) -> Box<dyn CredentialSource> {
        match self.token_source {
            TokenSource::Cookie => Box::new(CookieCredential::new(&self.token_cookie)),
            TokenSource::Bearer => Box::new(BearerCredential),
        }
    }

    pub fn allows_origin(&self, origin: &str) -> bool {
        self.cors_origins.iter().any(|allowed| allowed == origin)
    }
}
