use std::{
    env,
    fmt::{Debug, Display},
    fs::read_to_string,
    path::PathBuf,
    str::FromStr,
};

use tracing::{info, warn};

/// Compatibility fallback for deployments that never set a secret.
const DEFAULT_ADMIN_PASSWORD: &str = "000728";

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub static_dir: PathBuf,
    pub admin_password: String,
    pub strict_writes: bool,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", 3000),
            data_path: try_load("DICTIONARY_PATH", PathBuf::from("dictionary.json")),
            static_dir: try_load(
                "STATIC_DIR",
                PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
            ),
            admin_password: read_secret("ADMIN_PASSWORD"),
            strict_writes: try_load("STRICT_WRITES", false),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        info!("{key} not set, using default");
    })
}

fn try_load<T: FromStr + Debug>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    match var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default:?}");
            default
        }),
        Err(()) => default,
    }
}

fn read_secret(secret_name: &str) -> String {
    if let Ok(secret) = env::var(secret_name) {
        return secret;
    }

    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|e| {
            warn!("Failed to read {secret_name} from {path}: {e}, falling back to built-in secret");
            DEFAULT_ADMIN_PASSWORD.to_string()
        })
}
