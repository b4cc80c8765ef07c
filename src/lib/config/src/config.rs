//! Configuration module for the api. This handles the loading and parsing of configuration options for the api.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use rocket::{
    error,
    fairing::AdHoc,
    http::Status,
    info,
    request::{self, FromRequest},
    Request,
};

use crate::error::ConfigError;

/// The default location of all config files on the system, used when `CONFIG_PATH` is not set.
pub const CONFIG_LOCATION: &str = "./config";

/// The different config paths we can load from
#[derive(Debug, Clone, Copy)]
pub enum PathType {
    General,
}

impl PathType {
    pub fn get_path(&self, base: &Path) -> PathBuf {
        let name = match *self {
            PathType::General => "general",
        };

        base.join(format!("{}.toml", name))
    }
}

/// Opens a toml file and returns its top level table.
fn load_table(file_path: &Path) -> Result<toml::value::Table, ConfigError> {
    let data = std::fs::read_to_string(file_path)
        .map_err(|e| ConfigError::Io(file_path.to_path_buf(), e))?;
    let value = data
        .parse::<toml::Value>()
        .map_err(|e| ConfigError::Parse(file_path.to_path_buf(), e))?;

    match value {
        toml::Value::Table(t) => Ok(t),
        _ => Err(ConfigError::InvalidValue(file_path.to_string_lossy().into_owned())),
    }
}

/// A macro to load a single configuration value.
///
/// Attempts to load from multiple sources falling back in this order:
/// 1. Load from environment
/// 2. Load from the provided toml table (usually `./config/general.toml`)
/// 3. `ConfigError::Missing`
///
/// **Example**
/// ```rust,ignore
///     let num_shoes: usize = load_env!(&table, "NUMBER_SHOES", usize)?;
///     assert_eq!(num_shoes, 5);
/// ```
/// Environment values are converted with `str::parse`, toml values with `toml::Value::try_into`.
macro_rules! load_env {
    () => {
        compile_error!("String must be provided to load_env macro!");
    };
    ($table:expr, $arg:tt, $type:ty) => {{
        fn load_val(table: &toml::value::Table) -> Result<$type, ConfigError> {
            use std::env::var;
            let env_name: &str = $arg;

            //1. Attempt to load from env
            if let Ok(d) = var(env_name) {
                return d
                    .trim()
                    .parse::<$type>()
                    .map_err(|_| ConfigError::InvalidValue(String::from(env_name)));
            }

            //2. Attempt to load from the config file
            match table.get(env_name) {
                Some(v) => v
                    .clone()
                    .try_into::<$type>()
                    .map_err(|_| ConfigError::InvalidValue(String::from(env_name))),
                //3. Failure
                None => Err(ConfigError::Missing(String::from(env_name))),
            }
        }

        load_val($table)
    }};
    ($table:expr, $arg:tt) => {
        compile_error!("Type Not provided to macro!");
    };
}

/// Image media types may be supplied in the environment as a comma separated list.
fn load_allowed_image_types(table: &toml::value::Table) -> Result<HashSet<String>, ConfigError> {
    const KEY: &str = "ALLOWED_IMAGE_TYPES";

    if let Ok(d) = std::env::var(KEY) {
        return Ok(d
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect());
    }

    let types = table
        .get(KEY)
        .ok_or_else(|| ConfigError::Missing(String::from(KEY)))?
        .as_array()
        .ok_or_else(|| ConfigError::InvalidValue(String::from(KEY)))?;

    let mut res = HashSet::default();
    for t in types {
        let string = t
            .as_str()
            .ok_or_else(|| ConfigError::InvalidValue(String::from(KEY)))?
            .to_lowercase();
        res.insert(string);
    }

    Ok(res)
}

#[derive(Debug, Clone)]
pub struct Config {
    /// The name of the api which is sent with certain requests.
    api_name: String,

    /// Prefix used when building short links, e.g. `https://example.com`.
    base_url: String,

    /// The shortest password the generator will produce.
    password_length_min: usize,

    /// The longest password the generator will produce.
    password_length_max: usize,

    /// The maximum number of color stops in a gradient.
    gradient_max_stops: usize,

    /// The largest csv or json document accepted for conversion.
    csv_max_input_bytes: usize,

    /// The largest markdown document accepted for rendering.
    markdown_max_input_bytes: usize,

    /// The largest image accepted for data uri encoding.
    image_max_size_bytes: u64,

    /// The media types accepted for data uri encoding.
    allowed_image_types: HashSet<String>,

    /// The longest regex pattern accepted by the tester.
    regex_max_pattern_length: usize,

    /// Upper bound on the compiled size of a regex.
    regex_size_limit_bytes: usize,

    /// Number of characters in a generated short code.
    short_code_length: usize,

    /// How long the redirect page waits before sending the visitor home.
    redirect_delay_seconds: u64,
}

impl Config {
    /// Load the configuration from `general.toml` in the provided directory.
    pub fn new(config_dir: PathBuf) -> Result<Self, ConfigError> {
        let table = load_table(&PathType::General.get_path(&config_dir))?;

        let cfg = Self {
            api_name: load_env!(&table, "API_NAME", String)?,
            base_url: load_env!(&table, "BASE_URL", String)?
                .trim_end_matches('/')
                .to_owned(),
            password_length_min: load_env!(&table, "PASSWORD_LENGTH_MIN", usize)?,
            password_length_max: load_env!(&table, "PASSWORD_LENGTH_MAX", usize)?,
            gradient_max_stops: load_env!(&table, "GRADIENT_MAX_STOPS", usize)?,
            csv_max_input_bytes: load_env!(&table, "CSV_MAX_INPUT_BYTES", usize)?,
            markdown_max_input_bytes: load_env!(&table, "MARKDOWN_MAX_INPUT_BYTES", usize)?,
            image_max_size_bytes: load_env!(&table, "IMAGE_MAX_SIZE_BYTES", u64)?,
            allowed_image_types: load_allowed_image_types(&table)?,
            regex_max_pattern_length: load_env!(&table, "REGEX_MAX_PATTERN_LENGTH", usize)?,
            regex_size_limit_bytes: load_env!(&table, "REGEX_SIZE_LIMIT_BYTES", usize)?,
            short_code_length: load_env!(&table, "SHORT_CODE_LENGTH", usize)?,
            redirect_delay_seconds: load_env!(&table, "REDIRECT_DELAY_SECONDS", u64)?,
        };

        if cfg.password_length_min > cfg.password_length_max {
            return Err(ConfigError::InvalidValue(String::from("PASSWORD_LENGTH_MIN")));
        }
        if cfg.gradient_max_stops < 2 {
            return Err(ConfigError::InvalidValue(String::from("GRADIENT_MAX_STOPS")));
        }
        if cfg.short_code_length == 0 {
            return Err(ConfigError::InvalidValue(String::from("SHORT_CODE_LENGTH")));
        }

        Ok(cfg)
    }

    /// Load the configuration from the directory named by `CONFIG_PATH`, or `./config`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let dir = std::env::var("CONFIG_PATH").unwrap_or_else(|_| String::from(CONFIG_LOCATION));
        Config::new(PathBuf::from(dir))
    }
}

//TODO make a getter macro which can automatically generate all these
#[allow(non_snake_case)]
impl Config {
    pub fn API_NAME(&self) -> &str {
        &self.api_name
    }

    pub fn BASE_URL(&self) -> &str {
        &self.base_url
    }

    pub fn PASSWORD_LENGTH_MIN(&self) -> usize {
        self.password_length_min
    }

    pub fn PASSWORD_LENGTH_MAX(&self) -> usize {
        self.password_length_max
    }

    pub fn GRADIENT_MAX_STOPS(&self) -> usize {
        self.gradient_max_stops
    }

    pub fn CSV_MAX_INPUT_BYTES(&self) -> usize {
        self.csv_max_input_bytes
    }

    pub fn MARKDOWN_MAX_INPUT_BYTES(&self) -> usize {
        self.markdown_max_input_bytes
    }

    pub fn IMAGE_MAX_SIZE_BYTES(&self) -> u64 {
        self.image_max_size_bytes
    }

    pub fn ALLOWED_IMAGE_TYPES(&self) -> &HashSet<String> {
        &self.allowed_image_types
    }

    pub fn REGEX_MAX_PATTERN_LENGTH(&self) -> usize {
        self.regex_max_pattern_length
    }

    pub fn REGEX_SIZE_LIMIT_BYTES(&self) -> usize {
        self.regex_size_limit_bytes
    }

    pub fn SHORT_CODE_LENGTH(&self) -> usize {
        self.short_code_length
    }

    pub fn REDIRECT_DELAY_SECONDS(&self) -> u64 {
        self.redirect_delay_seconds
    }
}

impl Config {
    pub fn fairing() -> AdHoc {
        AdHoc::try_on_ignite("Custom Configuration Loader", |rocket| {
            Box::pin(async move {
                match Config::from_env() {
                    Ok(config) => {
                        info!("configuration loaded for {}", config.API_NAME());
                        Ok(rocket.manage(config))
                    }
                    Err(e) => {
                        error!("failed to load configuration: {}", e);
                        Err(rocket)
                    }
                }
            })
        })
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for &'r Config {
    type Error = ();
    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, ()> {
        match req.rocket().state::<Config>() {
            Some(state) => request::Outcome::Success(state),
            None => {
                error!("configuration requested but the fairing is not attached");
                request::Outcome::Error((Status::InternalServerError, ()))
            }
        }
    }
}
