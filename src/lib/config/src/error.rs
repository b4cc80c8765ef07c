use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(PathBuf, std::io::Error),
    /// The config file is not valid toml.
    Parse(PathBuf, toml::de::Error),
    /// A key was found in neither the environment nor the config file.
    Missing(String),
    /// A key was found, but could not be converted into the expected type.
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            ConfigError::Io(ref p, _) => write!(f, "unable to read {}", p.to_string_lossy()),
            ConfigError::Parse(ref p, _) => write!(f, "unable to parse {}", p.to_string_lossy()),
            ConfigError::Missing(ref k) => {
                write!(f, "{} not found in environment or config file", k)
            }
            ConfigError::InvalidValue(ref k) => write!(f, "{} has an invalid value", k),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Self::Io(_, ref e) => Some(e),
            Self::Parse(_, ref e) => Some(e),
            _ => None,
        }
    }
}
