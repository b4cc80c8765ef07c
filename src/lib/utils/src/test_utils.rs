use config::PathType;
use std::path::PathBuf;

/// Sets a single key of a toml config file for the duration of a test.
/// The original file is written back when this is dropped.
pub struct AlteredToml {
    p_type: PathType,
    original: String,
    config_dir: PathBuf,
}

impl AlteredToml {
    /// Replace the value of the top level `key` with `value`, which must already be valid toml
    /// (e.g. `"10"` or `"\"text\""`).
    ///
    /// Panics if the file cannot be read or written, or if the key is not present.
    pub fn new(key: &str, value: &str, p_type: PathType, config_dir: PathBuf) -> Self {
        let path = p_type.get_path(&config_dir);
        let original = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Unable to read {}: {}", path.to_string_lossy(), e));

        let mut found = false;
        let altered: Vec<String> = original
            .lines()
            .map(|line| match line.split_once('=') {
                Some((k, _)) if k.trim() == key => {
                    found = true;
                    format!("{} = {}", key, value)
                }
                _ => line.to_owned(),
            })
            .collect();

        if !found {
            panic!("Key {} not found in {}", key, path.to_string_lossy());
        }

        std::fs::write(&path, altered.join("\n") + "\n")
            .unwrap_or_else(|e| panic!("Unable to write {}: {}", path.to_string_lossy(), e));

        AlteredToml {
            p_type,
            original,
            config_dir,
        }
    }
}

impl Drop for AlteredToml {
    fn drop(&mut self) {
        let path = self.p_type.get_path(&self.config_dir);
        std::fs::write(&path, &self.original).unwrap_or_else(|e| {
            panic!(
                "Unable to reset file {} after test due to error {}",
                path.to_string_lossy(),
                e
            )
        })
    }
}
