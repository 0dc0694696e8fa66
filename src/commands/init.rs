use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# socindex configuration

[index]
# Indicator columns combined into the index
features = []
# Column the feature weights are correlated against
# reference = "income"
# Column used to label rows in reports
# id_column = "state"

[split]
test_fraction = 0.3
seed = 42

[output]
default_format = "terminal"
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

/// Write the default configuration into `dir`, returning its path
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_file;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses() {
        let temp = TempDir::new().unwrap();
        let path = init_config_in(temp.path(), false).unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.split_config().seed, 42);
        assert_eq!(config.split_config().test_fraction.get(), 0.3);
        assert_eq!(config.default_format(), Some("terminal"));
        assert!(config.index_request(None, None, None).is_none());
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        init_config_in(temp.path(), false).unwrap();

        assert!(init_config_in(temp.path(), false).is_err());
        assert!(init_config_in(temp.path(), true).is_ok());
    }
}
