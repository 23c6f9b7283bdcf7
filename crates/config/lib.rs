use serde::Deserialize;
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// Values read from `.crime-stat.yml`. Every key is optional; command line
/// flags take precedence over anything set here.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input: Option<String>,
    pub separator: Option<char>,
    pub crime_type: Option<String>,
    pub community_area: Option<i64>,
    pub top: Option<usize>,
}

impl Config {
    /// Read the config file, or return an empty config when it does not exist.
    pub fn new<P: AsRef<Path>>(filename: P) -> Result<Config, Box<dyn Error>> {
        let path = filename.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let reader = File::open(path)?;
        let config: Config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Config, Box<dyn Error>> {
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_config() {
        let content = r##"input: data/crimes.csv
separator: ";"
crime_type: BATTERY
community_area: 8
top: 5
"##;
        let config = Config::from_yaml(content).unwrap();
        println!("{:?}", config);
        assert_eq!(config.input.as_deref(), Some("data/crimes.csv"));
        assert_eq!(config.separator, Some(';'));
        assert_eq!(config.crime_type.as_deref(), Some("BATTERY"));
        assert_eq!(config.community_area, Some(8));
        assert_eq!(config.top, Some(5));
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_yaml("crime_type: THEFT\n").unwrap();
        assert_eq!(config.crime_type.as_deref(), Some("THEFT"));
        assert_eq!(config.input, None);
        assert_eq!(config.community_area, None);
    }

    #[test]
    fn test_unknown_key() {
        assert!(Config::from_yaml("repos: []\n").is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().join(".crime-stat.yml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".crime-stat.yml");
        std::fs::write(&path, "top: 3\ncommunity_area: 0\n").unwrap();
        let config = Config::new(&path).unwrap();
        assert_eq!(config.top, Some(3));
        assert_eq!(config.community_area, Some(0));
    }
}
