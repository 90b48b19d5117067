//! JSON file helpers for the ~/.megaforce/ data directory.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Resolves (and creates, if needed) the ~/.megaforce/ directory.
pub fn data_dir() -> io::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Could not determine home directory")
    })?;
    let dir = home.join(".megaforce");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(data_dir()?.join(filename))
}

/// Reads and deserializes a JSON file, erroring on anything unreadable or
/// malformed.
pub fn load_json<T: serde::de::DeserializeOwned>(filename: &str) -> io::Result<T> {
    let json = fs::read_to_string(save_path(filename)?)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Like [`load_json`], but a missing or corrupt file silently yields the
/// default value instead of an error.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    load_json(filename).unwrap_or_default()
}

/// Serializes a value as pretty JSON into the data directory.
pub fn save_json<T: serde::Serialize>(filename: &str, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(save_path(filename)?, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_created_under_home() {
        let dir = data_dir().expect("data_dir should succeed");
        assert!(dir.exists());
        assert!(dir.ends_with(".megaforce"));
    }

    #[test]
    fn test_save_path_joins_filename() {
        let path = save_path("test.json").expect("save_path should succeed");
        assert!(path.to_string_lossy().ends_with(".megaforce/test.json"));
    }

    #[test]
    fn test_missing_file_yields_default() {
        let val: Vec<String> = load_json_or_default("no_such_file_8271.json");
        assert!(val.is_empty());
    }

    #[test]
    fn test_write_then_read_back() {
        let data = vec!["morphin".to_string(), "time".to_string()];
        save_json("persistence_test.json", &data).expect("save should succeed");

        let loaded: Vec<String> = load_json("persistence_test.json").expect("load should succeed");
        assert_eq!(loaded, data);

        if let Ok(path) = save_path("persistence_test.json") {
            let _ = fs::remove_file(path);
        }
    }
}
