use anyhow::{anyhow, Result};
use config::Config;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

pub struct EcobaseConfig {
    /// Path to the directory holding the ecobase database file
    pub data_dir: String,
}

const EMPTY_CONFIG: &str = r#"### ecobase configuration file

### directory for the ecobase backend database
# data_dir = "~/.ecobase"
"#;

impl Default for EcobaseConfig {
    fn default() -> Self {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());

        Self {
            data_dir: format!("{}/.ecobase", home_dir),
        }
    }
}

impl EcobaseConfig {
    /// Function to create and initialize a new configuration
    pub fn new(path: &Option<String>) -> Result<EcobaseConfig> {
        let mut builder = Config::builder();

        // By default use $HOME/.ecobase/ecobase.toml as the configuration file path
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not find home directory"))?
            .to_str()
            .ok_or_else(|| anyhow!("Could not convert home directory path to string"))?
            .to_owned();

        let ecobase_dir = format!("{}/.ecobase", home_dir.as_str());

        // Add in toml configuration file
        match path {
            Some(p) => {
                let path = Path::new(p.as_str());
                if path.exists() {
                    let path_str = path
                        .to_str()
                        .ok_or_else(|| anyhow!("Could not convert path to string"))?;
                    builder = builder.add_source(config::File::with_name(path_str));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file: {}", e))?;
                }
            }
            None => {
                std::fs::create_dir_all(ecobase_dir.as_str())
                    .map_err(|e| anyhow!("Unable to create ecobase directory: {}", e))?;
                let p = format!("{}/ecobase.toml", ecobase_dir.as_str());
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG).map_err(|e| {
                        anyhow!("Unable to create config file {}: {}", p.as_str(), e)
                    })?;
                }
            }
        }

        // Add in settings from the environment (with a prefix of ECOBASE)
        // E.g., `ECOBASE_DATA_DIR=/var/lib/ecobase ./ecobase` would set the data directory
        builder = builder.add_source(config::Environment::with_prefix("ECOBASE"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        // Parse data directory
        let data_dir = match config.get("data_dir") {
            Some(p) => {
                let path = Path::new(p);
                path.to_str()
                    .ok_or_else(|| anyhow!("Could not convert data_dir path to string"))?
                    .to_string()
            }
            None => {
                std::fs::create_dir_all(ecobase_dir.as_str())
                    .map_err(|e| anyhow!("Unable to create data directory: {}", e))?;
                ecobase_dir
            }
        };

        Ok(EcobaseConfig { data_dir })
    }

    /// Get the path to the SQLite database file
    pub fn sqlite_path(&self) -> String {
        let data_dir = self.data_dir.trim_end_matches('/');
        format!("{}/ecobase-backend.sqlite3", data_dir)
    }

    /// Get the config file path
    pub fn config_file_path() -> String {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| "~".to_string());
        format!("{}/.ecobase/ecobase.toml", home_dir)
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        let lines = [
            format!("Data Directory:     {}", self.data_dir),
            format!("SQLite Path:        {}", self.sqlite_path()),
        ];
        lines.join("\n")
    }
}

// =============================================================================
// Database Info (used by the CLI status output)
// =============================================================================

/// Information about the SQLite database
#[derive(Debug, Serialize, Clone)]
pub struct SqliteDatabaseInfo {
    pub path: String,
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    pub schema_initialized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initialized_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbon_calculation_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_calculation_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_count: Option<u64>,
}

impl SqliteDatabaseInfo {
    /// Human-readable status lines
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Database Path:      {}", self.path),
            format!("Exists:             {}", self.exists),
        ];
        if let Some(size) = self.size_bytes {
            lines.push(format!("Size:               {}", format_size(size)));
        }
        lines.push(format!(
            "Schema Initialized: {}",
            self.schema_initialized
        ));
        if let Some(version) = self.schema_version {
            lines.push(format!("Schema Version:     {}", version));
        }
        if let Some(ts) = &self.initialized_at {
            lines.push(format!("Initialized At:     {}", ts));
        }
        for (label, count) in [
            ("Users:", self.user_count),
            ("Products:", self.product_count),
            ("Carbon Calcs:", self.carbon_calculation_count),
            ("Energy Calcs:", self.energy_calculation_count),
            ("Payments:", self.payment_count),
            ("Bookings:", self.booking_count),
        ] {
            if let Some(c) = count {
                lines.push(format!("{:19} {}", label, c));
            }
        }
        lines.join("\n")
    }
}

/// Get SQLite database information for the given database path
///
/// Opens the database read-style (no DDL is executed) and reports schema
/// status and per-table row counts.
pub fn get_sqlite_info(sqlite_path: &str) -> SqliteDatabaseInfo {
    use crate::database::{DatabaseConn, SchemaManager, SchemaStatus};

    let exists = Path::new(sqlite_path).exists();
    let size_bytes = if exists {
        std::fs::metadata(sqlite_path).ok().map(|m| m.len())
    } else {
        None
    };

    let mut info = SqliteDatabaseInfo {
        path: sqlite_path.to_string(),
        exists,
        size_bytes,
        schema_initialized: false,
        schema_version: None,
        initialized_at: None,
        user_count: None,
        product_count: None,
        carbon_calculation_count: None,
        energy_calculation_count: None,
        payment_count: None,
        booking_count: None,
    };

    if !exists {
        return info;
    }

    let db = match DatabaseConn::open_path(sqlite_path) {
        Ok(db) => db,
        Err(_) => return info,
    };

    let manager = SchemaManager::new(&db.conn);
    let initialized = matches!(manager.check_status(), Ok(SchemaStatus::Current));
    info.schema_initialized = initialized;

    if !initialized {
        return info;
    }

    info.schema_version = manager.get_schema_version().ok();
    info.initialized_at = manager
        .get_meta_updated_at("schema_version")
        .ok()
        .flatten()
        .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string());

    info.user_count = db.table_count("users").ok();
    info.product_count = db.table_count("products").ok();
    info.carbon_calculation_count = db.table_count("carbon_calculations").ok();
    info.energy_calculation_count = db.table_count("energy_calculations").ok();
    info.payment_count = db.table_count("payments").ok();
    info.booking_count = db.table_count("bookings").ok();

    info
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::EcobaseDatabase;

    #[test]
    fn test_paths() {
        let config = EcobaseConfig {
            data_dir: "/test/dir".to_string(),
        };

        assert_eq!(config.sqlite_path(), "/test/dir/ecobase-backend.sqlite3");
    }

    #[test]
    fn test_trailing_slash_in_data_dir() {
        let config = EcobaseConfig {
            data_dir: "/test/dir/".to_string(),
        };

        assert_eq!(config.sqlite_path(), "/test/dir/ecobase-backend.sqlite3");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1048576), "1.00 MB");
        assert_eq!(format_size(1073741824), "1.00 GB");
    }

    #[test]
    fn test_sqlite_info_missing_file() {
        let info = get_sqlite_info("/nonexistent/ecobase-backend.sqlite3");
        assert!(!info.exists);
        assert!(!info.schema_initialized);
        assert_eq!(info.user_count, None);
    }

    #[test]
    fn test_sqlite_info_after_bootstrap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir
            .path()
            .join("ecobase-backend.sqlite3")
            .to_string_lossy()
            .to_string();

        {
            let db = EcobaseDatabase::open(&path).unwrap();
            db.connection()
                .execute(
                    "INSERT INTO users (username, email, password_hash) VALUES ('alice', 'alice@example.com', 'h')",
                    [],
                )
                .unwrap();
        }

        let info = get_sqlite_info(&path);
        assert!(info.exists);
        assert!(info.schema_initialized);
        assert_eq!(info.schema_version, Some(crate::database::SCHEMA_VERSION));
        assert_eq!(info.user_count, Some(1));
        assert_eq!(info.booking_count, Some(0));
        assert!(info.initialized_at.is_some());

        // summary should render without panicking and mention the path
        assert!(info.summary().contains("ecobase-backend.sqlite3"));
    }
}
