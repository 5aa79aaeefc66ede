//! Test configuration builder for writing config directories

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Builder for creating a config directory on disk
pub struct TestConfigBuilder {
    temp_dir: TempDir,
    main_toml: String,
    chains: Vec<(String, String)>,
}

/// Written config directory, removed when dropped
pub struct TestConfig {
    _temp_dir: TempDir,
    pub config_dir: PathBuf,
}

impl TestConfig {
    pub fn dir(&self) -> String {
        self.config_dir.display().to_string()
    }
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
            main_toml: String::new(),
            chains: Vec::new(),
        }
    }

    pub fn main(mut self, toml: &str) -> Self {
        self.main_toml = toml.to_string();
        self
    }

    /// Add a chain file with the given nodes in priority order
    pub fn chain(mut self, name: &str, chain_id: &str, validator: &str, nodes: &[&str]) -> Self {
        let mut content = format!(
            "[chain]\nchain_id = \"{}\"\nvalidator_address = \"{}\"\n",
            chain_id, validator
        );
        for node in nodes {
            content.push_str(&format!("\n[[nodes]]\nurl = \"{}\"\n", node));
        }
        self.chains.push((name.to_string(), content));
        self
    }

    /// Add a chain file with raw content
    pub fn raw_chain(mut self, name: &str, content: &str) -> Self {
        self.chains.push((name.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> TestConfig {
        let config_dir = self.temp_dir.path().join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        fs::write(config_dir.join("main.toml"), &self.main_toml).expect("Failed to write main.toml");

        for (name, content) in &self.chains {
            fs::write(config_dir.join(format!("{}.toml", name)), content)
                .expect("Failed to write chain config");
        }

        TestConfig {
            _temp_dir: self.temp_dir,
            config_dir,
        }
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
