// SPDX-License-Identifier: Apache-2.0

/// Registry layout conventions. Injected so the engine carries no
/// hard-coded path strings.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Path prefix under which step definitions live.
    pub steps_root: String,
    /// File name of a step definition.
    pub step_file_name: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            steps_root: "steps/".to_string(),
            step_file_name: "step.yml".to_string(),
        }
    }
}

/// Rewrite rules mapping a public repository web URL to the hosting
/// REST API.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub web_base_url: String,
    pub api_base_url: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            web_base_url: "https://github.com/".to_string(),
            api_base_url: "https://api.github.com/repos/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CheckConfig {
    pub registry: RegistryConfig,
    pub host: HostConfig,
}
