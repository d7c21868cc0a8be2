//! Topology command - print the effective landmark topology.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use symmetry_core::LandmarkTopology;

use crate::config::AppConfig;

/// Output format for the topology.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TopologyFormat {
    /// TOML `[landmarks]` section, ready to paste into a config file
    #[default]
    Toml,
    /// JSON object
    Json,
}

/// Arguments for the topology command
#[derive(Args)]
pub struct TopologyArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: TopologyFormat,
}

#[derive(Serialize)]
struct LandmarksSection<'a> {
    landmarks: &'a LandmarkTopology,
}

/// Run the topology command.
pub fn run(args: &TopologyArgs, config: &AppConfig) -> Result<()> {
    let topology = config.landmarks.topology();
    topology
        .validate()
        .context("Invalid landmark topology")?;

    print!("{}", render(&topology, args.format)?);
    Ok(())
}

fn render(topology: &LandmarkTopology, format: TopologyFormat) -> Result<String> {
    match format {
        TopologyFormat::Toml => toml::to_string(&LandmarksSection {
            landmarks: topology,
        })
        .context("Failed to serialize topology as TOML"),
        TopologyFormat::Json => {
            let mut json = serde_json::to_string_pretty(topology)
                .context("Failed to serialize topology as JSON")?;
            json.push('\n');
            Ok(json)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_roundtrips_through_config() {
        let text = render(&LandmarkTopology::media_pipe(), TopologyFormat::Toml).unwrap();
        assert!(text.starts_with("[landmarks]"));

        let config: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(config.landmarks.topology(), LandmarkTopology::media_pipe());
    }

    #[test]
    fn test_json_layout() {
        let text = render(&LandmarkTopology::media_pipe(), TopologyFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["eyes"], serde_json::json!([33, 133]));
        assert_eq!(value["contour"].as_array().unwrap().len(), 17);
    }

    #[test]
    fn test_invalid_config_topology_fails() {
        let config: AppConfig = toml::from_str("[landmarks]\neye_top = []").unwrap();
        let args = TopologyArgs {
            format: TopologyFormat::Json,
        };
        let err = run(&args, &config).unwrap_err();
        assert!(format!("{err:#}").contains("eye_top"));
    }
}
