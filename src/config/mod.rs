//! Configuration management for the simulator

pub mod settings;

pub use settings::{
    Settings, GridConfig, ControllerConfig, OutputConfig, OutputFormat, CliOverrides
};
