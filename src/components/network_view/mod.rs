mod component;
pub mod config;
pub mod error;
pub mod model;
mod render;
pub mod scale;
pub mod simulation;
pub mod state;
pub mod types;

pub use component::{NetworkView, mount};
pub use config::{LayoutOptions, NetworkConfig};
pub use error::NetworkError;
pub use types::{KinaseInfo, NestedProtein, NetworkData, ProteinInfo};
