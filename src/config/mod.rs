mod model;
mod persistence;

pub use model::{LayoutConfig, ReorderConfig, ScrollConfig, StripConfig};
pub use persistence::{config_base_dir, load_config, load_config_from, save_config};
