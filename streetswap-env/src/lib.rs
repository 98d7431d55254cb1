pub mod config;

pub use config::{
    default_config_path, initial_setup, query_user_for_initial_config, read_config, Config,
    ConfigNotInitialized, Contracts, Data, Network,
};
