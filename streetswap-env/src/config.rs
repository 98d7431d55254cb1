use anyhow::{Context, Result};
use config::ConfigError;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use streetswap_eth::Address;
use streetswap_fs::{ensure_directory_exists, system_data_dir};
use tracing::info;
use url::Url;

// Lisk Sepolia deployment
const DEFAULT_CHAIN_ID: u64 = 4202;
const DEFAULT_RPC_URL: &str = "https://rpc.sepolia-api.lisk.com";
const DEFAULT_BLOCK_EXPLORER_URL: &str = "https://sepolia-blockscout.lisk.com";
const DEFAULT_FAUCET_URL: &str = "https://faucet.lisk.com";

const DEFAULT_NGN_TOKEN: &str = "0xca51E513ED59eC15592C9E9672b7F31C9bD20c6a";
const DEFAULT_ARS_TOKEN: &str = "0xbebcA094FaF7cED5239c63bE318E1d5C0DefF8Ea";
const DEFAULT_GHS_TOKEN: &str = "0xD0C1F10D3632C0f4A5021209421eA476797cFd77";
const DEFAULT_USDC_TOKEN: &str = "0x698da064496CE35DC5FB63E06CF1B19Ef4076e71";
const DEFAULT_ORACLE: &str = "0x736b667295d2F18489Af1548082c86fd4C3750E5";
const DEFAULT_HOOK: &str = "0x09ACf156789F81E854c4aE594f16Ec1E241d97aD";
const DEFAULT_HOOK_DEPLOYER: &str = "0x655204fc0Be886ef5f96Ade62F76b1B240a7d953";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub data: Data,
    pub network: Network,
    pub contracts: Contracts,
}

impl Config {
    pub fn read<D>(config_file: D) -> Result<Self, ConfigError>
    where
        D: AsRef<OsStr>,
    {
        let config_file = Path::new(&config_file);

        config::Config::builder()
            .add_source(config::File::from(config_file))
            .build()?
            .try_deserialize()
    }

    pub fn testnet() -> Result<Self> {
        Ok(Config {
            data: Data {
                dir: system_data_dir()?,
            },
            network: Network::lisk_sepolia(),
            contracts: Contracts::lisk_sepolia(),
        })
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Data {
    pub dir: PathBuf,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Network {
    pub chain_id: u64,
    pub rpc_url: Url,
    pub block_explorer_url: Url,
    pub faucet_url: Url,
}

impl Network {
    pub fn lisk_sepolia() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            rpc_url: DEFAULT_RPC_URL.parse().expect("static url to be valid"),
            block_explorer_url: DEFAULT_BLOCK_EXPLORER_URL
                .parse()
                .expect("static url to be valid"),
            faucet_url: DEFAULT_FAUCET_URL.parse().expect("static url to be valid"),
        }
    }

    /// Explorer link for a transaction, where the user verifies the
    /// on-chain record of a swap.
    pub fn explorer_tx_url(&self, tx_hash: &str) -> Result<Url> {
        self.block_explorer_url
            .join(&format!("tx/{}", tx_hash))
            .context("Failed to build explorer url")
    }
}

/// Addresses of the deployed contracts this system talks to.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Contracts {
    pub ngn_token: Address,
    pub ars_token: Address,
    pub ghs_token: Address,
    pub usdc_token: Address,
    pub oracle: Address,
    pub hook: Address,
    pub hook_deployer: Address,
}

impl Contracts {
    pub fn lisk_sepolia() -> Self {
        let parse = |s: &str| s.parse().expect("static address to be valid");

        Self {
            ngn_token: parse(DEFAULT_NGN_TOKEN),
            ars_token: parse(DEFAULT_ARS_TOKEN),
            ghs_token: parse(DEFAULT_GHS_TOKEN),
            usdc_token: parse(DEFAULT_USDC_TOKEN),
            oracle: parse(DEFAULT_ORACLE),
            hook: parse(DEFAULT_HOOK),
            hook_deployer: parse(DEFAULT_HOOK_DEPLOYER),
        }
    }

    /// Token contract for a currency code, if we know the currency.
    pub fn token(&self, code: &str) -> Option<Address> {
        match code {
            "NGN" => Some(self.ngn_token),
            "ARS" => Some(self.ars_token),
            "GHS" => Some(self.ghs_token),
            "USDC" => Some(self.usdc_token),
            _ => None,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy)]
#[error("config not initialized")]
pub struct ConfigNotInitialized {}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(system_data_dir()?.join("config.toml"))
}

pub fn read_config(config_path: PathBuf) -> Result<Result<Config, ConfigNotInitialized>> {
    if config_path.exists() {
        info!(
            "Using config file at default path: {}",
            config_path.display()
        );
    } else {
        return Ok(Err(ConfigNotInitialized {}));
    }

    let file = Config::read(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    Ok(Ok(file))
}

pub fn initial_setup<F>(config_path: PathBuf, config_file: F) -> Result<()>
where
    F: Fn() -> Result<Config>,
{
    info!("Config file not found, running initial setup...");
    ensure_directory_exists(config_path.as_path())?;
    let initial_config = config_file()?;

    let toml = toml::to_string(&initial_config)?;
    fs::write(&config_path, toml)?;

    info!(
        "Initial setup complete, config file created at {} ",
        config_path.as_path().display()
    );
    Ok(())
}

pub fn query_user_for_initial_config() -> Result<Config> {
    println!();
    let data_dir: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter data directory or hit return to use default")
        .default(
            system_data_dir()?
                .to_str()
                .context("Unsupported characters in default path")?
                .to_string(),
        )
        .interact_text()?;
    let data_dir = data_dir.as_str().parse()?;

    let rpc_url: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter JSON-RPC URL or hit return to use default")
        .default(DEFAULT_RPC_URL.to_owned())
        .interact_text()?;
    let rpc_url = Url::parse(rpc_url.as_str())?;

    let block_explorer_url: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter block explorer URL or hit return to use default")
        .default(DEFAULT_BLOCK_EXPLORER_URL.to_owned())
        .interact_text()?;
    let block_explorer_url = Url::parse(block_explorer_url.as_str())?;

    let hook: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter hook contract address or hit return to use default")
        .default(DEFAULT_HOOK.to_owned())
        .interact_text()?;
    let hook = hook.parse::<Address>()?;
    println!();

    Ok(Config {
        data: Data { dir: data_dir },
        network: Network {
            chain_id: DEFAULT_CHAIN_ID,
            rpc_url,
            block_explorer_url,
            faucet_url: DEFAULT_FAUCET_URL.parse()?,
        },
        contracts: Contracts {
            hook,
            ..Contracts::lisk_sepolia()
        },
    })
}
