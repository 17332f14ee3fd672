//! Application constants
//!
//! Centralized location for placeholder strings and configuration defaults.

/// Shown as the nickname until the account watcher supplies the real one
pub const NICKNAME_PLACEHOLDER: &str = "用户昵称加载中...";

/// Shown for a balance amount or timestamp that has not been loaded yet
pub const BALANCE_PLACEHOLDER: &str = "-";

/// Format used when stamping a freshly loaded balance
pub const BALANCE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "scry-market";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Default log file written by the viewer
pub const DEFAULT_LOG_FILE: &str = "scry-market.log";

/// Application name
pub const APP_NAME: &str = "Scry Market";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
