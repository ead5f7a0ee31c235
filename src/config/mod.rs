//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML/JSON)
//!     → loader.rs (parse, convert to ConfigValue)
//!     → tree.rs (ConfigTree, immutable)
//!     → reader.rs (ConfigReader trait, typed accessors)
//!     → options/ (typed settings)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new tree
//!     → options/ re-extracts settings
//!     → atomic swap of Arc<ServerSettings>
//!     → subscribers receive the new settings
//! ```
//!
//! # Design Decisions
//! - Trees are immutable once loaded; changes require full reload
//! - Null in a source document means "not set"
//! - Errors carry the full dotted key path

pub mod loader;
pub mod reader;
pub mod tree;
pub mod value;
pub mod watcher;

pub use loader::{load_config, load_settings, parse_config, ConfigFormat, LoadError};
pub use reader::{ConfigError, ConfigReader};
pub use tree::ConfigTree;
pub use value::ConfigValue;
pub use watcher::ConfigWatcher;
