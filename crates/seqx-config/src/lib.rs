//! Settings loading and persistence for seqx.
//!
//! Settings live in a `settings.json` document next to the executable. The
//! file is self-healing: a missing, corrupt, or non-object document is
//! replaced with defaults, and keys absent from a loaded document are
//! backfilled from defaults with the merged result persisted. Keys this
//! tool does not recognize are preserved across rewrites.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{
    default_settings_path, load_or_init, Settings, ENV_SETTINGS_PATH, SETTINGS_FILENAME,
};
