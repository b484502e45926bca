mod io;
mod paths;
mod settings;

pub use io::atomic_write_str;
pub use paths::{ConfigError, TocataPaths};
pub use settings::Settings;

use once_cell::sync::Lazy;

// Singleton de paths (portable / system)
pub static PATHS: Lazy<TocataPaths> = Lazy::new(|| TocataPaths::detect().expect("failed to init TocataPaths"));
