use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use toml_edit::DocumentMut;

use crate::io::atomic_write_str;
use crate::paths::ConfigError;
use crate::PATHS;

/// Configuración persistente del shell (`tocata.toml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Ruta del archivo de biblioteca. Por defecto `<data>/library.toml`.
  pub library_file: PathBuf,
  /// Volumen inicial del reproductor (0.0 – 1.0).
  pub volume: f32,
}

impl Default for Settings {
  fn default() -> Self {
    Settings { library_file: PATHS.library_file(), volume: 1.0 }
  }
}

impl Settings {
  /// Carga la configuración desde la ruta estándar; si el archivo no existe
  /// todavía, devuelve los valores por defecto.
  pub fn load() -> Result<Self, ConfigError> {
    Self::load_from(&PATHS.config_file())
  }

  pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
    let content = match fs::read_to_string(path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
      Err(e) => return Err(e.into()),
    };

    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    self.save_to(&PATHS.config_file())
  }

  /// Guarda preservando comentarios: se reescriben sólo las claves, el resto
  /// del documento (comentarios, espaciado) queda como estaba.
  pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
    let mut doc: DocumentMut = match fs::read_to_string(path) {
      Ok(content) => {
        content.parse::<DocumentMut>().map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?
      }
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    let fresh: DocumentMut = toml::to_string(self)
      .map_err(|e| ConfigError::Other(format!("encode settings: {e}")))?
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse encoded settings: {e}")))?;

    for (key, item) in fresh.iter() {
      doc[key] = item.clone();
    }

    atomic_write_str(path, &doc.to_string())?;
    Ok(())
  }
}
