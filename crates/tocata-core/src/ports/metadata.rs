use std::path::Path;

use crate::domain::song::Song;

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
  #[error("io error: {0}")]
  Io(String),

  #[error("unsupported format: {0}")]
  Unsupported(String),

  #[error("corrupt metadata: {0}")]
  Corrupt(String),
}

/// Port que abstrae la lectura de metadatos desde un archivo de audio.
///
/// La implementación devuelve un registro candidato con el id sin asignar
/// (`SongId::UNASSIGNED`); la biblioteca decide el id definitivo cuando el
/// registro se añade. Para el núcleo ese candidato es una entrada normal de
/// `add_song` / `update_song`, nada más.
///
/// Implementaciones posibles:
/// - Lofty (la de `tocata-metadata`)
/// - FFmpeg
/// - Symphonia
pub trait MetadataExtractor {
  /// Extrae título, artista, álbum, género y duración formateada del archivo
  /// en `path`, o falla si no es un formato de audio reconocido.
  fn extract_from_path(&self, path: &Path) -> Result<Song, MetadataError>;
}
