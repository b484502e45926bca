use std::path::Path;
use std::time::Duration;

use lofty::error::{ErrorKind, LoftyError};
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::prelude::Accessor;
use lofty::read_from_path;
use lofty::tag::Tag;
use log::debug;

use tocata_core::domain::{Song, SongId};
use tocata_core::ports::{MetadataError, MetadataExtractor};

/// Extractor de metadatos basado en `lofty`.
///
/// Produce un registro candidato (id sin asignar) a partir de los tags del
/// archivo: título, artista, álbum, género y la duración ya formateada. Si
/// falta el título se usa el nombre del archivo, que siempre es mejor que
/// una cadena vacía en la lista de canciones.
#[derive(Clone)]
pub struct LoftyProbe;

impl LoftyProbe {
  pub fn new() -> Self {
    Self
  }
}

impl Default for LoftyProbe {
  fn default() -> Self {
    Self::new()
  }
}

impl MetadataExtractor for LoftyProbe {
  fn extract_from_path(&self, path: &Path) -> Result<Song, MetadataError> {
    let tagged_file = read_from_path(path).map_err(|e| map_read_error(e, path))?;

    let primary_tag = tagged_file.primary_tag();
    let tags = tagged_file.tags();

    let title = first_non_empty(primary_tag, tags, |tag| tag.title().map(|value| value.into_owned()))
      .unwrap_or_else(|| {
        path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("Unknown Title").to_string()
      });
    let artist =
      first_non_empty(primary_tag, tags, |tag| tag.artist().map(|value| value.into_owned())).unwrap_or_default();
    let album =
      first_non_empty(primary_tag, tags, |tag| tag.album().map(|value| value.into_owned())).unwrap_or_default();
    let genre =
      first_non_empty(primary_tag, tags, |tag| tag.genre().map(|value| value.into_owned())).unwrap_or_default();

    let length = format_length(tagged_file.properties().duration());

    debug!("extracted tags from {}: title={title} artist={artist}", path.display());

    Ok(Song {
      id: SongId::UNASSIGNED,
      title,
      artist,
      album,
      genre,
      length,
      filename: path.to_string_lossy().into_owned(),
    })
  }
}

/// Primer valor no vacío según `get`, mirando primero el tag primario y
/// después el resto de tags del archivo.
fn first_non_empty<F>(primary_tag: Option<&Tag>, tags: &[Tag], mut get: F) -> Option<String>
where
  F: FnMut(&Tag) -> Option<String>,
{
  primary_tag
    .into_iter()
    .chain(tags.iter())
    .find_map(|tag| get(tag).map(|value| value.trim().to_string()).filter(|value| !value.is_empty()))
}

fn map_read_error(err: LoftyError, path: &Path) -> MetadataError {
  match err.kind() {
    ErrorKind::UnknownFormat => {
      MetadataError::Unsupported(format!("{} is not a recognized audio file", path.display()))
    }
    ErrorKind::Io(io_err) => MetadataError::Io(io_err.to_string()),
    _ => MetadataError::Corrupt(err.to_string()),
  }
}

/// Formato de duración para mostrar: `m:ss` (p. ej. `3:05`).
fn format_length(duration: Duration) -> String {
  let total_secs = duration.as_secs();
  format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
