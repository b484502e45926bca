use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::ids::SongId;

/// La Canción (Song): los metadatos de una pista más la referencia a su
/// archivo de audio.
///
/// Es un tipo de valor puro: la igualdad es estructural (dos canciones son
/// iguales si y sólo si coinciden sus siete campos). Aquí no se valida nada;
/// cualquier campo de texto puede venir vacío y la biblioteca lo acepta tal
/// cual.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
  /// Identificador único dentro de la biblioteca; lo asigna la biblioteca al
  /// añadir el registro y es inmutable después.
  pub id: SongId,
  /// El título de la canción.
  pub title: String,
  /// El/los intérprete(s) principal(es).
  pub artist: String,
  /// El álbum al que pertenece la pista.
  pub album: String,
  /// Género como texto libre.
  pub genre: String,
  /// Duración ya formateada para mostrar (`m:ss`).
  pub length: String,
  /// Ruta al archivo de audio subyacente.
  pub filename: String,
}

impl fmt::Display for Song {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "id={} title={} artist={} album={} genre={} length={} filename={}",
      self.id, self.title, self.artist, self.album, self.genre, self.length, self.filename
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Song {
    Song {
      id: SongId::from_raw(3),
      title: "Best Song".to_string(),
      artist: "Bob".to_string(),
      album: "Fire".to_string(),
      genre: "cool".to_string(),
      length: "2:03".to_string(),
      filename: "test.mp3".to_string(),
    }
  }

  #[test]
  fn equality_is_structural() {
    assert_eq!(sample(), sample());

    let mut other = sample();
    other.genre = "jazz".to_string();
    assert_ne!(sample(), other);

    // El id también participa en la igualdad.
    let mut renumbered = sample();
    renumbered.id = SongId::from_raw(4);
    assert_ne!(sample(), renumbered);
  }

  #[test]
  fn display_renders_every_field() {
    let rendered = sample().to_string();
    for expected in ["id=3", "title=Best Song", "artist=Bob", "album=Fire", "length=2:03"] {
      assert!(rendered.contains(expected), "missing {expected} in {rendered}");
    }
  }
}
