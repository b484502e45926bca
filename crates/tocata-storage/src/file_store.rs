use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use tocata_config::atomic_write_str;
use tocata_core::domain::Song;
use tocata_core::ports::{SongStore, StoreError};

/// Documento TOML de la biblioteca: un array de tablas `[[songs]]`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct LibraryDocument {
  #[serde(default)]
  songs: Vec<Song>,
}

/// Adaptador de persistencia sobre un único archivo TOML.
///
/// Instantánea completa: `save` serializa todos los registros y reemplaza el
/// archivo entero mediante escribir-y-renombrar, de modo que una caída nunca
/// deja la biblioteca a medio escribir. `load` devuelve exactamente lo que
/// hay en disco, ordenado ascendentemente por id, con los huecos de la
/// secuencia intactos.
pub struct TomlSongStore {
  path: PathBuf,
}

impl TomlSongStore {
  /// Store sobre la ruta elegida por la configuración (`Settings`), que ya
  /// resuelve la ruta por defecto `<data>/library.toml`.
  pub fn at_path(path: impl Into<PathBuf>) -> Self {
    TomlSongStore { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl SongStore for TomlSongStore {
  fn load(&self) -> Result<Vec<Song>, StoreError> {
    let content = match fs::read_to_string(&self.path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!("library file {} not found, starting empty", self.path.display());
        return Ok(Vec::new());
      }
      Err(e) => return Err(e.into()),
    };

    let document: LibraryDocument = toml::from_str(&content)
      .map_err(|e| StoreError::Corrupt(format!("parse {}: {e}", self.path.display())))?;

    let mut songs = document.songs;
    songs.sort_by_key(|song| song.id);

    if let Some(unassigned) = songs.iter().find(|song| !song.id.is_assigned()) {
      return Err(StoreError::Corrupt(format!(
        "unassigned id on record '{}' in {}",
        unassigned.title,
        self.path.display()
      )));
    }
    for pair in songs.windows(2) {
      if pair[0].id == pair[1].id {
        return Err(StoreError::Corrupt(format!(
          "duplicate id {} in {}",
          pair[0].id,
          self.path.display()
        )));
      }
    }

    debug!("loaded {} songs from {}", songs.len(), self.path.display());
    Ok(songs)
  }

  fn save(&self, songs: &[Song]) -> Result<(), StoreError> {
    let mut ordered = songs.to_vec();
    ordered.sort_by_key(|song| song.id);
    let document = LibraryDocument { songs: ordered };

    let serialized =
      toml::to_string(&document).map_err(|e| StoreError::Corrupt(format!("encode library: {e}")))?;

    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent)?;
    }
    atomic_write_str(&self.path, &serialized)?;

    debug!("saved {} songs to {}", document.songs.len(), self.path.display());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;
  use tocata_core::domain::SongId;
  use tocata_core::services::SongLibrary;

  fn song(raw: u32, title: &str) -> Song {
    Song {
      id: SongId::from_raw(raw),
      title: title.to_string(),
      artist: "Bob".to_string(),
      album: "Fire".to_string(),
      genre: "cool".to_string(),
      length: "2:03".to_string(),
      filename: format!("/music/{title}.mp3"),
    }
  }

  #[test]
  fn missing_file_loads_empty() {
    let dir = tempdir().unwrap();
    let store = TomlSongStore::at_path(dir.path().join("library.toml"));
    assert!(store.load().unwrap().is_empty());
  }

  #[test]
  fn round_trip_preserves_fields_and_id_gaps() {
    let dir = tempdir().unwrap();
    let store = TomlSongStore::at_path(dir.path().join("library.toml"));

    let mut odd = song(5, "holes & edges");
    odd.genre = String::new(); // los campos vacíos también viajan tal cual
    odd.artist = "Björk".to_string();

    let snapshot = vec![song(1, "uno"), song(3, "tres"), odd.clone()];
    store.save(&snapshot).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, vec![song(1, "uno"), song(3, "tres"), odd]);
  }

  #[test]
  fn save_replaces_whole_snapshot() {
    let dir = tempdir().unwrap();
    let store = TomlSongStore::at_path(dir.path().join("library.toml"));

    store.save(&[song(1, "a"), song(2, "b"), song(3, "c")]).unwrap();
    store.save(&[song(2, "b")]).unwrap();

    assert_eq!(store.load().unwrap(), vec![song(2, "b")]);
  }

  #[test]
  fn save_orders_records_by_id() {
    let dir = tempdir().unwrap();
    let store = TomlSongStore::at_path(dir.path().join("library.toml"));

    store.save(&[song(7, "g"), song(2, "b"), song(5, "e")]).unwrap();

    let ids: Vec<u32> = store.load().unwrap().iter().map(|s| s.id.as_u32()).collect();
    assert_eq!(ids, vec![2, 5, 7]);
  }

  #[test]
  fn save_leaves_no_tmp_file_behind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("library.toml");
    let store = TomlSongStore::at_path(&path);

    store.save(&[song(1, "a")]).unwrap();
    assert!(!path.with_extension("tmp").exists());
  }

  #[test]
  fn unparsable_file_is_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("library.toml");
    fs::write(&path, "[[songs]]\nid = \"not a number\"\n").unwrap();

    let store = TomlSongStore::at_path(&path);
    assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
  }

  #[test]
  fn duplicate_ids_are_corrupt() {
    let dir = tempdir().unwrap();
    let store = TomlSongStore::at_path(dir.path().join("library.toml"));

    // El port garantiza ids únicos; un archivo editado a mano puede violarlo.
    store.save(&[song(1, "a")]).unwrap();
    let mut raw = fs::read_to_string(store.path()).unwrap();
    raw.push_str(&raw.clone());
    fs::write(store.path(), raw).unwrap();

    assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
  }

  #[test]
  fn unassigned_id_is_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("library.toml");
    fs::write(
      &path,
      "[[songs]]\nid = 0\ntitle = \"x\"\nartist = \"\"\nalbum = \"\"\ngenre = \"\"\nlength = \"\"\nfilename = \"\"\n",
    )
    .unwrap();

    let store = TomlSongStore::at_path(&path);
    assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
  }

  /// Ida y vuelta a través de la fachada completa: CRUD, `save`, y una
  /// biblioteca nueva que carga el mismo archivo ve el estado exacto.
  #[test]
  fn library_survives_save_and_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("library.toml");

    let library = SongLibrary::new(TomlSongStore::at_path(&path)).unwrap();
    let kept = library.add_song(song(0, "kept"));
    let doomed = library.add_song(song(0, "doomed"));
    library.add_song(song(0, "also kept"));
    assert!(library.delete_song(doomed));
    assert!(library.update_song(kept, song(0, "kept (edited)")));
    library.save().unwrap();

    let ids_before = library.ids();
    let songs_before = library.songs();

    let reloaded = SongLibrary::new(TomlSongStore::at_path(&path)).unwrap();
    assert_eq!(reloaded.ids(), ids_before);
    assert_eq!(reloaded.songs(), songs_before);
    assert!(!reloaded.is_dirty());

    // El máximo histórico se resiembra del máximo de la instantánea: el
    // siguiente id continúa la secuencia en vez de rellenar el hueco.
    let next = reloaded.add_song(song(0, "new session add"));
    assert_eq!(next.as_u32(), 4);
  }
}
