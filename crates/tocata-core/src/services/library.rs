use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::{Song, SongId};
use crate::errors::CoreError;
use crate::ports::store::{SongStore, StoreError};
use crate::services::id_allocator::IdAllocator;

/// La biblioteca de canciones: fachada sobre el conjunto autoritativo en
/// memoria, con asignación de ids y volcado explícito al almacenamiento.
///
/// Ciclo de vida: se construye una vez por sesión (`new` carga la
/// instantánea y siembra el asignador), se muta con las operaciones CRUD y
/// sólo persiste cuando el llamador invoca `save`. Que los cambios se
/// pierdan al cerrar sin guardar es deliberado: la persistencia es manual,
/// no automática.
///
/// Cada operación toma el candado interno por separado; ninguna se bloquea
/// indefinidamente (la E/S sólo ocurre dentro de `new` y `save`).
#[derive(Debug)]
pub struct SongLibrary<S: SongStore> {
  store: S,
  state: Mutex<LibraryState>,
}

#[derive(Debug)]
struct LibraryState {
  songs: BTreeMap<SongId, Song>,
  allocator: IdAllocator,
  dirty: bool,
}

impl<S: SongStore> SongLibrary<S> {
  /// Construye la biblioteca cargando la instantánea completa desde el
  /// store. Un fallo de carga es fatal: la sesión no debe arrancar.
  pub fn new(store: S) -> Result<Self, CoreError> {
    let loaded = store.load()?;
    let allocator = IdAllocator::seeded(&loaded);
    let songs: BTreeMap<SongId, Song> = loaded.into_iter().map(|song| (song.id, song)).collect();

    Ok(SongLibrary { store, state: Mutex::new(LibraryState { songs, allocator, dirty: false }) })
  }

  fn state(&self) -> MutexGuard<'_, LibraryState> {
    self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  /// Ids vivos en orden ascendente. Sin efectos secundarios.
  pub fn ids(&self) -> Vec<SongId> {
    self.state().songs.keys().copied().collect()
  }

  /// Añade un registro con un id nuevo y lo devuelve. Cualquier id que
  /// traiga el argumento se ignora: los ids los asigna la biblioteca.
  pub fn add_song(&self, song: Song) -> SongId {
    let mut state = self.state();
    let id = state.allocator.next_id();
    state.songs.insert(id, Song { id, ..song });
    state.dirty = true;
    id
  }

  /// Copia del registro con ese id, o `None` si no existe. No muta nada.
  pub fn get_song(&self, id: SongId) -> Option<Song> {
    self.state().songs.get(&id).cloned()
  }

  /// Reemplaza todos los campos del registro salvo el id. El id almacenado
  /// siempre gana sobre el que traiga `song`. Devuelve `false` sin tocar
  /// nada si el id no existe.
  pub fn update_song(&self, id: SongId, song: Song) -> bool {
    let mut state = self.state();
    if !state.songs.contains_key(&id) {
      return false;
    }
    state.songs.insert(id, Song { id, ..song });
    state.dirty = true;
    true
  }

  /// Elimina el registro con ese id. Devuelve `false` sin tocar nada si no
  /// existe. No se renumera nada: el hueco queda para siempre.
  pub fn delete_song(&self, id: SongId) -> bool {
    let mut state = self.state();
    if state.songs.remove(&id).is_none() {
      return false;
    }
    state.dirty = true;
    true
  }

  /// Vuelca la instantánea completa al almacenamiento duradero. Si el
  /// volcado falla, ni el conjunto en memoria ni la marca `dirty` cambian:
  /// el llamador puede reintentar `save` sin perder nada.
  pub fn save(&self) -> Result<(), StoreError> {
    let mut state = self.state();
    let snapshot: Vec<Song> = state.songs.values().cloned().collect();
    self.store.save(&snapshot)?;
    state.dirty = false;
    Ok(())
  }

  /// `true` si hay mutaciones sin guardar desde el último `save` (o desde la
  /// carga inicial).
  pub fn is_dirty(&self) -> bool {
    self.state().dirty
  }

  /// Listado completo de registros, ascendente por id. Sólo para
  /// diagnóstico; sin efectos sobre el estado.
  pub fn songs(&self) -> Vec<Song> {
    self.state().songs.values().cloned().collect()
  }
}
