use crate::domain::{Song, SongId};

/// Asignador de identificadores monotónicos de la biblioteca.
///
/// Mantiene el máximo histórico visto durante la sesión, no el máximo del
/// conjunto vivo: así un id borrado nunca se vuelve a emitir aunque fuese el
/// máximo actual. (Recalcular `max(ids vivos) + 1` reutilizaría el id 8 tras
/// borrar el 8, que es exactamente el error que este componente evita.)
///
/// El máximo histórico es de ámbito de sesión: al arrancar se siembra con el
/// máximo id de la instantánea cargada.
#[derive(Debug, Default)]
pub struct IdAllocator {
  highest_seen: SongId,
}

impl IdAllocator {
  /// Crea un asignador sembrado con el máximo id presente en la instantánea.
  pub fn seeded(songs: &[Song]) -> Self {
    let highest_seen = songs.iter().map(|song| song.id).max().unwrap_or(SongId::UNASSIGNED);
    IdAllocator { highest_seen }
  }

  /// Devuelve un id estrictamente mayor que todos los emitidos o cargados en
  /// esta sesión. Con la biblioteca vacía el primer id es 1.
  pub fn next_id(&mut self) -> SongId {
    self.highest_seen = self.highest_seen.next();
    self.highest_seen
  }
}
