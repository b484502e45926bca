use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identificador único de una canción dentro de la biblioteca.
///
/// Es un entero monotónico asignado por la propia biblioteca, nunca por el
/// llamador. Los ids son crecientes durante toda la sesión: un id borrado no
/// se vuelve a emitir, así que la secuencia visible puede tener huecos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(u32);

impl SongId {
  /// Id reservado para registros candidatos que todavía no pertenecen a la
  /// biblioteca (p. ej. el resultado de extraer tags de un archivo).
  pub const UNASSIGNED: SongId = SongId(0);

  /// Construye un `SongId` a partir de un entero ya existente.
  pub fn from_raw(raw: u32) -> Self {
    SongId(raw)
  }

  /// Devuelve el entero interno.
  pub fn as_u32(&self) -> u32 {
    self.0
  }

  /// `false` sólo para `UNASSIGNED`.
  pub fn is_assigned(&self) -> bool {
    self.0 != 0
  }

  /// Id inmediatamente posterior.
  pub(crate) fn next(&self) -> SongId {
    SongId(self.0 + 1)
  }
}

impl From<u32> for SongId {
  fn from(raw: u32) -> Self {
    SongId(raw)
  }
}

impl From<SongId> for u32 {
  fn from(id: SongId) -> Self {
    id.0
  }
}

impl fmt::Display for SongId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

impl FromStr for SongId {
  type Err = ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.parse::<u32>().map(SongId)
  }
}
