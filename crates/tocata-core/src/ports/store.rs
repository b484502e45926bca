use crate::domain::song::Song;

/// Error de la capa de almacenamiento duradero (cargar / volcar la
/// instantánea). Cubre medio ilegible, medio no escribible y datos corruptos.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("corrupt store: {0}")]
  Corrupt(String),
}

/// Port que abstrae el almacenamiento duradero de la biblioteca.
///
/// El contrato es de instantánea completa: `load` devuelve todos los
/// registros tal como existen en disco y `save` los reemplaza por completo
/// (no hay escrituras incrementales). A esta escala eso evita necesitar un
/// log de transacciones; la persistencia es poco frecuente y explícita.
///
/// Implementaciones posibles:
/// - archivo TOML (la de `tocata-storage`)
/// - base de datos embebida
/// - un store en memoria para tests
pub trait SongStore {
  /// Carga la instantánea completa, ordenada ascendentemente por id.
  ///
  /// Si todavía no existe almacenamiento previo devuelve un conjunto vacío;
  /// si existe pero no se puede leer o interpretar, devuelve `StoreError`.
  fn load(&self) -> Result<Vec<Song>, StoreError>;

  /// Escribe la instantánea completa, reemplazando cualquier contenido
  /// anterior. Debe ser atómica frente a caídas del proceso (escribir y
  /// renombrar, o equivalente): un volcado fallido no puede dejar el store
  /// a medio escribir.
  fn save(&self, songs: &[Song]) -> Result<(), StoreError>;
}
