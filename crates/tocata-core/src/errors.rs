use thiserror::Error;

use crate::ports::store::StoreError;

/// Error del núcleo de Tocata. Sólo el almacenamiento pasa por aquí: los
/// errores de los colaboradores (metadatos, reproducción) nunca atraviesan
/// el núcleo, el shell los recibe directamente de cada adaptador.
///
/// Ojo: un id inexistente en las operaciones CRUD no es un error, es un
/// valor centinela (`None` / `false`).
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("storage error: {0}")]
  Storage(#[from] StoreError),
}
