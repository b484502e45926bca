use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
  #[error("io error: {0}")]
  Io(String),

  #[error("decode error: {0}")]
  Decode(String),

  #[error("audio device error: {0}")]
  Device(String),

  #[error("no track opened")]
  NothingOpen,
}

/// Port de transporte de reproducción: abrir / reproducir / detener.
///
/// El núcleo nunca llama a este port. La biblioteca sólo entrega nombres de
/// archivo; es el shell quien los pasa al reproductor.
pub trait Playback {
  /// Prepara la pista en `path` para reproducirla.
  fn open(&mut self, path: &Path) -> Result<(), PlaybackError>;

  /// Reproduce la pista abierta desde el principio.
  fn play(&mut self) -> Result<(), PlaybackError>;

  /// Detiene la reproducción en curso, si la hay.
  fn stop(&mut self);
}
