use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::debug;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use tocata_core::ports::{Playback, PlaybackError};

/// Reproductor mínimo basado en `rodio`: una pista a la vez, transporte
/// abrir / reproducir / detener. Nada de colas, seeking ni playlists.
pub struct RodioPlayer {
  // El stream tiene que vivir tanto como el reproductor o el audio se corta.
  _stream: OutputStream,
  handle: OutputStreamHandle,
  sink: Option<Sink>,
  current: Option<PathBuf>,
  volume: f32,
}

impl RodioPlayer {
  /// Abre el dispositivo de salida por defecto. Falla si la máquina no tiene
  /// dispositivo de audio utilizable.
  pub fn new(volume: f32) -> Result<Self, PlaybackError> {
    let (stream, handle) =
      OutputStream::try_default().map_err(|e| PlaybackError::Device(e.to_string()))?;
    Ok(RodioPlayer { _stream: stream, handle, sink: None, current: None, volume })
  }
}

impl Playback for RodioPlayer {
  /// Registra la pista a reproducir; la decodificación real ocurre en `play`.
  fn open(&mut self, path: &Path) -> Result<(), PlaybackError> {
    if !path.exists() {
      return Err(PlaybackError::Io(format!("{} does not exist", path.display())));
    }
    self.stop();
    debug!("opened {}", path.display());
    self.current = Some(path.to_path_buf());
    Ok(())
  }

  fn play(&mut self) -> Result<(), PlaybackError> {
    let Some(path) = self.current.clone() else {
      return Err(PlaybackError::NothingOpen);
    };

    let file = File::open(&path).map_err(|e| PlaybackError::Io(e.to_string()))?;
    let source = Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode(e.to_string()))?;

    let sink = Sink::try_new(&self.handle).map_err(|e| PlaybackError::Device(e.to_string()))?;
    sink.set_volume(self.volume);
    sink.append(source);
    sink.play();

    debug!("playing {}", path.display());
    self.sink = Some(sink);
    Ok(())
  }

  fn stop(&mut self) {
    if let Some(sink) = self.sink.take() {
      sink.stop();
    }
  }
}
