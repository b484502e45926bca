mod session;

use anyhow::Context;
use log::warn;

use session::Session;
use tocata_config::Settings;
use tocata_core::services::SongLibrary;
use tocata_metadata::LoftyProbe;
use tocata_player::RodioPlayer;
use tocata_storage::TomlSongStore;

fn main() -> anyhow::Result<()> {
  colog::init();

  let settings = Settings::load().context("failed to load settings")?;

  // --- Dependency Injection Phase ---

  // 1. Persistence Adapter (TOML snapshot file)
  let store = TomlSongStore::at_path(&settings.library_file);

  // 2. The library itself. A load failure here is fatal: the session must
  //    not start over a store we cannot read.
  let library = SongLibrary::new(store).context("failed to open the song library")?;

  // 3. Metadata Adapter (lofty)
  let extractor = LoftyProbe::new();

  // 4. Playback Adapter. A machine without an audio device still gets a
  //    fully working library; only the transport commands are disabled.
  let player = match RodioPlayer::new(settings.volume) {
    Ok(player) => Some(player),
    Err(e) => {
      warn!("audio output unavailable, playback disabled: {e}");
      None
    }
  };

  Session::new(library, extractor, player).run()
}
