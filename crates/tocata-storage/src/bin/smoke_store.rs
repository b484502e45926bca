use tocata_core::domain::{Song, SongId};
use tocata_core::ports::SongStore;
use tocata_storage::TomlSongStore;

fn main() {
  let store = TomlSongStore::at_path("library.toml");

  let song = Song {
    id: SongId::from_raw(1),
    title: "Test Song".to_string(),
    artist: "Test Artist".to_string(),
    album: "Test Album".to_string(),
    genre: "test".to_string(),
    length: "0:03".to_string(),
    filename: "test.mp3".to_string(),
  };

  println!("Saving snapshot with one song, id = {}", song.id);

  store.save(std::slice::from_ref(&song)).expect("failed to save snapshot");

  let loaded = store.load().expect("failed to load snapshot");

  println!("Loaded from file: {loaded:?}");
}
