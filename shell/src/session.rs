use std::io::{self, BufRead, Write};
use std::path::Path;

use log::{error, info, warn};

use tocata_core::domain::{Song, SongId};
use tocata_core::ports::{MetadataExtractor, Playback};
use tocata_core::services::SongLibrary;
use tocata_metadata::LoftyProbe;
use tocata_player::RodioPlayer;
use tocata_storage::TomlSongStore;

/// Concrete library type used by the shell.
type ShellLibrary = SongLibrary<TomlSongStore>;

const HELP: &str = "\
commands:
  ids                 list all song ids
  show <id>           display one song (and open it for playback)
  open <file>         read tags from an audio file into the pending record
  set <field> <text>  edit a field of the pending record
                      (title, artist, album, genre, length, filename)
  add                 add the pending record to the library
  update <id>         overwrite song <id> with the pending record
  delete <id>         remove song <id> from the library
  songs               dump every record (debugging)
  play / stop         playback transport for the opened file
  save                write the library to disk (nothing is saved otherwise)
  quit                leave (warns if there are unsaved changes)";

/// One interactive session over the library.
///
/// Every command is a thin wrapper around a single core operation; the
/// pending record plays the role the edit boxes play in a windowed shell.
pub struct Session {
  library: ShellLibrary,
  extractor: LoftyProbe,
  player: Option<RodioPlayer>,
  pending: Option<Song>,
  quit_armed: bool,
}

impl Session {
  pub fn new(library: ShellLibrary, extractor: LoftyProbe, player: Option<RodioPlayer>) -> Self {
    Session { library, extractor, player, pending: None, quit_armed: false }
  }

  pub fn run(mut self) -> anyhow::Result<()> {
    let count = self.library.ids().len();
    info!("library loaded with {count} songs");
    println!("tocata — {count} songs in the library, type 'help' for commands");

    let stdin = io::stdin();
    loop {
      print!("tocata> ");
      io::stdout().flush()?;

      let mut line = String::new();
      if stdin.lock().read_line(&mut line)? == 0 {
        // EOF behaves like quit, without the second chance.
        if self.library.is_dirty() {
          warn!("exiting with unsaved changes");
        }
        return Ok(());
      }

      if !self.dispatch(line.trim()) {
        return Ok(());
      }
    }
  }

  /// Returns `false` when the session should end.
  fn dispatch(&mut self, line: &str) -> bool {
    let (command, rest) = match line.split_once(char::is_whitespace) {
      Some((command, rest)) => (command, rest.trim()),
      None => (line, ""),
    };

    if command != "quit" {
      self.quit_armed = false;
    }

    match command {
      "" => {}
      "help" => println!("{HELP}"),
      "ids" => {
        let ids: Vec<String> = self.library.ids().iter().map(SongId::to_string).collect();
        println!("{}", if ids.is_empty() { "(empty library)".to_string() } else { ids.join(" ") });
      }
      "show" => self.cmd_show(rest),
      "open" => self.cmd_open(rest),
      "set" => self.cmd_set(rest),
      "add" => self.cmd_add(),
      "update" => self.cmd_update(rest),
      "delete" => self.cmd_delete(rest),
      "songs" => {
        for song in self.library.songs() {
          println!("{song}");
        }
      }
      "play" => {
        if let Some(player) = self.player.as_mut() {
          if let Err(e) = player.play() {
            error!("playback failed: {e}");
          }
        } else {
          warn!("playback is disabled in this session");
        }
      }
      "stop" => {
        if let Some(player) = self.player.as_mut() {
          player.stop();
        }
      }
      "save" => match self.library.save() {
        Ok(()) => println!("library saved"),
        // In-memory state is untouched; saving can be retried.
        Err(e) => error!("save failed, your edits are still in memory: {e}"),
      },
      "quit" => {
        if self.library.is_dirty() && !self.quit_armed {
          println!("there are unsaved changes — 'save' first, or 'quit' again to discard them");
          self.quit_armed = true;
        } else {
          return false;
        }
      }
      unknown => println!("unknown command '{unknown}', type 'help'"),
    }
    true
  }

  fn parse_id(arg: &str) -> Option<SongId> {
    match arg.parse::<SongId>() {
      Ok(id) => Some(id),
      Err(_) => {
        println!("expected a numeric song id, got '{arg}'");
        None
      }
    }
  }

  fn cmd_show(&mut self, arg: &str) {
    let Some(id) = Self::parse_id(arg) else { return };
    match self.library.get_song(id) {
      Some(song) => {
        println!("{song}");
        // Selecting an id leaves the record ready for editing and its
        // file opened in the player.
        if let Some(player) = self.player.as_mut() {
          if let Err(e) = player.open(Path::new(&song.filename)) {
            warn!("cannot open {} for playback: {e}", song.filename);
          }
        }
        self.pending = Some(song);
      }
      None => println!("no song with id {id}"),
    }
  }

  fn cmd_open(&mut self, arg: &str) {
    if arg.is_empty() {
      println!("usage: open <file>");
      return;
    }
    let path = Path::new(arg);
    match self.extractor.extract_from_path(path) {
      Ok(candidate) => {
        println!("{candidate}");
        if let Some(player) = self.player.as_mut() {
          if let Err(e) = player.open(path) {
            warn!("cannot open {} for playback: {e}", path.display());
          }
        }
        self.pending = Some(candidate);
      }
      Err(e) => error!("cannot read tags from {}: {e}", path.display()),
    }
  }

  fn cmd_set(&mut self, rest: &str) {
    let Some((field, value)) = rest.split_once(char::is_whitespace).map(|(f, v)| (f, v.trim())) else {
      println!("usage: set <field> <text>");
      return;
    };

    let pending = self.pending.get_or_insert_with(Song::default);
    match field {
      "title" => pending.title = value.to_string(),
      "artist" => pending.artist = value.to_string(),
      "album" => pending.album = value.to_string(),
      "genre" => pending.genre = value.to_string(),
      "length" => pending.length = value.to_string(),
      "filename" => pending.filename = value.to_string(),
      other => {
        println!("unknown field '{other}' (title, artist, album, genre, length, filename)");
        return;
      }
    }
    println!("{pending}");
  }

  fn cmd_add(&mut self) {
    let Some(candidate) = self.pending.clone() else {
      println!("nothing to add — 'open' a file or 'set' some fields first");
      return;
    };
    let id = self.library.add_song(candidate);
    // The pending record becomes the stored one, with its real id.
    self.pending = self.library.get_song(id);
    println!("added song {id}");
  }

  fn cmd_update(&mut self, arg: &str) {
    let Some(id) = Self::parse_id(arg) else { return };
    let Some(candidate) = self.pending.clone() else {
      println!("nothing to update with — 'open' or 'show' a record first");
      return;
    };
    if self.library.update_song(id, candidate) {
      println!("updated song {id}");
    } else {
      println!("no song with id {id}");
    }
  }

  fn cmd_delete(&mut self, arg: &str) {
    let Some(id) = Self::parse_id(arg) else { return };
    if self.library.delete_song(id) {
      println!("deleted song {id}");
    } else {
      println!("no song with id {id}");
    }
  }
}
