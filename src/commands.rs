use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use praise::availability::is_mine;
use praise::{
    assign_musician, availability_summary, commit_staged, create_setlist, export, filter_by_title,
    find_songs, import_song, load_setlist, load_setlists, parse_song, prefill_musicians, roster,
    roster_candidates, save_availability, song_sheet, AvailabilityDraft, Config, Direction,
    Instrument, MemoryStore, PraiseError, SetlistDraft, StagedOrder, Store,
};

use crate::error::CliError;

pub const USAGE: &str = "\
Usage: praise [--config <file>] <command> [args...]

Commands:
  transpose <file> <key>                  Print a song file in another key
  import <file>...                        Add song files to the library
  seed                                    Add the bundled hymns to the library
  songs [search]                          List songs, optionally filtered
  setlists                                List setlists, newest first
  setlist-new <date> <name> [song...]     Create a setlist (songs by id or title)
  setlist-move <setlist-id> <n> up|down   Move the n-th song of a setlist
  export <setlist-id> [out]               Export a setlist (.xml or .txt, - for stdout)
  available <date> <name> [instrument]    Say you can play on a date
  availability [name]                     Upcoming availability by month
  assign <date> <instrument> <name>       Put a musician on the roster
  roster <date>                           Roster and candidates for a date";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Transpose { file: PathBuf, key: String },
    Import { files: Vec<PathBuf> },
    Seed,
    Songs { search: String },
    Setlists,
    SetlistNew { date: NaiveDate, name: String, songs: Vec<String> },
    SetlistMove { id: String, position: usize, direction: Direction },
    Export { id: String, out: Option<String> },
    Available { date: NaiveDate, name: String, instrument: Option<Instrument> },
    Availability { name: String },
    Assign { date: NaiveDate, instrument: Instrument, name: String },
    Roster { date: NaiveDate },
}

fn parse_date(value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CliError::invalid("date", value, "expected YYYY-MM-DD"))
}

fn parse_instrument(value: &str) -> Result<Instrument, CliError> {
    value
        .parse::<Instrument>()
        .map_err(|reason: String| CliError::invalid("instrument", value, reason))
}

fn usage(command: &str, args: &str) -> CliError {
    CliError::Usage(format!("Usage: praise {} {}", command, args).trim_end().to_string())
}

impl Command {
    /// Parse the arguments after the program name (and any `--config` flag).
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let (name, rest) = match args.split_first() {
            Some((name, rest)) => (name.as_str(), rest),
            None => return Err(CliError::Usage(USAGE.to_string())),
        };

        let command = match (name, rest) {
            ("transpose", [file, key]) => Command::Transpose {
                file: PathBuf::from(file),
                key: key.clone(),
            },
            ("transpose", _) => return Err(usage(name, "<file> <key>")),

            ("import", files) if !files.is_empty() => Command::Import {
                files: files.iter().map(PathBuf::from).collect(),
            },
            ("import", _) => return Err(usage(name, "<file>...")),

            ("seed", []) => Command::Seed,

            ("songs", terms) => Command::Songs { search: terms.join(" ") },

            ("setlists", []) => Command::Setlists,

            ("setlist-new", [date, setlist_name, songs @ ..]) => Command::SetlistNew {
                date: parse_date(date)?,
                name: setlist_name.clone(),
                songs: songs.to_vec(),
            },
            ("setlist-new", _) => return Err(usage(name, "<date> <name> [song...]")),

            ("setlist-move", [id, position, direction]) => {
                let position = match position.parse::<usize>() {
                    Ok(n) if n > 0 => n,
                    _ => return Err(CliError::invalid("position", position, "expected 1 or more")),
                };
                let direction = direction
                    .parse::<Direction>()
                    .map_err(|reason: String| CliError::invalid("direction", direction, reason))?;
                Command::SetlistMove { id: id.clone(), position, direction }
            }
            ("setlist-move", _) => return Err(usage(name, "<setlist-id> <n> up|down")),

            ("export", [id]) => Command::Export { id: id.clone(), out: None },
            ("export", [id, out]) => Command::Export { id: id.clone(), out: Some(out.clone()) },
            ("export", _) => return Err(usage(name, "<setlist-id> [out]")),

            ("available", [date, person]) => Command::Available {
                date: parse_date(date)?,
                name: person.clone(),
                instrument: None,
            },
            ("available", [date, person, instrument]) => Command::Available {
                date: parse_date(date)?,
                name: person.clone(),
                instrument: Some(parse_instrument(instrument)?),
            },
            ("available", _) => return Err(usage(name, "<date> <name> [instrument]")),

            ("availability", person) => Command::Availability { name: person.join(" ") },

            ("assign", [date, instrument, person @ ..]) if !person.is_empty() => Command::Assign {
                date: parse_date(date)?,
                instrument: parse_instrument(instrument)?,
                name: person.join(" "),
            },
            ("assign", _) => return Err(usage(name, "<date> <instrument> <name>")),

            ("roster", [date]) => Command::Roster { date: parse_date(date)? },
            ("roster", _) => return Err(usage(name, "<date>")),

            ("seed", _) | ("setlists", _) => return Err(usage(name, "")),

            (other, _) => {
                return Err(CliError::Usage(format!("Unknown command: {}\n\n{}", other, USAGE)))
            }
        };
        Ok(command)
    }

    /// Whether the command changes the data file.
    fn writes(&self) -> bool {
        matches!(
            self,
            Command::Import { .. }
                | Command::Seed
                | Command::SetlistNew { .. }
                | Command::SetlistMove { .. }
                | Command::Available { .. }
                | Command::Assign { .. }
        )
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| {
        CliError::from(PraiseError::Io {
            path: path.display().to_string(),
            source,
        })
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    fs::write(path, contents).map_err(|source| {
        CliError::from(PraiseError::Io {
            path: path.display().to_string(),
            source,
        })
    })
}

/// Run a command against the configured data file. Returns what to print.
pub fn run(config: &Config, command: Command, today: NaiveDate) -> Result<String, CliError> {
    if let Command::Transpose { file, key } = &command {
        let draft = parse_song(&read_file(file)?)?;
        let song = draft.into_song(String::new());
        return Ok(song_sheet(&song, Some(key.as_str()), config.tab_width));
    }

    let mut store = MemoryStore::load(&config.data_file)?;
    debug!(path = %config.data_file.display(), "data file loaded");

    let writes = command.writes();
    let output = execute(&mut store, config, command, today)?;

    if writes {
        store.save(&config.data_file)?;
        info!(path = %config.data_file.display(), "data file saved");
    }
    Ok(output)
}

fn execute(
    store: &mut MemoryStore,
    config: &Config,
    command: Command,
    today: NaiveDate,
) -> Result<String, CliError> {
    match command {
        Command::Transpose { .. } => Err(CliError::Usage(USAGE.to_string())),

        Command::Import { files } => {
            let mut lines = Vec::new();
            for file in files {
                let song = import_song(store, &read_file(&file)?)?;
                lines.push(format!("Imported {} ({})", song.title, song.id));
            }
            Ok(lines.join("\n"))
        }

        Command::Seed => {
            let existing: Vec<String> = store
                .list_songs()
                .map_err(|e| PraiseError::store("load songs", e))?
                .into_iter()
                .map(|s| s.title)
                .collect();
            let mut added = 0;
            for bundled in praise_songbook::get_all_songs() {
                let draft = parse_song(&bundled.content)?;
                if existing.contains(&draft.title) {
                    debug!(name = %bundled.name, "bundled song already in library");
                    continue;
                }
                import_song(store, &bundled.content)?;
                added += 1;
            }
            Ok(format!("Added {} song(s)", added))
        }

        Command::Songs { search } => {
            let songs = find_songs(store, &search)?;
            Ok(songs
                .iter()
                .map(|s| format!("{}  {} [{}]", s.id, s.title, s.original_key))
                .collect::<Vec<_>>()
                .join("\n"))
        }

        Command::Setlists => {
            let views = load_setlists(store)?;
            Ok(views
                .iter()
                .map(|v| {
                    format!(
                        "{}  {}  {}  ({} songs)",
                        v.setlist.id,
                        v.setlist.date,
                        v.setlist.name,
                        v.songs.len()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }

        Command::SetlistNew { date, name, songs } => {
            let library = store
                .list_songs()
                .map_err(|e| PraiseError::store("load songs", e))?;
            let mut song_ids = Vec::new();
            for wanted in &songs {
                if library.iter().any(|s| &s.id == wanted) {
                    song_ids.push(wanted.clone());
                    continue;
                }
                match filter_by_title(&library, wanted).as_slice() {
                    [song] => song_ids.push(song.id.clone()),
                    [] => {
                        return Err(PraiseError::NotFound { kind: "Song", id: wanted.clone() }.into())
                    }
                    _ => return Err(CliError::invalid("song", wanted, "matches more than one title")),
                }
            }

            let draft = SetlistDraft {
                name,
                date: Some(date),
                musicians: prefill_musicians(store, date)?,
            };
            let setlist = create_setlist(store, &draft, &song_ids)?;
            Ok(format!("Created setlist {} with {} song(s)", setlist.id, song_ids.len()))
        }

        Command::SetlistMove { id, position, direction } => {
            let view = load_setlist(store, &id)?;
            let mut staged = StagedOrder::new(view.song_ids());
            if !staged.move_song(position - 1, direction) {
                return Ok("Nothing to move".to_string());
            }
            commit_staged(store, &id, &mut staged)?;
            let moved = load_setlist(store, &id)?;
            Ok(moved
                .songs
                .iter()
                .enumerate()
                .map(|(i, s)| format!("{}. {}", i + 1, s.title))
                .collect::<Vec<_>>()
                .join("\n"))
        }

        Command::Export { id, out } => {
            let view = load_setlist(store, &id)?;
            let path = match out.as_deref() {
                Some("-") => return Ok(export::to_text(&view)),
                Some(out) => PathBuf::from(out),
                None => config.export_dir.join(export::file_name(&view, "xml")),
            };
            let contents = match path.extension().and_then(|e| e.to_str()) {
                Some("xml") | Some("doc") => export::to_word_xml(&view),
                Some("txt") => export::to_text(&view),
                other => {
                    return Err(PraiseError::Export(format!(
                        "unsupported export format: {}",
                        other.unwrap_or("(none)")
                    ))
                    .into())
                }
            };
            write_file(&path, &contents)?;
            Ok(format!("Wrote {}", path.display()))
        }

        Command::Available { date, name, instrument } => {
            let entry = save_availability(
                store,
                &AvailabilityDraft {
                    date: Some(date),
                    full_name: name,
                    instrument,
                    available: true,
                },
            )?;
            Ok(format!("Saved availability {} for {} on {}", entry.id, entry.full_name, entry.date))
        }

        Command::Availability { name } => {
            let mut lines = Vec::new();
            for group in availability_summary(store, today)? {
                lines.push(group.label.clone());
                for entry in &group.entries {
                    let marker = if is_mine(entry, &name) { "*" } else { " " };
                    let instrument = entry.instrument.map_or("any".to_string(), |i| i.to_string());
                    let status = if entry.available { "available" } else { "unavailable" };
                    lines.push(format!(
                        "{} {}  {}  {}  {}",
                        marker, entry.date, entry.full_name, instrument, status
                    ));
                }
            }
            Ok(lines.join("\n"))
        }

        Command::Assign { date, instrument, name } => {
            let assignment = assign_musician(store, date, instrument, &name)?;
            Ok(format!(
                "{}: {} on {}",
                assignment.instrument, assignment.musician, assignment.date
            ))
        }

        Command::Roster { date } => {
            let assignments = roster(store, date)?;
            let mut lines = Vec::new();
            for instrument in Instrument::AVAILABILITY_CHOICES {
                let assigned = assignments
                    .iter()
                    .find(|a| a.instrument == instrument)
                    .map_or("-", |a| a.musician.as_str());
                let candidates = roster_candidates(store, date, instrument)?;
                lines.push(format!(
                    "{}: {}  (available: {})",
                    instrument,
                    assigned,
                    if candidates.is_empty() { "none".to_string() } else { candidates.join(", ") }
                ));
            }
            Ok(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn setup() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_file: dir.path().join("data.yaml"),
            export_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        (dir, config)
    }

    fn exec(config: &Config, line: &str) -> Result<String, CliError> {
        run(config, Command::parse(&args(line))?, day(16))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(&args("seed")).unwrap(), Command::Seed);
        assert_eq!(
            Command::parse(&args("setlist-move abc 2 up")).unwrap(),
            Command::SetlistMove { id: "abc".to_string(), position: 2, direction: Direction::Up }
        );
        assert_eq!(
            Command::parse(&args("assign 2026-10-18 drums Ben Lee")).unwrap(),
            Command::Assign { date: day(18), instrument: Instrument::Drum, name: "Ben Lee".to_string() }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Command::parse(&[]), Err(CliError::Usage(_))));
        assert!(matches!(Command::parse(&args("transpose a.song")), Err(CliError::Usage(_))));
        assert!(matches!(Command::parse(&args("bogus")), Err(CliError::Usage(_))));

        let err = Command::parse(&args("roster 18/10/2026")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid date '18/10/2026': expected YYYY-MM-DD");

        let err = Command::parse(&args("setlist-move abc 0 up")).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { name: "position", .. }));
        assert!(Command::parse(&args("available 2026-10-18 Ana tuba")).is_err());
    }

    #[test]
    fn test_transpose_file() {
        let (dir, config) = setup();
        let file = dir.path().join("doxology.song");
        fs::write(&file, "---\ntitle: Doxology\nkey: G\n---\nG  D  G\nPraise God").unwrap();

        let out = exec(&config, &format!("transpose {} A", file.display())).unwrap();
        assert_eq!(out, "A  E  A\nPraise God");
        assert!(!config.data_file.exists());
    }

    #[test]
    fn test_seed_is_idempotent() {
        let (_dir, config) = setup();
        let first = exec(&config, "seed").unwrap();
        assert_ne!(first, "Added 0 song(s)");
        assert_eq!(exec(&config, "seed").unwrap(), "Added 0 song(s)");

        let songs = exec(&config, "songs grace").unwrap();
        assert!(songs.contains("Amazing Grace [G]"));
    }

    #[test]
    fn test_setlist_flow() {
        let (dir, config) = setup();
        exec(&config, "seed").unwrap();
        exec(&config, "assign 2026-10-18 guitar Ana").unwrap();

        let created = exec(&config, "setlist-new 2026-10-18 Sunday Amazing Vision").unwrap();
        assert!(created.ends_with("with 2 song(s)"));

        let store = MemoryStore::load(&config.data_file).unwrap();
        let setlist = store.list_setlists().unwrap().remove(0);
        assert_eq!(setlist.musicians.guitar, "Ana");

        let moved = exec(&config, &format!("setlist-move {} 2 up", setlist.id)).unwrap();
        assert_eq!(moved, "1. Be Thou My Vision\n2. Amazing Grace");
        assert_eq!(
            exec(&config, &format!("setlist-move {} 1 up", setlist.id)).unwrap(),
            "Nothing to move"
        );

        let wrote = exec(&config, &format!("export {}", setlist.id)).unwrap();
        assert!(wrote.ends_with("Sunday.xml"));
        let xml = fs::read_to_string(dir.path().join("Sunday.xml")).unwrap();
        assert!(xml.contains("1. Be Thou My Vision"));

        let text = exec(&config, &format!("export {} -", setlist.id)).unwrap();
        assert!(text.contains("Guitar: Ana | Drummer: -"));

        let err = exec(&config, &format!("export {} out.pdf", setlist.id)).unwrap_err();
        assert_eq!(err.to_string(), "Export failed: unsupported export format: pdf");
    }

    #[test]
    fn test_unknown_song_in_setlist() {
        let (_dir, config) = setup();
        exec(&config, "seed").unwrap();
        let err = exec(&config, "setlist-new 2026-10-18 Sunday Nope").unwrap_err();
        assert_eq!(err.to_string(), "Song 'Nope' not found");
        let err = exec(&config, "setlist-new 2026-10-18 Sunday o").unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { name: "song", .. }));
    }

    #[test]
    fn test_availability_and_roster() {
        let (_dir, config) = setup();
        exec(&config, "available 2026-10-18 Ana bass").unwrap();
        exec(&config, "available 2026-11-01 Ben").unwrap();

        let summary = exec(&config, "availability Ana").unwrap();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines[0], "October 2026");
        assert_eq!(lines[1], "* 2026-10-18  Ana  Bass  available");
        assert_eq!(lines[2], "November 2026");
        assert!(lines[3].starts_with("  2026-11-01  Ben  any"));

        exec(&config, "assign 2026-10-18 bass Ana").unwrap();
        let roster = exec(&config, "roster 2026-10-18").unwrap();
        assert!(roster.contains("Bass: Ana  (available: Ana)"));
        assert!(roster.contains("Drum: -  (available: none)"));
    }
}
