// SPDX-License-Identifier: MPL-2.0
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{DateTime, Local, NaiveDateTime};
use media_exif::application::ExifService;
use media_exif::config::{self, Config};
use media_exif::domain::exif::ExifRecord;
use media_exif::domain::media::{MediaId, MediaRecord};
use media_exif::infrastructure::{BoundParser, MemoryStore};
use media_exif::logging;
use tracing::error;

const USAGE: &str = "Usage: media-exif [--config <file>] [--no-exiftool] <FILES...>";

struct Args {
    config: Option<PathBuf>,
    no_exiftool: bool,
    files: Vec<OsString>,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    Ok(Args {
        no_exiftool: args.contains("--no-exiftool"),
        config: args.opt_value_from_str("--config")?,
        files: args.finish(),
    })
}

fn load_config(path: Option<&Path>) -> media_exif::Result<Config> {
    match path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    }
}

/// Initial capture date of a newly registered file: its modification time.
fn file_date(path: &Path) -> NaiveDateTime {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map(|modified| DateTime::<Local>::from(modified).naive_local())
        .unwrap_or_default()
}

fn describe(exif: &ExifRecord) -> String {
    let mut parts = Vec::new();
    if let Some(camera) = &exif.camera {
        parts.push(format!("camera={camera}"));
    }
    if let Some(date) = exif.date_shot {
        parts.push(format!("date_shot={date}"));
    }
    if let Some(exposure) = exif.exposure {
        parts.push(format!("exposure={exposure}"));
    }
    if let Some(aperture) = exif.aperture {
        parts.push(format!("aperture=f/{aperture}"));
    }
    if let Some(iso) = exif.iso {
        parts.push(format!("iso={iso}"));
    }
    if exif.has_gps() {
        parts.push("gps".to_string());
    }
    parts.join(" ")
}

/// Runs two saves on one file and prints the outcome.
///
/// The second save goes through the already-linked path.
fn process(
    service: &ExifService<BoundParser>,
    store: &MemoryStore,
    media: &mut MediaRecord,
) -> media_exif::Result<()> {
    for _ in 0..2 {
        let mut tx = store.begin();
        let saved = service.save_exif(&mut tx, media)?;
        tx.commit();

        match saved {
            Some(exif) => println!(
                "{}: {} {}",
                media.path.display(),
                exif.id.map(|id| id.to_string()).unwrap_or_default(),
                describe(&exif)
            ),
            None => println!("{}: no EXIF data", media.path.display()),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    if args.files.is_empty() {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    }

    let mut config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    if args.no_exiftool {
        config.exif.use_exiftool = false;
    }

    logging::init(config.log_level());

    let service = ExifService::from_config(&config.exif);
    let store = MemoryStore::new();
    let mut status = ExitCode::SUCCESS;

    for (index, file) in args.files.into_iter().enumerate() {
        let path = PathBuf::from(file);
        let mut media = MediaRecord::new(MediaId(index as u64 + 1), &path, file_date(&path));
        store.insert_media(media.clone());

        if let Err(err) = process(&service, &store, &mut media) {
            error!(path = %path.display(), "{err}");
            if let Some(source) = std::error::Error::source(&err) {
                eprintln!("{}: {err}: {source}", path.display());
            } else {
                eprintln!("{}: {err}", path.display());
            }
            status = ExitCode::FAILURE;
        }
    }

    println!(
        "{} EXIF record(s) stored, {} write(s) committed",
        store.exif_count(),
        store.committed_writes()
    );
    status
}
