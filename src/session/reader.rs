//! Headerless keylogger CSV: `keys, time, pressed`.

use super::KeyEvent;
use crate::error::ReadError;
use std::io::Read;
use std::path::Path;

const COLUMNS: usize = 3;

fn parse_pressed(raw: &str) -> Option<bool> {
    match raw.trim() {
        "True" | "true" | "TRUE" | "1" => Some(true),
        "False" | "false" | "FALSE" | "0" => Some(false),
        _ => None,
    }
}

/// Read a session file from disk.
pub fn read_session(path: &Path) -> Result<Vec<KeyEvent>, ReadError> {
    let file = std::fs::File::open(path)?;
    read_events(file)
}

/// Parse events from any reader, preserving file order.
pub fn read_events<R: Read>(reader: R) -> Result<Vec<KeyEvent>, ReadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut events = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() != COLUMNS {
            return Err(ReadError::MalformedInput {
                line,
                reason: format!("expected {} columns, found {}", COLUMNS, record.len()),
            });
        }

        let raw_time = &record[1];
        let secs: f64 = raw_time.trim().parse().map_err(|_| ReadError::MalformedInput {
            line,
            reason: format!("unparseable timestamp {:?}", raw_time),
        })?;
        let pressed = parse_pressed(&record[2]).ok_or_else(|| ReadError::MalformedInput {
            line,
            reason: format!("unparseable pressed flag {:?}", &record[2]),
        })?;
        let event = KeyEvent::at_secs(&record[0], secs, pressed).ok_or_else(|| {
            ReadError::MalformedInput {
                line,
                reason: format!("timestamp out of range {:?}", raw_time),
            }
        })?;
        events.push(event);
    }
    Ok(events)
}
