//! Game reports for the terminal and the transcript file.
//!
//! The same text is printed while a game runs and appended to the
//! transcript, which only ever grows.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::errors::EndgameResult;
use crate::game_state::chess_types::Position;
use crate::utils::game_driver::PlyRecord;
use crate::utils::render_game_state::describe_state;

pub const DEFAULT_TRANSCRIPT_PATH: &str = "gameResult.txt";

/// Banner and starting diagram. `case_name` is set for scenario games.
pub fn game_header(case_name: Option<&str>, start: &Position, ply_limit: u32) -> String {
    let mut out = String::from("\n\n");
    if let Some(name) = case_name {
        out.push_str(&format!("*** TEST MODE ***\nImplementing {name}\n"));
    }
    out.push_str("Starting game...\n");
    out.push_str(&describe_state(start, None, 0, ply_limit));
    out
}

/// The move just played followed by the status report and diagram.
pub fn describe_ply(record: &PlyRecord, ply_limit: u32) -> String {
    let mut out = format!("{} played {}\n", record.mover, record.mv);
    out.push_str(&describe_state(
        &record.position,
        record.outcome,
        record.ply,
        ply_limit,
    ));
    out
}

pub struct TranscriptWriter<W: Write> {
    out: W,
}

impl TranscriptWriter<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn append_to(path: &Path) -> EndgameResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TranscriptWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn begin_game(
        &mut self,
        case_name: Option<&str>,
        start: &Position,
        ply_limit: u32,
    ) -> EndgameResult<()> {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        write!(self.out, "\n[{stamp}]")?;
        self.out
            .write_all(game_header(case_name, start, ply_limit).as_bytes())?;
        Ok(())
    }

    pub fn record_ply(&mut self, record: &PlyRecord, ply_limit: u32) -> EndgameResult<()> {
        self.out.write_all(describe_ply(record, ply_limit).as_bytes())?;
        if record.outcome.is_some() {
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> EndgameResult<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
