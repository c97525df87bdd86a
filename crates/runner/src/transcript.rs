//! JSONL transcripts - one committed move per line, summary at the end

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::driver::RunStats;

/// Everything worth replaying about one committed move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub pair: String,
    pub orientation: u8,
    pub x: u8,
    pub score: u32,
    pub chains: u32,
    pub cells_cleared: u32,
    pub total_score: u64,
    pub game_over: bool,
    /// The observation opening this turn did not match the board predicted
    /// for the previous move
    pub diverged: bool,
}

/// Line-delimited JSON sink for a run
pub struct TranscriptSink<W: Write> {
    out: W,
}

impl TranscriptSink<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }
}

impl<W: Write> TranscriptSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn record(&mut self, record: &TurnRecord) -> Result<()> {
        self.write_line(&serde_json::to_string(record)?)
    }

    /// Write the closing summary line and flush
    pub fn finish(mut self, stats: &RunStats) -> Result<()> {
        self.write_line(&serde_json::to_string(stats)?)?;
        self.out.flush()?;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> TurnRecord {
        TurnRecord {
            turn: 1,
            pair: "rg".to_string(),
            orientation: 2,
            x: 4,
            score: 240,
            chains: 1,
            cells_cleared: 8,
            total_score: 240,
            game_over: false,
            diverged: false,
        }
    }

    #[test]
    fn test_one_json_object_per_line() {
        let mut buf = Vec::new();
        let mut sink = TranscriptSink::new(&mut buf);
        sink.record(&sample_record()).unwrap();
        sink.record(&sample_record()).unwrap();
        sink.finish(&RunStats::default()).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in &lines {
            serde_json::from_str::<serde_json::Value>(line).unwrap();
        }
    }

    #[test]
    fn test_records_round_trip() {
        let mut buf = Vec::new();
        let mut sink = TranscriptSink::new(&mut buf);
        sink.record(&sample_record()).unwrap();
        sink.finish(&RunStats::default()).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let parsed: TurnRecord = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(parsed, sample_record());
    }

    #[test]
    fn test_summary_carries_the_run_totals() {
        let mut buf = Vec::new();
        let sink = TranscriptSink::new(&mut buf);
        let stats = RunStats {
            turns: 12,
            score: 560,
            best_chain: 2,
            cells_cleared: 18,
            divergences: 0,
            game_over: true,
        };
        sink.finish(&stats).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["turns"], 12);
        assert_eq!(value["score"], 560);
        assert_eq!(value["game_over"], true);
    }
}
