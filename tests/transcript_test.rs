//! End-to-end test for the JSONL transcript: play a run, write it to disk,
//! and parse every line back.

use std::fs;

use puyo_ai::policy::RandomPolicy;
use puyo_ai::runner::{Driver, SimulatedGame, TranscriptSink, TurnRecord};

#[test]
fn test_transcript_file_replays_the_run() {
    let path = std::env::temp_dir().join(format!("puyo-ai-transcript-{}.jsonl", std::process::id()));

    let mut driver = Driver::new(SimulatedGame::new(4), RandomPolicy::new(4));
    let mut sink = TranscriptSink::create(&path).unwrap();

    let mut turns = 0;
    while turns < 6 {
        let record = driver.step().unwrap().unwrap();
        sink.record(&record).unwrap();
        turns += 1;
    }
    let stats = driver.stats();
    sink.finish(&stats).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 7);

    let mut total = 0u64;
    for (i, line) in lines[..6].iter().enumerate() {
        let record: TurnRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.turn as usize, i + 1);
        total += u64::from(record.score);
        assert_eq!(record.total_score, total);
    }

    let summary: serde_json::Value = serde_json::from_str(lines[6]).unwrap();
    assert_eq!(summary["turns"], 6);
    assert_eq!(summary["score"], total);
    assert_eq!(summary["divergences"], 0);
}
