//! Silence boundary parsing.
//!
//! The detector emits diagnostic text with `silence_start: <secs>` /
//! `silence_end: <secs>` markers. Scanning is defensive, not authoritative:
//! non-matching lines are ignored and marker lines with an unparseable
//! number are dropped silently. Pairing, by contrast, is strict - a sequence
//! that breaks the start/end alternation is a typed error, never a guess.

use super::types::{SilenceError, SilenceResult};
use crate::models::{SilenceEvent, SilenceEventKind, SilenceInterval};

const START_MARKER: &str = "silence_start:";
const END_MARKER: &str = "silence_end:";

/// Extract silence boundary events from detector output, in encounter order.
pub fn parse_silence_events(text: &str) -> Vec<SilenceEvent> {
    let mut events = Vec::new();

    for line in text.lines() {
        if line.contains(START_MARKER) {
            if let Some(at_secs) = marker_value(line, START_MARKER) {
                events.push(SilenceEvent::start(at_secs));
            }
        } else if line.contains(END_MARKER) {
            if let Some(at_secs) = marker_value(line, END_MARKER) {
                events.push(SilenceEvent::end(at_secs));
            }
        }
    }

    events
}

/// First whitespace-delimited token after the marker, as seconds.
fn marker_value(line: &str, marker: &str) -> Option<f64> {
    line.split(marker)
        .nth(1)?
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}

/// Pair alternating boundary events into silence intervals.
///
/// The well-formed sequence is start, end, start, end, ... Any
/// desynchronization (an end before a start, two starts in a row, or a
/// trailing unterminated start) is a typed error.
pub fn pair_intervals(events: &[SilenceEvent]) -> SilenceResult<Vec<SilenceInterval>> {
    let mut intervals = Vec::new();
    let mut pending: Option<f64> = None;

    for (index, event) in events.iter().enumerate() {
        match (event.kind, pending) {
            (SilenceEventKind::Start, None) => pending = Some(event.at_secs),
            (SilenceEventKind::Start, Some(_)) => {
                return Err(SilenceError::Desynchronized {
                    index,
                    message: "two silence starts in a row".to_string(),
                });
            }
            (SilenceEventKind::End, Some(start_secs)) => {
                intervals.push(SilenceInterval {
                    start_secs,
                    end_secs: event.at_secs,
                });
                pending = None;
            }
            (SilenceEventKind::End, None) => {
                return Err(SilenceError::Desynchronized {
                    index,
                    message: "silence end before any start".to_string(),
                });
            }
        }
    }

    if let Some(at_secs) = pending {
        return Err(SilenceError::UnpairedStart { at_secs });
    }

    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETECTOR_OUTPUT: &str = "\
Input #0, wav, from 'audio.wav':
  Duration: 00:03:25.20, bitrate: 1536 kb/s
[silencedetect @ 0x5596c1a2d400] silence_start: 0
[silencedetect @ 0x5596c1a2d400] silence_end: 1.33617 | silence_duration: 1.33617
size=N/A time=00:01:00.00 bitrate=N/A speed= 120x
[silencedetect @ 0x5596c1a2d400] silence_start: 198.642
[silencedetect @ 0x5596c1a2d400] silence_end: 205.2 | silence_duration: 6.558
";

    #[test]
    fn extracts_events_in_encounter_order() {
        let events = parse_silence_events(DETECTOR_OUTPUT);
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], SilenceEvent::start(0.0));
        assert_eq!(events[1], SilenceEvent::end(1.33617));
        assert_eq!(events[2], SilenceEvent::start(198.642));
        assert_eq!(events[3], SilenceEvent::end(205.2));
    }

    #[test]
    fn ignores_unrelated_lines() {
        assert!(parse_silence_events("frame= 100 fps=25\nnothing here\n").is_empty());
    }

    #[test]
    fn drops_marker_lines_without_a_number() {
        let events = parse_silence_events(
            "silence_start: not-a-number\nsilence_start: 3.5\nsilence_end:\n",
        );
        assert_eq!(events, vec![SilenceEvent::start(3.5)]);
    }

    #[test]
    fn pairs_alternating_events() {
        let events = vec![
            SilenceEvent::start(0.0),
            SilenceEvent::end(1.5),
            SilenceEvent::start(10.0),
            SilenceEvent::end(12.0),
        ];
        let intervals = pair_intervals(&events).unwrap();
        assert_eq!(
            intervals,
            vec![
                SilenceInterval {
                    start_secs: 0.0,
                    end_secs: 1.5,
                },
                SilenceInterval {
                    start_secs: 10.0,
                    end_secs: 12.0,
                },
            ]
        );
    }

    #[test]
    fn empty_sequence_pairs_to_nothing() {
        assert!(pair_intervals(&[]).unwrap().is_empty());
    }

    #[test]
    fn two_starts_in_a_row_is_desynchronized() {
        let events = vec![SilenceEvent::start(0.0), SilenceEvent::start(5.0)];
        let err = pair_intervals(&events).unwrap_err();
        assert!(matches!(err, SilenceError::Desynchronized { index: 1, .. }));
    }

    #[test]
    fn leading_end_is_desynchronized() {
        let events = vec![SilenceEvent::end(4.0)];
        let err = pair_intervals(&events).unwrap_err();
        assert!(matches!(err, SilenceError::Desynchronized { index: 0, .. }));
    }

    #[test]
    fn trailing_start_is_unpaired() {
        let events = vec![
            SilenceEvent::start(0.0),
            SilenceEvent::end(1.0),
            SilenceEvent::start(50.0),
        ];
        let err = pair_intervals(&events).unwrap_err();
        match err {
            SilenceError::UnpairedStart { at_secs } => assert!((at_secs - 50.0).abs() < 1e-9),
            other => panic!("unexpected error: {}", other),
        }
    }
}
