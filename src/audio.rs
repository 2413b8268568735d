use crate::error::AudioError;
use crate::log::emit_log;
use crate::types::GameEvent;
use serde_json::json;
use std::collections::BTreeMap;

/// Whatever actually makes noise. Failures are reported, never fatal.
pub trait AudioSink {
    fn play(&mut self, cue: &str) -> Result<(), AudioError>;
}

/// Counts cues instead of playing them; the headless simulator uses it.
#[derive(Clone, Debug, Default)]
pub struct CueTally {
    pub counts: BTreeMap<String, usize>,
}

impl AudioSink for CueTally {
    fn play(&mut self, cue: &str) -> Result<(), AudioError> {
        *self.counts.entry(cue.to_string()).or_insert(0) += 1;
        Ok(())
    }
}

/// Sits between the round and a sink: forwards event cues while enabled and
/// swallows sink failures after logging them.
#[derive(Debug)]
pub struct SoundBoard<S: AudioSink> {
    sink: S,
    enabled: bool,
    failures: u64,
}

impl<S: AudioSink> SoundBoard<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            enabled: true,
            failures: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flips mute; returns the new enabled state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn dispatch(&mut self, events: &[GameEvent]) {
        if !self.enabled {
            return;
        }
        for event in events {
            let cue = event.name();
            if let Err(error) = self.sink.play(cue) {
                self.failures += 1;
                emit_log(
                    "warn",
                    "audio_cue_failed",
                    None,
                    None,
                    json!({
                        "cue": cue,
                        "error": error.to_string(),
                    }),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AudioSink, CueTally, SoundBoard};
    use crate::error::AudioError;
    use crate::types::GameEvent;

    struct BrokenSink;

    impl AudioSink for BrokenSink {
        fn play(&mut self, cue: &str) -> Result<(), AudioError> {
            Err(AudioError::MissingAsset(cue.to_string()))
        }
    }

    #[test]
    fn cues_follow_event_names() {
        let mut board = SoundBoard::new(CueTally::default());
        board.dispatch(&[
            GameEvent::GameStarted,
            GameEvent::DotCollected { x: 1, y: 1 },
            GameEvent::DotCollected { x: 2, y: 1 },
            GameEvent::GhostEaten {
                ghost_id: 0,
                x: 2,
                y: 1,
            },
        ]);
        let counts = &board.sink().counts;
        assert_eq!(counts.get("game_started"), Some(&1));
        assert_eq!(counts.get("dot_collected"), Some(&2));
        assert_eq!(counts.get("adversary_eaten"), Some(&1));
    }

    #[test]
    fn muted_board_drops_cues() {
        let mut board = SoundBoard::new(CueTally::default());
        assert!(!board.toggle());
        board.dispatch(&[GameEvent::Victory]);
        assert!(board.sink().counts.is_empty());
        assert!(board.toggle());
        board.dispatch(&[GameEvent::Victory]);
        assert_eq!(board.sink().counts.get("victory"), Some(&1));
    }

    #[test]
    fn sink_failures_are_absorbed() {
        let mut board = SoundBoard::new(BrokenSink);
        board.dispatch(&[GameEvent::GameOver, GameEvent::GameStarted]);
        assert_eq!(board.failures(), 2);
        assert!(board.is_enabled());
    }
}
