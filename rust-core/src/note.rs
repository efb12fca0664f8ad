//! Frequency to note-name mapping in twelve-tone equal temperament
//!
//! Anchored at A4 = 440 Hz. Half steps are counted from C0, so octave
//! numbers follow scientific pitch notation and go negative below C0.

use std::fmt;

/// Reference pitch of A4 in Hz
pub const A4_HZ: f64 = 440.0;

const SEMITONES_PER_OCTAVE: i32 = 12;

/// C0 sits 4.75 octaves (57 half steps) below A4
pub fn c0_hz() -> f64 {
    A4_HZ * 2f64.powf(-4.75)
}

/// The twelve pitch classes, C first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteName {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl NoteName {
    pub const ALL: [NoteName; 12] = [
        NoteName::C,
        NoteName::CSharp,
        NoteName::D,
        NoteName::DSharp,
        NoteName::E,
        NoteName::F,
        NoteName::FSharp,
        NoteName::G,
        NoteName::GSharp,
        NoteName::A,
        NoteName::ASharp,
        NoteName::B,
    ];

    /// Pitch class for a half-step count, wrapping negatives
    pub fn from_half_steps(half_steps: i32) -> Self {
        Self::ALL[half_steps.rem_euclid(SEMITONES_PER_OCTAVE) as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteName::C => "C",
            NoteName::CSharp => "C#",
            NoteName::D => "D",
            NoteName::DSharp => "D#",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::FSharp => "F#",
            NoteName::G => "G",
            NoteName::GSharp => "G#",
            NoteName::A => "A",
            NoteName::ASharp => "A#",
            NoteName::B => "B",
        }
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pitch class with its octave, e.g. A4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pub name: NoteName,
    pub octave: i32,
}

impl Note {
    pub fn new(name: NoteName, octave: i32) -> Self {
        Self { name, octave }
    }

    /// Note at `half_steps` above C0
    ///
    /// The octave uses floor division so that it agrees with the wrapped
    /// pitch class: -1 is B-1, not B0.
    pub fn from_half_steps(half_steps: i32) -> Self {
        Self {
            name: NoteName::from_half_steps(half_steps),
            octave: half_steps.div_euclid(SEMITONES_PER_OCTAVE),
        }
    }

    /// Half steps above C0
    pub fn half_steps(&self) -> i32 {
        self.octave * SEMITONES_PER_OCTAVE + self.name as i32
    }

    /// Exact equal-tempered frequency of this note
    pub fn frequency_hz(&self) -> f64 {
        c0_hz() * 2f64.powf(self.half_steps() as f64 / SEMITONES_PER_OCTAVE as f64)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.octave)
    }
}

/// Result of analyzing one audio block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoteEvent {
    Detected(Note),
    /// Silence, empty input or an unusable frequency estimate
    #[default]
    NoDetection,
}

impl NoteEvent {
    pub fn note(&self) -> Option<Note> {
        match self {
            NoteEvent::Detected(note) => Some(*note),
            NoteEvent::NoDetection => None,
        }
    }

    pub fn is_detected(&self) -> bool {
        matches!(self, NoteEvent::Detected(_))
    }
}

impl From<Option<Note>> for NoteEvent {
    fn from(note: Option<Note>) -> Self {
        note.map_or(NoteEvent::NoDetection, NoteEvent::Detected)
    }
}

impl fmt::Display for NoteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteEvent::Detected(note) => write!(f, "{}", note),
            NoteEvent::NoDetection => f.write_str("none"),
        }
    }
}

/// Map a frequency to the nearest equal-tempered note
///
/// `halfSteps = round(12 * log2(f / C0))`. Non-positive and non-finite
/// frequencies yield `NoDetection` instead of a logarithm fault.
pub fn frequency_to_note(frequency_hz: f64) -> NoteEvent {
    if !(frequency_hz.is_finite() && frequency_hz > 0.0) {
        return NoteEvent::NoDetection;
    }

    let half_steps = (SEMITONES_PER_OCTAVE as f64 * (frequency_hz / c0_hz()).log2()).round();
    NoteEvent::Detected(Note::from_half_steps(half_steps as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detected(frequency_hz: f64) -> Note {
        frequency_to_note(frequency_hz).note().expect("expected a note")
    }

    #[test]
    fn test_a440_is_a4() {
        let note = detected(440.0);
        assert_eq!(note, Note::new(NoteName::A, 4));
        assert_eq!(note.half_steps(), 57);
        assert_eq!(note.to_string(), "A4");
    }

    #[test]
    fn test_common_pitches() {
        assert_eq!(detected(261.63).to_string(), "C4");
        assert_eq!(detected(277.18).to_string(), "C#4");
        assert_eq!(detected(82.41).to_string(), "E2");
        assert_eq!(detected(1975.53).to_string(), "B6");
        assert_eq!(detected(c0_hz()).to_string(), "C0");
    }

    #[test]
    fn test_rounds_to_nearest_half_step() {
        // 430 Hz is ~40 cents flat of A4, 452 Hz ~47 cents sharp
        assert_eq!(detected(430.0).to_string(), "A4");
        assert_eq!(detected(452.0).to_string(), "A4");
        assert_eq!(detected(455.0).to_string(), "A#4");
    }

    #[test]
    fn test_below_c0_floors_octave() {
        // One half step below C0 is B-1, not a wraparound into octave 0
        let b_minus_1 = c0_hz() / 2f64.powf(1.0 / 12.0);
        let note = detected(b_minus_1);
        assert_eq!(note, Note::new(NoteName::B, -1));
        assert_eq!(note.to_string(), "B-1");

        let note = detected(c0_hz() / 2f64.powf(13.0 / 12.0));
        assert_eq!(note, Note::new(NoteName::B, -2));
    }

    #[test]
    fn test_invalid_frequencies() {
        assert_eq!(frequency_to_note(0.0), NoteEvent::NoDetection);
        assert_eq!(frequency_to_note(-440.0), NoteEvent::NoDetection);
        assert_eq!(frequency_to_note(f64::NAN), NoteEvent::NoDetection);
        assert_eq!(frequency_to_note(f64::INFINITY), NoteEvent::NoDetection);
        assert_eq!(NoteEvent::NoDetection.to_string(), "none");
    }

    #[test]
    fn test_half_step_round_trip() {
        for half_steps in -30..120 {
            let note = Note::from_half_steps(half_steps);
            assert_eq!(note.half_steps(), half_steps);
            assert_eq!(detected(note.frequency_hz()), note);
        }
    }
}
