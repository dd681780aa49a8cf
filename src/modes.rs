//! Mental-state modes and the two tables derived from them.
//!
//! A mode resolves to two independent parameter sets: synthesis parameters
//! (beat frequency and noise color, consumed by the engine) and a cosmetic
//! theme (palette and animation shape, consumed only by the backdrop).
//! Both resolvers are pure and total over the closed enum; nothing here
//! touches audio state.

use serde::{Deserialize, Serialize};

use crate::dsp::noise::NoiseColor;

/// The four mental-state modes.
///
/// Serialized in SCREAMING case ("FOCUS", ...) to match the coach
/// service's response schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Focus,
    Relax,
    Sleep,
    Move,
}

/// Parameters the audio engine derives from a mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisParams {
    /// Binaural beat frequency in Hz.
    pub beat_freq: f32,
    /// Noise bed color; `None` renders tones only.
    pub noise: Option<NoiseColor>,
}

/// Cosmetic parameters consumed by the visual backdrop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Orb palette, darkest-to-brightest is not guaranteed.
    pub palette: [(u8, u8, u8); 3],
    /// Base animation period in seconds; the three orbs run at 1.0x,
    /// 1.4x and 0.8x of this.
    pub period_secs: f32,
    /// Backdrop intensity while playing (paused dims to a fixed floor).
    pub opacity: f32,
    /// Orb size multiplier.
    pub scale: f32,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Focus, Mode::Relax, Mode::Sleep, Mode::Move];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Focus => "FOCUS",
            Mode::Relax => "RELAX",
            Mode::Sleep => "SLEEP",
            Mode::Move => "MOVE",
        }
    }

    /// The fixed mode -> synthesis table. Entrainment targets: beta for
    /// focus, alpha for relaxation, delta for sleep, high beta for
    /// movement.
    pub fn synthesis(self) -> SynthesisParams {
        match self {
            Mode::Focus => SynthesisParams {
                beat_freq: 14.0,
                noise: Some(NoiseColor::Brown),
            },
            Mode::Relax => SynthesisParams {
                beat_freq: 8.0,
                noise: Some(NoiseColor::Pink),
            },
            Mode::Sleep => SynthesisParams {
                beat_freq: 3.0,
                noise: Some(NoiseColor::Pink),
            },
            Mode::Move => SynthesisParams {
                beat_freq: 22.0,
                noise: Some(NoiseColor::White),
            },
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            Mode::Focus => Theme {
                palette: [(0, 242, 254), (79, 172, 254), (0, 210, 255)],
                period_secs: 12.0,
                opacity: 1.0,
                scale: 1.1,
            },
            Mode::Relax => Theme {
                palette: [(161, 140, 209), (251, 194, 235), (142, 45, 226)],
                period_secs: 22.0,
                opacity: 0.8,
                scale: 1.0,
            },
            Mode::Sleep => Theme {
                palette: [(30, 60, 114), (42, 82, 152), (0, 0, 70)],
                period_secs: 40.0,
                opacity: 0.6,
                scale: 1.3,
            },
            Mode::Move => Theme {
                palette: [(255, 0, 204), (51, 51, 153), (0, 219, 222)],
                period_secs: 8.0,
                opacity: 1.0,
                scale: 1.2,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesis_table_is_exact() {
        let focus = Mode::Focus.synthesis();
        assert_eq!(focus.beat_freq, 14.0);
        assert_eq!(focus.noise, Some(NoiseColor::Brown));

        let relax = Mode::Relax.synthesis();
        assert_eq!(relax.beat_freq, 8.0);
        assert_eq!(relax.noise, Some(NoiseColor::Pink));

        let sleep = Mode::Sleep.synthesis();
        assert_eq!(sleep.beat_freq, 3.0);
        assert_eq!(sleep.noise, Some(NoiseColor::Pink));

        let mv = Mode::Move.synthesis();
        assert_eq!(mv.beat_freq, 22.0);
        assert_eq!(mv.noise, Some(NoiseColor::White));
    }

    #[test]
    fn tables_are_total() {
        // Resolving every variant must succeed; beat frequencies stay in
        // the psychoacoustically useful range.
        for mode in Mode::ALL {
            let synth = mode.synthesis();
            assert!(synth.beat_freq > 0.0 && synth.beat_freq <= 30.0);
            let theme = mode.theme();
            assert!(theme.period_secs > 0.0);
            assert!((0.0..=1.0).contains(&theme.opacity));
        }
    }

    #[test]
    fn serializes_in_screaming_case() {
        assert_eq!(serde_json::to_string(&Mode::Focus).unwrap(), "\"FOCUS\"");
        let parsed: Mode = serde_json::from_str("\"SLEEP\"").unwrap();
        assert_eq!(parsed, Mode::Sleep);
    }
}
