pub mod coach; // External recommendation collaborator
pub mod dsp;
pub mod engine; // Audio context ownership and graph lifecycle
pub mod graph; // Stereo soundscape graph nodes
pub mod modes;
pub mod state;

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Length of the looped noise buffer, in seconds.
pub const NOISE_LOOP_SECONDS: f32 = 2.0;
