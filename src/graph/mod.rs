//! The live soundscape graph: two signal paths summed into one mix.
//!
//! Nodes wrap the low-level DSP primitives with the routing the soundscape
//! needs - a center-panned looping noise bed and a hard-panned binaural
//! tone pair. `SoundGraph` owns the active nodes as a fixed table keyed by
//! role and replaces the whole table on every rebuild, so there is never
//! more than one generation of sources alive.

/// Binaural tone pair, hard-panned left/right.
pub mod binaural;
/// Core trait and render context shared by all graph nodes.
pub mod node;
/// Looping colored-noise source.
pub mod noise_loop;

use crate::dsp::noise::NoiseColor;
use crate::state::SoundState;

use binaural::{BinauralPair, BinauralParams};
use node::{RenderCtx, StereoNode};
use noise_loop::NoiseLoop;

/// Everything the graph needs to build itself, derived from `SoundState`.
///
/// Equality on this struct is what drives rebuild-on-change: the engine
/// compares the params of the live graph against the incoming state and
/// tears down/rebuilds only when they differ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphParams {
    pub noise: Option<NoiseColor>,
    pub binaural: BinauralParams,
}

impl GraphParams {
    pub fn from_state(state: &SoundState) -> Self {
        Self {
            noise: state.noise(),
            binaural: BinauralParams::new(state.binaural_freq()),
        }
    }
}

/// The owned-resource table of live generator nodes.
///
/// At most one generation is ever in flight: `rebuild` drops the previous
/// nodes (releasing their buffers and oscillators on every path, including
/// mid-build panics, since drop order is structural) before the new ones
/// start rendering.
pub struct SoundGraph {
    params: GraphParams,
    noise: Option<NoiseLoop>,
    beats: BinauralPair,
}

impl SoundGraph {
    pub fn build(params: GraphParams, sample_rate: f32) -> Self {
        Self {
            params,
            noise: params.noise.map(|color| NoiseLoop::new(color, sample_rate)),
            beats: BinauralPair::new(params.binaural),
        }
    }

    /// Full teardown-then-build. Not an incremental retune: the noise
    /// buffer is regenerated and both oscillators restart from zero phase.
    pub fn rebuild(&mut self, params: GraphParams, sample_rate: f32) {
        // Release the previous generation before synthesizing the next;
        // the caller holds the render lock, so the graph is simply silent
        // for the duration of the swap.
        self.noise = None;
        *self = Self::build(params, sample_rate);
    }

    pub fn params(&self) -> &GraphParams {
        &self.params
    }

    pub fn noise(&self) -> Option<&NoiseLoop> {
        self.noise.as_ref()
    }

    pub fn beats(&self) -> &BinauralPair {
        &self.beats
    }

    /// Render one block into the left/right pair, replacing its contents.
    pub fn render(&mut self, left: &mut [f32], right: &mut [f32], ctx: &RenderCtx) {
        left.fill(0.0);
        right.fill(0.0);
        if let Some(noise) = &mut self.noise {
            noise.render_block(left, right, ctx);
        }
        self.beats.render_block(left, right, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::Mode;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn focus_params() -> GraphParams {
        let mut state = SoundState::new();
        state.set_mode(Mode::Focus);
        GraphParams::from_state(&state)
    }

    #[test]
    fn builds_one_noise_source_and_two_oscillators() {
        let graph = SoundGraph::build(focus_params(), SAMPLE_RATE);
        assert_eq!(graph.noise().map(|n| n.color()), Some(NoiseColor::Brown));
        assert_eq!(graph.beats().params(), BinauralParams::new(14.0));
    }

    #[test]
    fn omits_noise_source_when_type_is_none() {
        let params = GraphParams {
            noise: None,
            binaural: BinauralParams::new(8.0),
        };
        let mut graph = SoundGraph::build(params, SAMPLE_RATE);
        assert!(graph.noise().is_none());

        // Tones alone still produce signal.
        let mut left = vec![0.0; 256];
        let mut right = vec![0.0; 256];
        graph.render(&mut left, &mut right, &RenderCtx::new(SAMPLE_RATE));
        assert!(left.iter().any(|&s| s.abs() > 0.0));
    }

    #[test]
    fn rebuild_replaces_rather_than_accumulates() {
        let params = focus_params();
        let mut graph = SoundGraph::build(params, SAMPLE_RATE);
        let first_head: Vec<f32> = graph.noise().unwrap().buffer()[..32].to_vec();

        graph.rebuild(params, SAMPLE_RATE);
        graph.rebuild(params, SAMPLE_RATE);

        // Still exactly one noise source and one tone pair, with a fresh
        // stochastic buffer.
        assert_eq!(graph.noise().map(|n| n.color()), Some(NoiseColor::Brown));
        assert_eq!(graph.beats().params(), BinauralParams::new(14.0));
        assert_ne!(&graph.noise().unwrap().buffer()[..32], first_head.as_slice());
    }

    #[test]
    fn render_replaces_buffer_contents() {
        let mut graph = SoundGraph::build(focus_params(), SAMPLE_RATE);
        let mut left = vec![9.0; 128];
        let mut right = vec![9.0; 128];
        graph.render(&mut left, &mut right, &RenderCtx::new(SAMPLE_RATE));
        assert!(left.iter().all(|&s| s.abs() < 2.0), "stale content survived");
    }
}
