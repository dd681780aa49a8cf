/// Context passed to graph nodes during rendering.
///
/// The soundscape graph has no note events or velocities; nodes carry
/// their own frequencies and buffers, so the context is just the audio
/// clock rate.
pub struct RenderCtx {
    pub sample_rate: f32,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self { sample_rate }
    }
}

/// Core trait for stereo soundscape nodes.
///
/// Nodes render one block at a time into a left/right channel pair of
/// equal length, ADDING into the buffers. Summing at the node boundary is
/// what lets the graph mix its two signal paths (noise + binaural tones)
/// without a separate mix stage: the caller zeroes the buffers once, then
/// renders each source in turn.
pub trait StereoNode: Send {
    fn render_block(&mut self, left: &mut [f32], right: &mut [f32], ctx: &RenderCtx);
}
