//! Drift - application state and event loop
//!
//! The TUI thread is the single control thread: every user action mutates
//! the one `SoundState` record and pushes the whole thing at the engine,
//! which diffs and transitions. The only other threads are the audio
//! callback (inside the engine) and short-lived coach workers delivering
//! their result over a channel.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossbeam_channel::{unbounded, Receiver, Sender};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use rtrb::Consumer;

use drift_dsp::coach::{self, Recommendation};
use drift_dsp::engine::AudioEngine;
use drift_dsp::modes::Mode;
use drift_dsp::state::SoundState;

use super::ui::{self, spectrum::SpectrumAnalyzer, Snapshot};

/// Audio visualization buffer size (also the FFT size).
const VIS_BUFFER_SIZE: usize = 1024;

/// Focus session started when a recommendation is accepted.
const SESSION_LENGTH: Duration = Duration::from_secs(25 * 60);

pub struct Drift {
    state: SoundState,
    engine: AudioEngine,
    /// Ring buffer receiver for rendered audio samples
    audio_rx: Consumer<f32>,
    /// Last `VIS_BUFFER_SIZE` samples for visualization
    audio_buffer: Vec<f32>,
    /// Created lazily once the engine knows its sample rate
    spectrum: Option<SpectrumAnalyzer>,
    coach_tx: Sender<Recommendation>,
    coach_rx: Receiver<Recommendation>,
    recommendation: Option<Recommendation>,
    coach_pending: bool,
    /// Intention text being typed; `Some` while the input line is open
    input: Option<String>,
    session_deadline: Option<Instant>,
    /// Backdrop animation clock; advances only while playing
    anim_time: f32,
    last_frame: Instant,
    should_quit: bool,
}

impl Drift {
    pub fn new() -> Self {
        let (engine, audio_rx) = AudioEngine::new();
        let (coach_tx, coach_rx) = unbounded();
        Self {
            state: SoundState::new(),
            engine,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: None,
            coach_tx,
            coach_rx,
            recommendation: None,
            coach_pending: false,
            input: None,
            session_deadline: None,
            anim_time: 0.0,
            last_frame: Instant::now(),
            should_quit: false,
        }
    }

    /// Run the application (takes over the terminal).
    pub fn run(mut self) -> EyreResult<()> {
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal);
        ratatui::restore();
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_coach();
            self.tick_clock();

            let snapshot = Snapshot {
                state: &self.state,
                recommendation: self.recommendation.as_ref(),
                coach_pending: self.coach_pending,
                input: self.input.as_deref(),
                remaining: self.session_remaining(),
                anim_time: self.anim_time,
                spectrum: self.spectrum.as_ref().map(|s| s.data()).unwrap_or(&[]),
            };
            terminal.draw(|frame| ui::render(frame, &snapshot))?;

            // Non-blocking keyboard input, ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    /// Drain the engine's visualization tap, keeping the most recent
    /// window, then refresh the spectrum.
    fn poll_audio(&mut self) {
        // Read as many samples as available, keeping the last
        // VIS_BUFFER_SIZE.
        let mut received = false;
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
            received = true;
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }

        if self.spectrum.is_none() {
            if let Some(sample_rate) = self.engine.sample_rate() {
                self.spectrum = Some(SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate));
            }
        }
        if received {
            if let Some(spectrum) = &mut self.spectrum {
                spectrum.update(&self.audio_buffer);
            }
        }
    }

    fn poll_coach(&mut self) {
        while let Ok(recommendation) = self.coach_rx.try_recv() {
            // The recommended mode flows through the same state-update
            // path as a manual mode press, then playback starts.
            self.state.set_mode(recommendation.mode);
            self.state.set_playing(true);
            self.engine.apply(&self.state);
            self.session_deadline = Some(Instant::now() + SESSION_LENGTH);
            self.recommendation = Some(recommendation);
            self.coach_pending = false;
        }
    }

    fn tick_clock(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame);
        self.last_frame = now;
        if self.state.is_playing() {
            self.anim_time += dt.as_secs_f32();
        }
    }

    fn session_remaining(&self) -> Option<Duration> {
        self.session_deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    fn handle_key(&mut self, key: KeyCode) {
        if let Some(input) = &mut self.input {
            match key {
                KeyCode::Esc => self.input = None,
                KeyCode::Enter => self.submit_intention(),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) => input.push(c),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                self.state.toggle_playback();
                self.engine.apply(&self.state);
            }
            KeyCode::Char('1') => self.switch_mode(Mode::Focus),
            KeyCode::Char('2') => self.switch_mode(Mode::Relax),
            KeyCode::Char('3') => self.switch_mode(Mode::Sleep),
            KeyCode::Char('4') => self.switch_mode(Mode::Move),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.state.volume_up();
                self.engine.apply(&self.state);
            }
            KeyCode::Char('-') => {
                self.state.volume_down();
                self.engine.apply(&self.state);
            }
            KeyCode::Char('i') | KeyCode::Char('I') => {
                self.input = Some(String::new());
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.recommendation = None;
                self.session_deadline = None;
            }
            _ => {}
        }
    }

    fn switch_mode(&mut self, mode: Mode) {
        self.state.set_mode(mode);
        self.engine.apply(&self.state);
    }

    fn submit_intention(&mut self) {
        let Some(text) = self.input.take() else { return };
        let text = text.trim().to_string();
        if text.is_empty() {
            return;
        }

        self.coach_pending = true;
        let tx = self.coach_tx.clone();
        // Worker thread so playback control stays live while the request
        // is outstanding; recommend() itself can never fail.
        std::thread::spawn(move || {
            let _ = tx.send(coach::recommend(&text));
        });
    }
}

impl Default for Drift {
    fn default() -> Self {
        Self::new()
    }
}
