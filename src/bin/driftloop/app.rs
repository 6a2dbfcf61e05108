//! App - control surface state and event loop

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;

use driftloop::sink::Mixer;
use driftloop::{Engine, MutationKind, WaveKind};

use crate::ui;

/// Ratio between adjacent semitones; frequency nudges step by this.
const SEMITONE: f32 = 1.059_463_1;

const MIN_FREQUENCY: f32 = 20.0;
const MAX_FREQUENCY: f32 = 10_000.0;

/// Slider bounds for the mutation amount. A presentation convention only;
/// the engine itself accepts any finite amount.
const AMOUNT_RANGE: (f32, f32) = (-20.0, 20.0);

const EXPORT_PATH: &str = "driftloop-export.wav";

/// Control surface state.
pub struct App {
    engine: Engine<Mixer>,
    frequency: f32,
    wave: WaveKind,
    amount: f32,
    gain: f32,
    status: String,
    should_quit: bool,
}

impl App {
    pub fn new(engine: Engine<Mixer>) -> Self {
        Self {
            engine,
            frequency: 220.0,
            wave: WaveKind::Sine,
            amount: 5.0,
            gain: 1.0,
            status: String::new(),
            should_quit: false,
        }
    }

    /// Run the UI event loop.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        self.regenerate();

        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;

            // Non-blocking key polling, ~60fps
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

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => self.engine.toggle_playback(),
            KeyCode::Char('w') => {
                self.wave = self.wave.next();
                self.regenerate();
            }
            KeyCode::Char('r') => self.regenerate(),
            KeyCode::Char('m') => {
                let next = self.engine.mutation().next();
                self.engine.set_mutation(next);
            }
            KeyCode::Char('s') => self.engine.toggle_mutation(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Left => self.nudge_frequency(1.0 / SEMITONE),
            KeyCode::Right => self.nudge_frequency(SEMITONE),
            KeyCode::Up => self.nudge_amount(1.0),
            KeyCode::Down => self.nudge_amount(-1.0),
            KeyCode::Char('[') => self.nudge_gain(-0.1),
            KeyCode::Char(']') => self.nudge_gain(0.1),
            _ => {}
        }
    }

    fn regenerate(&mut self) {
        match self.engine.regenerate(self.frequency, self.wave) {
            Ok(()) => {
                self.status = format!("generated {} at {:.1} Hz", self.wave.name(), self.frequency);
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn nudge_frequency(&mut self, factor: f32) {
        self.frequency = (self.frequency * factor).clamp(MIN_FREQUENCY, MAX_FREQUENCY);
        self.regenerate();
    }

    fn nudge_amount(&mut self, delta: f32) {
        self.amount = (self.amount + delta).clamp(AMOUNT_RANGE.0, AMOUNT_RANGE.1);
        self.engine.set_amount(self.amount);
    }

    fn nudge_gain(&mut self, delta: f32) {
        self.gain = (self.gain + delta).clamp(0.0, 2.0);
        self.engine.set_gain(self.gain);
    }

    fn export(&mut self) {
        match self.engine.export(EXPORT_PATH) {
            Ok(()) => self.status = format!("exported {}", EXPORT_PATH),
            Err(err) => self.status = err.to_string(),
        }
    }

    pub fn engine(&self) -> &Engine<Mixer> {
        &self.engine
    }

    pub fn wave(&self) -> WaveKind {
        self.wave
    }

    pub fn mutation(&self) -> MutationKind {
        self.engine.mutation()
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}
