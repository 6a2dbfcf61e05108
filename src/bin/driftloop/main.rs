//! driftloop - terminal front end for the waveform mutation engine
//!
//! Run with: cargo run

mod app;
mod ui;

use color_eyre::eyre::{Result as EyreResult, WrapErr};

use driftloop::sink::{CpalOutput, Mixer};
use driftloop::Engine;

use app::App;

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    // No output device means the whole system is unsupported: report once
    // and initialize nothing else.
    let mixer = Mixer::new();
    let output = CpalOutput::start(mixer.clone()).wrap_err("audio output is unavailable")?;

    let engine = Engine::new(mixer, output.sample_rate());

    let mut terminal = ratatui::init();
    let result = App::new(engine).run(&mut terminal);
    ratatui::restore();
    result
}
