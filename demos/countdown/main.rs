//! Full-screen countdown ring.
//!
//! Run with `cargo run` for the 30 second timer, `cargo run -- --short` for
//! the 5 second one, and add `--no-complete` to hide the "Time Up!" state.

use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg, Program};
use ring_timer::prelude::*;
use ring_timer::TimerOption;

struct App {
    screen: TimerScreen,
}

fn options_from_args() -> Vec<TimerOption> {
    let mut opts = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--short" => opts.push(with_duration(SHORT_DURATION)),
            "--no-complete" => opts.push(without_completion()),
            _ => {}
        }
    }
    opts
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let screen = timer_screen_new(&options_from_args());
        (Self { screen }, None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.screen.update(msg)
    }

    fn view(&self) -> String {
        self.screen.view()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let program = Program::<App>::builder().alt_screen(true).build()?;
    program.run().await?;
    Ok(())
}
