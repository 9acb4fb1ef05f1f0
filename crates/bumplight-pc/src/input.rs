//! Scripted input for headless runs.
//!
//! A script is a whitespace-separated list of steps, one per frame:
//!
//! ```text
//! left right up down   move the selected light
//! next                 select the next light
//! count                cycle the number of active lights
//! red green blue       step a color channel of the selected light
//! bump stats           toggle the bump pass / statistics
//! quit                 leave the frame loop
//! -                    no input this frame
//! ```
//!
//! A step may carry a repeat count, e.g. `right*10`.

use std::collections::VecDeque;

use anyhow::{bail, Context, Result};
use bumplight_hal::{ColorChannel, InputEvent, InputSource};

/// Replays a fixed sequence of input steps, one per poll.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    steps: VecDeque<Option<InputEvent>>,
}

impl ScriptedInput {
    pub fn parse(script: &str) -> Result<Self> {
        let mut steps = VecDeque::new();
        for token in script.split_whitespace() {
            let (name, repeat) = match token.split_once('*') {
                Some((name, count)) => {
                    let count: usize = count
                        .parse()
                        .with_context(|| format!("bad repeat count in '{token}'"))?;
                    (name, count)
                }
                None => (token, 1),
            };
            let step = parse_step(name)?;
            steps.extend(std::iter::repeat(step).take(repeat));
        }
        Ok(Self { steps })
    }

    /// Steps not yet replayed.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

fn parse_step(name: &str) -> Result<Option<InputEvent>> {
    let event = match name {
        "-" => return Ok(None),
        "left" => InputEvent::MoveLight { dx: -1.0, dy: 0.0 },
        "right" => InputEvent::MoveLight { dx: 1.0, dy: 0.0 },
        "up" => InputEvent::MoveLight { dx: 0.0, dy: -1.0 },
        "down" => InputEvent::MoveLight { dx: 0.0, dy: 1.0 },
        "next" => InputEvent::SelectNextLight,
        "count" => InputEvent::CycleLightCount,
        "red" => InputEvent::CycleColor(ColorChannel::Red),
        "green" => InputEvent::CycleColor(ColorChannel::Green),
        "blue" => InputEvent::CycleColor(ColorChannel::Blue),
        "bump" => InputEvent::ToggleBump,
        "stats" => InputEvent::ToggleStats,
        "quit" => InputEvent::Quit,
        other => bail!("unknown input step '{other}'"),
    };
    Ok(Some(event))
}

impl InputSource for ScriptedInput {
    fn init(&mut self) {
        log::info!("Scripted input: {} steps", self.steps.len());
    }

    fn poll(&mut self) -> Option<InputEvent> {
        self.steps.pop_front().flatten()
    }
}
