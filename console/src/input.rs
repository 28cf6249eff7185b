use std::collections::VecDeque;
use std::io::BufRead;

use badgesweep_core::{Buttons, InputSource};

/// Maps one command character to the buttons it presses.
///
/// `None` for characters that are not commands.
fn command(ch: char) -> Option<Buttons> {
    Some(match ch.to_ascii_lowercase() {
        'w' => Buttons::UP,
        's' => Buttons::DOWN,
        'a' => Buttons::LEFT,
        'd' => Buttons::RIGHT,
        'j' | ' ' => Buttons::A,
        'k' | 'f' => Buttons::B,
        '.' => Buttons::empty(),
        _ => return None,
    })
}

/// Button samples typed as command characters, either all at once or line by line.
///
/// Every command becomes a press sample followed by a release sample, so each one fires
/// exactly once. `q` ends the input.
#[derive(Debug)]
pub(crate) struct CommandInput<R> {
    queue: VecDeque<Buttons>,
    reader: Option<R>,
    quit: bool,
}

impl CommandInput<std::io::Empty> {
    pub fn script(commands: &str) -> Self {
        let mut input = Self {
            queue: VecDeque::new(),
            reader: None,
            quit: false,
        };
        input.push_commands(commands);
        input
    }
}

impl<R: BufRead> CommandInput<R> {
    pub fn reader(reader: R) -> Self {
        Self {
            queue: VecDeque::new(),
            reader: Some(reader),
            quit: false,
        }
    }

    /// No samples left without reading more input.
    pub fn is_drained(&self) -> bool {
        self.queue.is_empty()
    }

    fn push_commands(&mut self, commands: &str) {
        for ch in commands.chars() {
            if ch == 'q' || ch == 'Q' {
                log::debug!("Quit requested");
                self.quit = true;
                return;
            }
            match command(ch) {
                Some(buttons) => {
                    self.queue.push_back(buttons);
                    self.queue.push_back(Buttons::empty());
                }
                None if ch.is_whitespace() => {}
                None => log::warn!("Ignoring unknown command {:?}", ch),
            }
        }
    }

    fn refill(&mut self) -> bool {
        let Some(reader) = self.reader.as_mut() else {
            return false;
        };
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => false,
            Ok(_) => {
                self.push_commands(line.trim_end_matches(['\r', '\n']));
                true
            }
            Err(err) => {
                log::error!("Could not read input: {err}");
                false
            }
        }
    }
}

impl<R: BufRead> InputSource for CommandInput<R> {
    fn sample(&mut self) -> Option<Buttons> {
        loop {
            if let Some(buttons) = self.queue.pop_front() {
                return Some(buttons);
            }
            if self.quit || !self.refill() {
                return None;
            }
        }
    }
}
