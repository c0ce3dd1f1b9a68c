use std::io::{self, BufRead, StdinLock, Write};

use itertools::Itertools;
use rand::Rng;
use regex::Regex;
use types::{GameView, Strategy};

const MAX_READ_ERRORS: usize = 3;

/// Asks a human on stdin whether to switch boxes.
#[derive(Debug)]
pub struct InputStrategy<B = StdinLock<'static>> {
    reader: B,
    answer_re: Regex,
}

impl Default for InputStrategy {
    fn default() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<B: BufRead> InputStrategy<B> {
    pub fn new(reader: B) -> Self {
        Self {
            reader,
            answer_re: Regex::new(
                r"(?i)^\s*(?:(?<switch>y|yes|s|switch)|(?<stay>n|no|k|keep|stay))\s*$",
            )
            .expect("Valid answer regex"),
        }
    }

    fn prompt(&mut self, buf: &mut String) -> io::Result<usize> {
        print!("Switch to another box? [y/n] >> ");
        let _ = io::stdout().flush();
        buf.clear();
        self.reader.read_line(buf)
    }
}

impl<B: BufRead> Strategy for InputStrategy<B> {
    fn should_repick<R: Rng>(&mut self, view: &GameView<'_>, _rng: &mut R) -> bool {
        print_view(view);

        let mut buf = String::new();
        let mut read_errors = 0;
        loop {
            match self.prompt(&mut buf) {
                Ok(0) => {
                    log::warn!("Input closed, keeping the current box");
                    return false;
                }
                Ok(_) => {
                    read_errors = 0;
                    match parse_answer(&self.answer_re, &buf) {
                        Ok(answer) => return answer,
                        Err(err) => log::error!("Error parsing answer: {err}"),
                    }
                }
                Err(err) => {
                    read_errors += 1;
                    log::error!("Error reading line from stdin: {err}");
                    if read_errors >= MAX_READ_ERRORS {
                        log::warn!(
                            "Giving up after {read_errors} read errors, keeping the current box"
                        );
                        return false;
                    }
                }
            }
        }
    }
}

fn print_view(view: &GameView<'_>) {
    let picked = view
        .picked_index()
        .map_or_else(|| "none".to_string(), |i| i.to_string());
    println!(
        "You picked box {picked}. The host opened: [ {} ]",
        view.open_box_indices().iter().join(", ")
    );
    println!(
        "Closed boxes: [ {} ]",
        view.closed_box_indices().iter().join(", ")
    );
}

fn parse_answer(re: &Regex, input: &str) -> Result<bool, String> {
    let Some(caps) = re.captures(input) else {
        return Err(format!("Expected y(es)/s(witch) or n(o)/k(eep), got {:?}", input.trim()));
    };
    Ok(caps.name("switch").is_some())
}
