//! Step extraction from numbered markdown study plans.
//!
//! A study plan body is free-form markdown in which every line of the form
//! `<digits>. <title>` (leading whitespace allowed) opens a new step. All
//! following lines up to the next such line form the step's body.
//!
//! ```rust
//! use stepwise_core::parser::parse_steps;
//!
//! let steps = parse_steps("1. A\nfoo\n2. B\nbar");
//! assert_eq!(steps.len(), 2);
//! assert_eq!(steps[0].title, "A");
//! assert_eq!(steps[1].content, "bar");
//! ```
//!
//! Numbering continuity is irrelevant: `7.` followed by `2.` yields two steps
//! in source order. A numbered line with a blank title still ends the open
//! step, but the untitled step it starts is dropped along with its body. Text before the first numbered line is not part of any
//! step; [`parse_plan`] returns it separately as the plan's preamble.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::Step;

/// Steps of a plan together with the text that precedes the first step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPlan {
    /// Trimmed text before the first numbered line, if any
    pub preamble: Option<String>,
    pub steps: Vec<Step>,
}

/// Parses a plan body into its ordered steps. Never fails: a document with
/// no numbered lines yields no steps.
pub fn parse_steps(markdown: &str) -> Vec<Step> {
    parse_plan(markdown).steps
}

/// Parses a plan body into its steps and preamble.
pub fn parse_plan(markdown: &str) -> ParsedPlan {
    markdown
        .lines()
        .fold(Accumulator::default(), Accumulator::push_line)
        .finish()
}

fn step_boundary() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*\d+\.\s+(.*)$").expect("step boundary pattern is valid")
    })
}

#[derive(Default)]
struct Accumulator<'a> {
    preamble: Vec<&'a str>,
    open: Option<OpenStep<'a>>,
    steps: Vec<Step>,
}

struct OpenStep<'a> {
    title: &'a str,
    body: Vec<&'a str>,
}

impl<'a> OpenStep<'a> {
    fn close(self) -> Option<Step> {
        let title = self.title.trim();
        (!title.is_empty()).then(|| Step::new(title, self.body.join("\n").trim()))
    }
}

impl<'a> Accumulator<'a> {
    fn push_line(mut self, line: &'a str) -> Self {
        match step_boundary().captures(line).and_then(|caps| caps.get(1)) {
            Some(title) => {
                self.close_open();
                self.open = Some(OpenStep {
                    title: title.as_str(),
                    body: Vec::new(),
                });
            }
            None => match self.open.as_mut() {
                Some(open) => open.body.push(line),
                None => self.preamble.push(line),
            },
        }
        self
    }

    fn close_open(&mut self) {
        if let Some(step) = self.open.take().and_then(OpenStep::close) {
            self.steps.push(step);
        }
    }

    fn finish(mut self) -> ParsedPlan {
        self.close_open();

        let preamble = self.preamble.join("\n").trim().to_string();
        ParsedPlan {
            preamble: (!preamble.is_empty()).then_some(preamble),
            steps: self.steps,
        }
    }
}
