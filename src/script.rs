//! Headless command scripts.
//!
//! A script is a comma-separated list of navigator commands replayed against
//! a [`RowViewport`] on a virtual clock:
//!
//! ```text
//! next,next,prev,index:2,refresh,scroll:120,wait:250
//! ```
//!
//! After each command frames are pumped until the viewport stops moving. At
//! the end the clock runs until the debounce has fired, so the last settled
//! state is always reported.

use crate::navigator::{NavEvent, NavigationState, Navigator, NavigatorOptions};
use crate::view_state::strip::{is_busy, pump, RowViewport, FRAME_INTERVAL};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Upper bound on frames pumped while settling, so a host bug cannot spin forever.
const MAX_SETTLE_FRAMES: usize = 10_000;

/// Errors from parsing a script.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Command name not recognized.
    #[error("Unknown script command: {0:?}")]
    UnknownCommand(String),

    /// Command recognized but its argument is missing or malformed.
    #[error("Invalid argument for {command}: {value:?}")]
    InvalidArgument {
        /// Command name.
        command: String,
        /// Offending argument text.
        value: String,
    },
}

/// One scripted action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptCommand {
    /// Page back.
    Prev,
    /// Page forward.
    Next,
    /// Jump to a child index.
    Index(usize),
    /// Queue a refresh and report its state.
    Refresh,
    /// Smooth scroll to an absolute offset in px.
    Scroll(f64),
    /// Let the clock run.
    Wait(Duration),
}

fn invalid(command: &str, value: &str) -> ScriptError {
    ScriptError::InvalidArgument {
        command: command.to_string(),
        value: value.to_string(),
    }
}

impl FromStr for ScriptCommand {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (s.trim(), None),
        };

        match (name, arg) {
            ("prev", None) => Ok(Self::Prev),
            ("next", None) => Ok(Self::Next),
            ("refresh", None) => Ok(Self::Refresh),
            ("index", Some(arg)) => arg
                .parse()
                .map(Self::Index)
                .map_err(|_| invalid(name, arg)),
            ("scroll", Some(arg)) => match arg.parse::<f64>() {
                Ok(px) if px.is_finite() => Ok(Self::Scroll(px)),
                _ => Err(invalid(name, arg)),
            },
            ("wait", Some(arg)) => arg
                .parse()
                .map(|ms| Self::Wait(Duration::from_millis(ms)))
                .map_err(|_| invalid(name, arg)),
            ("prev" | "next" | "refresh", Some(arg)) => Err(invalid(name, arg)),
            ("index" | "scroll" | "wait", None) => Err(invalid(name, "")),
            _ => Err(ScriptError::UnknownCommand(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ScriptCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prev => write!(f, "prev"),
            Self::Next => write!(f, "next"),
            Self::Index(i) => write!(f, "index:{}", i),
            Self::Refresh => write!(f, "refresh"),
            Self::Scroll(px) => write!(f, "scroll:{}", px),
            Self::Wait(d) => write!(f, "wait:{}", d.as_millis()),
        }
    }
}

/// Parse a comma-separated script. Blank entries are skipped.
pub fn parse_script(script: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    script
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// State reported by a `refresh` command (and once at start).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RefreshReport {
    event: &'static str,
    #[serde(flatten)]
    state: NavigationState,
}

impl RefreshReport {
    fn new(state: NavigationState) -> Self {
        Self {
            event: "refresh",
            state,
        }
    }

    /// The measured state.
    pub fn state(&self) -> NavigationState {
        self.state
    }
}

/// One line of script output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScriptEvent {
    /// Navigator notification.
    Nav(NavEvent),
    /// Result of a refresh.
    Refresh(RefreshReport),
}

/// Virtual clock plus the navigator it drives.
struct Runner {
    navigator: Navigator<RowViewport>,
    now: Instant,
}

impl Runner {
    /// Pump frames until the viewport stops animating.
    fn finish_motion(&mut self) {
        pump(&mut self.navigator, self.now);
        for _ in 0..MAX_SETTLE_FRAMES {
            let animating = self
                .navigator
                .viewport()
                .is_some_and(RowViewport::is_animating);
            if !animating {
                return;
            }
            self.now += FRAME_INTERVAL;
            pump(&mut self.navigator, self.now);
        }
        warn!("Viewport still animating after frame limit");
    }

    fn wait(&mut self, duration: Duration) {
        let end = self.now + duration;
        while self.now + FRAME_INTERVAL <= end {
            self.now += FRAME_INTERVAL;
            pump(&mut self.navigator, self.now);
        }
        self.now = end;
        pump(&mut self.navigator, self.now);
    }

    /// Run the clock until nothing is animating, pending, or queued.
    fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_FRAMES {
            if !is_busy(&self.navigator) {
                return;
            }
            self.now += FRAME_INTERVAL;
            pump(&mut self.navigator, self.now);
        }
        warn!("Navigator still busy after frame limit");
    }
}

/// Replay `commands` against `viewport`, returning every event in order.
///
/// The first event is a refresh report of the initial measurement.
pub fn run_script(
    viewport: RowViewport,
    options: NavigatorOptions,
    commands: &[ScriptCommand],
    start: Instant,
) -> Vec<ScriptEvent> {
    let events = Rc::new(RefCell::new(Vec::new()));

    let mut navigator = Navigator::mounted(viewport, options);
    let sink = Rc::clone(&events);
    navigator.subscribe(move |event| sink.borrow_mut().push(ScriptEvent::Nav(event.clone())));

    if let Some(state) = navigator.refresh_now() {
        events
            .borrow_mut()
            .push(ScriptEvent::Refresh(RefreshReport::new(state)));
    }

    let mut runner = Runner {
        navigator,
        now: start,
    };

    for command in commands {
        debug!(%command, "Running script command");
        match *command {
            ScriptCommand::Prev => runner.navigator.prev(),
            ScriptCommand::Next => runner.navigator.next(),
            ScriptCommand::Index(index) => runner.navigator.scroll_to_index(index),
            ScriptCommand::Scroll(left) => runner.navigator.scroll_to_left(left),
            ScriptCommand::Refresh => {
                let sink = Rc::clone(&events);
                runner.navigator.refresh(move |state| {
                    sink.borrow_mut()
                        .push(ScriptEvent::Refresh(RefreshReport::new(*state)));
                });
            }
            ScriptCommand::Wait(duration) => {
                runner.wait(duration);
                continue;
            }
        }
        runner.finish_motion();
    }

    runner.settle();
    events.take()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_by_hundred() -> RowViewport {
        RowViewport::new(300.0, vec![100.0; 5])
    }

    fn settled(events: &[ScriptEvent]) -> Vec<NavigationState> {
        events
            .iter()
            .filter_map(|e| match e {
                ScriptEvent::Nav(NavEvent::ScrollDebounce(state)) => Some(*state),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn parses_every_command() {
        let commands = parse_script("next, prev,index:2,refresh,scroll:120.5,wait:250").unwrap();
        assert_eq!(
            commands,
            vec![
                ScriptCommand::Next,
                ScriptCommand::Prev,
                ScriptCommand::Index(2),
                ScriptCommand::Refresh,
                ScriptCommand::Scroll(120.5),
                ScriptCommand::Wait(Duration::from_millis(250)),
            ]
        );
    }

    #[test]
    fn blank_entries_are_skipped() {
        assert_eq!(parse_script(" , next,,").unwrap(), vec![ScriptCommand::Next]);
        assert_eq!(parse_script("").unwrap(), vec![]);
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert_eq!(
            parse_script("next,jump"),
            Err(ScriptError::UnknownCommand("jump".to_string()))
        );
    }

    #[test]
    fn malformed_arguments_are_rejected() {
        assert!(matches!(
            parse_script("index:-1"),
            Err(ScriptError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_script("scroll:NaN"),
            Err(ScriptError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_script("wait"),
            Err(ScriptError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_script("next:3"),
            Err(ScriptError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for command in [
            ScriptCommand::Prev,
            ScriptCommand::Index(4),
            ScriptCommand::Scroll(12.5),
            ScriptCommand::Wait(Duration::from_millis(30)),
        ] {
            assert_eq!(command.to_string().parse::<ScriptCommand>(), Ok(command));
        }
    }

    #[test]
    fn empty_script_reports_initial_state_only() {
        let events = run_script(five_by_hundred(), NavigatorOptions::default(), &[], Instant::now());
        assert_eq!(events.len(), 1);
        match &events[0] {
            ScriptEvent::Refresh(report) => {
                assert_eq!(report.state().left, 0.0);
                assert!(report.state().has_next);
                assert!(!report.state().has_prev);
            }
            other => panic!("expected refresh, got {:?}", other),
        }
    }

    #[test]
    fn next_scrolls_monotonically_and_settles_once() {
        let events = run_script(
            five_by_hundred(),
            NavigatorOptions::default(),
            &[ScriptCommand::Next],
            Instant::now(),
        );

        assert_eq!(events[1], ScriptEvent::Nav(NavEvent::Next));

        let lefts: Vec<f64> = events
            .iter()
            .filter_map(|e| match e {
                ScriptEvent::Nav(NavEvent::Scroll { left }) => Some(*left),
                _ => None,
            })
            .collect();
        assert!(!lefts.is_empty());
        assert!(lefts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(lefts.last(), Some(&200.0));

        let settled = settled(&events);
        assert_eq!(settled.len(), 1);
        assert_eq!(settled[0].left, 200.0);
        assert!(settled[0].has_prev);
        assert!(!settled[0].has_next);
    }

    #[test]
    fn back_to_back_commands_coalesce_into_one_settle() {
        let events = run_script(
            five_by_hundred(),
            NavigatorOptions::default(),
            &[ScriptCommand::Index(1), ScriptCommand::Index(2)],
            Instant::now(),
        );
        let settled = settled(&events);
        assert_eq!(settled.len(), 1);
        assert_eq!(settled[0].left, 200.0);
    }

    #[test]
    fn wait_lets_debounce_fire_between_commands() {
        let events = run_script(
            five_by_hundred(),
            NavigatorOptions::default(),
            &[
                ScriptCommand::Index(1),
                ScriptCommand::Wait(Duration::from_millis(200)),
                ScriptCommand::Prev,
            ],
            Instant::now(),
        );
        let settled = settled(&events);
        assert_eq!(settled.len(), 2);
        assert_eq!(settled[0].left, 100.0);
        assert_eq!(settled[1].left, 0.0);
        assert!(!settled[1].has_prev);
    }

    #[test]
    fn refresh_reports_current_state() {
        let events = run_script(
            five_by_hundred(),
            NavigatorOptions::default(),
            &[ScriptCommand::Scroll(50.0), ScriptCommand::Refresh],
            Instant::now(),
        );
        let reports: Vec<NavigationState> = events
            .iter()
            .filter_map(|e| match e {
                ScriptEvent::Refresh(report) => Some(report.state()),
                _ => None,
            })
            .collect();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].left, 50.0);
    }

    #[test]
    fn refresh_report_serializes_flat() {
        let report = ScriptEvent::Refresh(RefreshReport::new(NavigationState {
            left: 0.0,
            width: 300.0,
            scroll_width: 500.0,
            has_prev: false,
            has_next: true,
        }));
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"event":"refresh","left":0.0,"width":300.0,"scrollWidth":500.0,"hasPrev":false,"hasNext":true}"#
        );
    }
}
