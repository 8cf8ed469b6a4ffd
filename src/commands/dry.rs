use crate::OutputFormat;
use crate::config::Config;
use crate::drying::{DryingBatch, DryingTracker};
use crate::platform::StatePaths;
use crate::state::with_state_lock;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, BufRead, Lines, Write};

const MENU: &str = "Choose an option: (A)dd, (V)iew Current Items, (Q)uit: ";

/// Where a session reads and writes its batches.
///
/// Each menu action is one `update`, so a persisted store is only locked
/// while that action runs.
pub trait BatchStore {
    fn update<R, F>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&mut DryingTracker) -> R;
}

impl BatchStore for DryingTracker {
    fn update<R, F>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&mut DryingTracker) -> R,
    {
        Ok(f(self))
    }
}

impl BatchStore for StatePaths {
    fn update<R, F>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&mut DryingTracker) -> R,
    {
        with_state_lock(&self.lock, &self.state, |state| Ok(f(&mut state.batches)))
    }
}

/// Interactive add/view/quit loop over a drying tracker.
///
/// Time and batch IDs come from the injected `clock` and `next_id`.
pub struct Session<C, G> {
    seconds_per_cm2: f64,
    clock: C,
    next_id: G,
}

impl<C, G> Session<C, G>
where
    C: Fn() -> DateTime<Utc>,
    G: FnMut() -> u32,
{
    pub fn new(seconds_per_cm2: f64, clock: C, next_id: G) -> Self {
        Self {
            seconds_per_cm2,
            clock,
            next_id,
        }
    }

    /// Run until the user quits or `input` is exhausted.
    pub fn run<R: BufRead, W: Write, S: BatchStore>(
        &mut self,
        input: R,
        out: &mut W,
        store: &mut S,
    ) -> Result<()> {
        let mut lines = input.lines();

        loop {
            let Some(choice) = prompt(out, &mut lines, MENU)? else {
                writeln!(out)?;
                break;
            };

            match choice.chars().next().map(|c| c.to_ascii_lowercase()) {
                Some('a') => self.add(out, &mut lines, store)?,
                Some('v') => {
                    let now = (self.clock)();
                    for line in store.update(|tracker| view_report(tracker, now))? {
                        writeln!(out, "{}", line)?;
                    }
                }
                Some('q') => break,
                _ => writeln!(out, "Invalid choice, please try again.")?,
            }
        }

        writeln!(out, "Exiting...")?;
        Ok(())
    }

    fn add<R: BufRead, W: Write, S: BatchStore>(
        &mut self,
        out: &mut W,
        lines: &mut Lines<R>,
        store: &mut S,
    ) -> Result<()> {
        let Some(name) = prompt(out, lines, "Enter batch name: ")? else {
            return Ok(());
        };
        if name.is_empty() {
            writeln!(out, "Invalid batch name, please try again.")?;
            return Ok(());
        }

        let Some(radius) = prompt(out, lines, "Enter radius of each object in cm: ")? else {
            return Ok(());
        };

        let batch = radius
            .parse::<f64>()
            .map_err(anyhow::Error::from)
            .and_then(|radius| {
                DryingBatch::for_sphere(
                    name,
                    (self.next_id)(),
                    radius,
                    self.seconds_per_cm2,
                    (self.clock)(),
                )
                .map_err(anyhow::Error::from)
            });

        match batch {
            Ok(batch) => {
                let label = store.update(|tracker| tracker.add(batch).label())?;
                writeln!(out, "{} is now drying.", label)?;
            }
            Err(e) => {
                log::debug!("rejected radius '{}': {}", radius, e);
                writeln!(out, "Invalid radius, please try again.")?;
            }
        }
        Ok(())
    }
}

fn prompt<R: BufRead, W: Write>(
    out: &mut W,
    lines: &mut Lines<R>,
    text: &str,
) -> Result<Option<String>> {
    write!(out, "{}", text)?;
    out.flush()?;
    Ok(lines.next().transpose()?.map(|line| line.trim().to_string()))
}

/// Status lines for every batch followed by the tracked count.
/// Finished batches are reported once and dropped.
fn view_report(tracker: &mut DryingTracker, now: DateTime<Utc>) -> Vec<String> {
    if tracker.is_empty() {
        return vec!["No drying batches being tracked.".to_string()];
    }
    let mut lines = tracker.view(now);
    lines.push(format!("{} batches being tracked.", tracker.len()));
    lines
}

#[derive(Debug, Serialize)]
struct BatchStatus<'a> {
    batch_id: u32,
    name: &'a str,
    started_at: DateTime<Utc>,
    remaining: String,
    remaining_seconds: u64,
    finished: bool,
}

/// Run the interactive tracker on stdin/stdout against the persisted batches.
///
/// The state lock is held per menu action, never while waiting on input.
pub fn interactive(config: &Config) -> Result<()> {
    let mut paths = StatePaths::resolve(&config.state)?;
    let mut session = Session::new(
        config.drying.seconds_per_cm2,
        Utc::now,
        rand::random::<u32>,
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout, &mut paths)
}

pub fn add(config: &Config, name: &str, radius: f64) -> Result<()> {
    let paths = StatePaths::resolve(&config.state)?;
    let batch = DryingBatch::for_sphere(
        name,
        rand::random(),
        radius,
        config.drying.seconds_per_cm2,
        Utc::now(),
    )
    .context("Invalid batch")?;

    with_state_lock(&paths.lock, &paths.state, |state| {
        let batch = state.batches.add(batch);
        println!("{} is now drying.", batch.label());
        Ok(())
    })
}

pub fn list(config: &Config, format: OutputFormat) -> Result<()> {
    let paths = StatePaths::resolve(&config.state)?;
    let now = Utc::now();

    let output = with_state_lock(&paths.lock, &paths.state, |state| match format {
        OutputFormat::Text => Ok(view_report(&mut state.batches, now).join("\n")),
        OutputFormat::Json => {
            let json = {
                let statuses: Vec<BatchStatus> = state
                    .batches
                    .batches()
                    .iter()
                    .map(|b| {
                        let remaining = b.time_remaining(now);
                        BatchStatus {
                            batch_id: b.batch_id,
                            name: &b.name,
                            started_at: b.started_at,
                            remaining: remaining.to_string(),
                            remaining_seconds: remaining.to_seconds(),
                            finished: b.is_dry(now),
                        }
                    })
                    .collect();
                serde_json::to_string_pretty(&statuses).context("Failed to serialize batches")?
            };
            state.batches.view(now);
            Ok(json)
        }
    })?;

    println!("{}", output);
    Ok(())
}
