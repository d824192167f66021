//! Progress reporting for a running scan
//!
//! Maps a job's percentage onto the four named phases of a scan and renders the
//! status line shown while the job is pending.

use std::fmt;

/// Named phase of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Starting,
    Scanning,
    Parsing,
    Ready,
}

/// Phases in ascending order with the percentage at which each one is done
pub const PHASES: [(ScanPhase, u8); 4] = [
    (ScanPhase::Starting, 1),
    (ScanPhase::Scanning, 25),
    (ScanPhase::Parsing, 70),
    (ScanPhase::Ready, 100),
];

impl ScanPhase {
    pub fn label(&self) -> &'static str {
        match self {
            ScanPhase::Starting => "Starting wallet",
            ScanPhase::Scanning => "Scanning chain",
            ScanPhase::Parsing => "Parsing results",
            ScanPhase::Ready => "Ready",
        }
    }
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status of one phase at a given percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    Waiting,
    Current,
    Done,
}

/// Status of every phase at `percent`
///
/// A phase is done once `percent` reaches its threshold, current while `percent`
/// lies in `[previous threshold, threshold)`. 100 forces every phase done.
pub fn phase_statuses(percent: u8) -> [(ScanPhase, PhaseStatus); 4] {
    let percent = percent.min(100);
    let mut previous = 0;
    PHASES.map(|(phase, threshold)| {
        let status = if percent >= threshold || percent == 100 {
            PhaseStatus::Done
        } else if percent >= previous {
            PhaseStatus::Current
        } else {
            PhaseStatus::Waiting
        };
        previous = threshold;
        (phase, status)
    })
}

/// The phase to highlight at `percent`
///
/// Once every phase is done the last one, [`ScanPhase::Ready`], is shown.
pub fn displayed_phase(percent: u8) -> ScanPhase {
    phase_statuses(percent)
        .iter()
        .find(|(_, status)| *status == PhaseStatus::Current)
        .map(|(phase, _)| *phase)
        .unwrap_or(ScanPhase::Ready)
}

/// Render a duration in seconds as `45s` or `1m 05s`
///
/// Negative and fractional inputs are floored at zero.
pub fn format_duration(seconds: f64) -> String {
    let seconds = if seconds.is_finite() {
        seconds.max(0.0).floor() as u64
    } else {
        0
    };
    let minutes = seconds / 60;
    let rest = seconds % 60;
    if minutes == 0 {
        format!("{}s", rest)
    } else {
        format!("{}m {:02}s", minutes, rest)
    }
}

/// Status line for a pending job, e.g. `Syncing wallet… (55% complete · 1m 05s elapsed)`
pub fn progress_message(message: &str, percent: u8, elapsed: Option<f64>) -> String {
    let elapsed = elapsed
        .map(|secs| format!(" · {} elapsed", format_duration(secs)))
        .unwrap_or_default();
    format!("{} ({}% complete{})", message, percent.min(100), elapsed)
}

/// One-line rendering of every phase, e.g. `✔ Starting wallet ⟳ Scanning chain • …`
pub fn render_steps(percent: u8) -> String {
    phase_statuses(percent)
        .iter()
        .map(|(phase, status)| {
            let symbol = match status {
                PhaseStatus::Done => '✔',
                PhaseStatus::Current => '⟳',
                PhaseStatus::Waiting => '•',
            };
            format!("{} {}", symbol, phase)
        })
        .collect::<Vec<_>>()
        .join("  ")
}
