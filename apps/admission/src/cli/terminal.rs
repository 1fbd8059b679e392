//! Terminal collaborators for the step controller, plus output formatting.

use admission_core::{Navigator, Notifier, Step};

/// Navigation on a terminal is a log line; the command prints the step.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&mut self, step: Step) {
        tracing::debug!(route = step.route(), %step, "navigate");
    }
}

/// Prints notifications to stderr, like a toast that never fades.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier {
    pub quiet: bool,
}

impl Notifier for TerminalNotifier {
    fn notify(&mut self, message: &str) {
        tracing::debug!(text = message, "notify");
        if !self.quiet {
            eprintln!("! {}", message);
        }
    }
}

/// Format whole rupees with Indian digit grouping: `1,00,000`.
#[must_use]
pub fn format_rupees(amount: u32) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
