//! Data models for provenance statistics
//!
//! The counters are plain character tallies; totals, percentages and the
//! summary text are derived on demand and never stored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared origin of a block of code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Written by hand
    Manual,
    /// Pasted from documentation, Stack Overflow, another project, ...
    Copied,
    /// Produced by an AI assistant
    Ai,
}

impl SourceKind {
    /// All kinds, in display order
    pub const ALL: [SourceKind; 3] = [SourceKind::Manual, SourceKind::Copied, SourceKind::Ai];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Copied => "copied",
            Self::Ai => "ai",
        }
    }

    /// Human-readable label used in summaries and confirmations
    pub fn label(&self) -> &'static str {
        match self {
            Self::Manual => "Manually Written",
            Self::Copied => "Copied",
            Self::Ai => "AI-Generated",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" | "self" | "self-written" | "written" | "m" => Ok(Self::Manual),
            "copied" | "copy" | "paste" | "pasted" | "c" => Ok(Self::Copied),
            "ai" | "ai-generated" | "generated" | "a" => Ok(Self::Ai),
            other => Err(format!(
                "unknown source kind '{}' (expected manual, copied or ai)",
                other
            )),
        }
    }
}

/// Cumulative character counts per declared source
///
/// Field names are the on-disk JSON schema and must stay stable across
/// save/load cycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeStats {
    #[serde(default)]
    pub manual_chars: u64,
    #[serde(default)]
    pub copied_chars: u64,
    #[serde(default)]
    pub ai_chars: u64,
}

impl CodeStats {
    /// Add `chars` to the counter for `kind`. Saturates instead of wrapping.
    pub fn add(&mut self, kind: SourceKind, chars: u64) {
        let counter = match kind {
            SourceKind::Manual => &mut self.manual_chars,
            SourceKind::Copied => &mut self.copied_chars,
            SourceKind::Ai => &mut self.ai_chars,
        };
        *counter = counter.saturating_add(chars);
    }

    pub fn count(&self, kind: SourceKind) -> u64 {
        match kind {
            SourceKind::Manual => self.manual_chars,
            SourceKind::Copied => self.copied_chars,
            SourceKind::Ai => self.ai_chars,
        }
    }

    pub fn total_chars(&self) -> u64 {
        self.manual_chars
            .saturating_add(self.copied_chars)
            .saturating_add(self.ai_chars)
    }

    /// Share of `kind` in percent; `0.0` when nothing has been recorded
    pub fn percent(&self, kind: SourceKind) -> f64 {
        let total = self.total_chars();
        if total == 0 {
            return 0.0;
        }
        self.count(kind) as f64 * 100.0 / total as f64
    }

    /// Multi-line report of the total and each category's count and share
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str("Code Statistics\n\n");
        out.push_str(&format!(
            "Total Characters: {}\n\n",
            format_chars(self.total_chars())
        ));
        for kind in SourceKind::ALL {
            out.push_str(&format!(
                "{}: {} chars ({:.1}%)\n",
                kind.label(),
                format_chars(self.count(kind)),
                self.percent(kind)
            ));
        }
        out
    }

    /// Point-in-time report for `stats --json` and the HTTP API
    pub fn report(&self) -> StatsReport {
        StatsReport {
            total_chars: self.total_chars(),
            manual_chars: self.manual_chars,
            copied_chars: self.copied_chars,
            ai_chars: self.ai_chars,
            manual_percent: self.percent(SourceKind::Manual),
            copied_percent: self.percent(SourceKind::Copied),
            ai_percent: self.percent(SourceKind::Ai),
        }
    }
}

/// Serialized snapshot of the counters and their shares
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub total_chars: u64,
    pub manual_chars: u64,
    pub copied_chars: u64,
    pub ai_chars: u64,
    pub manual_percent: f64,
    pub copied_percent: f64,
    pub ai_percent: f64,
}

/// Format a character count with `,` thousands separators (1234567 -> "1,234,567")
pub fn format_chars(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
