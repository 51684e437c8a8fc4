use std::fmt;

/// What the upsert writer did with one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Inserted(i64),
    Updated(i64),
    Skipped(String),
}

impl Outcome {
    /// Skip whose reason carries the whole error chain, not just the top
    /// message.
    pub fn skipped(err: &anyhow::Error) -> Self {
        Outcome::Skipped(format!("{err:#}"))
    }
}

/// Per-run counts, reported once the input source is drained.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Inserted(_) => self.inserted += 1,
            Outcome::Updated(_) => self.updated += 1,
            Outcome::Skipped(_) => self.skipped += 1,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} inserted, {} updated, {} skipped",
            self.inserted, self.updated, self.skipped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_each_outcome() {
        let mut summary = RunSummary::default();
        summary.record(&Outcome::Inserted(1));
        summary.record(&Outcome::Updated(1));
        summary.record(&Outcome::Updated(2));
        summary.record(&Outcome::Skipped("bad row".into()));

        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.updated, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.to_string(), "1 inserted, 2 updated, 1 skipped");
    }

    #[test]
    fn skip_reason_keeps_the_error_chain() {
        let err = anyhow::anyhow!("connection reset").context("failed to upsert station");

        match Outcome::skipped(&err) {
            Outcome::Skipped(reason) => {
                assert!(reason.contains("failed to upsert station"));
                assert!(reason.contains("connection reset"));
            }
            other => panic!("expected Skipped, got {other:?}"),
        }
    }
}
