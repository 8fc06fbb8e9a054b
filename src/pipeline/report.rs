use crate::error::Error;

/// End-of-run accounting. Every run finishes with one of these no
/// matter how many individual hands failed along the way.
#[derive(Debug, Default)]
pub struct Report {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, Error)>,
}

impl Report {
    pub fn success(&mut self, hand_id: String) {
        self.succeeded.push(hand_id);
    }

    pub fn failure(&mut self, hand_id: String, error: Error) {
        log::warn!("hand #{} failed: {}", hand_id, error);
        self.failed.push((hand_id, error));
    }

    /// Stable presentation regardless of completion order when the
    /// solver stage ran hands in parallel.
    pub fn sorted(mut self) -> Self {
        self.succeeded.sort();
        self.failed.sort_by(|(a, _), (b, _)| a.cmp(b));
        self
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "succeeded: {} / failed: {}",
            self.succeeded.len(),
            self.failed.len()
        )?;
        for (hand_id, error) in &self.failed {
            write!(f, "\n  #{}: {}", hand_id, error)?;
        }
        Ok(())
    }
}
