//! Ordinal step counter for the packaging pipeline.
//!
//! Purely observational: orchestrators advance it once per completed step and
//! never read it back to make decisions.

pub struct Progress {
    current: usize,
    total: usize,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    /// Mark one step as done and log it.
    pub fn advance(&mut self, message: &str) {
        self.current += 1;
        tracing::info!(step = self.current, total = self.total, "{}", message);
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advances_monotonically() {
        let mut progress = Progress::new(3);
        assert_eq!(progress.current(), 0);
        progress.advance("one");
        progress.advance("two");
        assert_eq!(progress.current(), 2);
        assert_eq!(progress.total(), 3);
    }
}
