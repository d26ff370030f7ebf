//! Heartbeat logging for long-running processes

/// Tracks heartbeat intervals against the strategy clock (seconds)
#[derive(Debug, Clone)]
pub struct Heartbeat {
    interval_secs: f64,
    last_beat: Option<f64>,
}

impl Heartbeat {
    /// Create a new heartbeat with the given interval in seconds
    pub fn new(interval_secs: u64) -> Self {
        Self {
            interval_secs: interval_secs as f64,
            last_beat: None,
        }
    }

    /// Check if enough time has passed since the last beat; the first check always beats
    pub fn should_beat(&self, now: f64) -> bool {
        match self.last_beat {
            Some(last) => now - last >= self.interval_secs,
            None => true,
        }
    }

    /// Record a heartbeat at `now`
    pub fn beat(&mut self, now: f64) {
        self.last_beat = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beats_once_per_interval() {
        let mut heartbeat = Heartbeat::new(60);
        assert!(heartbeat.should_beat(1000.0));
        heartbeat.beat(1000.0);

        assert!(!heartbeat.should_beat(1030.0));
        assert!(heartbeat.should_beat(1060.0));
    }
}
