/// Gates simulation steps to the snake's tick interval.
pub struct Ticker {
    last_ms: f64,
}

impl Ticker {
    pub fn new() -> Self {
        Ticker { last_ms: 0.0 }
    }

    /// True when at least `interval_ms` passed since the last tick; the tick
    /// is then taken at `now_ms`.
    pub fn ready(&mut self, now_ms: f64, interval_ms: u32) -> bool {
        if now_ms - self.last_ms < interval_ms as f64 {
            return false;
        }
        self.last_ms = now_ms;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_interval() {
        let mut t = Ticker::new();
        assert!(!t.ready(16.0, 200));
        assert!(!t.ready(199.9, 200));
        assert!(t.ready(200.0, 200));
        assert!(!t.ready(300.0, 200));
        assert!(t.ready(416.0, 200));
    }

    #[test]
    fn shorter_interval_fires_sooner() {
        let mut t = Ticker::new();
        assert!(t.ready(200.0, 200));
        assert!(!t.ready(380.0, 200));
        assert!(t.ready(390.0, 190));
    }
}
