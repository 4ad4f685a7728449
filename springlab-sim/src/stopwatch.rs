/// A stopwatch running on physics time.
///
/// In slow motion it advances at the slowed rate, so it measures what the
/// masses experience rather than wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stopwatch {
    running: bool,
    elapsed: f64,
}

impl Stopwatch {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed physics time in seconds.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn step(&mut self, dt: f64) {
        if self.running {
            self.elapsed += dt;
        }
    }

    /// Stops and zeroes the stopwatch.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn only_counts_while_running() {
        let mut watch = Stopwatch::default();
        watch.step(1.0);
        assert_relative_eq!(watch.elapsed(), 0.0);

        watch.set_running(true);
        watch.step(0.25);
        watch.step(0.25);
        watch.set_running(false);
        watch.step(1.0);
        assert_relative_eq!(watch.elapsed(), 0.5);

        watch.reset();
        assert!(!watch.is_running());
        assert_relative_eq!(watch.elapsed(), 0.0);
    }
}
