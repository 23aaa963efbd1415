use std::time::Duration;

/// A counter animated from zero to a target with an ease-out-quartic curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAnimation {
    target: u64,
    duration: Duration,
}

impl CounterAnimation {
    /// Creates a new `CounterAnimation`.
    pub fn new(target: u64, duration: Duration) -> Self {
        Self { target, duration }
    }

    /// Retrieves the displayed value after `elapsed` time.
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        if elapsed >= self.duration {
            return self.target;
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();

        ((self.target as f64) * ease_out_quart(progress)).floor() as u64
    }

    /// Computes `count` evenly spaced frames, the last one showing the target.
    pub fn frames(&self, count: u32) -> Vec<u64> {
        (1..=count)
            .map(|frame| {
                if frame == count {
                    self.target
                } else {
                    self.value_at(self.duration.mul_f64(frame as f64 / count as f64))
                }
            })
            .collect()
    }
}

/// The ease-out-quartic curve, with `progress` clamped to `0.0..=1.0`.
pub fn ease_out_quart(progress: f64) -> f64 {
    let progress = progress.clamp(0.0, 1.0);

    1.0 - (1.0 - progress).powi(4)
}

/// Formats a count with `,` thousands separators.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }

    formatted
}
