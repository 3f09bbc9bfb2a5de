use std::time::Duration;

/// Formats whole seconds as `MM:SS`. Minutes are not wrapped at 60.
pub fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn format_duration(d: Duration) -> String {
    format_mmss(d.as_secs())
}

/// Moves `index` by `step`, clamped to `[0, len - 1]`.
pub fn clamp_step(index: usize, step: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = len - 1;
    let moved = match step {
        s if s < 0 => index.saturating_sub(s.unsigned_abs()),
        s => index.saturating_add(s as usize),
    };
    moved.min(max)
}

pub fn fraction(done: usize, total: usize) -> f64 {
    match total {
        0 => 0.0,
        t => done as f64 / t as f64,
    }
}

pub fn percent(done: usize, total: usize) -> u8 {
    (fraction(done, total) * 100.0).round() as u8
}
