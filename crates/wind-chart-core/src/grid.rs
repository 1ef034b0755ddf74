// File: crates/wind-chart-core/src/grid.rs
// Summary: Tick layout helpers ("nice" 1/2/5 steps, fixed steps).

/// Tick step close to `(stop - start) / count`, snapped to 1, 2 or 5 times a power of ten.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let span = (stop - start).abs();
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }
    let raw = span / count.max(1) as f64;
    let mut step = 10f64.powf(raw.log10().floor());
    let err = raw / step;
    if err >= 50f64.sqrt() {
        step *= 10.0;
    } else if err >= 10f64.sqrt() {
        step *= 5.0;
    } else if err >= 2f64.sqrt() {
        step *= 2.0;
    }
    step
}

/// Extend `[start, stop]` outward to whole multiples of the tick step.
pub fn nice(start: f64, stop: f64, count: usize) -> (f64, f64) {
    let mut lo = start;
    let mut hi = stop;
    // Re-snapping can change the step once; two passes settle it.
    for _ in 0..2 {
        let step = tick_step(lo, hi, count);
        lo = (lo / step).floor() * step;
        hi = (hi / step).ceil() * step;
    }
    (lo, hi)
}

/// Ticks at multiples of the nice step inside `[start, stop]`.
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    stepped_ticks(start, stop, tick_step(start, stop, count))
}

/// Ticks at multiples of `step` inside `[start, stop]`.
pub fn stepped_ticks(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if !(start.is_finite() && stop.is_finite()) || step <= 0.0 || stop < start {
        return Vec::new();
    }
    let first = (start / step - 1e-9).ceil() as i64;
    let last = (stop / step + 1e-9).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Round `top` up to a multiple of `step`.
pub fn ceil_to_step(top: f64, step: f64) -> f64 {
    if step <= 0.0 { top } else { (top / step).ceil() * step }
}

/// Compact numeric label: integers without decimals, otherwise up to two places.
pub fn format_tick(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        let s = format!("{v:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
