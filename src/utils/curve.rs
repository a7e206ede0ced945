/// Smooth a polyline with cubic Bézier segments.
///
/// Control points follow the usual line-chart `tension` rule: each point gets a
/// pair of control points along the direction `next - prev`, scaled by the
/// relative distance to each neighbour. A tension of `0` returns the input.
/// Each segment is sampled `samples` times (the segment start excluded).
pub fn spline_path(points: &[(f64, f64)], tension: f64, samples: usize) -> Vec<(f64, f64)> {
    if points.len() < 3 || tension <= 0.0 || samples < 2 {
        return points.to_vec();
    }

    let controls: Vec<((f64, f64), (f64, f64))> = (0..points.len())
        .map(|i| {
            let cur = points[i];
            let prev = if i == 0 { cur } else { points[i - 1] };
            let next = points.get(i + 1).copied().unwrap_or(cur);
            control_points(prev, cur, next, tension)
        })
        .collect();

    let mut out = Vec::with_capacity((points.len() - 1) * samples + 1);
    out.push(points[0]);

    for i in 0..points.len() - 1 {
        let p0 = points[i];
        let p1 = controls[i].1;
        let p2 = controls[i + 1].0;
        let p3 = points[i + 1];

        for step in 1..=samples {
            let t = step as f64 / samples as f64;
            out.push(cubic(p0, p1, p2, p3, t));
        }
    }

    out
}

/// Returns `(before, after)` control points for `cur`
fn control_points(
    prev: (f64, f64),
    cur: (f64, f64),
    next: (f64, f64),
    tension: f64,
) -> ((f64, f64), (f64, f64)) {
    let d01 = distance(prev, cur);
    let d12 = distance(cur, next);

    let total = d01 + d12;
    let (s01, s12) = if total > 0.0 {
        (d01 / total, d12 / total)
    } else {
        (0.0, 0.0)
    };

    let fa = tension * s01;
    let fb = tension * s12;
    let dx = next.0 - prev.0;
    let dy = next.1 - prev.1;

    (
        (cur.0 - fa * dx, cur.1 - fa * dy),
        (cur.0 + fb * dx, cur.1 + fb * dy),
    )
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

fn cubic(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64), p3: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    (
        a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
        a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
    )
}
