use crate::geometry::Point;

/// Dynamic-time-warping cost between two sequences, divided by the longer length.
/// Either sequence empty → `f32::INFINITY`.
pub fn distance(a: &[Point], b: &[Point]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return f32::INFINITY;
    }
    let n = a.len();
    let m = b.len();

    // Two rolling rows of the (n+1) x (m+1) cost matrix
    let mut prev = vec![f32::INFINITY; m + 1];
    let mut curr = vec![f32::INFINITY; m + 1];
    prev[0] = 0.0;

    for i in 1..=n {
        curr[0] = f32::INFINITY;
        for j in 1..=m {
            let cost = a[i - 1].dist(&b[j - 1]);
            let best = prev[j].min(curr[j - 1]).min(prev[j - 1]);
            curr[j] = cost + best;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[m] / n.max(m) as f32
}

/// Best-of-any matching: every user stroke is scored against its closest
/// template stroke, regardless of order. Returns the mean over strokes that
/// found a finite match, or `None` if none did.
pub fn average_best_distance(user: &[Vec<Point>], template: &[Vec<Point>]) -> Option<f32> {
    let mut total = 0.0;
    let mut matched = 0usize;

    for u in user.iter().filter(|s| !s.is_empty()) {
        let best = template
            .iter()
            .map(|t| distance(u, t))
            .fold(f32::INFINITY, f32::min);

        if best.is_finite() {
            total += best;
            matched += 1;
        }
    }

    if matched > 0 {
        Some(total / matched as f32)
    } else {
        None
    }
}
