/// Minimum similarity a candidate needs before it is offered as a suggestion
pub const SUGGESTION_THRESHOLD: f64 = 0.6;

/// Optimal-string-alignment edit distance (Levenshtein plus adjacent transpositions)
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let width = b.len() + 1;
    let mut rows = vec![0usize; (a.len() + 1) * width];
    for i in 0..=a.len() {
        rows[i * width] = i;
    }
    for j in 0..=b.len() {
        rows[j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (rows[(i - 1) * width + j] + 1)
                .min(rows[i * width + j - 1] + 1)
                .min(rows[(i - 1) * width + j - 1] + cost);

            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(rows[(i - 2) * width + j - 2] + 1);
            }

            rows[i * width + j] = best;
        }
    }

    rows[a.len() * width + b.len()]
}

/// Similarity in `[0, 1]`, 1 meaning identical
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / longest as f64
}

/// Return the candidate closest to `target`, or `None` when nothing clears
/// [`SUGGESTION_THRESHOLD`]. Ties keep the first candidate in iteration order.
pub fn find_closest<'a, I>(target: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&str, f64)> = None;

    for candidate in candidates {
        let score = similarity(target, candidate);
        if score < SUGGESTION_THRESHOLD {
            continue;
        }
        match best {
            Some((_, best_score)) if best_score >= score => {}
            _ => best = Some((candidate, score)),
        }
    }

    best.map(|(candidate, _)| candidate.to_string())
}
