/// A finite trace with a lasso: positions `[0, length)` are explicit and
/// positions from `length` on repeat `[lasso_start, length)` forever.
#[derive(Debug, Clone)]
pub struct Trace {
    values: Vec<Vec<bool>>,
    lasso_start: usize,
    future: Vec<Vec<usize>>,
}

impl Trace {
    pub fn new(values: Vec<Vec<bool>>, lasso_start: usize) -> Self {
        // precomputed only for a well-formed lasso; validation happens at
        // encoding time
        let future = if lasso_start < values.len() {
            (0..values.len())
                .map(|t| future_window(values.len(), lasso_start, t))
                .collect()
        } else {
            Vec::new()
        };
        Self {
            values,
            lasso_start,
            future,
        }
    }

    pub fn length(&self) -> usize {
        self.values.len()
    }

    pub fn lasso_start(&self) -> usize {
        self.lasso_start
    }

    pub fn values(&self) -> &[Vec<bool>] {
        &self.values
    }

    /// Value of proposition `p` at position `t`.
    pub fn value(&self, t: usize, p: usize) -> bool {
        self.values[t][p]
    }

    /// Successor position: one step forward, wrapping into the lasso.
    pub fn next_pos(&self, t: usize) -> usize {
        if t + 1 < self.length() {
            t + 1
        } else {
            self.lasso_start
        }
    }

    /// The distinct positions reachable from `t`, in visiting order: the
    /// suffix `[t, length)` followed by `[lasso_start, t)` when `t` lies
    /// inside the loop. Contains `length - min(t, lasso_start)` positions.
    pub fn future_pos(&self, t: usize) -> &[usize] {
        &self.future[t]
    }
}

fn future_window(length: usize, lasso_start: usize, t: usize) -> Vec<usize> {
    let mut window: Vec<usize> = (t..length).collect();
    if t > lasso_start {
        window.extend(lasso_start..t);
    }
    window
}

/// Positive and negative sample traces over a shared set of propositions.
#[derive(Debug, Clone)]
pub struct TraceSet {
    pub accepted: Vec<Trace>,
    pub rejected: Vec<Trace>,
    pub num_props: usize,
}

impl TraceSet {
    pub fn new(accepted: Vec<Trace>, rejected: Vec<Trace>, num_props: usize) -> Self {
        Self {
            accepted,
            rejected,
            num_props,
        }
    }

    pub fn len(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty() && self.rejected.is_empty()
    }

    /// All traces, accepted first. The iteration order fixes the trace
    /// index used in constraint tags and acceptance constraints.
    pub fn iter(&self) -> impl Iterator<Item = &Trace> {
        self.accepted.iter().chain(self.rejected.iter())
    }

    pub fn max_length(&self) -> usize {
        self.iter().map(Trace::length).max().unwrap_or(0)
    }

    /// Indices of the accepted traces in iteration order.
    pub fn accepted_indices(&self) -> std::ops::Range<usize> {
        0..self.accepted.len()
    }

    /// Indices of the rejected traces in iteration order.
    pub fn rejected_indices(&self) -> std::ops::Range<usize> {
        self.accepted.len()..self.len()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn next_pos_wraps_into_the_lasso() {
        let trace = Trace::new(vec![vec![true], vec![false], vec![true]], 1);
        assert_eq!(trace.next_pos(0), 1);
        assert_eq!(trace.next_pos(1), 2);
        assert_eq!(trace.next_pos(2), 1);
    }

    #[test]
    fn future_pos_before_the_loop_is_the_suffix() {
        let trace = Trace::new(vec![vec![true], vec![false], vec![true]], 2);
        assert_eq!(trace.future_pos(0), [0, 1, 2]);
        assert_eq!(trace.future_pos(1), [1, 2]);
        assert_eq!(trace.future_pos(2), [2]);
    }

    #[test]
    fn future_pos_inside_the_loop_rotates() {
        let trace = Trace::new(vec![vec![true], vec![false], vec![true]], 0);
        assert_eq!(trace.future_pos(0), [0, 1, 2]);
        assert_eq!(trace.future_pos(1), [1, 2, 0]);
        assert_eq!(trace.future_pos(2), [2, 0, 1]);
    }

    #[derive(Debug, Clone)]
    struct LassoTrace(Trace);

    impl Arbitrary for LassoTrace {
        fn arbitrary(g: &mut Gen) -> Self {
            let length = usize::arbitrary(g) % 6 + 1;
            let lasso_start = usize::arbitrary(g) % length;
            let values = (0..length).map(|_| vec![bool::arbitrary(g)]).collect();
            LassoTrace(Trace::new(values, lasso_start))
        }
    }

    #[quickcheck]
    fn future_pos_has_the_expected_length(trace: LassoTrace) -> bool {
        let trace = trace.0;
        (0..trace.length()).all(|t| {
            trace.future_pos(t).len() == trace.length() - t.min(trace.lasso_start())
        })
    }

    #[quickcheck]
    fn future_pos_matches_iterated_next_pos(trace: LassoTrace) -> bool {
        let trace = trace.0;
        (0..trace.length()).all(|t| {
            let mut walked = Vec::new();
            let mut pos = t;
            for _ in 0..trace.future_pos(t).len() {
                walked.push(pos);
                pos = trace.next_pos(pos);
            }
            walked == trace.future_pos(t)
        })
    }

    #[quickcheck]
    fn future_pos_starts_at_t_and_has_no_repeats(trace: LassoTrace) -> bool {
        let trace = trace.0;
        (0..trace.length()).all(|t| {
            let window = trace.future_pos(t);
            let mut sorted = window.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            window[0] == t && sorted.len() == window.len()
        })
    }
}
