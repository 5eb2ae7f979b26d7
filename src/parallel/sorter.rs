use crate::core::types::LearnerRecord;

/// Sort records in place by ascending name using exactly two worker threads.
///
/// The collection splits once at the midpoint; each worker runs the full
/// sequential merge sort over its own half. `split_at_mut` hands every worker
/// a disjoint `&mut` slice, so the absence of data races is enforced by the
/// borrow checker rather than documented. The scope exit is the join barrier:
/// the final merge runs on the calling thread only after both workers are
/// done, and it is the only code that reads across both halves.
///
/// Each half is sorted stably on its own, but the two-way split gives no
/// global order guarantee among equal names across halves.
pub fn parallel_sort_by_name(records: &mut [LearnerRecord]) {
    if records.len() <= 1 {
        return;
    }

    let mid = records.len() / 2;
    let (left, right) = records.split_at_mut(mid);

    crossbeam::scope(|s| {
        s.spawn(move |_| merge_sort(left));
        s.spawn(move |_| merge_sort(right));
    })
    .expect("sort worker panicked"); // Scope join only fails on a worker panic

    // Both halves are sorted and no worker remains; merge on this thread
    merge_halves(records, mid);
}

/// Sequential recursive merge sort over one range. Recursion never spawns:
/// both worker threads come from the single top-level split.
fn merge_sort(run: &mut [LearnerRecord]) {
    if run.len() <= 1 {
        return;
    }

    let mid = run.len() / 2;
    merge_sort(&mut run[..mid]);
    merge_sort(&mut run[mid..]);
    merge_halves(run, mid);
}

/// Merge the sorted ranges `[0, mid)` and `[mid, len)` through an auxiliary
/// buffer sized to the range. `<=` keeps the left element on ties, which
/// makes each half's own merges stable.
fn merge_halves(run: &mut [LearnerRecord], mid: usize) {
    let mut merged: Vec<LearnerRecord> = Vec::with_capacity(run.len());
    {
        let (left, right) = run.split_at(mid);
        let mut i = 0;
        let mut j = 0;

        while i < left.len() && j < right.len() {
            if left[i].name <= right[j].name {
                merged.push(left[i].clone());
                i += 1;
            } else {
                merged.push(right[j].clone());
                j += 1;
            }
        }

        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
    }

    for (slot, record) in run.iter_mut().zip(merged) {
        *slot = record;
    }
}
