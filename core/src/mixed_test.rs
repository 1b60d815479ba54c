use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::candidates::{BTreeMultiset, KeyedCollectionAdapter, SegmentedList};
use crate::container::{SortedContainer, Value};
use crate::mixed::{DRAW_RANGE, MixedKind, MixedMachine, MixedOp, MixedStep, SCAN_LIMIT, SEED, SLICE_WIDTH, select};
use crate::testing::Recording;

fn filled(mut obj: Box<dyn SortedContainer>, size: u64) -> Box<dyn SortedContainer> {
    let values: Vec<Value> = (0..size).collect();
    obj.update(&values);
    obj
}

fn drive(machine: &mut MixedMachine, values: impl IntoIterator<Item = Value>) {
    for value in values {
        if let Err(failure) = machine.run(value) {
            panic!("{} failed on {}: {}", machine.kind(), value, failure);
        }
    }
}

#[test]
fn test_tables_are_cumulative_and_cover_the_draw_range() {
    for kind in MixedKind::ALL {
        let table = kind.table();
        assert!(!table.is_empty());
        assert!(table.windows(2).all(|w| w[0].0 < w[1].0), "{} thresholds not ascending", kind);
        assert_eq!(table[table.len() - 1].0, DRAW_RANGE, "{} does not end at {}", kind, DRAW_RANGE);
    }
}

#[test]
fn test_select_picks_first_threshold_above_draw() {
    let pq = MixedKind::PriorityQueue.table();
    assert_eq!(select(pq, 0), MixedOp::Add);
    assert_eq!(select(pq, 39), MixedOp::Add);
    assert_eq!(select(pq, 40), MixedOp::Pop);
    assert_eq!(select(pq, 79), MixedOp::Pop);
    assert_eq!(select(pq, 80), MixedOp::Discard);
    assert_eq!(select(pq, 98), MixedOp::Contains);
    assert_eq!(select(pq, 99), MixedOp::Scan);

    let intervals = MixedKind::Intervals.table();
    assert_eq!(select(intervals, 29), MixedOp::Bisect);
    assert_eq!(select(intervals, 30), MixedOp::GetGuarded);
    assert_eq!(select(intervals, 50), MixedOp::DeleteGuarded);
    assert_eq!(select(intervals, 70), MixedOp::SliceGuarded);
    assert_eq!(select(intervals, 80), MixedOp::Add);
    assert_eq!(select(intervals, 99), MixedOp::Discard);
}

#[test]
fn test_required_capabilities_follow_the_table() {
    use crate::capability::Capability;

    let pq = MixedKind::PriorityQueue.required();
    assert!(pq.has(Capability::Pop));
    assert!(pq.has(Capability::Iter));
    assert!(!pq.has(Capability::GetItem));

    let intervals = MixedKind::Intervals.required();
    for cap in [Capability::GetItem, Capability::DelItem, Capability::Slice, Capability::Bisect] {
        assert!(intervals.has(cap), "intervals should need {}", cap.name());
    }
}

#[test]
fn test_dispatch_consumes_one_draw_per_call() {
    for kind in MixedKind::ALL {
        let mut machine = MixedMachine::new(kind, filled(Box::new(SegmentedList::new()), 2_000)).with_trace();
        drive(&mut machine, (0..2_000).step_by(10));

        let mut rng = StdRng::seed_from_u64(SEED);
        let expected: Vec<MixedOp> = (0..machine.trace().len())
            .map(|_| select(kind.table(), rng.random_range(0..DRAW_RANGE)))
            .collect();
        let ops: Vec<MixedOp> = machine.trace().iter().map(|step| step.op).collect();
        assert_eq!(ops, expected, "{} diverged from its draw sequence", kind);
    }
}

#[test]
fn test_same_seed_replays_identically_across_candidates() {
    let run = |obj: Box<dyn SortedContainer>| -> Vec<MixedStep> {
        let mut machine = MixedMachine::new(MixedKind::PriorityQueue, filled(obj, 1_000)).with_trace();
        drive(&mut machine, (0..1_000).step_by(10));
        machine.trace().to_vec()
    };

    let segmented = run(Box::new(SegmentedList::new()));
    assert_eq!(segmented, run(Box::new(SegmentedList::new())));
    assert_eq!(segmented, run(Box::new(KeyedCollectionAdapter::identity())));
    assert_eq!(segmented, run(Box::new(BTreeMultiset::new())));
}

#[test]
fn test_different_seed_changes_the_sequence() {
    let ops = |seed: u64| -> Vec<MixedOp> {
        let obj = filled(Box::new(SegmentedList::new()), 1_000);
        let mut machine = MixedMachine::with_seed(MixedKind::Neighbor, obj, seed).with_trace();
        drive(&mut machine, (0..1_000).step_by(10));
        machine.trace().iter().map(|step| step.op).collect()
    };
    assert_ne!(ops(SEED), ops(SEED + 1));
}

#[test]
fn test_positional_branches_skip_out_of_range_values() {
    let obj = filled(Box::new(SegmentedList::new()), 50);
    let mut machine = MixedMachine::new(MixedKind::Intervals, obj).with_trace();
    drive(&mut machine, 10_000..11_000);

    let positional: Vec<&MixedStep> = machine.trace().iter().filter(|step| step.op.is_positional()).collect();
    assert!(!positional.is_empty());
    assert!(positional.iter().all(|step| !step.applied));
    assert!(machine.trace().iter().filter(|step| !step.op.is_positional()).all(|step| step.applied));
}

#[test]
fn test_intervals_survive_a_shrinking_instance() {
    let size = 2_000;
    let obj = filled(Box::new(SegmentedList::with_load(16)), size);
    let mut machine = MixedMachine::new(MixedKind::Intervals, obj).with_trace();
    drive(&mut machine, 0..size);

    assert!(machine.container().len() < size as usize);
    let skipped = machine.trace().iter().filter(|step| !step.applied).count();
    assert!(skipped > 0, "no guard ever fired");
    assert!(machine.trace().iter().all(|step| step.applied || step.op.is_positional()));
    let items: Vec<Value> = machine.container().iter().collect();
    assert!(items.is_sorted());
}

#[test]
fn test_mix_ratios_are_approximately_the_table_weights() {
    let calls = 10_000;
    let mut machine = MixedMachine::new(MixedKind::PriorityQueue, Box::new(SegmentedList::new())).with_trace();
    drive(&mut machine, 0..calls);

    let share = |op: MixedOp| machine.trace().iter().filter(|step| step.op == op).count() as f64 / calls as f64;
    assert!((share(MixedOp::Add) - 0.40).abs() < 0.03);
    assert!((share(MixedOp::Pop) - 0.40).abs() < 0.03);
    assert!((share(MixedOp::Discard) - 0.10).abs() < 0.02);
    assert!((share(MixedOp::Contains) - 0.09).abs() < 0.02);
    assert!(share(MixedOp::Scan) < 0.03);
}

#[test]
fn test_multiset_reports_missing_value() {
    let obj = filled(Box::new(SegmentedList::new()), 100);
    let mut machine = MixedMachine::new(MixedKind::Multiset, obj);
    let failure = (0..50).find_map(|i| machine.run(10_000 + i).err());
    let failure = failure.expect("absent values must trip the membership assertion");
    assert!(failure.to_string().contains("multiset"));
}

#[test]
fn test_multiset_and_ranking_pass_on_present_values() {
    for kind in [MixedKind::Multiset, MixedKind::Ranking] {
        let mut machine = MixedMachine::new(kind, filled(Box::new(SegmentedList::new()), 10_000));
        drive(&mut machine, (0..10_000).step_by(10));
    }
}

#[test]
fn test_interval_slices_stay_within_width_and_length() {
    let (recording, reads) = Recording::new();
    let size = 5_000;
    let mut machine = MixedMachine::new(MixedKind::Intervals, filled(Box::new(recording), size)).with_trace();
    drive(&mut machine, 0..size);

    let applied = machine
        .trace()
        .iter()
        .filter(|step| step.op == MixedOp::SliceGuarded && step.applied)
        .count();
    let reads = reads.borrow();
    assert!(applied > 0, "no slice was taken");
    assert_eq!(reads.slices.len(), applied);
    for &(start, stop, len) in &reads.slices {
        assert!(stop >= start, "slice [{}, {}) runs backwards", start, stop);
        assert!(stop - start < SLICE_WIDTH, "slice [{}, {}) wider than {}", start, stop, SLICE_WIDTH);
        assert!(stop <= len, "slice [{}, {}) past length {}", start, stop, len);
    }
    assert!(reads.slices.iter().any(|&(start, stop, _)| stop > start));
}

#[test]
fn test_scans_stop_after_scan_limit_items() {
    for kind in [MixedKind::PriorityQueue, MixedKind::Neighbor] {
        let (recording, reads) = Recording::new();
        let size = 10_000;
        let mut machine = MixedMachine::new(kind, filled(Box::new(recording), size)).with_trace();
        drive(&mut machine, 0..size);

        let scans = machine.trace().iter().filter(|step| step.op == MixedOp::Scan).count();
        assert!(scans > 0, "{} never scanned", kind);
        assert!(machine.container().len() > SCAN_LIMIT);
        assert_eq!(reads.borrow().pulled, scans * SCAN_LIMIT, "{} scanned past the limit", kind);
    }
}
