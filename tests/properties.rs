//! Partitioning properties checked against seeded random inputs.
//!
//! - every event placed exactly once, no stage double-booked
//! - stage count equals a brute-force depth
//! - heap and linear-scan strategies agree on the stage count
//! - the heap strategy is deterministic

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use u_stage::config::{plan, PlannerConfig};
use u_stage::generator::{EventGenerator, EventGeneratorConfig};
use u_stage::models::{BoundaryPolicy, Event};
use u_stage::partitioning::{
    depth, sort_events, HeapPartitioner, LinearScanPartitioner, Partitioner, Strategy,
};

const POLICIES: [BoundaryPolicy; 2] = [BoundaryPolicy::Inclusive, BoundaryPolicy::Exclusive];

/// Counts active events at every integer tick.
fn brute_force_depth(events: &[Event], policy: BoundaryPolicy) -> usize {
    let (Some(lo), Some(hi)) = (
        events.iter().map(|e| e.start).min(),
        events.iter().map(|e| e.end).max(),
    ) else {
        return 0;
    };

    (lo..=hi)
        .map(|t| {
            events
                .iter()
                .filter(|e| match policy {
                    BoundaryPolicy::Inclusive => e.start <= t && t <= e.end,
                    BoundaryPolicy::Exclusive => e.start <= t && t < e.end,
                })
                .count()
        })
        .max()
        .unwrap_or(0)
}

/// Random inputs with many coinciding boundaries.
fn random_inputs(seed: u64, rounds: usize) -> Vec<Vec<Event>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..rounds)
        .map(|_| {
            let config = EventGeneratorConfig::small()
                .with_count(rng.random_range(0..=12))
                .with_horizon(rng.random_range(1..=15))
                .with_duration_range(1, rng.random_range(1..=8));
            EventGenerator::new(config, rng.random()).generate()
        })
        .collect()
}

#[test]
fn test_partition_is_complete_and_conflict_free() {
    for events in random_inputs(1, 300) {
        for policy in POLICIES {
            for strategy in Strategy::ALL {
                let p = strategy.partitioner(policy).partition(&events);
                let violations = p.violations(&events, policy);
                assert!(
                    violations.is_empty(),
                    "{strategy}/{policy} on {events:?}: {violations:?}"
                );
                assert_eq!(p.event_count(), events.len());
            }
        }
    }
}

#[test]
fn test_stage_count_equals_depth() {
    for events in random_inputs(2, 300) {
        for policy in POLICIES {
            let expected = brute_force_depth(&events, policy);
            assert_eq!(depth(&events, policy), expected, "sweep depth on {events:?}");
            for strategy in Strategy::ALL {
                let p = strategy.partitioner(policy).partition(&events);
                assert_eq!(p.stage_count(), expected, "{strategy}/{policy} on {events:?}");
            }
        }
    }
}

#[test]
fn test_strategies_agree_on_large_input() {
    let events = EventGenerator::new(EventGeneratorConfig::dense(), 99).generate();
    let sorted = sort_events(&events);
    for policy in POLICIES {
        let heap = HeapPartitioner::new(policy).partition_sorted(&sorted);
        let scan = LinearScanPartitioner::new(policy).partition_sorted(&sorted);
        assert_eq!(heap.stage_count(), scan.stage_count());
        assert_eq!(heap.stage_count(), depth(&events, policy));
        assert!(heap.is_valid_for(&events, policy));
        assert!(scan.is_valid_for(&events, policy));
    }
}

#[test]
fn test_heap_output_is_deterministic() {
    let events = EventGenerator::new(EventGeneratorConfig::default().with_count(200), 5).generate();
    let config = PlannerConfig::default();
    let first = serde_json::to_string(&plan(&events, &config)).unwrap();
    for _ in 0..5 {
        assert_eq!(serde_json::to_string(&plan(&events, &config)).unwrap(), first);
    }
}

#[test]
fn test_input_order_does_not_change_stage_count() {
    let mut rng = SmallRng::seed_from_u64(3);
    let events = EventGenerator::new(EventGeneratorConfig::default().with_count(60), 11).generate();
    let expected = HeapPartitioner::default().partition(&events).stage_count();

    for _ in 0..20 {
        let mut shuffled = events.clone();
        for i in (1..shuffled.len()).rev() {
            let j = rng.random_range(0..=i);
            shuffled.swap(i, j);
        }
        assert_eq!(HeapPartitioner::default().partition(&shuffled).stage_count(), expected);
        assert_eq!(LinearScanPartitioner::default().partition(&shuffled).stage_count(), expected);
    }
}

#[test]
fn test_scenarios() {
    let a = vec![
        Event::new("A", 1, 3),
        Event::new("B", 2, 5),
        Event::new("C", 4, 6),
    ];
    let b = vec![
        Event::new("P", 0, 10),
        Event::new("Q", 0, 10),
        Event::new("R", 0, 10),
    ];
    let c = vec![Event::new("X", 0, 5), Event::new("Y", 0, 3)];

    for strategy in Strategy::ALL {
        let p = strategy.partitioner(BoundaryPolicy::Inclusive);

        let pa = p.partition(&a);
        assert_eq!(pa.stage_count(), 2);
        assert_eq!(pa.stage(0).unwrap().labels(), vec!["A", "C"]);
        assert_eq!(pa.stage(1).unwrap().labels(), vec!["B"]);

        let pb = p.partition(&b);
        assert_eq!(pb.stage_count(), 3);
        assert_eq!(pb.stage_sizes(), vec![1, 1, 1]);

        let pc = p.partition(&c);
        assert_eq!(pc.stage_count(), 2);
        assert_eq!(pc.stage(0).unwrap().labels(), vec!["Y"]);
    }
}

#[test]
fn test_empty_input_yields_no_stages() {
    for strategy in Strategy::ALL {
        for policy in POLICIES {
            assert!(strategy.partitioner(policy).partition(&[]).is_empty());
        }
    }
}
