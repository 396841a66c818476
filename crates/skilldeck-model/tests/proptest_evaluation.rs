use proptest::prelude::*;
use proptest::test_runner::Config;
use skilldeck_model::{
    aggregate, evaluate, Competency, CompetencyCode, CompetencyId, CompetencyName,
    EvaluationStatus, GlobalStats, SubItem,
};

fn items(flags: &[bool]) -> Vec<SubItem> {
    flags
        .iter()
        .enumerate()
        .map(|(i, v)| SubItem::parse(&format!("item-{i}"), *v).expect("sub item"))
        .collect()
}

fn competencies(flag_lists: &[Vec<bool>]) -> Vec<Competency> {
    flag_lists
        .iter()
        .enumerate()
        .map(|(i, flags)| Competency {
            id: CompetencyId::parse(&format!("id-{i}")).expect("id"),
            code: CompetencyCode::parse(&format!("C{}", (i % 8) + 1)).expect("code"),
            name: CompetencyName::parse(&format!("competency {i}")).expect("name"),
            sub_items: items(flags),
            created_at_ms: 0,
            updated_at_ms: 0,
        })
        .collect()
}

proptest! {
    #![proptest_config(Config::with_cases(256))]
    #[test]
    fn counts_always_sum_to_total(flags in proptest::collection::vec(any::<bool>(), 0..64)) {
        let eval = evaluate(&items(&flags));
        prop_assert_eq!(eval.validated_count + eval.non_validated_count, eval.total);
        prop_assert_eq!(eval.total, flags.len());
        prop_assert!(eval.percentage <= 100);
    }

    #[test]
    fn status_matches_threshold_rule(flags in proptest::collection::vec(any::<bool>(), 0..64)) {
        let eval = evaluate(&items(&flags));
        let expected = if eval.validated_count >= eval.non_validated_count {
            EvaluationStatus::Validated
        } else {
            EvaluationStatus::NonValidated
        };
        prop_assert_eq!(eval.status, expected);
    }

    #[test]
    fn aggregate_is_order_independent(
        flag_lists in proptest::collection::vec(proptest::collection::vec(any::<bool>(), 0..16), 0..12),
        seed in any::<u64>(),
    ) {
        let list = competencies(&flag_lists);
        let whole = aggregate(&list);

        let mut shuffled = list.clone();
        // Cheap deterministic shuffle; ordering must not matter.
        let len = shuffled.len();
        if len > 1 {
            for i in 0..len {
                let j = ((seed >> (i % 32)) as usize).wrapping_add(i * 7) % len;
                shuffled.swap(i, j);
            }
        }
        prop_assert_eq!(aggregate(&shuffled), whole);
    }

    #[test]
    fn partial_aggregates_merge_to_the_whole(
        flag_lists in proptest::collection::vec(proptest::collection::vec(any::<bool>(), 0..16), 0..12),
        split in any::<usize>(),
    ) {
        let list = competencies(&flag_lists);
        let whole = aggregate(&list);
        let at = if list.is_empty() { 0 } else { split % (list.len() + 1) };
        let (left, right) = list.split_at(at);
        prop_assert_eq!(aggregate(left).merge(aggregate(right)), whole);
    }

    #[test]
    fn aggregate_equals_element_wise_evaluation(
        flag_lists in proptest::collection::vec(proptest::collection::vec(any::<bool>(), 0..16), 0..12),
    ) {
        let list = competencies(&flag_lists);
        let whole = aggregate(&list);
        let mut expected = GlobalStats::default();
        for competency in &list {
            let eval = evaluate(&competency.sub_items);
            expected = expected.merge(GlobalStats {
                total_competencies: 1,
                validated_competencies: usize::from(eval.status == EvaluationStatus::Validated),
                total_sub_items: eval.total,
                validated_sub_items: eval.validated_count,
            });
        }
        prop_assert_eq!(whole, expected);
    }
}
