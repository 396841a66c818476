use skilldeck_model::{
    aggregate, evaluate, filter_by_status, Competency, CompetencyCode, CompetencyId,
    CompetencyName, EvaluationStatus, SubItem,
};

fn items(flags: &[bool]) -> Vec<SubItem> {
    flags
        .iter()
        .enumerate()
        .map(|(i, v)| SubItem::parse(&format!("item-{i}"), *v).expect("sub item"))
        .collect()
}

fn competency(code: &str, flags: &[bool]) -> Competency {
    Competency {
        id: CompetencyId::parse(&format!("id-{code}")).expect("id"),
        code: CompetencyCode::parse(code).expect("code"),
        name: CompetencyName::parse(&format!("competency {code}")).expect("name"),
        sub_items: items(flags),
        created_at_ms: 0,
        updated_at_ms: 0,
    }
}

#[test]
fn two_of_three_validated_is_validated_at_67_percent() {
    let eval = evaluate(&items(&[true, true, false]));
    assert_eq!(eval.validated_count, 2);
    assert_eq!(eval.non_validated_count, 1);
    assert_eq!(eval.total, 3);
    assert_eq!(eval.status, EvaluationStatus::Validated);
    assert_eq!(eval.percentage, 67);
}

#[test]
fn one_of_three_validated_is_non_validated_at_33_percent() {
    let eval = evaluate(&items(&[true, false, false]));
    assert_eq!(eval.validated_count, 1);
    assert_eq!(eval.non_validated_count, 2);
    assert_eq!(eval.total, 3);
    assert_eq!(eval.status, EvaluationStatus::NonValidated);
    assert_eq!(eval.percentage, 33);
}

#[test]
fn tie_goes_to_validated() {
    let eval = evaluate(&items(&[true, false]));
    assert_eq!(eval.status, EvaluationStatus::Validated);
    assert_eq!(eval.percentage, 50);
}

#[test]
fn empty_list_is_validated_at_zero_percent() {
    let eval = evaluate(&[]);
    assert_eq!(eval.validated_count, 0);
    assert_eq!(eval.non_validated_count, 0);
    assert_eq!(eval.total, 0);
    assert_eq!(eval.status, EvaluationStatus::Validated);
    assert_eq!(eval.percentage, 0);
}

#[test]
fn status_serializes_with_hyphenated_wire_names() {
    assert_eq!(
        serde_json::to_string(&EvaluationStatus::Validated).expect("json"),
        "\"validated\""
    );
    assert_eq!(
        serde_json::to_string(&EvaluationStatus::NonValidated).expect("json"),
        "\"non-validated\""
    );
}

#[test]
fn aggregate_counts_competencies_and_sub_items() {
    let list = vec![
        competency("C1", &[true, true, false]),
        competency("C2", &[true, false, false]),
        competency("C3", &[]),
    ];
    let stats = aggregate(&list);
    assert_eq!(stats.total_competencies, 3);
    assert_eq!(stats.validated_competencies, 2);
    assert_eq!(stats.total_sub_items, 6);
    assert_eq!(stats.validated_sub_items, 2);
}

#[test]
fn filter_by_status_splits_the_list() {
    let list = vec![
        competency("C1", &[true, true, false]),
        competency("C2", &[true, false, false]),
    ];
    let validated = filter_by_status(&list, EvaluationStatus::Validated);
    let non_validated = filter_by_status(&list, EvaluationStatus::NonValidated);
    assert_eq!(validated.len(), 1);
    assert_eq!(validated[0].code.as_str(), "C1");
    assert_eq!(non_validated.len(), 1);
    assert_eq!(non_validated[0].code.as_str(), "C2");
}
