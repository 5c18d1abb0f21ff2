use upset_rs::core::{
    CategoryOrder, EMPTY_INTERSECTION_LABEL, IntersectionFilter, IntersectionTable, IntersectionOrder, MembershipRow, MembershipTable,
    derive_intersections,
};

fn cardinality_of(table: &IntersectionTable, names: &[&str]) -> Option<u64> {
    table
        .intersections
        .iter()
        .find(|i| i.categories.iter().map(String::as_str).eq(names.iter().copied()))
        .map(|i| i.cardinality)
}

fn abc_table() -> MembershipTable {
    MembershipTable::new(
        vec!["A".to_owned(), "B".to_owned(), "C".to_owned()],
        vec![
            MembershipRow::new([true, false, false], 3),
            MembershipRow::new([false, true, true], 2),
            MembershipRow::new([true, true, false], 5),
        ],
    )
    .expect("valid table")
}

#[test]
fn orders_intersections_by_descending_cardinality() {
    let table = derive_intersections(
        &abc_table(),
        IntersectionOrder::Cardinality,
        CategoryOrder::Input,
        IntersectionFilter::default(),
    )
    .expect("derive");

    let order: Vec<(Vec<String>, u64)> = table
        .intersections
        .iter()
        .map(|i| (i.categories.clone(), i.cardinality))
        .collect();
    assert_eq!(
        order,
        vec![
            (vec!["A".to_owned(), "B".to_owned()], 5),
            (vec!["A".to_owned()], 3),
            (vec!["B".to_owned(), "C".to_owned()], 2),
        ]
    );
    assert!(!table.truncated);
}

#[test]
fn category_totals_cover_every_row() {
    let table = derive_intersections(
        &abc_table(),
        IntersectionOrder::Cardinality,
        CategoryOrder::Input,
        IntersectionFilter::default(),
    )
    .expect("derive");

    let totals: Vec<(&str, u64)> = table
        .totals
        .iter()
        .map(|(name, total)| (name.as_str(), *total))
        .collect();
    assert_eq!(totals, vec![("A", 8), ("B", 7), ("C", 2)]);
}

#[test]
fn duplicate_masks_are_summed_at_first_occurrence() {
    let data = MembershipTable::new(
        vec!["A".to_owned(), "B".to_owned()],
        vec![
            MembershipRow::new([true, false], 2),
            MembershipRow::new([false, true], 4),
            MembershipRow::new([true, false], 2),
        ],
    )
    .expect("valid table");

    let table = derive_intersections(
        &data,
        IntersectionOrder::Cardinality,
        CategoryOrder::Input,
        IntersectionFilter::default(),
    )
    .expect("derive");

    assert_eq!(table.intersection_count(), 2);
    // Both combinations end up with cardinality 4; the first-seen one ranks first.
    assert_eq!(table.intersections[0].categories, vec!["A".to_owned()]);
    assert_eq!(table.intersections[0].cardinality, 4);
    assert_eq!(table.intersections[1].categories, vec!["B".to_owned()]);
    assert_eq!(cardinality_of(&table, &["A"]), Some(4));
    assert_eq!(cardinality_of(&table, &["A", "B"]), None);
}

#[test]
fn labels_are_sorted_and_newline_joined() {
    let data = MembershipTable::new(
        vec!["zeta".to_owned(), "alpha".to_owned(), "mu".to_owned()],
        vec![
            MembershipRow::new([true, true, true], 3),
            MembershipRow::new([true, false, false], 1),
        ],
    )
    .expect("valid table");

    let table = derive_intersections(
        &data,
        IntersectionOrder::Cardinality,
        CategoryOrder::Input,
        IntersectionFilter::default(),
    )
    .expect("derive");

    assert_eq!(table.intersections[0].label(), "alpha\nmu\nzeta");
    assert_eq!(table.intersections[1].label(), "zeta");
}

#[test]
fn degree_order_ranks_smaller_combinations_first() {
    let table = derive_intersections(
        &abc_table(),
        IntersectionOrder::Degree,
        CategoryOrder::Input,
        IntersectionFilter::default(),
    )
    .expect("derive");

    let cardinalities: Vec<u64> = table.intersections.iter().map(|i| i.cardinality).collect();
    assert_eq!(cardinalities, vec![3, 5, 2]);
}

#[test]
fn input_order_keeps_first_occurrence() {
    let table = derive_intersections(
        &abc_table(),
        IntersectionOrder::Input,
        CategoryOrder::Input,
        IntersectionFilter::default(),
    )
    .expect("derive");

    let cardinalities: Vec<u64> = table.intersections.iter().map(|i| i.cardinality).collect();
    assert_eq!(cardinalities, vec![3, 2, 5]);
}

#[test]
fn cardinality_category_order_permutes_masks_and_totals() {
    let table = derive_intersections(
        &abc_table(),
        IntersectionOrder::Cardinality,
        CategoryOrder::Cardinality,
        IntersectionFilter::default(),
    )
    .expect("derive");

    assert_eq!(table.categories, vec!["A", "B", "C"]);

    let data = MembershipTable::new(
        vec!["A".to_owned(), "B".to_owned(), "C".to_owned()],
        vec![
            MembershipRow::new([true, false, false], 2),
            MembershipRow::new([false, true, false], 9),
            MembershipRow::new([false, true, true], 5),
        ],
    )
    .expect("valid table");
    let table = derive_intersections(
        &data,
        IntersectionOrder::Cardinality,
        CategoryOrder::Cardinality,
        IntersectionFilter::default(),
    )
    .expect("derive");

    assert_eq!(table.categories, vec!["B", "C", "A"]);
    assert_eq!(table.totals.get_index(0), Some((&"B".to_owned(), &14)));
    // (B,C) in reordered columns is [true, true, false].
    let b_and_c = table
        .intersections
        .iter()
        .find(|i| i.cardinality == 5)
        .expect("b and c");
    assert_eq!(b_and_c.membership.as_slice(), &[true, true, false]);
}

#[test]
fn filter_bounds_are_inclusive() {
    let filter = IntersectionFilter {
        min_cardinality: Some(3),
        max_degree: Some(1),
        ..IntersectionFilter::default()
    };
    let table = derive_intersections(
        &abc_table(),
        IntersectionOrder::Cardinality,
        CategoryOrder::Input,
        filter,
    )
    .expect("derive");

    assert_eq!(table.intersection_count(), 1);
    assert_eq!(table.intersections[0].categories, vec!["A".to_owned()]);
    // Totals still reflect the unfiltered table.
    assert_eq!(table.totals.get("B"), Some(&7));
}

#[test]
fn all_false_combination_is_kept_with_named_label() {
    let data = MembershipTable::new(
        vec!["A".to_owned(), "B".to_owned()],
        vec![
            MembershipRow::new([false, false], 7),
            MembershipRow::new([true, false], 1),
        ],
    )
    .expect("valid table");

    let table = derive_intersections(
        &data,
        IntersectionOrder::Cardinality,
        CategoryOrder::Input,
        IntersectionFilter::default(),
    )
    .expect("derive");

    assert_eq!(table.intersections[0].cardinality, 7);
    assert_eq!(table.intersections[0].degree(), 0);
    assert_eq!(table.intersections[0].label(), EMPTY_INTERSECTION_LABEL);
    assert_eq!(table.intersections[0].label(), "(none)");
}
