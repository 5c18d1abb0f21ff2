use proptest::prelude::*;
use upset_rs::api::{DEFAULT_MAX_INTERSECTIONS, build_upset_chart};
use upset_rs::chart::{PanelSlot, Trace};
use upset_rs::core::{
    CategoryOrder, IntersectionFilter, IntersectionOrder, MembershipMatrix, MembershipRow,
    MembershipTable, derive_intersections,
};

fn membership_table() -> impl Strategy<Value = MembershipTable> {
    (1usize..7).prop_flat_map(|category_count| {
        prop::collection::vec(
            (prop::collection::vec(any::<bool>(), category_count), 0u64..1_000),
            0..48,
        )
        .prop_map(move |rows| {
            let categories = (0..category_count).map(|i| format!("set{i}")).collect();
            let rows = rows
                .into_iter()
                .map(|(mask, count)| MembershipRow::new(mask, count))
                .collect();
            MembershipTable::new(categories, rows).expect("generated table is well formed")
        })
    })
}

proptest! {
    #[test]
    fn derived_cardinalities_are_non_increasing_and_conserve_counts(table in membership_table()) {
        let derived = derive_intersections(
            &table,
            IntersectionOrder::Cardinality,
            CategoryOrder::Input,
            IntersectionFilter::default(),
        ).expect("derive");

        for pair in derived.intersections.windows(2) {
            prop_assert!(pair[0].cardinality >= pair[1].cardinality);
        }

        let input_total: u64 = table.rows.iter().map(|row| row.count).sum();
        let derived_total: u64 = derived.intersections.iter().map(|i| i.cardinality).sum();
        prop_assert_eq!(input_total, derived_total);

        for (index, (name, total)) in derived.totals.iter().enumerate() {
            let from_intersections: u64 = derived
                .intersections
                .iter()
                .filter(|i| i.membership[index])
                .map(|i| i.cardinality)
                .sum();
            prop_assert_eq!(*total, from_intersections, "total of {}", name);
        }
    }

    #[test]
    fn matrix_members_match_intersection_degrees(table in membership_table()) {
        let derived = derive_intersections(
            &table,
            IntersectionOrder::Cardinality,
            CategoryOrder::Input,
            IntersectionFilter::default(),
        ).expect("derive");
        let matrix = MembershipMatrix::from_intersections(&derived);

        let degree_sum: usize = derived.intersections.iter().map(|i| i.degree()).sum();
        prop_assert_eq!(matrix.members.len(), degree_sum);
        prop_assert_eq!(
            matrix.grid.len(),
            derived.intersection_count() * derived.category_count()
        );
        for point in &matrix.members {
            prop_assert!(point.x < matrix.intersection_count);
            prop_assert!(point.y < matrix.category_count);
        }
    }

    #[test]
    fn built_chart_never_exceeds_intersection_cap(table in membership_table()) {
        let chart = build_upset_chart(&table, "Sets").expect("chart");
        if let Some(panel) = chart.panel(PanelSlot::TopLeft) {
            let Trace::Bar(bar) = &panel.traces[0] else {
                panic!("expected bar trace");
            };
            prop_assert!(bar.values.len() <= DEFAULT_MAX_INTERSECTIONS);
            prop_assert_eq!(chart.is_truncated(), bar.values.len() == DEFAULT_MAX_INTERSECTIONS
                && chart.title.as_deref().is_some_and(|t| t.contains("Truncated")));
            chart.validate().expect("consistent traces");
        } else {
            prop_assert!(chart.is_placeholder());
            prop_assert_eq!(chart.annotations().len(), 1);
        }
    }
}
