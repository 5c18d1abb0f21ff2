use upset_rs::api::{UpsetConfig, build_upset_chart, build_upset_chart_with_config};
use upset_rs::chart::PlaceholderReason;
use upset_rs::core::{IntersectionFilter, MembershipRow, MembershipTable};

fn one_hot_table(category_count: usize) -> MembershipTable {
    let categories = (0..category_count).map(|i| format!("cat{i:02}")).collect();
    let rows = (0..category_count)
        .map(|i| MembershipRow::new((0..category_count).map(|c| c == i), i as u64 + 1))
        .collect();
    MembershipTable::new(categories, rows).expect("valid table")
}

#[test]
fn empty_table_yields_no_data_placeholder() {
    let table = MembershipTable::new(vec!["A".to_owned(), "B".to_owned()], Vec::new())
        .expect("empty table is well formed");

    let chart = build_upset_chart(&table, "Genes").expect("placeholder chart");

    assert_eq!(chart.placeholder_reason(), Some(PlaceholderReason::NoData));
    assert_eq!(chart.annotations().len(), 1);
    assert_eq!(chart.annotations()[0].text, "No data to plot");
    assert_eq!(chart.axes().len(), 2);
    assert!(chart.axes().iter().all(|axis| !axis.visible));
    assert!(chart.panels().is_empty());
    assert_eq!(chart.title, None);
    assert_eq!(chart.height, None);
}

#[test]
fn default_table_without_categories_is_empty_not_malformed() {
    let chart = build_upset_chart(&MembershipTable::default(), "Genes").expect("placeholder");
    assert_eq!(chart.placeholder_reason(), Some(PlaceholderReason::NoData));
}

#[test]
fn single_record_yields_single_category_placeholder() {
    let table = MembershipTable::new(
        vec!["A".to_owned(), "B".to_owned()],
        vec![MembershipRow::new([true, false], 12)],
    )
    .expect("valid table");

    let chart = build_upset_chart(&table, "Drug Class").expect("placeholder chart");

    assert_eq!(chart.placeholder_reason(), Some(PlaceholderReason::SingleRecord));
    let annotations = chart.annotations();
    assert_eq!(annotations.len(), 1);
    assert!(annotations[0].text.contains("Drug Class"));
    assert!(annotations[0].text.contains("single category"));
    assert_eq!(annotations[0].font_size, 16.0);
    assert!(!annotations[0].show_arrow);
    assert!(chart.axes().iter().all(|axis| !axis.visible));
}

#[test]
fn too_many_categories_reports_the_count() {
    let table = one_hot_table(41);

    let chart = build_upset_chart(&table, "AMR Gene Family").expect("placeholder chart");

    assert_eq!(
        chart.placeholder_reason(),
        Some(PlaceholderReason::TooManyCategories { category_count: 41 })
    );
    let text = &chart.annotations()[0].text;
    assert!(text.contains("41"));
    assert!(text.contains("AMR Gene Family"));
    assert!(chart.panels().is_empty());
}

#[test]
fn category_ceiling_is_inclusive() {
    let chart = build_upset_chart(&one_hot_table(40), "Genes").expect("chart");
    assert!(!chart.is_placeholder());
    assert_eq!(chart.height, Some(800));
}

#[test]
fn category_ceiling_follows_config() {
    let config = UpsetConfig::default().with_max_categories(3);
    let chart = build_upset_chart_with_config(&one_hot_table(4), "Genes", &config)
        .expect("placeholder chart");
    assert_eq!(
        chart.placeholder_reason(),
        Some(PlaceholderReason::TooManyCategories { category_count: 4 })
    );
}

#[test]
fn filtering_away_every_intersection_yields_no_data() {
    let config = UpsetConfig::default().with_filter(IntersectionFilter {
        min_cardinality: Some(1_000),
        ..IntersectionFilter::default()
    });

    let chart = build_upset_chart_with_config(&one_hot_table(5), "Genes", &config)
        .expect("placeholder chart");

    assert_eq!(chart.placeholder_reason(), Some(PlaceholderReason::NoData));
    assert_eq!(chart.annotations()[0].text, "No data to plot");
}
