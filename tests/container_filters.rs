mod common;

use chrono::NaiveDate;
use common::{drain, loaded_view, on_day, record, seeded};
use rust_decimal::Decimal;
use tallybook::container::{ContainerState, RecordEvent};
use tallybook::record::FinanceRecord;

fn catalogue() -> Vec<FinanceRecord> {
    vec![
        record("Coffee Shop", 550, true).with_occurred_at(on_day("2024-05-01")),
        record("Salary", 300_000, false).with_occurred_at(on_day("2024-05-15")),
        record("Coffee Beans", 1250, true).with_occurred_at(on_day("2024-06-02")),
    ]
}

#[tokio::test]
async fn search_narrows_to_matching_titles() {
    let (_, mut container) = seeded(vec![
        record("Coffee Shop", 550, true),
        record("Salary", 300_000, false),
    ]);
    container.dispatch(RecordEvent::Load).await;

    let mut states = container.subscribe();
    container
        .dispatch(RecordEvent::Search {
            query: "coffee".into(),
        })
        .await;

    let emissions = drain(&mut states);
    assert_eq!(emissions.len(), 1);
    let view = loaded_view(&emissions[0]);
    assert_eq!(view.filters.query.as_deref(), Some("coffee"));
    assert_eq!(view.filtered_records.len(), 1);
    assert_eq!(view.filtered_records[0].title, "Coffee Shop");
    // The authoritative list is untouched.
    assert_eq!(view.records.len(), 2);
}

#[tokio::test]
async fn empty_query_clears_the_search_filter() {
    let (_, mut container) = seeded(catalogue());
    container.dispatch(RecordEvent::Load).await;
    container
        .dispatch(RecordEvent::Search {
            query: "coffee".into(),
        })
        .await;

    let mut states = container.subscribe();
    container
        .dispatch(RecordEvent::Search { query: "   ".into() })
        .await;

    let emissions = drain(&mut states);
    let view = loaded_view(&emissions[0]);
    assert_eq!(view.filters.query, None);
    assert!(!view.filters.is_active());
    assert!(view.filtered_records.is_empty());
}

#[tokio::test]
async fn filters_compose_with_and_semantics() {
    let (_, mut container) = seeded(catalogue());
    container.dispatch(RecordEvent::Load).await;

    let mut states = container.subscribe();
    container
        .dispatch(RecordEvent::Search {
            query: "coffee".into(),
        })
        .await;
    container
        .dispatch(RecordEvent::FilterByDateRange {
            start: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2024, 5, 31).expect("valid date"),
        })
        .await;
    container
        .dispatch(RecordEvent::FilterByType {
            is_expense: Some(true),
        })
        .await;

    let emissions = drain(&mut states);
    assert_eq!(emissions.len(), 3);

    // After search alone: both coffee records.
    assert_eq!(loaded_view(&emissions[0]).filtered_records.len(), 2);
    // Date range cuts the June purchase.
    let view = loaded_view(&emissions[2]);
    assert_eq!(view.filtered_records.len(), 1);
    assert_eq!(view.filtered_records[0].title, "Coffee Shop");
}

#[tokio::test]
async fn date_range_includes_boundary_days() {
    let (_, mut container) = seeded(catalogue());
    container.dispatch(RecordEvent::Load).await;

    let mut states = container.subscribe();
    container
        .dispatch(RecordEvent::FilterByDateRange {
            start: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2024, 5, 15).expect("valid date"),
        })
        .await;

    let emissions = drain(&mut states);
    let view = loaded_view(&emissions[0]);
    let titles: Vec<&str> = view
        .filtered_records
        .iter()
        .map(|record| record.title.as_str())
        .collect();
    assert_eq!(titles, ["Coffee Shop", "Salary"]);
}

#[tokio::test]
async fn type_filter_selects_direction_and_none_clears_it() {
    let (_, mut container) = seeded(catalogue());
    container.dispatch(RecordEvent::Load).await;

    let mut states = container.subscribe();
    container
        .dispatch(RecordEvent::FilterByType {
            is_expense: Some(false),
        })
        .await;
    container
        .dispatch(RecordEvent::FilterByType { is_expense: None })
        .await;

    let emissions = drain(&mut states);
    let income_only = loaded_view(&emissions[0]);
    assert_eq!(income_only.filtered_records.len(), 1);
    assert_eq!(income_only.filtered_records[0].title, "Salary");

    let cleared = loaded_view(&emissions[1]);
    assert!(!cleared.filters.is_active());
    assert!(cleared.filtered_records.is_empty());
}

#[tokio::test]
async fn clear_filters_resets_everything_at_once() {
    let (_, mut container) = seeded(catalogue());
    container.dispatch(RecordEvent::Load).await;
    container
        .dispatch(RecordEvent::Search { query: "x".into() })
        .await;
    container
        .dispatch(RecordEvent::FilterByType {
            is_expense: Some(true),
        })
        .await;

    let mut states = container.subscribe();
    container.dispatch(RecordEvent::ClearFilters).await;

    let emissions = drain(&mut states);
    assert_eq!(emissions.len(), 1);
    let view = loaded_view(&emissions[0]);
    assert_eq!(view.filters.query, None);
    assert_eq!(view.filters.is_expense, None);
    assert_eq!(view.filters.date_range, None);
    assert!(view.filtered_records.is_empty());
}

#[tokio::test]
async fn filter_events_are_ignored_outside_loaded() {
    let (_, mut container) = seeded(catalogue());
    let mut states = container.subscribe();

    container
        .dispatch(RecordEvent::Search {
            query: "coffee".into(),
        })
        .await;
    container.dispatch(RecordEvent::ClearFilters).await;

    assert!(drain(&mut states).is_empty());
    assert_eq!(*container.state(), ContainerState::Initial);
}

#[tokio::test]
async fn refresh_preserves_active_filters() {
    let (_, mut container) = seeded(catalogue());
    container.dispatch(RecordEvent::Load).await;
    container
        .dispatch(RecordEvent::Search {
            query: "coffee".into(),
        })
        .await;

    let mut states = container.subscribe();
    container.dispatch(RecordEvent::Refresh).await;

    let emissions = drain(&mut states);
    let view = loaded_view(&emissions[0]);
    assert_eq!(view.filters.query.as_deref(), Some("coffee"));
    assert_eq!(view.filtered_records.len(), 2);
}

#[tokio::test]
async fn filtered_subset_tracks_mutations() {
    let (_, mut container) = seeded(vec![record("Coffee Shop", 550, true)]);
    container.dispatch(RecordEvent::Load).await;
    container
        .dispatch(RecordEvent::Search {
            query: "coffee".into(),
        })
        .await;

    let mut states = container.subscribe();
    container
        .dispatch(RecordEvent::Add {
            title: "Coffee Beans".into(),
            amount: Decimal::new(1250, 2),
            is_expense: true,
        })
        .await;

    let emissions = drain(&mut states);
    let view = loaded_view(emissions.last().expect("terminal emission"));
    assert_eq!(view.records.len(), 2);
    assert_eq!(view.filtered_records.len(), 2);
}

#[tokio::test]
async fn fresh_load_resets_filters() {
    let (_, mut container) = seeded(catalogue());
    container.dispatch(RecordEvent::Load).await;
    container
        .dispatch(RecordEvent::Search {
            query: "coffee".into(),
        })
        .await;

    container.dispatch(RecordEvent::Load).await;
    let view = loaded_view(container.state());
    assert!(!view.filters.is_active());
    assert!(view.filtered_records.is_empty());
}
