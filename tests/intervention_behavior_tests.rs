use chrono::{Duration, NaiveDate};
use outcome_chart::model::{Intensity, InterventionPeriod, StrategyKey, derive_interventions};
use proptest::prelude::*;

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 3, 1).expect("valid date") + Duration::days(offset)
}

fn period(offset: i64) -> InterventionPeriod {
    InterventionPeriod::new(day(offset).format("%Y-%m-%d").to_string())
}

#[test]
fn school_closure_ends_at_next_period() {
    let periods = vec![
        period(0).with_intensity(StrategyKey::SchoolClosure, Some(Intensity::Aggressive)),
        period(10),
    ];
    let tracks = derive_interventions(&periods, day(20)).expect("tracks");
    let school = tracks
        .iter()
        .find(|track| track.strategy == StrategyKey::SchoolClosure)
        .expect("school closure track");
    assert_eq!(school.ranges.len(), 1);
    assert_eq!(school.ranges[0].start, day(0));
    assert_eq!(school.ranges[0].end, day(10));
    assert_eq!(school.ranges[0].degree, Intensity::Aggressive);
}

#[test]
fn tracks_follow_fixed_strategy_order() {
    let tracks = derive_interventions(&[period(0)], day(5)).expect("tracks");
    let titles: Vec<&str> = tracks.iter().map(|track| track.title).collect();
    assert_eq!(
        titles,
        vec![
            "School Closures",
            "Social Distancing",
            "Case Isolation",
            "Voluntary Home Quarantine"
        ]
    );
}

#[test]
fn periods_parse_from_model_json() {
    let periods: Vec<InterventionPeriod> = serde_json::from_str(
        r#"[
            {"startDate": "2020-03-01", "reductionPopulationContact": 0, "caseIsolation": "moderate"},
            {"startDate": "2020-04-01", "reductionPopulationContact": 40, "caseIsolation": "aggressive", "voluntaryHomeQuarantine": "mild"}
        ]"#,
    )
    .expect("periods json");
    let tracks = derive_interventions(&periods, day(60)).expect("tracks");
    assert_eq!(tracks[2].ranges.len(), 2);
    assert_eq!(tracks[2].ranges[1].degree, Intensity::Aggressive);
    assert_eq!(tracks[3].ranges.len(), 1);
    assert_eq!(tracks[3].ranges[0].end, day(60));
}

#[test]
fn malformed_start_date_is_an_error() {
    let periods = vec![InterventionPeriod::new("March 1st")];
    assert!(derive_interventions(&periods, day(5)).is_err());
}

fn intensity() -> impl Strategy<Value = Option<Intensity>> {
    prop_oneof![
        Just(None),
        Just(Some(Intensity::Mild)),
        Just(Some(Intensity::Moderate)),
        Just(Some(Intensity::Aggressive)),
    ]
}

proptest! {
    #[test]
    fn ranges_are_ordered_and_disjoint(
        offsets in prop::collection::btree_set(0i64..300, 1..12),
        intensities in prop::collection::vec((intensity(), intensity(), intensity(), intensity()), 12),
    ) {
        let offsets: Vec<i64> = offsets.into_iter().collect();
        let series_end = offsets[offsets.len() - 1] + 30;
        let periods: Vec<InterventionPeriod> = offsets
            .iter()
            .zip(&intensities)
            .map(|(offset, (school, distancing, isolation, quarantine))| {
                period(*offset)
                    .with_intensity(StrategyKey::SchoolClosure, *school)
                    .with_intensity(StrategyKey::SocialDistancing, *distancing)
                    .with_intensity(StrategyKey::CaseIsolation, *isolation)
                    .with_intensity(StrategyKey::VoluntaryHomeQuarantine, *quarantine)
            })
            .collect();

        let tracks = derive_interventions(&periods, day(series_end)).expect("tracks");
        prop_assert_eq!(tracks.len(), 4);
        for track in &tracks {
            for range in &track.ranges {
                prop_assert!(range.start < range.end);
            }
            for pair in track.ranges.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start);
            }
        }

        let last = &periods[periods.len() - 1];
        for (track, strategy) in tracks.iter().zip(StrategyKey::ALL) {
            if last.intensity(strategy).is_some() {
                let final_range = track.ranges.last().expect("range for last period");
                prop_assert_eq!(final_range.end, day(series_end));
            }
        }
    }
}
