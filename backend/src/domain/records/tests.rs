//! Behaviour shared across record types: creation defaults, shallow merge,
//! derived values and the serialised shape.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn qty(value: f64) -> Quantity {
    Quantity::new("test", value).expect("valid quantity")
}

fn label(raw: &str) -> Label {
    Label::new("test", raw).expect("valid label")
}

fn clock(raw: &str) -> ClockTime {
    ClockTime::parse("test", raw).expect("valid time")
}

#[fixture]
fn owner() -> UserId {
    UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id")
}

#[rstest]
fn missing_date_defaults_to_creation_time(owner: UserId) {
    let now = at(3, 12);
    let record = Record::<Activity>::create(
        RecordId::random(),
        owner,
        ActivityDraft::new(label("run")),
        now,
    );
    assert_eq!(record.body().date, now);
    assert_eq!(record.created_at(), now);
    assert_eq!(record.updated_at(), now);
}

#[rstest]
fn patch_overwrites_present_fields_only(owner: UserId) {
    let mut draft = ActivityDraft::new(label("run"));
    draft.duration_minutes = Some(qty(30.0));
    draft.distance = Some(qty(5.0));
    let mut record = Record::<Activity>::create(RecordId::random(), owner.clone(), draft, at(1, 8));

    record.apply(
        ActivityPatch {
            distance: Some(qty(6.5)),
            ..ActivityPatch::default()
        },
        at(2, 8),
    );

    assert_eq!(record.body().activity_type, label("run"));
    assert_eq!(record.body().duration_minutes, Some(qty(30.0)));
    assert_eq!(record.body().distance, Some(qty(6.5)));
    assert_eq!(record.updated_at(), at(2, 8));
    assert_eq!(record.created_at(), at(1, 8));
    assert!(record.is_owned_by(&owner));
}

#[rstest]
fn nutrition_derives_calories_from_macros() {
    let meal = Nutrition::from_draft(
        NutritionDraft {
            protein: Some(qty(30.0)),
            carbs: Some(qty(50.5)),
            fats: Some(qty(10.0)),
            ..NutritionDraft::default()
        },
        at(1, 8),
    );
    assert_eq!(meal.calories, Some(qty(412.0)));
}

#[rstest]
fn explicit_calories_win_over_macros() {
    let meal = Nutrition::from_draft(
        NutritionDraft {
            calories: Some(qty(500.0)),
            protein: Some(qty(30.0)),
            ..NutritionDraft::default()
        },
        at(1, 8),
    );
    assert_eq!(meal.calories, Some(qty(500.0)));
}

#[rstest]
fn nutrition_without_macros_has_no_calories() {
    let meal = Nutrition::from_draft(NutritionDraft::default(), at(1, 8));
    assert_eq!(meal.calories, None);
}

#[rstest]
fn patching_macros_recomputes_calories() {
    let mut meal = Nutrition::from_draft(
        NutritionDraft {
            protein: Some(qty(10.0)),
            ..NutritionDraft::default()
        },
        at(1, 8),
    );
    meal.apply_patch(NutritionPatch {
        fats: Some(qty(10.0)),
        ..NutritionPatch::default()
    });
    assert_eq!(meal.calories, Some(qty(130.0)));
}

#[rstest]
#[case("22:30", "06:45", 8.3)]
#[case("01:00", "07:00", 6.0)]
#[case("07:00", "07:00", 0.0)]
fn sleep_duration_wraps_midnight(#[case] bed: &str, #[case] wake: &str, #[case] hours: f64) {
    let night = Sleep::from_draft(
        SleepDraft {
            bedtime: Some(clock(bed)),
            waketime: Some(clock(wake)),
            ..SleepDraft::default()
        },
        at(1, 8),
    );
    assert_eq!(night.duration_hours, Some(qty(hours)));
}

#[rstest]
fn sleep_keeps_explicit_duration() {
    let night = Sleep::from_draft(
        SleepDraft {
            duration_hours: Some(qty(7.0)),
            bedtime: Some(clock("23:00")),
            waketime: Some(clock("05:00")),
            ..SleepDraft::default()
        },
        at(1, 8),
    );
    assert_eq!(night.duration_hours, Some(qty(7.0)));
}

#[rstest]
fn goal_defaults_progress_and_completion() {
    let goal = Goal::from_draft(GoalDraft::new(label("Run 100km")), at(1, 8));
    assert_eq!(goal.progress, Quantity::ZERO);
    assert!(!goal.completed);
    assert_eq!(goal.date(), None);
}

#[rstest]
fn goals_sort_by_creation_time(owner: UserId) {
    let older = Record::<Goal>::create(
        RecordId::random(),
        owner.clone(),
        GoalDraft::new(label("older")),
        at(1, 8),
    );
    let newer = Record::<Goal>::create(
        RecordId::random(),
        owner,
        GoalDraft::new(label("newer")),
        at(2, 8),
    );
    let mut goals = vec![older, newer];
    sort_newest_first(&mut goals);
    assert_eq!(goals[0].body().title, label("newer"));
}

#[rstest]
fn activities_sort_by_date_not_creation(owner: UserId) {
    let mut early = ActivityDraft::new(label("early"));
    early.date = Some(at(1, 6));
    let mut late = ActivityDraft::new(label("late"));
    late.date = Some(at(5, 6));
    let mut records = vec![
        Record::<Activity>::create(RecordId::random(), owner.clone(), late, at(1, 9)),
        Record::<Activity>::create(RecordId::random(), owner, early, at(9, 9)),
    ];
    sort_newest_first(&mut records);
    assert_eq!(records[0].body().activity_type, label("late"));
}

#[rstest]
fn record_serialises_with_owner_and_timestamps(owner: UserId) {
    let mut draft = ActivityDraft::new(label("run"));
    draft.duration_minutes = Some(qty(30.0));
    draft.date = Some(at(1, 0));
    let record = Record::<Activity>::create(RecordId::random(), owner.clone(), draft, at(2, 9));

    let value = serde_json::to_value(&record).expect("serialise record");

    assert_eq!(value["user"], json!(owner.as_ref()));
    assert_eq!(value["type"], json!("run"));
    assert_eq!(value["durationMinutes"], json!(30.0));
    assert_eq!(value["date"], json!("2024-01-01T00:00:00Z"));
    assert_eq!(value["createdAt"], json!("2024-01-02T09:00:00Z"));
    assert_eq!(value["id"], json!(record.id().to_string()));
}
