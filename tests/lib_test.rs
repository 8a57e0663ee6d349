use anyhow::Result;
use fittrack_lib::{
    db, Action, AppService, Config, Effect, Theme, WorkoutStore, THEME_KEY, WORKOUTS_KEY,
};
use rusqlite::Connection;
use tempfile::TempDir;

// Helper function to create a test service with in-memory database
fn create_test_service(dir: &TempDir) -> Result<AppService> {
    let conn = Connection::open_in_memory()?;
    create_service_with(conn, dir)
}

fn create_service_with(conn: Connection, dir: &TempDir) -> Result<AppService> {
    AppService::open(
        Config::default(),
        conn,
        ":memory:".into(),
        dir.path().join("config.toml"),
    )
}

fn stored_workouts(service: &AppService) -> Result<Option<String>> {
    Ok(db::get_value(&service.conn, WORKOUTS_KEY)?.map(|v| v.value))
}

#[test]
fn test_starts_empty_on_first_day() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let service = create_test_service(&dir)?;

    assert_eq!(service.active_day(), "Push");
    assert!(service.state.workouts.is_empty());
    assert_eq!(service.state.theme, Theme::Light);
    assert_eq!(stored_workouts(&service)?, None);
    Ok(())
}

#[test]
fn test_every_mutation_is_written_through() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut service = create_test_service(&dir)?;

    assert!(service.add_exercise("Bench press")?);
    assert!(service.add_exercise(" Dips ")?);
    assert_eq!(
        stored_workouts(&service)?.as_deref(),
        Some(r#"{"Push":["Bench press","Dips"]}"#)
    );

    assert!(service.remove_exercise("Push", 0)?);
    assert_eq!(
        stored_workouts(&service)?.as_deref(),
        Some(r#"{"Push":["Dips"]}"#)
    );

    // Removing the last one drops the day from the document
    assert!(service.remove_exercise("Push", 0)?);
    assert_eq!(stored_workouts(&service)?.as_deref(), Some("{}"));
    Ok(())
}

#[test]
fn test_memory_and_storage_stay_in_sync() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut service = create_test_service(&dir)?;

    service.add_exercise("Bench press")?;
    service.select_day(2)?;
    service.add_exercise("Squat")?;
    service.add_exercise("Squat")?;
    service.remove_exercise("Legs", 1)?;

    let reloaded = WorkoutStore::from_document(stored_workouts(&service)?.as_deref());
    assert_eq!(reloaded, service.state.workouts);

    let stats = service.stats();
    assert_eq!(stats.total_exercises, 2);
    assert_eq!(stats.active_days, 2);
    Ok(())
}

#[test]
fn test_invalid_input_changes_nothing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut service = create_test_service(&dir)?;

    assert!(!service.add_exercise("   ")?);
    assert!(!service.remove_exercise("Push", 0)?);
    assert!(!service.remove_exercise("Nowhere", 0)?);
    assert!(!service.select_day(99)?);
    assert!(!service.add_day("")?);
    assert!(!service.add_day("Pull")?);

    assert_eq!(stored_workouts(&service)?, None);
    assert_eq!(service.active_day(), "Push");
    assert_eq!(service.state.days.days().len(), 6);
    Ok(())
}

#[test]
fn test_reset_requires_confirmation_and_erases_document() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut service = create_test_service(&dir)?;
    service.add_exercise("Bench press")?;
    service.select_day(1)?;
    service.add_exercise("Row")?;

    assert!(!service.reset_all(false)?);
    assert_eq!(service.stats().total_exercises, 2);
    assert!(stored_workouts(&service)?.is_some());

    assert!(service.reset_all(true)?);
    assert!(service.state.workouts.is_empty());
    // The key is gone, not set to "{}"
    assert_eq!(stored_workouts(&service)?, None);
    assert_eq!(service.last_saved()?, None);
    Ok(())
}

#[test]
fn test_days_and_pointer_persist_to_config() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut service = create_test_service(&dir)?;

    assert!(service.add_day("Arms")?);
    assert!(!service.add_day("Arms")?);
    assert_eq!(service.active_day(), "Arms");

    let saved = fittrack_lib::load_config_util(service.get_config_path())?;
    assert_eq!(saved.days.len(), 7);
    assert_eq!(saved.days.last().map(String::as_str), Some("Arms"));
    assert_eq!(saved.active_day, 6);

    service.select_day(1)?;
    let saved = fittrack_lib::load_config_util(service.get_config_path())?;
    assert_eq!(saved.active_day, 1);
    Ok(())
}

#[test]
fn test_state_survives_reopen() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let db_file = dir.path().join("fittrack.db");
    let config_path = dir.path().join("config.toml");

    {
        let conn = db::open_db(&db_file)?;
        let mut service =
            AppService::open(Config::default(), conn, db_file.clone(), config_path.clone())?;
        service.add_day("Arms")?;
        service.add_exercise("Curl")?;
        service.toggle_theme()?;
    }

    let config = fittrack_lib::load_config_util(&config_path)?;
    let service = AppService::open(config, db::open_db(&db_file)?, db_file, config_path)?;
    assert_eq!(service.active_day(), "Arms");
    assert_eq!(service.exercises("Arms"), ["Curl"]);
    assert_eq!(service.state.theme, Theme::Dark);
    assert!(service.last_saved()?.is_some());
    Ok(())
}

#[test]
fn test_corrupt_documents_are_discarded() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let conn = Connection::open_in_memory()?;
    db::init_db(&conn)?;
    db::put_value(&conn, WORKOUTS_KEY, "{not json")?;
    db::put_value(&conn, THEME_KEY, "sepia")?;

    let service = create_service_with(conn, &dir)?;
    assert!(service.state.workouts.is_empty());
    assert_eq!(service.state.theme, Theme::Light);
    Ok(())
}

#[test]
fn test_theme_is_independent_of_workouts() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut service = create_test_service(&dir)?;

    assert_eq!(service.toggle_theme()?, Theme::Dark);
    service.add_exercise("Bench press")?;
    service.reset_all(true)?;

    let stored = db::get_value(&service.conn, THEME_KEY)?.map(|v| v.value);
    assert_eq!(stored.as_deref(), Some("dark"));
    Ok(())
}

#[test]
fn test_dispatch_reports_effects() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut service = create_test_service(&dir)?;

    assert_eq!(
        service.dispatch(Action::AddExercise {
            name: "Bench press".into()
        })?,
        vec![Effect::SaveWorkouts]
    );
    assert_eq!(
        service.dispatch(Action::RemoveExercise {
            day: "Pull".into(),
            index: 0
        })?,
        Vec::<Effect>::new()
    );
    assert_eq!(
        service.dispatch(Action::ToggleTheme)?,
        vec![Effect::SaveTheme]
    );
    Ok(())
}

#[test]
fn test_find_day_is_exact() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let service = create_test_service(&dir)?;

    assert_eq!(service.find_day(" Legs "), Some("Legs"));
    assert_eq!(service.find_day("legs"), None);
    Ok(())
}

#[test]
fn test_stored_days_missing_from_config_can_be_edited() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let conn = Connection::open_in_memory()?;
    db::init_db(&conn)?;
    db::put_value(&conn, WORKOUTS_KEY, r#"{"Mobility":["Hip circles","Cat-cow"]}"#)?;

    let mut service = create_service_with(conn, &dir)?;
    assert!(!service.state.days.contains("Mobility"));

    let day = service.find_day("Mobility").map(str::to_string);
    assert_eq!(day.as_deref(), Some("Mobility"));
    assert!(service.remove_exercise("Mobility", 0)?);
    assert_eq!(
        stored_workouts(&service)?.as_deref(),
        Some(r#"{"Mobility":["Cat-cow"]}"#)
    );
    Ok(())
}
