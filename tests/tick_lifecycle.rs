use std::{sync::Arc, time::Duration};

use project_timer::{
    state::{AppState, ProjectId, TimerTransition},
    tasks::tick_timer_task,
};
use tokio::time::sleep;

fn spawn_tracker() -> Arc<AppState> {
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string()));
    tokio::spawn(tick_timer_task(Arc::clone(&state)));
    state
}

fn elapsed(state: &AppState) -> u64 {
    state.get_timer_state().unwrap().elapsed_seconds
}

fn total_time(state: &AppState, project: ProjectId) -> u64 {
    state.get_view().unwrap().project(project).unwrap().total_time
}

#[tokio::test(start_paused = true)]
async fn ticks_once_per_second_while_running() {
    let state = spawn_tracker();
    let project = state.create_project("Website Redesign").unwrap().outcome.unwrap();

    state.start_or_stop_timer(project, None).unwrap();
    sleep(Duration::from_millis(5500)).await;
    assert_eq!(elapsed(&state), 5);

    let result = state.start_or_stop_timer(project, None).unwrap();
    assert!(matches!(result.outcome, TimerTransition::Stopped { committed: 5, .. }));
    assert_eq!(total_time(&state, project), 5);
}

#[tokio::test(start_paused = true)]
async fn idle_tracker_never_ticks() {
    let state = spawn_tracker();
    state.create_project("Taxes").unwrap();

    sleep(Duration::from_secs(30)).await;
    assert_eq!(elapsed(&state), 0);
    assert!(!state.get_timer_state().unwrap().is_active());
}

#[tokio::test(start_paused = true)]
async fn stopping_releases_the_tick_source() {
    let state = spawn_tracker();
    let project = state.create_project("Taxes").unwrap().outcome.unwrap();

    state.start_or_stop_timer(project, None).unwrap();
    sleep(Duration::from_millis(2500)).await;
    state.start_or_stop_timer(project, None).unwrap();

    sleep(Duration::from_secs(10)).await;
    assert_eq!(elapsed(&state), 0);
    assert_eq!(total_time(&state, project), 2);

    // A restarted timer gets a fresh one-second phase: nothing left over from
    // the first run may fire in between.
    state.start_or_stop_timer(project, None).unwrap();
    sleep(Duration::from_millis(700)).await;
    assert_eq!(elapsed(&state), 0);
    sleep(Duration::from_millis(500)).await;
    assert_eq!(elapsed(&state), 1);
}

#[tokio::test(start_paused = true)]
async fn switching_restarts_the_tick_source() {
    let state = spawn_tracker();
    let project = state.create_project("Website Redesign").unwrap().outcome.unwrap();
    let element = state.create_element(project, "Wireframes").unwrap().outcome.unwrap();

    state.start_or_stop_timer(project, None).unwrap();
    sleep(Duration::from_millis(3500)).await;
    state.start_or_stop_timer(project, Some(element)).unwrap();
    assert_eq!(total_time(&state, project), 3);

    sleep(Duration::from_millis(700)).await;
    assert_eq!(elapsed(&state), 0);
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(elapsed(&state), 2);

    state.start_or_stop_timer(project, Some(element)).unwrap();
    let view = state.get_view().unwrap();
    let p = view.project(project).unwrap();
    assert_eq!(p.elements[0].time, 2);
    assert_eq!(p.total_time, 5);
}

#[tokio::test(start_paused = true)]
async fn deleting_running_element_discards_and_stops_ticking() {
    let state = spawn_tracker();
    let project = state.create_project("Website Redesign").unwrap().outcome.unwrap();
    let element = state.create_element(project, "Wireframes").unwrap().outcome.unwrap();

    state.start_or_stop_timer(project, Some(element)).unwrap();
    sleep(Duration::from_millis(7500)).await;
    assert_eq!(elapsed(&state), 7);

    let result = state.delete_element(project, element).unwrap();
    assert_eq!(result.outcome.unwrap().discarded_ticks, Some(7));

    sleep(Duration::from_secs(5)).await;
    assert_eq!(elapsed(&state), 0);
    assert!(!state.get_timer_state().unwrap().is_active());
    assert_eq!(total_time(&state, project), 0);
}

#[tokio::test(start_paused = true)]
async fn deleting_running_project_stops_ticking() {
    let state = spawn_tracker();
    let project = state.create_project("Website Redesign").unwrap().outcome.unwrap();
    let other = state.create_project("Garden").unwrap().outcome.unwrap();

    state.start_or_stop_timer(project, None).unwrap();
    sleep(Duration::from_millis(4500)).await;
    state.delete_project(project).unwrap();

    sleep(Duration::from_secs(5)).await;
    assert_eq!(elapsed(&state), 0);
    assert!(!state.get_timer_state().unwrap().is_active());
    assert_eq!(total_time(&state, other), 0);
}
