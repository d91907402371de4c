mod app;
mod event;
mod ui;

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use clap::Args;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::DefaultTerminal;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use self::app::{App, AppAction, Screen};
use self::event::{AppEvent, KeyEvent};
use super::date::DateAction;
use super::fetch::IssueSearch;
use super::query::IssueQuery;
use super::report::load_report;
use crate::shared::config::{ColumnLayout, load_config};
use crate::shared::env_var::JiraEnv;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Args, Clone, PartialEq, Eq)]
pub struct ViewArgs {
    /// Column layout, overriding `viewer.layout` from the config file
    #[arg(long, value_enum)]
    pub layout: Option<ColumnLayout>,
}

/// Connection state the event loop needs to run a fetch.
struct Session<'a, C> {
    runtime: &'a Runtime,
    client: &'a C,
    env: &'a JiraEnv,
}

/// Runs the TUI application.
pub fn run(args: &ViewArgs) -> Result<()> {
    let env = JiraEnv::load()?;
    let config = load_config()?;
    let runtime = Runtime::new()?;
    let client = runtime.block_on(env.connect())?;

    let session = Session {
        runtime: &runtime,
        client: &client,
        env: &env,
    };
    let mut app = App::new(&config.viewer, args.layout);

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app, &session);
    ratatui::restore();
    result?;

    if app.screen == Screen::Cancelled {
        info!("Viewer cancelled");
        println!("Application cancelled.");
    }
    Ok(())
}

/// Main application loop.
fn run_app(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    session: &Session<'_, impl IssueSearch>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if app.should_quit {
            break;
        }

        let Some(AppEvent::Key(key)) = event::next(POLL_INTERVAL)? else {
            continue;
        };
        if let Some(action) = handle_key_event(app, key, &Local::now()) {
            perform(app, action, session);
        }
    }

    Ok(())
}

/// Handles key events.
///
/// While results are shown, letters are commands; otherwise they edit the date field.
fn handle_key_event<Tz: TimeZone>(
    app: &mut App,
    key: KeyEvent,
    now: &DateTime<Tz>,
) -> Option<AppAction> {
    app.status = None;

    let action = date_action(key);
    if action == DateAction::Cancel {
        return app.resolve(action, now);
    }

    if app.has_results() {
        match key.code {
            KeyCode::Char('r') => app.reset(),
            KeyCode::Char('j') | KeyCode::Down => app.select_next(),
            KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
            KeyCode::Char('o') | KeyCode::Enter => {
                return app
                    .selected_link()
                    .map(|link| AppAction::OpenLink(link.to_string()));
            }
            _ => {}
        }
        return None;
    }

    match key.code {
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.push_char(c),
        _ => {}
    }
    app.resolve(action, now)
}

/// Maps a key to the date form control it triggers.
fn date_action(key: KeyEvent) -> DateAction {
    if key.is_ctrl_c() || key.code == KeyCode::Esc {
        DateAction::Cancel
    } else if key.code == KeyCode::Enter {
        DateAction::Submit
    } else {
        DateAction::None
    }
}

/// Carries out an action. The fetch blocks the UI until it completes.
fn perform(app: &mut App, action: AppAction, session: &Session<'_, impl IssueSearch>) {
    match action {
        AppAction::Fetch(date) => {
            let query = IssueQuery::new(date).with_project(session.env.project_key.clone());
            let report = session.runtime.block_on(load_report(
                session.client,
                &session.env.server,
                Some(&query),
                app.layout,
                &Local,
            ));
            app.show_report(report);
        }
        AppAction::OpenLink(url) => {
            if let Err(e) = open::that(&url) {
                warn!(url = %url, error = %e, "Failed to open link");
                app.status = Some(format!("Failed to open {url}: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::app::tests::report_with;
    use super::*;
    use crate::commands::issues::fetch::testing::FakeSearch;
    use crate::commands::issues::report::IssueReport;
    use crate::commands::issues::table::TableView;
    use crate::infra::jira::{JiraError, RawIssue};
    use crate::shared::config::ViewerConfig;
    use chrono::{NaiveDate, Utc};
    use rstest::rstest;

    fn app() -> App {
        App::new(&ViewerConfig::default(), None)
    }

    fn app_with_results(keys: &[&str]) -> App {
        let mut app = app();
        app.show_report(report_with(keys));
        app
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 14, 12, 0, 0).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key_event(app, key(KeyCode::Char(c)), &now());
        }
    }

    fn env(project_key: Option<&str>) -> JiraEnv {
        JiraEnv {
            server: "https://jira".to_string(),
            username: "jane".to_string(),
            api_token: "secret".to_string(),
            project_key: project_key.map(str::to_string),
        }
    }

    #[rstest]
    #[case::esc(key(KeyCode::Esc), DateAction::Cancel)]
    #[case::ctrl_c(KeyEvent::ctrl('c'), DateAction::Cancel)]
    #[case::enter(key(KeyCode::Enter), DateAction::Submit)]
    #[case::letter(key(KeyCode::Char('a')), DateAction::None)]
    #[case::backspace(key(KeyCode::Backspace), DateAction::None)]
    fn test_date_action(#[case] event: KeyEvent, #[case] expected: DateAction) {
        assert_eq!(date_action(event), expected);
    }

    #[test]
    fn test_typing_edits_date_field() {
        let mut app = app();

        type_text(&mut app, "01/02/20244");
        handle_key_event(&mut app, key(KeyCode::Backspace), &now());

        assert_eq!(app.input, "01/02/2024");
    }

    #[test]
    fn test_enter_submits_date() {
        let mut app = app();
        type_text(&mut app, "01/02/2024");

        let action = handle_key_event(&mut app, key(KeyCode::Enter), &now());

        assert_eq!(
            action,
            Some(AppAction::Fetch(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()))
        );
    }

    #[test]
    fn test_enter_with_invalid_date_shows_error() {
        let mut app = app();
        type_text(&mut app, "1/2/2024");

        let action = handle_key_event(&mut app, key(KeyCode::Enter), &now());

        assert_eq!(action, None);
        assert!(matches!(app.screen, Screen::Idle { error: Some(_) }));
    }

    #[test]
    fn test_esc_cancels() {
        let mut app = app();

        handle_key_event(&mut app, key(KeyCode::Esc), &now());

        assert_eq!(app.screen, Screen::Cancelled);
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_cancels_with_results() {
        let mut app = app_with_results(&["A-1"]);

        handle_key_event(&mut app, KeyEvent::ctrl('c'), &now());

        assert_eq!(app.screen, Screen::Cancelled);
    }

    #[test]
    fn test_ctrl_chars_do_not_edit_input() {
        let mut app = app();

        handle_key_event(&mut app, KeyEvent::ctrl('u'), &now());

        assert!(app.input.is_empty());
    }

    #[test]
    fn test_navigation_with_results() {
        let mut app = app_with_results(&["A-1", "A-2", "A-3"]);

        handle_key_event(&mut app, key(KeyCode::Char('j')), &now());
        handle_key_event(&mut app, key(KeyCode::Down), &now());
        assert_eq!(app.table_state.selected(), Some(2));

        handle_key_event(&mut app, key(KeyCode::Char('k')), &now());
        assert_eq!(app.table_state.selected(), Some(1));

        handle_key_event(&mut app, key(KeyCode::Up), &now());
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_letters_do_not_edit_input_with_results() {
        let mut app = app_with_results(&["A-1"]);

        handle_key_event(&mut app, key(KeyCode::Char('j')), &now());

        assert!(app.input.is_empty());
    }

    #[test]
    fn test_open_selected_link() {
        let mut app = app_with_results(&["A-1", "A-2"]);
        handle_key_event(&mut app, key(KeyCode::Char('j')), &now());

        let action = handle_key_event(&mut app, key(KeyCode::Char('o')), &now());

        assert_eq!(
            action,
            Some(AppAction::OpenLink("https://jira/browse/A-2".to_string()))
        );
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut app = app_with_results(&["A-1"]);

        handle_key_event(&mut app, key(KeyCode::Char('r')), &now());

        assert_eq!(app.screen, Screen::Idle { error: None });
    }

    #[test]
    fn test_perform_fetch_shows_report() {
        let runtime = Runtime::new().unwrap();
        let search = FakeSearch::returning(vec![RawIssue {
            key: "A-1".to_string(),
            fields: None,
        }]);
        let env = env(Some("INFRA"));
        let session = Session {
            runtime: &runtime,
            client: &search,
            env: &env,
        };
        let mut app = app();

        perform(
            &mut app,
            AppAction::Fetch(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
            &session,
        );

        let Screen::Results(report) = &app.screen else {
            unreachable!("fetch must show results");
        };
        // The only issue has no fields, so it is dropped with a warning.
        assert_eq!(report.view(), Some(&TableView::NoIssues));
        assert_eq!(report.warnings().len(), 1);
        let queries = search.queries.lock().unwrap();
        assert!(queries[0].starts_with(r#"project = "INFRA" AND"#), "{}", queries[0]);
    }

    #[test]
    fn test_perform_fetch_failure_is_warning() {
        let runtime = Runtime::new().unwrap();
        let search = FakeSearch::failing(JiraError::Unauthorized);
        let env = env(None);
        let session = Session {
            runtime: &runtime,
            client: &search,
            env: &env,
        };
        let mut app = app();

        perform(
            &mut app,
            AppAction::Fetch(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
            &session,
        );

        assert!(matches!(app.screen, Screen::Results(IssueReport::FetchFailed(_))));
    }
}
