use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use hyperpix::app::{App, AppState};
use hyperpix::catalog::ImageRecord;
use hyperpix::config::Config;
use hyperpix::game::Game;
use hyperpix::provision::FixedProvisioner;
use hyperpix::runtime::{FixedTicker, GameEvent, Runner, TestEventSource};

fn images() -> Vec<ImageRecord> {
    (1..=10)
        .map(|id| ImageRecord {
            id,
            url: format!("https://images.example/{id}.jpeg"),
            answer: format!("picture {id}"),
            difficulty: 2,
        })
        .collect()
}

fn key(code: KeyCode) -> GameEvent {
    GameEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn send_text(tx: &mpsc::Sender<GameEvent>, text: &str) {
    for c in text.chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
}

fn dispatch(app: &mut App, event: GameEvent) {
    match event {
        GameEvent::Key(key) => app.on_key(key),
        GameEvent::Paste(text) => app.on_paste(&text),
        GameEvent::Resize => {}
        GameEvent::Tick => app.on_tick(Instant::now()),
    }
}

// Headless integration using the runtime + App without a TTY.
// Verifies that a whole session completes via Runner/TestEventSource.
#[test]
fn headless_perfect_session_reaches_end_screen() {
    let game = Game::with_hint_seed(Box::new(FixedProvisioner::new(images())), 5);
    let mut app = App::new(game, Config::default());

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    tx.send(key(KeyCode::Enter)).unwrap();
    for id in 1..=10 {
        send_text(&tx, &format!("Picture {id}"));
        tx.send(key(KeyCode::Enter)).unwrap();
        // dismiss the level summary
        tx.send(key(KeyCode::Enter)).unwrap();
    }

    for _ in 0..1000u32 {
        let event = runner.step();
        dispatch(&mut app, event);
        if app.state == AppState::End {
            break;
        }
    }

    assert_eq!(app.state, AppState::End);
    let state = app.game.state();
    assert_eq!(state.score, 50);
    assert!(state.is_complete);
    assert!(!state.is_active);
    assert_eq!(state.level_results.len(), 10);
    assert!(state.level_results.iter().all(|r| r.correct && r.guess_number == 1));
}

#[test]
fn headless_paste_and_auto_continue() {
    let game = Game::with_hint_seed(Box::new(FixedProvisioner::new(images())), 5);
    let config = Config {
        auto_continue_ms: Some(10),
        ..Config::default()
    };
    let mut app = App::new(game, config);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(GameEvent::Paste("picture 1".to_string())).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();

    // no acknowledgement key is sent; ticks move the session on
    for _ in 0..200u32 {
        let event = runner.step();
        dispatch(&mut app, event);
        if app.game.state().current_level == 2 {
            break;
        }
    }

    let state = app.game.state();
    assert_eq!(state.current_level, 2);
    assert_eq!(state.score, 5);
    assert!(!state.is_level_resolved());
}

#[test]
fn headless_quit_with_ctrl_c() {
    let game = Game::new(Box::new(FixedProvisioner::new(images())));
    let mut app = App::new(game, Config::default());

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), FixedTicker::default());
    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(GameEvent::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    )))
    .unwrap();

    while !app.should_quit {
        let event = runner.step();
        dispatch(&mut app, event);
    }

    assert_eq!(app.state, AppState::Playing);
}
