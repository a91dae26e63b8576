use std::time::Duration;

use memory_match::{
    Difficulty, Event, InMemoryScoreStore, MemoryGame, RecordingSurface, Session, SessionHandle,
    SurfaceCall, TileState,
};
use rand::{rngs::SmallRng, SeedableRng};

type TestSession = Session<RecordingSurface, InMemoryScoreStore>;

fn mount(difficulty: Difficulty) -> (TestSession, SessionHandle) {
    Session::mount(
        RecordingSurface::new(),
        InMemoryScoreStore::new(),
        SmallRng::seed_from_u64(7),
        difficulty,
    )
    .expect("recording surface is mounted")
}

fn mismatch(game: &MemoryGame) -> [usize; 2] {
    let first = game.tiles()[0].symbol;
    let other = game
        .tiles()
        .iter()
        .position(|t| t.symbol != first)
        .expect("more than one symbol");
    [0, other]
}

#[tokio::test(start_paused = true)]
async fn unmounted_surface_stays_inactive() {
    let mounted = Session::mount(
        RecordingSurface::unmounted(),
        InMemoryScoreStore::new(),
        SmallRng::seed_from_u64(1),
        Difficulty::Easy,
    );
    assert!(mounted.is_none());
}

#[tokio::test(start_paused = true)]
async fn clicks_arrive_through_the_handle() {
    let (mut session, handle) = mount(Difficulty::Easy);
    handle.click(3).unwrap();
    handle.click(3).unwrap();
    assert!(session.drain());
    assert_eq!(session.controller().surface().tiles[3], TileState::FaceUp);
    assert_eq!(session.controller().game().first_selected(), Some(3));
    assert_eq!(session.controller().game().moves(), 0);
}

#[tokio::test(start_paused = true)]
async fn quit_ends_run() {
    let (session, handle) = mount(Difficulty::Hard);
    handle.click(0).unwrap();
    handle.quit().unwrap();
    let snapshot = session.run().await.unwrap();
    assert_eq!(snapshot.difficulty, Difficulty::Hard);
    assert_eq!(snapshot.tiles[0], TileState::FaceUp);
}

#[tokio::test(start_paused = true)]
async fn change_difficulty_resets_everything() {
    let (mut session, handle) = mount(Difficulty::Easy);
    let [a, b] = mismatch(session.controller().game());
    session.controller_mut().select_tile(a);
    session.controller_mut().select_tile(b);
    assert!(session.step().await); // settle
    assert!(session.step().await); // first tick
    assert_eq!(session.controller().elapsed_seconds(), 1);

    handle.change_difficulty(Difficulty::Hard).unwrap();
    assert!(session.drain());

    let controller = session.controller();
    assert_eq!(controller.game().difficulty(), Difficulty::Hard);
    assert_eq!(controller.game().tiles().len(), 24);
    assert_eq!(controller.game().moves(), 0);
    assert_eq!(controller.elapsed_seconds(), 0);
    let surface = controller.surface();
    assert_eq!(surface.tiles.len(), 24);
    assert_eq!(surface.moves, 0);
    assert_eq!(surface.elapsed_seconds, 0);
    assert_eq!(
        surface.count(|c| matches!(c, SurfaceCall::RenderTiles { .. })),
        2
    );
}

#[tokio::test(start_paused = true)]
async fn restart_cancels_pending_settle() {
    let (mut session, handle) = mount(Difficulty::Easy);
    let old_generation = session.controller().generation();
    let [a, b] = mismatch(session.controller().game());
    session.controller_mut().select_tile(a);
    session.controller_mut().select_tile(b);

    handle.restart().unwrap();
    assert!(session.drain());
    assert!(!session.controller().game().is_locked());
    assert_ne!(session.controller().generation(), old_generation);

    // The aborted settle never fires; the next event is the new game's first tick.
    let event = session.next_event().await.unwrap();
    let current = session.controller().generation();
    assert!(matches!(event, Event::Tick { generation } if generation == current));
}

#[tokio::test(start_paused = true)]
async fn stale_events_are_dropped() {
    let (mut session, _handle) = mount(Difficulty::Easy);
    let old_generation = session.controller().generation();
    let [a, b] = mismatch(session.controller().game());
    session.controller_mut().select_tile(a);
    session.controller_mut().select_tile(b);
    session.controller_mut().restart();

    session.controller_mut().select_tile(a);
    assert!(session.dispatch(Event::Settle {
        generation: old_generation,
        pair: [a, b],
    }));
    assert!(session.dispatch(Event::Tick {
        generation: old_generation,
    }));

    assert_eq!(session.controller().surface().tiles[a], TileState::FaceUp);
    assert_eq!(session.controller().game().first_selected(), Some(a));
    assert_eq!(session.controller().elapsed_seconds(), 0);
}

#[tokio::test(start_paused = true)]
async fn timer_restarts_with_each_game() {
    let (mut session, _handle) = mount(Difficulty::Easy);
    for _ in 0..2 {
        assert!(session.step().await);
    }
    session.controller_mut().restart();
    assert_eq!(session.controller().elapsed_seconds(), 0);

    let start = tokio::time::Instant::now();
    assert!(session.step().await);
    assert_eq!(session.controller().elapsed_seconds(), 1);
    assert_eq!(start.elapsed(), Duration::from_secs(1));
}
