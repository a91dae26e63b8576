use std::time::Duration;

use memory_match::{
    Difficulty, InMemoryScoreStore, Player, RecallPlayer, RecordingSurface, ScoreStore, Session,
    Timing,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if !(2..=3).contains(&args.len()) {
        eprintln!("Usage: {} <seed> [easy|hard]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let difficulty: Difficulty = match args.get(2) {
        Some(name) => name.parse()?,
        None => Difficulty::Easy,
    };

    let timing = Timing {
        settle_delay: Duration::from_millis(1),
        ..Timing::default()
    };
    let (mut session, _handle) = Session::mount_with_timing(
        RecordingSurface::new(),
        InMemoryScoreStore::new(),
        SmallRng::seed_from_u64(seed),
        difficulty,
        timing,
    )
    .ok_or_else(|| anyhow::anyhow!("recording surface refused to mount"))?;

    let mut player = RecallPlayer::new();
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
    while !session.controller().game().is_complete() {
        match player.select_tile(&mut rng, session.controller().game()) {
            Some(index) => {
                session.controller_mut().select_tile(index);
                player.observe(session.controller().game());
            }
            None => {
                // Locked on a mismatch: wait for the settle event.
                if !session.step().await {
                    break;
                }
            }
        }
    }

    let controller = session.controller();
    let game = controller.game();
    let result = json!({
        "seed": seed,
        "difficulty": difficulty,
        "moves": game.moves(),
        "matched_pairs": game.matched_pairs(),
        "complete": game.is_complete(),
        "best": controller.store().get(difficulty.key()),
        "completion_shown": controller.surface().completion.is_some(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
