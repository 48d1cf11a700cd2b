//=========================================================================
// Beam Goal Demo
//
// Two goals on a simulated board, calibrated, polled on a background
// thread and scored for two players. Set RUST_LOG=debug to watch the
// goals and the rig at work.
//
//=========================================================================

use std::error::Error;
use std::thread;
use std::time::Duration;

use beam_goal::prelude::*;
use log::info;

//=== Wiring ==============================================================

const LEFT_EMITTER: PinId = PinId(8);
const LEFT_SENSOR: PinId = PinId(0);
const RIGHT_EMITTER: PinId = PinId(9);
const RIGHT_SENSOR: PinId = PinId(1);

const SHOTS: [(PinId, u64); 5] = [
    (LEFT_SENSOR, 40),
    (RIGHT_SENSOR, 25),
    (LEFT_SENSOR, 60),
    (LEFT_SENSOR, 5),
    (RIGHT_SENSOR, 80),
];

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    //--- 1. Board and goals ----------------------------------------------
    let board = SimulatedBoard::new();
    board.couple_beam(LEFT_SENSOR, Beam { emitter: LEFT_EMITTER, lit: 870, dark: 140 });
    board.couple_beam(RIGHT_SENSOR, Beam { emitter: RIGHT_EMITTER, lit: 910, dark: 95 });

    let mut left = Goal::new(board.clone(), board.clone(), LEFT_EMITTER, LEFT_SENSOR, 0)
        .with_label("left");
    let mut right = Goal::new(board.clone(), board.clone(), RIGHT_EMITTER, RIGHT_SENSOR, 0)
        .with_label("right");

    left.calibrate(8)?;
    right.calibrate(8)?;

    //--- 2. Players -------------------------------------------------------
    let mut scores = Scoreboard::new(1);
    let alice = scores.add_player(Player::with_name("Alice"));
    let bob = scores.add_player(Player::with_name("Bob"));
    scores.bind(GoalId(0), alice);
    scores.bind(GoalId(1), bob);

    //--- 3. Poll thread ---------------------------------------------------
    let handle = RigBuilder::new()
        .with_tps(500.0)
        .with_debounce(2)
        .with_trigger(TriggerMode::Edge)
        .add_goal(left)
        .add_goal(right)
        .build()
        .spawn();

    handle.activate(GoalId(0))?;
    handle.activate(GoalId(1))?;

    //--- 4. Simulated shots -----------------------------------------------
    for (sensor, hold_ms) in SHOTS {
        board.set_blocked(sensor, true);
        thread::sleep(Duration::from_millis(hold_ms));
        board.set_blocked(sensor, false);
        thread::sleep(Duration::from_millis(20));

        for event in handle.events().try_iter() {
            scores.record(&event);
        }
    }

    //--- 5. Results -------------------------------------------------------
    if let Some(leader) = scores.leader() {
        scores.award_round(leader);
    }

    let rig = handle.shutdown()?;
    info!("Polled {} ticks", rig.tick());

    scores.dump(&mut LogSink::new());
    scores.dump(&mut WriterSink::new(std::io::stdout()));

    Ok(())
}
