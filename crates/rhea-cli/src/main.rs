//! Demo driver: the RHEA planner plays the pebble game against greedy
//! scripted opponents.

use anyhow::ensure;
use clap::Parser;
use rand::Rng as _;
use rhea_game::{ForwardModel as _, PebbleGame};
use rhea_planner::{PlannerConfig, PlannerSeed, RheaAgent};

#[derive(Debug, Clone, Parser)]
#[command(name = "rhea", about = "RHEA planner demo on the pebble game")]
struct Args {
    /// Planner seed as 32 hex characters; random when omitted.
    #[arg(long)]
    seed: Option<PlannerSeed>,
    /// Number of players (the planner is player 0).
    #[arg(long, default_value_t = 3)]
    players: usize,
    /// Pebbles in the starting pool.
    #[arg(long, default_value_t = 30)]
    pebbles: usize,
    /// Individuals per generation.
    #[arg(long, default_value_t = 20)]
    population: usize,
    /// Plan length in future steps.
    #[arg(long, default_value_t = 5)]
    horizon: usize,
    /// Generations per decision.
    #[arg(long, default_value_t = 15)]
    generations: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    ensure!(args.players >= 2, "need at least two players for a match");

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("seed: {seed}");

    let config = PlannerConfig::new(args.population, args.horizon, args.generations, 0.2)?;
    let mut agent = RheaAgent::with_seed(config, seed);

    let game = PebbleGame::new(args.players);
    let mut state = game.initial_state(args.pebbles);
    agent.initialize(&game, &state);

    while !game.is_terminal(&state) {
        let actor = game.current_player(&state);
        let legal = game.legal_actions(&state);
        if actor == agent.player() {
            let Some(position) = agent.select_action(&game, &state) else {
                break;
            };
            let action = legal[position];
            eprintln!(
                "planner takes {} (pool {} -> {})",
                action + 1,
                state.pool(),
                state.pool() - (action + 1)
            );
            game.advance(&mut state, action)?;
        } else {
            // Greedy opponent: always takes the most pebbles on offer.
            let action = *legal.last().expect("non-terminal state offers actions");
            eprintln!("player {actor} takes {} (greedy)", action + 1);
            game.advance(&mut state, action)?;
            agent.observe_opponent_action(actor, action, &legal);
        }
    }

    println!("final scores:");
    for player in 0..args.players {
        let tag = if player == agent.player() {
            " (planner)"
        } else {
            ""
        };
        println!("  player {player}: {:>5.1}{tag}", game.score(&state, player));
    }
    eprintln!(
        "rollouts: {} (avg {:?})",
        agent.evaluation_count(),
        agent.average_evaluation_time()
    );
    Ok(())
}
