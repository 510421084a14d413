use std::collections::HashMap;
use std::fmt::Display;
use std::time::{Duration, Instant};

use tabled::{Table, Tabled};

use crate::moves::Move;
use crate::position::Position;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Tabled)]
pub struct PerftDepthResult {
    pub tot: u64,
    pub captures: u64,
    pub en_passants: u64,
    pub castles: u64,
    pub checks: u64,
    pub checkmates: u64,
    pub stalemates: u64,
}

pub struct PerftResult {
    pub depth_results: Vec<PerftDepthResult>,
    pub tot_nodes: u64,
    pub time_elapsed: Duration,
    pub nodes_per_second: f64,
}

impl Display for PerftResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "total nodes: {}", self.tot_nodes)?;
        writeln!(f, "time elapsed: {}", self.time_elapsed.as_secs_f32())?;
        writeln!(f, "nodes/s: {}", self.nodes_per_second)?;
        writeln!(f, "{}", Table::new(&self.depth_results))?;
        Ok(())
    }
}

/// Counts the leaf nodes `depth` plies below `position`, split by root move.
///
/// Only moves that pass [`crate::Player::try_move`] are followed.
pub fn perft(position: &Position, depth: usize) -> (HashMap<Move, usize>, usize) {
    if depth == 0 {
        return (HashMap::new(), 1);
    }

    let move_counts: HashMap<Move, usize> = position
        .current_player()
        .valid_transitions()
        .into_iter()
        .map(|transition| {
            let count = perft_count(transition.position(), depth - 1);
            (transition.mve(), count)
        })
        .collect();

    let tot = move_counts.values().sum();
    (move_counts, tot)
}

fn perft_count(position: &Position, depth: usize) -> usize {
    if depth == 0 {
        return 1;
    }

    let transitions = position.current_player().valid_transitions();
    if depth == 1 {
        return transitions.len();
    }

    transitions
        .iter()
        .map(|transition| perft_count(transition.position(), depth - 1))
        .sum()
}

/// Walks every line up to `depth` plies and tallies, per ply, what kind of moves were played and
/// which positions they reached.
pub fn perft_full(position: &Position, depth: usize) -> PerftResult {
    let mut depth_results = vec![PerftDepthResult::default(); depth];

    let start = Instant::now();

    perft_full_helper(&mut depth_results, position, 0);

    let time_elapsed = start.elapsed();

    let tot_nodes = depth_results.iter().fold(0, |tot, curr| tot + curr.tot);

    let nodes_per_second = tot_nodes as f64 / time_elapsed.as_secs_f64();

    PerftResult {
        depth_results,
        tot_nodes,
        time_elapsed,
        nodes_per_second,
    }
}

fn perft_full_helper(
    depth_results: &mut Vec<PerftDepthResult>,
    position: &Position,
    curr_depth: usize,
) {
    if curr_depth == depth_results.len() {
        return;
    }

    for transition in position.current_player().valid_transitions() {
        let mve = transition.mve();
        let next = transition.position();
        let next_player = next.current_player();

        let curr_res = &mut depth_results[curr_depth];
        curr_res.tot += 1;
        curr_res.captures += u64::from(mve.is_attack());
        curr_res.en_passants += u64::from(mve.is_en_passant());
        curr_res.castles += u64::from(mve.is_castle());

        if next_player.is_in_check() {
            curr_res.checks += 1;
            curr_res.checkmates += u64::from(next_player.is_in_checkmate());
        } else {
            curr_res.stalemates += u64::from(next_player.is_in_stalemate());
        }

        perft_full_helper(depth_results, next, curr_depth + 1);
    }
}
