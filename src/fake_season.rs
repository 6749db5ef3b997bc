use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::snapshot::{Event, Fixture, Snapshot, Team};

const TEAM_CODES: [&str; 20] = [
    "ARS", "AVL", "BHA", "BOU", "BRE", "BUR", "CHE", "CRY", "EVE", "FUL", "LEE", "LIV", "MCI",
    "MUN", "NEW", "NFO", "SUN", "TOT", "WHU", "WOL",
];

#[derive(Debug, Clone, Copy)]
pub struct SeasonConfig {
    // even; every team meets every other home and away
    pub teams: usize,
    pub seed: u64,
    // moved into another week: one blank, one double
    pub moved: usize,
    // left without a week
    pub postponed: usize,
    pub next_week: u32,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            teams: 20,
            seed: 2021,
            moved: 4,
            postponed: 2,
            next_week: 1,
        }
    }
}

pub fn synthetic_season(cfg: &SeasonConfig) -> Snapshot {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let n = cfg.teams.max(2) & !1;

    let teams: Vec<Team> = (0..n)
        .map(|idx| {
            let code = TEAM_CODES
                .get(idx)
                .map(|c| c.to_string())
                .unwrap_or_else(|| format!("T{:02}", idx + 1));
            let base = rng.gen_range(1000.0..1300.0_f64).round();
            Team {
                id: idx as u32 + 1,
                name: code.clone(),
                short_name: code,
                strength_overall_home: base + rng.gen_range(20.0..60.0_f64).round(),
                strength_overall_away: base,
                strength_attack_home: base + rng.gen_range(0.0..80.0_f64).round(),
                strength_attack_away: base + rng.gen_range(-40.0..40.0_f64).round(),
                strength_defence_home: base + rng.gen_range(0.0..60.0_f64).round(),
                strength_defence_away: base + rng.gen_range(-40.0..20.0_f64).round(),
            }
        })
        .collect();

    let rounds = round_robin(n);
    let half = rounds.len() as u32;
    let mut fixtures = Vec::with_capacity(rounds.len() * n);
    for (leg, flip) in [(0u32, false), (1u32, true)] {
        for (round_idx, round) in rounds.iter().enumerate() {
            let week = leg * half + round_idx as u32 + 1;
            for &(a, b) in round {
                let (h, aw) = if flip { (b, a) } else { (a, b) };
                let home = &teams[h];
                let away = &teams[aw];
                fixtures.push(Fixture {
                    id: fixtures.len() as u32 + 1,
                    event: Some(week),
                    team_h: home.id,
                    team_a: away.id,
                    team_h_difficulty: Some(difficulty_class(away.strength_overall_away)),
                    team_a_difficulty: Some(difficulty_class(home.strength_overall_home)),
                });
            }
        }
    }

    let weeks = half * 2;
    if !fixtures.is_empty() && weeks > 1 {
        for _ in 0..cfg.moved {
            let idx = rng.gen_range(0..fixtures.len());
            let from = fixtures[idx].event.unwrap_or(1);
            let mut to = rng.gen_range(1..=weeks);
            if to == from {
                to = to % weeks + 1;
            }
            fixtures[idx].event = Some(to);
        }
        for _ in 0..cfg.postponed {
            let idx = rng.gen_range(0..fixtures.len());
            fixtures[idx].event = None;
        }
    }

    let events = (1..=weeks)
        .map(|id| Event {
            id,
            is_next: id == cfg.next_week,
        })
        .collect();

    Snapshot {
        teams,
        events,
        fixtures,
    }
}

// Circle method: team 0 stays put, the rest rotate one place per round.
fn round_robin(n: usize) -> Vec<Vec<(usize, usize)>> {
    let mut ring: Vec<usize> = (1..n).collect();
    let mut rounds = Vec::with_capacity(n.saturating_sub(1));
    for round in 0..n.saturating_sub(1) {
        let mut order = Vec::with_capacity(n);
        order.push(0);
        order.extend(ring.iter().copied());
        let pairs = (0..n / 2)
            .map(|i| {
                let (a, b) = (order[i], order[n - 1 - i]);
                if (round + i) % 2 == 0 { (a, b) } else { (b, a) }
            })
            .collect();
        rounds.push(pairs);
        ring.rotate_right(1);
    }
    rounds
}

fn difficulty_class(strength: f64) -> f64 {
    match strength {
        s if s >= 1250.0 => 5.0,
        s if s >= 1180.0 => 4.0,
        s if s >= 1100.0 => 3.0,
        _ => 2.0,
    }
}
