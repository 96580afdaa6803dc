//! Pairing engine: seed a pool by rating and split it into matches for one round.

use crate::models::{Competitor, Pairing};

/// Form one round's pairings from the competitors advancing into it.
///
/// 1. Sort by rating, highest first. The sort is stable, so equal ratings keep input order.
/// 2. If the pool is odd, the last (lowest-rated) competitor gets a bye and auto-advances.
/// 3. The rest are paired in sorted order: 1st vs 2nd, 3rd vs 4th, ...
///
/// Matches come out in seeding order with the bye (if any) last. A pool of one is a
/// champion, which the caller handles; this function would return a lone bye for it.
pub fn form_pairings(pool: &[Competitor]) -> Vec<Pairing> {
    let mut sorted = pool.to_vec();
    sorted.sort_by(|a, b| b.rating.cmp(&a.rating));

    let bye = if sorted.len() % 2 == 1 {
        sorted.pop()
    } else {
        None
    };

    let mut pairings: Vec<Pairing> = sorted
        .chunks_exact(2)
        .map(|pair| Pairing::new(pair[0].clone(), pair[1].clone()))
        .collect();

    if let Some(competitor) = bye {
        log::debug!("{} receives a bye", competitor.name);
        pairings.push(Pairing::bye(competitor));
    }

    log::debug!("Formed {} pairing(s) from {} competitor(s)", pairings.len(), pool.len());
    pairings
}
