use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

use crate::models::{EntityType, MatchRating};

/// How many players the weighted leaderboard keeps.
pub const TOP_PLAYERS_LIMIT: usize = 4;

/// Average rating of one entity across every submission of a match/team pair.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityAverage {
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub name: String,
    pub photo: Option<String>,
    pub average_rating: Decimal,
    pub rating_count: usize,
    pub mom_votes: u32,
}

impl EntityAverage {
    /// Weighted leaderboard score: `average * 2 + mom votes`.
    pub fn score(&self) -> Decimal {
        self.average_rating * Decimal::TWO + Decimal::from(self.mom_votes)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedPlayer {
    pub player: EntityAverage,
    pub score: Decimal,
}

/// Community view over all ratings of a match/team pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSummary {
    /// One entry per rated entity, in first-seen order.
    pub entities: Vec<EntityAverage>,
    pub mom_player: Option<EntityAverage>,
    pub top_players: Vec<RankedPlayer>,
    pub top_rated_player: Option<EntityAverage>,
}

impl RatingSummary {
    fn players(&self) -> impl Iterator<Item = &EntityAverage> {
        self.entities.iter().filter(|e| e.entity_type.is_player())
    }
}

struct Accumulator<'a> {
    first: &'a MatchRating,
    sum: Decimal,
    count: usize,
    mom_votes: u32,
}

/// Aggregates raw ratings into a [`RatingSummary`].
///
/// Returns `None` when `ratings` is empty so callers never hand out an
/// empty summary. Entities are keyed by type and id; display data comes
/// from the first rating seen for the entity. Every tie (MOM, top rated,
/// leaderboard) resolves to the entity encountered first.
pub fn summarize<'a, I>(ratings: I) -> Option<RatingSummary>
where
    I: IntoIterator<Item = &'a MatchRating>,
{
    let mut order: Vec<(EntityType, i64)> = Vec::new();
    let mut groups: HashMap<(EntityType, i64), Accumulator<'a>> = HashMap::new();

    for rating in ratings {
        let key = (rating.entity_type, rating.entity_id);
        let acc = groups.entry(key).or_insert_with(|| {
            order.push(key);
            Accumulator {
                first: rating,
                sum: Decimal::ZERO,
                count: 0,
                mom_votes: 0,
            }
        });

        acc.sum += rating.rating;
        acc.count += 1;
        if rating.entity_type.is_player() && rating.is_mom {
            acc.mom_votes += 1;
        }
    }

    if order.is_empty() {
        return None;
    }

    let entities: Vec<EntityAverage> = order
        .iter()
        .filter_map(|key| groups.get(key))
        .map(|acc| EntityAverage {
            entity_type: acc.first.entity_type,
            entity_id: acc.first.entity_id,
            name: acc.first.name.clone(),
            photo: acc.first.photo.clone(),
            average_rating: average(acc.sum, acc.count),
            rating_count: acc.count,
            mom_votes: acc.mom_votes,
        })
        .collect();

    let mut summary = RatingSummary {
        entities,
        mom_player: None,
        top_players: Vec::new(),
        top_rated_player: None,
    };

    summary.mom_player = first_max_by(summary.players(), |p| Decimal::from(p.mom_votes))
        .filter(|p| p.mom_votes > 0)
        .cloned();
    summary.top_rated_player = first_max_by(summary.players(), |p| p.average_rating).cloned();
    summary.top_players = rank_players(summary.players());

    Some(summary)
}

fn average(sum: Decimal, count: usize) -> Decimal {
    (sum / Decimal::from(count)).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// First element reaching the maximum key; later equal keys never win.
fn first_max_by<'a, F>(
    items: impl Iterator<Item = &'a EntityAverage>,
    key: F,
) -> Option<&'a EntityAverage>
where
    F: Fn(&EntityAverage) -> Decimal,
{
    let mut best: Option<(&EntityAverage, Decimal)> = None;
    for item in items {
        let value = key(item);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((item, value)),
        }
    }
    best.map(|(item, _)| item)
}

fn rank_players<'a>(players: impl Iterator<Item = &'a EntityAverage>) -> Vec<RankedPlayer> {
    let mut ranked: Vec<(usize, RankedPlayer)> = players
        .enumerate()
        .map(|(index, player)| {
            (
                index,
                RankedPlayer {
                    score: player.score(),
                    player: player.clone(),
                },
            )
        })
        .collect();

    ranked.sort_by(|(ia, a), (ib, b)| b.score.cmp(&a.score).then(ia.cmp(ib)));

    ranked
        .into_iter()
        .take(TOP_PLAYERS_LIMIT)
        .map(|(_, player)| player)
        .collect()
}
