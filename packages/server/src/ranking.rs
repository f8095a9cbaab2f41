use std::cmp::Ordering;

use crate::entity::{contest, submission};

/// How submissions are ordered for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankingMode {
    /// Votes decide; earlier submissions win ties.
    PublicVote,
    /// Admin scores dominate; unscored entries sort last, votes break ties.
    JuryScore,
}

impl RankingMode {
    pub fn for_contest(contest: &contest::Model) -> Self {
        if contest.jury_mode {
            RankingMode::JuryScore
        } else {
            RankingMode::PublicVote
        }
    }
}

/// Sort submissions into display order. Pure; recomputed on every read.
///
/// Both modes end in `created_at` ascending then `id` ascending, which makes
/// the order total and stable even for submissions with identical timestamps.
/// Zero votes and a missing score are ordinary values, not errors: such an
/// entry simply sorts last.
pub fn rank(mode: RankingMode, submissions: &mut [submission::Model]) {
    match mode {
        RankingMode::PublicVote => submissions.sort_by(engagement_order),
        RankingMode::JuryScore => submissions.sort_by(|a, b| {
            score_desc_none_last(a.admin_score, b.admin_score).then_with(|| engagement_order(a, b))
        }),
    }
}

/// Winners of a contest, ordered by winner rank ascending.
pub fn winners(submissions: &[submission::Model]) -> Vec<submission::Model> {
    let mut out: Vec<submission::Model> = submissions
        .iter()
        .filter(|s| s.winner_rank.is_some())
        .cloned()
        .collect();
    out.sort_by_key(|s| s.winner_rank);
    out
}

fn engagement_order(a: &submission::Model, b: &submission::Model) -> Ordering {
    b.votes
        .cmp(&a.votes)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

fn score_desc_none_last(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
