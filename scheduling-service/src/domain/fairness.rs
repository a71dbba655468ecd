use chrono::NaiveDate;
use uuid::Uuid;

/// Ranking weights and penalty scale, policy not code — the operator-tunable
/// knobs of the ranking formula (`fairness.weights`, `fairness.scale` in
/// configuration).
#[derive(Debug, Clone)]
pub struct FairnessConfig {
    pub individual_weight: f64,
    pub system_weight: f64,
    pub under_load_weight: f64,
    pub scale: f64,
}

impl Default for FairnessConfig {
    fn default() -> Self {
        Self {
            individual_weight: 0.60,
            system_weight: 0.25,
            under_load_weight: 0.15,
            scale: 1.0,
        }
    }
}

/// One candidate's load inputs for a single pending window.
#[derive(Debug, Clone)]
pub struct CandidateLoad {
    pub employee_id: Uuid,
    pub fte: f64,
    /// Weighted-day count from persisted history over the rolling window.
    pub history_weighted_days: f64,
    /// Weighted-day count already accrued from earlier picks *this run*.
    pub run_tentative_days: f64,
    pub hire_date: NaiveDate,
}

/// One candidate's computed scores for a specific pending window, used both
/// to pick the winner and to populate the `metrics.per_employee` response.
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub employee_id: Uuid,
    pub projected_load: f64,
    pub individual_score: f64,
    pub system_score_if_selected: f64,
    pub under_load_bonus: f64,
    pub rank: f64,
}

/// Scores and ranks candidates for one window so as to minimise
/// system-wide inequality, given historical load plus the current run's
/// tentative assignments.
pub struct FairnessCalculator<'a> {
    config: &'a FairnessConfig,
}

impl<'a> FairnessCalculator<'a> {
    pub fn new(config: &'a FairnessConfig) -> Self {
        Self { config }
    }

    fn expected_load(&self, candidate: &CandidateLoad, total_assigned_days: f64, team_fte_total: f64) -> f64 {
        if team_fte_total <= 0.0 {
            0.0
        } else {
            total_assigned_days * candidate.fte / team_fte_total
        }
    }

    fn deviation_ratio(projected: f64, expected: f64) -> f64 {
        (projected - expected) / expected.max(1.0)
    }

    fn individual_score(r: f64) -> f64 {
        let penalty = if r >= 0.0 {
            (r.powf(1.5) * 75.0).min(100.0)
        } else {
            (r.abs() * 60.0).min(100.0)
        };
        100.0 - penalty
    }

    fn system_score(loads: &[f64], scale: f64) -> f64 {
        if loads.is_empty() {
            return 100.0;
        }
        let mean = loads.iter().sum::<f64>() / loads.len() as f64;
        let variance = loads.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / loads.len() as f64;
        let stddev = variance.sqrt();
        100.0 - (stddev * scale)
    }

    /// Rank every candidate for a window carrying `pending_weight` days of
    /// load (the shift type's `fairness_weight`). Returns candidates sorted
    /// best-first; the caller selects `ranked[0]` and applies the tie-break
    /// order (earlier hire date, lower current-run assigned days, lower
    /// employee id) only among candidates whose `rank` is exactly equal.
    ///
    /// `candidates` is whatever the caller passes: for window selection
    /// that's the Constraint Checker's eligible subset for this window, not
    /// the whole team, so `expected(e)` is computed against the team's
    /// eligible-for-this-window share rather than its full roster. An
    /// employee the Constraint Checker has already ruled out (on leave,
    /// mutex-blocked) contributes no `fte` to that denominator, which
    /// matches §4.4's intent that expected load only accounts for who could
    /// actually take the window. `Orchestrator::compute_metrics` instead
    /// passes the full employee roster, since `metrics.per_employee` is a
    /// whole-run summary, not a per-window decision.
    pub fn rank(&self, candidates: &[CandidateLoad], pending_weight: f64) -> Vec<RankedCandidate> {
        let team_fte_total: f64 = candidates.iter().map(|c| c.fte).sum();
        let total_assigned_days: f64 = candidates
            .iter()
            .map(|c| c.history_weighted_days + c.run_tentative_days)
            .sum::<f64>()
            + pending_weight;

        let base_loads: Vec<f64> = candidates
            .iter()
            .map(|c| c.history_weighted_days + c.run_tentative_days)
            .collect();

        let mut ranked: Vec<RankedCandidate> = candidates
            .iter()
            .enumerate()
            .map(|(idx, candidate)| {
                let projected_load = base_loads[idx] + pending_weight;
                let expected = self.expected_load(candidate, total_assigned_days, team_fte_total);
                let r = Self::deviation_ratio(projected_load, expected);
                let individual_score = Self::individual_score(r);

                let loads_if_selected: Vec<f64> = base_loads
                    .iter()
                    .enumerate()
                    .map(|(j, base)| if j == idx { projected_load } else { *base })
                    .collect();
                let system_score_if_selected = Self::system_score(&loads_if_selected, self.config.scale);

                let under_load_bonus =
                    (100.0 * (expected - projected_load) / expected.max(1.0)).max(0.0);

                let rank = self.config.individual_weight * individual_score
                    + self.config.system_weight * system_score_if_selected
                    + self.config.under_load_weight * under_load_bonus;

                RankedCandidate {
                    employee_id: candidate.employee_id,
                    projected_load,
                    individual_score,
                    system_score_if_selected,
                    under_load_bonus,
                    rank,
                }
            })
            .collect();

        // Stable primary sort by rank descending; tie-break is resolved by
        // the caller (it needs hire_date / run_tentative_days context this
        // struct doesn't carry), but we pre-sort by employee id so ties that
        // reach the caller are already in a deterministic order.
        ranked.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        ranked.sort_by(|a, b| b.rank.partial_cmp(&a.rank).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }

    /// Select the winning candidate applying the full tie-break chain.
    /// `candidates` must be the same slice passed to `rank` (for hire-date
    /// and run-tentative-days lookups).
    pub fn select(&self, candidates: &[CandidateLoad], pending_weight: f64) -> Option<RankedCandidate> {
        let ranked = self.rank(candidates, pending_weight);
        let best_rank = ranked.first()?.rank;

        let by_id: std::collections::HashMap<Uuid, &CandidateLoad> =
            candidates.iter().map(|c| (c.employee_id, c)).collect();

        ranked
            .into_iter()
            .filter(|r| (r.rank - best_rank).abs() < 1e-9)
            .min_by(|a, b| {
                let ca = by_id[&a.employee_id];
                let cb = by_id[&b.employee_id];
                ca.hire_date
                    .cmp(&cb.hire_date)
                    .then(ca.run_tentative_days.partial_cmp(&cb.run_tentative_days).unwrap_or(std::cmp::Ordering::Equal))
                    .then(a.employee_id.cmp(&b.employee_id))
            })
    }

    /// Overall team fairness after a full run: the system score across all
    /// employees' final projected loads, surfaced as `metrics.system_score`.
    pub fn overall_system_score(&self, final_loads: &[f64]) -> f64 {
        Self::system_score(final_loads, self.config.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: Uuid, history: f64, hire_date: NaiveDate) -> CandidateLoad {
        CandidateLoad {
            employee_id: id,
            fte: 1.0,
            history_weighted_days: history,
            run_tentative_days: 0.0,
            hire_date,
        }
    }

    #[test]
    fn prefers_the_less_loaded_candidate() {
        let config = FairnessConfig::default();
        let calc = FairnessCalculator::new(&config);

        let heavy = Uuid::new_v4();
        let light = Uuid::new_v4();
        let candidates = vec![
            candidate(heavy, 20.0, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
            candidate(light, 5.0, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap()),
        ];

        let winner = calc.select(&candidates, 5.0).unwrap();
        assert_eq!(winner.employee_id, light);
    }

    #[test]
    fn ties_break_on_earlier_hire_date() {
        let config = FairnessConfig::default();
        let calc = FairnessCalculator::new(&config);

        let earlier = Uuid::new_v4();
        let later = Uuid::new_v4();
        let candidates = vec![
            candidate(earlier, 0.0, NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()),
            candidate(later, 0.0, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()),
        ];

        let winner = calc.select(&candidates, 5.0).unwrap();
        assert_eq!(winner.employee_id, earlier);
    }
}
