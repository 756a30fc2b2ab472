use super::*;
use crate::helpers::models::*;
use crate::helpers::solver::*;

fn pair_points() -> Vec<(i64, i64)> {
    vec![(0, 0), (10, 0), (20, 0), (10, 6), (20, 6), (30, 0), (30, 6)]
}

fn pair_input() -> Input {
    let jobs = (1..=6).map(test_job).collect();
    test_input(jobs, vec![test_vehicle(10), test_vehicle(10)], &pair_points())
}

#[test]
fn can_compute_exact_gain_for_every_rank_pair() {
    let input = pair_input();
    let (sol, state) = build_state(&input, vec![vec![0, 1, 4], vec![2, 3, 5]]);
    let before = recompute_solution_cost(&input, &sol);

    for s_rank in 0..sol[0].route.len() - 1 {
        for t_rank in 0..sol[1].route.len() - 1 {
            let op = CrossExchange::new(&input, &state, &sol, 0, s_rank, 1, t_rank);
            assert!(op.is_valid(&input, &state, &sol));

            let mut changed = sol.clone();
            op.apply(&input, &mut changed);

            assert_eq!(op.gain(), before - recompute_solution_cost(&input, &changed));
        }
    }
}

#[test]
fn can_swap_pairs_between_routes() {
    let input = pair_input();
    let (sol, state) = build_state(&input, vec![vec![2, 3, 4], vec![0, 1, 5]]);

    // Pairs visit each other's corridor, swapping them uncrosses both routes.
    let op = CrossExchange::new(&input, &state, &sol, 0, 0, 1, 0);
    assert!(op.is_valid(&input, &state, &sol));
    assert!(op.gain() > 0);

    let mut changed = sol.clone();
    op.apply(&input, &mut changed);

    assert_eq!(changed[0].route, vec![0, 1, 4]);
    assert_eq!(changed[1].route, vec![2, 3, 5]);
    assert_eq!(op.addition_candidates(), vec![0, 1]);
}

#[test]
fn can_reject_capacity_violation() {
    let mut jobs: Vec<_> = (1..=6).map(test_job).collect();
    jobs[2] = test_job_with_amount(3, &[5]);
    let input = test_input(jobs, vec![test_vehicle(10), test_vehicle(4)], &pair_points());
    let (sol, state) = build_state(&input, vec![vec![2, 3, 4], vec![0, 1, 5]]);

    let op = CrossExchange::new(&input, &state, &sol, 0, 0, 1, 0);

    assert!(!op.is_valid(&input, &state, &sol));
}
