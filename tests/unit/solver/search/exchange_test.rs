use super::*;
use crate::helpers::models::*;
use crate::helpers::solver::*;
use crate::models::common::{Skills, TimeWindow};

fn cross_points() -> Vec<(i64, i64)> {
    vec![(0, 0), (10, 0), (0, 10), (20, 0), (0, 20)]
}

fn cross_input() -> Input {
    let jobs = vec![test_job(1), test_job(2), test_job(3), test_job(4)];
    test_input(jobs, vec![test_vehicle(10), test_vehicle(10)], &cross_points())
}

#[test]
fn can_compute_exact_gain_for_every_rank_pair() {
    let input = cross_input();
    let (sol, state) = build_state(&input, vec![vec![0, 1], vec![2, 3]]);
    let before = recompute_solution_cost(&input, &sol);

    for s_rank in 0..sol[0].route.len() {
        for t_rank in 0..sol[1].route.len() {
            let op = Exchange::new(&input, &state, &sol, 0, s_rank, 1, t_rank);
            assert!(op.is_valid(&input, &state, &sol));

            let mut changed = sol.clone();
            op.apply(&input, &mut changed);

            assert_eq!(op.gain(), before - recompute_solution_cost(&input, &changed));
        }
    }
}

#[test]
fn can_swap_jobs_between_routes() {
    let input = cross_input();
    let (sol, state) = build_state(&input, vec![vec![0, 1], vec![2, 3]]);

    let op = Exchange::new(&input, &state, &sol, 0, 1, 1, 0);
    assert_eq!(op.gain(), 22);

    let mut changed = sol;
    op.apply(&input, &mut changed);

    assert_eq!(changed[0].route, vec![0, 2]);
    assert_eq!(changed[1].route, vec![1, 3]);
    assert_eq!(op.addition_candidates(), vec![0, 1]);
}

#[test]
fn can_undo_a_swap_with_its_own_inverse() {
    let input = cross_input();
    let (sol, state) = build_state(&input, vec![vec![0, 1], vec![2, 3]]);
    let before = recompute_solution_cost(&input, &sol);

    let op = Exchange::new(&input, &state, &sol, 0, 1, 1, 0);
    let mut changed = sol.clone();
    op.apply(&input, &mut changed);

    let mut inverse_state = SolutionState::new(&input);
    inverse_state.setup(&input, &changed);
    let inverse = Exchange::new(&input, &inverse_state, &changed, 0, 1, 1, 0);
    assert_eq!(inverse.gain(), -op.gain());

    inverse.apply(&input, &mut changed);
    assert_eq!(recompute_solution_cost(&input, &changed), before);
    assert_eq!(changed[0].route, sol[0].route);
    assert_eq!(changed[1].route, sol[1].route);
}

#[test]
fn can_reject_capacity_violation() {
    let jobs = vec![test_job(1), test_job(2), test_job_with_amount(3, &[9]), test_job(4)];
    let input = test_input(jobs, vec![test_vehicle(2), test_vehicle(10)], &cross_points());
    let (sol, state) = build_state(&input, vec![vec![0, 1], vec![2, 3]]);

    let op = Exchange::new(&input, &state, &sol, 0, 1, 1, 0);

    assert!(!op.is_valid(&input, &state, &sol));
}

#[test]
fn can_reject_skill_mismatch() {
    let jobs = vec![test_job(1), test_job(2), test_job(3).with_skills(Skills::from_iter([5])), test_job(4)];
    let vehicles = vec![test_vehicle(10), test_vehicle(10).with_skills(Skills::from_iter([5]))];
    let input = test_input(jobs, vehicles, &cross_points());
    let (sol, state) = build_state(&input, vec![vec![0, 1], vec![2, 3]]);

    let op = Exchange::new(&input, &state, &sol, 0, 1, 1, 0);

    assert!(!op.is_valid(&input, &state, &sol));
}

#[test]
fn can_reject_time_window_violation() {
    let jobs = vec![test_job(1), test_job(2), test_job_with_tw(3, 100, 110), test_job(4)];
    let vehicles = vec![
        test_vehicle(10).with_time_window(TimeWindow::new(0, 50)),
        test_vehicle(10).with_time_window(TimeWindow::new(0, 1000)),
    ];
    let input = test_input(jobs, vehicles, &cross_points());
    let (sol, state) = build_state(&input, vec![vec![0, 1], vec![2, 3]]);

    let op = Exchange::new(&input, &state, &sol, 0, 1, 1, 0);

    assert!(!op.is_valid(&input, &state, &sol));
}
