use super::*;
use crate::helpers::models::*;
use crate::helpers::solver::*;
use crate::models::problem::CostMatrix;

fn crossing_input() -> Input {
    let jobs = vec![test_job(1), test_job(2), test_job(3), test_job(4)];
    test_input(jobs, vec![test_vehicle(10), test_vehicle(10)], &[(0, 0), (10, 0), (20, 5), (10, 5), (20, 0)])
}

fn asymmetric_input() -> Input {
    let matrix = CostMatrix::new(
        5,
        vec![0, 3, 5, 7, 9, 4, 0, 6, 8, 2, 5, 7, 0, 1, 3, 8, 6, 2, 0, 4, 9, 1, 3, 5, 0],
    )
    .unwrap();
    let jobs = vec![test_job(1), test_job(2), test_job(3), test_job(4)];

    Input::new(jobs, vec![test_vehicle(10), test_vehicle(10)], matrix).unwrap()
}

parameterized_test! {can_compute_exact_gain_for_every_split_pair, input, {
    let (sol, state) = build_state(&input, vec![vec![0, 1], vec![2, 3]]);
    let before = recompute_solution_cost(&input, &sol);

    for s_rank in 0..sol[0].route.len() {
        for t_rank in 0..sol[1].route.len() {
            let op = ReverseTwoOpt::new(&input, &state, &sol, 0, s_rank, 1, t_rank);
            assert!(op.is_valid(&input, &state, &sol));

            let mut changed = sol.clone();
            op.apply(&input, &mut changed);

            assert_eq!(
                op.gain(),
                before - recompute_solution_cost(&input, &changed),
                "gain mismatch for splits ({s_rank}, {t_rank})"
            );
        }
    }
}}

can_compute_exact_gain_for_every_split_pair! {
    case01_euclidean: crossing_input(),
    case02_asymmetric: asymmetric_input(),
}

#[test]
fn can_splice_reversed_segments() {
    let input = crossing_input();
    let (sol, state) = build_state(&input, vec![vec![0, 1], vec![2, 3]]);

    let op = ReverseTwoOpt::new(&input, &state, &sol, 0, 0, 1, 1);

    let mut changed = sol.clone();
    op.apply(&input, &mut changed);

    assert_eq!(changed[0].route, vec![0, 3, 2]);
    assert_eq!(changed[1].route, vec![1]);
    assert_eq!(op.addition_candidates(), vec![0, 1]);
}

#[test]
fn can_empty_the_target_route() {
    let input = crossing_input();
    let (sol, state) = build_state(&input, vec![vec![0, 1], vec![2, 3]]);

    let op = ReverseTwoOpt::new(&input, &state, &sol, 0, 1, 1, 1);
    assert!(op.is_valid(&input, &state, &sol));

    let mut changed = sol.clone();
    op.apply(&input, &mut changed);

    assert_eq!(changed[0].route, vec![0, 1, 3, 2]);
    assert!(changed[1].route.is_empty());
}

#[test]
fn can_reject_skill_mismatch_in_moved_head() {
    use crate::models::common::Skills;

    let jobs = vec![
        test_job(1),
        test_job(2),
        test_job(3).with_skills(Skills::from_iter([9])),
        test_job(4),
    ];
    let vehicles = vec![test_vehicle(10), test_vehicle(10).with_skills(Skills::from_iter([9]))];
    let input = test_input(jobs, vehicles, &[(0, 0), (10, 0), (20, 5), (10, 5), (20, 0)]);
    let (sol, state) = build_state(&input, vec![vec![0, 1], vec![2, 3]]);

    // The moved target head contains a job vehicle 0 cannot serve.
    let op = ReverseTwoOpt::new(&input, &state, &sol, 0, 0, 1, 0);

    assert!(!op.is_valid(&input, &state, &sol));
}
