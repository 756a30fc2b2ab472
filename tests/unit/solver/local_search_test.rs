use super::*;
use crate::helpers::models::*;
use crate::helpers::solver::*;
use crate::models::common::Skills;
use crate::models::problem::Vehicle;
use proptest::prelude::*;

#[test]
fn can_terminate_without_change_on_a_single_vehicle() {
    // Inter-route search has nothing to enumerate with one vehicle, even with
    // crossed edges in its route.
    let jobs = vec![test_job(1), test_job(2)];
    let input = test_input(jobs, vec![test_vehicle(10)], &[(0, 0), (10, 0), (0, 10)]);
    let mut engine = LocalSearch::new(&input, vec![vec![1, 0]]).unwrap();
    let before = engine.indicators();

    engine.run();

    assert_eq!(engine.indicators(), before);
    assert_eq!(engine.solution()[0].route, vec![1, 0]);
}

#[test]
fn can_relocate_a_job_to_a_closer_vehicle() {
    let jobs = vec![test_job(1), test_job(2), test_job(3)];
    let vehicles = vec![test_vehicle(10), Vehicle::new(4, 4, Amount::new(&[1]))];
    let input = test_input(jobs, vehicles, &[(0, 0), (10, 0), (20, 0), (20, 10), (21, 10)]);
    let mut engine = LocalSearch::new(&input, vec![vec![0, 1, 2], vec![]]).unwrap();
    let before = engine.indicators();

    engine.run();

    let after = engine.indicators();
    assert_eq!(engine.solution()[0].route, vec![0, 1]);
    assert_eq!(engine.solution()[1].route, vec![2]);
    assert_eq!(before.cost - after.cost, 10);
    assert_eq!(after.unassigned, 0);
    assert_eq!(after.used_vehicles, 2);
    assert_engine_consistent(&input, &engine);
}

#[test]
fn can_exchange_jobs_when_swap_beats_all_other_operators() {
    let jobs = vec![test_job(1), test_job(2), test_job(3), test_job(4)];
    let vehicles = vec![test_vehicle(10), Vehicle::new(5, 5, Amount::new(&[10]))];
    let input =
        test_input(jobs, vehicles, &[(0, 0), (10, 0), (95, 0), (5, 0), (90, 0), (100, 0)]);
    let mut engine = LocalSearch::new(&input, vec![vec![0, 1], vec![2, 3]]).unwrap();
    let before = engine.indicators();

    engine.run();

    let after = engine.indicators();
    assert_eq!(engine.solution()[0].route, vec![0, 2]);
    assert_eq!(engine.solution()[1].route, vec![1, 3]);
    assert_eq!(before.cost, 380);
    assert_eq!(after.cost, 40);
    assert_engine_consistent(&input, &engine);
}

#[test]
fn can_reinsert_an_unassigned_job_after_capacity_is_freed() {
    let jobs = vec![
        test_job(1),
        test_job(2),
        test_job(4).with_skills(Skills::from_iter([1])),
        test_job(5),
    ];
    let vehicles = vec![
        Vehicle::new(0, 0, Amount::new(&[2])).with_skills(Skills::from_iter([1])),
        Vehicle::new(3, 3, Amount::new(&[2])),
    ];
    let input =
        test_input(jobs, vehicles, &[(0, 0), (5, 0), (100, 0), (101, 0), (6, 0), (101, 1)]);
    let mut engine = LocalSearch::new(&input, vec![vec![0, 1], vec![3]]).unwrap();
    assert_eq!(engine.indicators().unassigned, 1);

    engine.run();

    let after = engine.indicators();
    assert_eq!(after.unassigned, 0);
    assert_eq!(after.cost, 15);
    assert_eq!(after.used_vehicles, 2);
    assert_engine_consistent(&input, &engine);
}

#[test]
fn can_leave_a_tight_route_untouched_when_no_insertion_is_feasible() {
    // The second vehicle's shift is too short to accept any job, so relocation
    // candidates towards it never materialize.
    let jobs = vec![test_job(1), test_job(2), test_job(3)];
    let vehicles = vec![
        test_vehicle(10),
        Vehicle::new(4, 4, Amount::new(&[10])).with_time_window(crate::models::common::TimeWindow::new(0, 1)),
    ];
    let input = test_input(jobs, vehicles, &[(0, 0), (10, 0), (20, 0), (20, 10), (21, 10)]);
    let mut engine = LocalSearch::new(&input, vec![vec![0, 1, 2], vec![]]).unwrap();

    engine.run();

    assert_eq!(engine.solution()[0].route, vec![0, 1, 2]);
    assert!(engine.solution()[1].route.is_empty());
    assert_engine_consistent(&input, &engine);
}

#[test]
fn can_use_regret_to_schedule_constrained_jobs_first() {
    let jobs = vec![test_job(1), test_job(2).with_skills(Skills::from_iter([1]))];
    let vehicles = vec![
        Vehicle::new(0, 0, Amount::new(&[1])).with_skills(Skills::from_iter([1])),
        Vehicle::new(3, 3, Amount::new(&[1])),
    ];
    let points = [(0, 0), (5, 0), (6, 0), (50, 0)];

    // Pure cheapest insertion grabs the flexible job first and strands the
    // skill-constrained one.
    let input = test_input(jobs.clone(), vehicles.clone(), &points);
    let mut engine = LocalSearch::new(&input, vec![vec![], vec![]]).unwrap();
    engine.try_job_additions(&[0, 1], 0.);
    assert_eq!(engine.indicators().unassigned, 1);

    // A positive regret coefficient prioritizes the job with fewer options.
    let input = test_input(jobs, vehicles, &points);
    let mut engine = LocalSearch::new(&input, vec![vec![], vec![]]).unwrap();
    engine.try_job_additions(&[0, 1], 1.);
    assert_eq!(engine.indicators().unassigned, 0);
}

#[test]
fn can_run_again_at_a_local_optimum_without_changes() {
    let jobs = vec![test_job(1), test_job(2), test_job(3), test_job(4)];
    let vehicles = vec![test_vehicle(10), Vehicle::new(5, 5, Amount::new(&[10]))];
    let input =
        test_input(jobs, vehicles, &[(0, 0), (10, 0), (95, 0), (5, 0), (90, 0), (100, 0)]);
    let mut engine = LocalSearch::new(&input, vec![vec![0, 1], vec![2, 3]]).unwrap();

    engine.run();
    let first = engine.indicators();
    let routes: Vec<_> = engine.solution().iter().map(|tw_route| tw_route.route.clone()).collect();

    engine.run();

    assert_eq!(engine.indicators(), first);
    let again: Vec<_> = engine.solution().iter().map(|tw_route| tw_route.route.clone()).collect();
    assert_eq!(again, routes);
}

prop_compose! {
    fn random_instance()(
        jobs in prop::collection::vec(((1i64..40, 0i64..40), 0usize..3), 4..10)
    ) -> (Vec<(i64, i64)>, Vec<usize>) {
        let mut points = vec![(0, 0)];
        let mut assignment = vec![];
        for ((x, y), vehicle) in jobs {
            points.push((x, y));
            assignment.push(vehicle);
        }
        (points, assignment)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn can_keep_invariants_on_random_instances((points, assignment) in random_instance()) {
        let job_count = assignment.len();
        let jobs = (1..=job_count).map(test_job).collect();
        let vehicles = (0..3).map(|_| test_vehicle(job_count as i64)).collect();
        let input = test_input(jobs, vehicles, &points);

        let mut routes = vec![vec![]; 3];
        assignment.iter().enumerate().for_each(|(job, &vehicle)| routes[vehicle].push(job));

        let mut engine = LocalSearch::new(&input, routes).unwrap();
        let before = engine.indicators();

        engine.run();

        let after = engine.indicators();
        prop_assert!(after.cost <= before.cost);
        prop_assert!(after.unassigned <= before.unassigned);
        assert_engine_consistent(&input, &engine);

        engine.run();
        prop_assert_eq!(engine.indicators(), after);
    }
}
