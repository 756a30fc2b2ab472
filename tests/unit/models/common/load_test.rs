use super::*;

#[test]
fn can_add_and_subtract_amounts() {
    let left = Amount::new(&[3, 5]);
    let right = Amount::new(&[1, 2]);

    assert_eq!(left + right, Amount::new(&[4, 7]));
    assert_eq!(left - right, Amount::new(&[2, 3]));
}

parameterized_test! {can_check_capacity_fit, (capacity, load, expected), {
    assert_eq!(Amount::new(capacity).can_fit(&Amount::new(load)), expected);
}}

can_check_capacity_fit! {
    case01: (&[10, 5], &[10, 5], true),
    case02: (&[10, 5], &[9, 0], true),
    case03: (&[10, 5], &[11, 0], false),
    case04: (&[10, 5], &[0, 6], false),
}

#[test]
fn can_get_component_min() {
    let left = Amount::new(&[3, 7]);
    let right = Amount::new(&[5, 2]);

    assert_eq!(left.component_min(&right), Amount::new(&[3, 2]));
}

#[test]
fn can_check_emptiness() {
    assert!(!Amount::zero(3).is_not_empty());
    assert!(Amount::new(&[0, 1, 0]).is_not_empty());
}

#[test]
fn can_sum_amounts() {
    let total: Amount = [Amount::new(&[1, 2]), Amount::new(&[3, 4])].into_iter().sum();

    assert_eq!(total, Amount::new(&[4, 6]));
}
