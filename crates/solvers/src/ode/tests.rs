use std::cell::Cell;

use approx::assert_relative_eq;
use soliton_core::{FallibleField, StateVector};

use super::{Action, Error, Event, Integrator, Method, Status, run, run_unobserved};

fn linear_field(_x: f64, y: &StateVector) -> StateVector {
    StateVector::from([y[0] + 2.0 * y[1], 3.0 * y[0] + 4.0 * y[1]])
}

type LinearField = fn(f64, &StateVector) -> StateVector;

fn integrator(method: Method) -> Integrator<LinearField> {
    let field: LinearField = linear_field;
    Integrator::new(method, StateVector::from([1.0, 2.0]), field, 0.1).expect("valid interval")
}

/// Field that fails once `x` passes a threshold.
#[derive(Debug, thiserror::Error)]
#[error("field failed at x={0}")]
struct PastThreshold(f64);

#[test]
fn named_integrators_select_the_right_method() {
    let cases = [
        ("euler", Method::Euler),
        ("leapfrog", Method::Leapfrog),
        ("r_k_4", Method::Rk4),
    ];

    for (name, method) in cases {
        let integrator = Integrator::named(name, StateVector::from([1.0]), linear_field, 0.2)
            .expect("supported method");
        assert_eq!(integrator.method(), method);
        assert_relative_eq!(integrator.interval(), 0.2);
    }
}

#[test]
fn unknown_method_is_unsupported() {
    let result = Integrator::named("unsupported", StateVector::from([1.0]), linear_field, 0.2);

    assert!(matches!(result, Err(Error::UnsupportedMethod(name)) if name == "unsupported"));
}

#[test]
fn iterate_forwards_to_each_method() {
    let mut euler = integrator(Method::Euler);
    let mut leapfrog = integrator(Method::Leapfrog);
    let mut rk4 = integrator(Method::Rk4);

    let euler_first = euler.iterate().unwrap();
    let leapfrog_first = leapfrog.iterate().unwrap();
    let rk4_first = rk4.iterate().unwrap();

    assert_eq!(euler_first, leapfrog_first);
    assert_relative_eq!(rk4_first.y[0], 1.662_412_5, epsilon = 1e-8);

    let leapfrog_second = leapfrog.iterate().unwrap();
    assert_relative_eq!(leapfrog_second.x, 0.2, epsilon = 1e-12);
    assert_relative_eq!(leapfrog_second.y[0], 2.54, epsilon = 1e-4);
    assert_relative_eq!(leapfrog_second.y[1], 5.38, epsilon = 1e-4);
}

#[test]
fn reset_restores_initial_values_for_every_method() {
    for method in Method::ALL {
        let mut integrator = integrator(method).starting_at(1.25);
        let initial = integrator.current().clone();

        for _ in 0..7 {
            integrator.iterate().unwrap();
        }
        integrator.reset();

        assert_eq!(integrator.x().to_bits(), initial.x.to_bits());
        assert_eq!(integrator.current(), &initial);

        // The first step after a reset repeats the first step of a fresh run.
        let replay = integrator.iterate().unwrap();
        let mut fresh = self::integrator(method).starting_at(1.25);
        assert_eq!(replay, fresh.iterate().unwrap());
    }
}

#[test]
fn previous_is_leapfrog_only() {
    let mut leapfrog = integrator(Method::Leapfrog);
    assert!(leapfrog.previous().unwrap().is_none());

    leapfrog.iterate().unwrap();
    let previous = leapfrog.previous().unwrap().expect("history after a step");
    assert_eq!(previous.y, StateVector::from([1.0, 2.0]));

    leapfrog.reset();
    assert!(leapfrog.previous().unwrap().is_none());

    for method in [Method::Euler, Method::Rk4] {
        let result = integrator(method).previous().map(|p| p.cloned());
        assert!(matches!(
            result,
            Err(Error::UnsupportedOperation {
                operation: "previous",
                ..
            })
        ));
    }
}

#[test]
fn stability_checks_are_forwarded() {
    let mut integrator = integrator(Method::Rk4);

    assert!(matches!(
        integrator.stability_factor(),
        Err(Error::MissingStabilityFunction)
    ));
    assert!(!integrator.is_stable());

    // Ratio of the current norm to the initial norm, near 1 only at the start.
    let initial_norm = 5.0_f64.sqrt();
    integrator.set_stability_fn(move |_x, y| (y[0] * y[0] + y[1] * y[1]).sqrt() / initial_norm);

    assert_relative_eq!(integrator.stability_factor().unwrap(), 1.0);
    assert!(integrator.is_stable());

    integrator.iterate().unwrap();
    assert!(!integrator.is_stable());
    assert!(integrator.is_stable_within(1.0));
}

#[test]
fn set_interval_validates() {
    let mut integrator = integrator(Method::Euler);

    assert!(matches!(
        integrator.set_interval(0.0),
        Err(Error::InvalidInterval(_))
    ));

    integrator.set_interval(0.2).unwrap();
    let sample = integrator.iterate().unwrap();

    assert_relative_eq!(sample.x, 0.2);
    assert_relative_eq!(sample.y[0], 2.0, epsilon = 1e-12);
}

#[test]
fn run_records_initial_plus_each_step() {
    for method in Method::ALL {
        let mut integrator = integrator(method);

        let solution = run_unobserved(&mut integrator, 25).expect("should solve");

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 25);
        assert_eq!(solution.samples.len(), 26);
        assert_eq!(solution.samples[0].x, 0.0);
        assert_eq!(solution.samples[0].y, StateVector::from([1.0, 2.0]));
        assert_eq!(solution.last(), Some(integrator.current()));
    }
}

#[test]
fn zero_steps_returns_initial() {
    let mut integrator = integrator(Method::Leapfrog);

    let solution = run_unobserved(&mut integrator, 0).expect("should return initial");

    assert_eq!(solution.status, Status::Complete);
    assert_eq!(solution.steps, 0);
    assert_eq!(solution.samples.len(), 1);
}

#[test]
fn recorded_samples_are_independent_copies() {
    let mut integrator = integrator(Method::Euler);

    let solution = run_unobserved(&mut integrator, 3).unwrap();
    let recorded = solution.samples.clone();

    integrator.iterate().unwrap();
    integrator.reset();

    assert_eq!(solution.samples, recorded);
    assert_relative_eq!(solution.samples[1].y[0], 1.5, epsilon = 1e-12);
}

#[test]
fn observer_sees_every_step_and_can_stop_early() {
    let mut integrator = integrator(Method::Rk4);
    let mut seen = Vec::new();

    let solution = run(&mut integrator, 100, |event: &Event<'_>| {
        seen.push(event.step);
        (event.step == 4).then_some(Action::StopEarly)
    })
    .expect("should stop cleanly");

    assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.steps, 4);
    assert_eq!(solution.samples.len(), 5);
}

#[test]
fn observer_can_stop_before_any_step() {
    let mut integrator = integrator(Method::Euler);

    let solution = run(&mut integrator, 10, |_event: &Event<'_>| Some(Action::StopEarly))
        .expect("should stop cleanly");

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.samples.len(), 1);
    assert_eq!(integrator.x(), 0.0);
}

#[test]
fn failure_aborts_and_keeps_samples_so_far() {
    let calls = Cell::new(0);
    let field = FallibleField(|x: f64, y: &StateVector| {
        calls.set(calls.get() + 1);
        if x > 0.25 {
            Err(PastThreshold(x))
        } else {
            Ok(y.clone())
        }
    });
    let mut integrator = Integrator::new(Method::Euler, StateVector::from([1.0]), field, 0.1)
        .expect("valid interval");

    let failure = run_unobserved(&mut integrator, 10).expect_err("should fail");

    // Steps at x = 0.0, 0.1, 0.2 succeed; the step from x = 0.3 fails.
    assert_eq!(failure.step, 4);
    assert_eq!(failure.samples.len(), 4);
    assert!(matches!(failure.error, Error::Field(_)));
    assert_eq!(calls.get(), 4);
    assert_relative_eq!(integrator.x(), 0.3, epsilon = 1e-12);
}

#[test]
fn wrong_length_field_output_is_rejected() {
    let field = |_x: f64, _y: &StateVector| StateVector::from([1.0, 2.0, 3.0]);
    let mut integrator = Integrator::new(Method::Rk4, StateVector::from([1.0, 2.0]), field, 0.1)
        .expect("valid interval");

    let failure = run_unobserved(&mut integrator, 5).expect_err("should fail");

    assert_eq!(failure.step, 1);
    assert!(matches!(
        failure.error,
        Error::LengthMismatch {
            expected: 2,
            found: 3
        }
    ));
}
