use proptest::prelude::*;
use saci::domain::{calculate, ExamCounts, SaciOutcome, BASELINE_SURFACES};

fn counts_from(v: [u32; 10]) -> ExamCounts {
    ExamCounts::from_vec(&v).expect("ten counts")
}

/// Counts whose non-caries loss leaves a positive denominator: every
/// `(ant, post)` pair with `4 * ant + 5 * post <= 127`.
fn valid_counts() -> impl Strategy<Value = ExamCounts> {
    (0u32..=31)
        .prop_flat_map(|ant| (Just(ant), 0u32..=(127 - 4 * ant) / 5))
        .prop_flat_map(|(ant, post)| {
            (prop::array::uniform8(0u32..200), Just(ant), Just(post))
        })
        .prop_map(|(lead, ant, post)| {
            counts_from([
                lead[0], lead[1], lead[2], lead[3], lead[4], lead[5], lead[6], lead[7], ant, post,
            ])
        })
}

proptest! {
    #[test]
    fn total_is_sum_of_submodels(counts in valid_counts()) {
        let assessment = calculate(&counts);
        let scores = assessment.scores().expect("denominator is positive");
        let sum = scores.active + scores.loss + scores.restoration;
        prop_assert!(
            (scores.total - sum).abs() <= 1e-9,
            "total {} != {} (active + loss + restoration)",
            scores.total, sum
        );
    }

    #[test]
    fn non_positive_denominator_is_invalid(
        lead in prop::array::uniform8(0u32..1000),
        ant in 0u32..100,
        post in 0u32..100,
    ) {
        let counts = counts_from([
            lead[0], lead[1], lead[2], lead[3], lead[4], lead[5], lead[6], lead[7], ant, post,
        ]);
        let expected = BASELINE_SURFACES - 4 * i64::from(ant) - 5 * i64::from(post);
        let assessment = calculate(&counts);

        prop_assert_eq!(assessment.components.total_surfaces, expected);
        if expected <= 0 {
            prop_assert_eq!(
                assessment.outcome,
                SaciOutcome::InvalidDenominator { total_surfaces: expected }
            );
            prop_assert!(assessment.scores().is_err());
        } else {
            prop_assert!(assessment.is_valid());
        }
    }

    #[test]
    fn denominator_of_valid_counts_is_positive(counts in valid_counts()) {
        let total_surfaces = calculate(&counts).components.total_surfaces;
        prop_assert!((1..=BASELINE_SURFACES).contains(&total_surfaces));
    }

    #[test]
    fn increasing_a_numerator_count_never_lowers_total(
        counts in valid_counts(),
        index in 0usize..8,
        bump in 1u32..100,
    ) {
        let mut raised = counts.to_vec();
        raised[index] += bump;
        let raised = counts_from(raised.try_into().expect("ten counts"));

        let before = calculate(&counts).scores().expect("valid").total;
        let after = calculate(&raised).scores().expect("valid").total;
        prop_assert!(after >= before, "{} -> {} after raising field {}", before, after, index);
    }

    #[test]
    fn calculation_is_idempotent(v in prop::array::uniform10(any::<u32>())) {
        let counts = counts_from(v);
        let first = calculate(&counts);
        let second = calculate(&counts);

        let c1 = first.components;
        let c2 = second.components;
        prop_assert_eq!(c1.da_score.to_bits(), c2.da_score.to_bits());
        prop_assert_eq!(c1.mc_score.to_bits(), c2.mc_score.to_bits());
        prop_assert_eq!(c1.fc_score.to_bits(), c2.fc_score.to_bits());
        prop_assert_eq!(c1.total_surfaces, c2.total_surfaces);

        match (first.outcome, second.outcome) {
            (SaciOutcome::Scored(a), SaciOutcome::Scored(b)) => {
                prop_assert_eq!(a.total.to_bits(), b.total.to_bits());
                prop_assert_eq!(a.active.to_bits(), b.active.to_bits());
                prop_assert_eq!(a.loss.to_bits(), b.loss.to_bits());
                prop_assert_eq!(a.restoration.to_bits(), b.restoration.to_bits());
            }
            (a, b) => prop_assert_eq!(a, b),
        }
    }
}
