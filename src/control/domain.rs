//! Fuzzy linguistic domains.
//!
//! A [`Domain`] partitions one numeric variable into five ordered
//! labels: left shoulder, three trapezoids, right shoulder. The
//! breakpoint layout is the station's historical one — `step = max/5`
//! spacing offset by `min` on alternating points — and must be
//! preserved exactly, since the rule tables were tuned against it.

use crate::control::membership::MembershipFunction;
use crate::error::ConfigError;

/// Every domain carries exactly this many labels.
pub const LABEL_COUNT: usize = 5;

/// An index into a domain's ordered label list.
pub type LabelId = usize;

/// One fuzzy linguistic variable over a numeric range.
///
/// Immutable after construction; the inference engine shares domains
/// freely across calls.
#[derive(Debug, Clone)]
pub struct Domain {
    name: String,
    min: f64,
    max: f64,
    resolution: f64,
    labels: [String; LABEL_COUNT],
    functions: [MembershipFunction; LABEL_COUNT],
}

/// The eight breakpoints derived from `(min, max)`.
///
/// `step = max/5`; even-position points are multiples of `step`, odd
/// positions add the `min` offset. The increment depends on `max`
/// only — `min` merely shifts alternating points.
fn point_arrangement(min: f64, max: f64) -> [f64; 8] {
    let step = max / LABEL_COUNT as f64;
    [
        min,
        step,
        step + min,
        2.0 * step,
        2.0 * step + min,
        3.0 * step,
        3.0 * step + min,
        4.0 * step,
    ]
}

impl Domain {
    /// Build a domain from its range and five ordered label names.
    ///
    /// Labels run from "very short" to "very long"; the first gets a
    /// left shoulder, the last a right shoulder, the middle three
    /// trapezoids over consecutive breakpoint pairs.
    pub fn new(
        name: &str,
        min: f64,
        max: f64,
        labels: &[String],
        resolution: f64,
    ) -> Result<Self, ConfigError> {
        if max <= 0.0 {
            return Err(ConfigError::InvalidDomainRange {
                name: name.to_owned(),
                max,
            });
        }
        if labels.len() != LABEL_COUNT {
            return Err(ConfigError::WrongLabelCount {
                name: name.to_owned(),
                expected: LABEL_COUNT,
                got: labels.len(),
            });
        }

        let p = point_arrangement(min, max);
        let functions = [
            MembershipFunction::LeftShoulder {
                edge: p[0],
                foot: p[1],
            },
            MembershipFunction::Trapezoid {
                a: p[0],
                b: p[1],
                c: p[2],
                d: p[3],
            },
            MembershipFunction::Trapezoid {
                a: p[2],
                b: p[3],
                c: p[4],
                d: p[5],
            },
            MembershipFunction::Trapezoid {
                a: p[4],
                b: p[5],
                c: p[6],
                d: p[7],
            },
            MembershipFunction::RightShoulder {
                foot: p[6],
                edge: p[7],
            },
        ];

        let labels = [
            labels[0].clone(),
            labels[1].clone(),
            labels[2].clone(),
            labels[3].clone(),
            labels[4].clone(),
        ];

        Ok(Self {
            name: name.to_owned(),
            min,
            max,
            resolution,
            labels,
            functions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Ordered label names.
    pub fn labels(&self) -> &[String; LABEL_COUNT] {
        &self.labels
    }

    /// Resolve a label name to its index, if the domain defines it.
    pub fn label_id(&self, label: &str) -> Option<LabelId> {
        self.labels.iter().position(|l| l == label)
    }

    /// Degree of membership of `x` in the given label.
    pub fn degree(&self, label: LabelId, x: f64) -> f64 {
        self.functions[label].degree(x)
    }

    /// Crisp representative value of the given label.
    pub fn representative(&self, label: LabelId) -> f64 {
        self.functions[label].representative()
    }

    /// The membership function backing a label (test/inspection use).
    pub fn function(&self, label: LabelId) -> MembershipFunction {
        self.functions[label]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        ["sangat_sebentar", "sebentar", "sedang", "lama", "sangat_lama"]
            .map(str::to_owned)
            .to_vec()
    }

    fn oven_domain() -> Domain {
        Domain::new("durasi_oven", 120.0, 1440.0, &labels(), 0.1).unwrap()
    }

    #[test]
    fn breakpoints_match_station_layout() {
        // min=120, max=1440 → step=288
        let p = point_arrangement(120.0, 1440.0);
        assert_eq!(p, [120.0, 288.0, 408.0, 576.0, 696.0, 864.0, 984.0, 1152.0]);
    }

    #[test]
    fn five_functions_in_shape_order() {
        let d = oven_domain();
        assert!(matches!(
            d.function(0),
            MembershipFunction::LeftShoulder { edge, foot } if edge == 120.0 && foot == 288.0
        ));
        assert!(matches!(
            d.function(2),
            MembershipFunction::Trapezoid { a, b, c, d } if a == 408.0 && b == 576.0 && c == 696.0 && d == 864.0
        ));
        assert!(matches!(
            d.function(4),
            MembershipFunction::RightShoulder { foot, edge } if foot == 984.0 && edge == 1152.0
        ));
    }

    #[test]
    fn rejects_non_positive_max() {
        let err = Domain::new("bad", 0.0, 0.0, &labels(), 0.1).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDomainRange { .. }));
        let err = Domain::new("bad", 10.0, -5.0, &labels(), 0.1).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDomainRange { .. }));
    }

    #[test]
    fn rejects_wrong_label_count() {
        let four: Vec<String> = labels().into_iter().take(4).collect();
        let err = Domain::new("bad", 0.0, 100.0, &four, 0.1).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::WrongLabelCount { expected: 5, got: 4, .. }
        ));
    }

    #[test]
    fn label_lookup() {
        let d = oven_domain();
        assert_eq!(d.label_id("sedang"), Some(2));
        assert_eq!(d.label_id("sangat_lama"), Some(4));
        assert_eq!(d.label_id("nope"), None);
    }

    #[test]
    fn adjacent_labels_sum_to_one_on_crossover_ramps() {
        let d = oven_domain();
        // Each overlap region is a falling ramp of label i against the
        // rising ramp of label i+1 over the same breakpoint pair.
        let midpoints = [204.0, 492.0, 780.0, 1068.0];
        for (i, &x) in midpoints.iter().enumerate() {
            let sum = d.degree(i, x) + d.degree(i + 1, x);
            assert!(
                (sum - 1.0).abs() < 1e-9,
                "labels {i}/{} at x={x}: sum={sum}",
                i + 1
            );
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn all_degrees_in_unit_interval(x in -2000.0f64..4000.0) {
            let labels: Vec<String> =
                ["a", "b", "c", "d", "e"].map(str::to_owned).to_vec();
            let dom = Domain::new("t", 120.0, 1440.0, &labels, 0.1).unwrap();
            for label in 0..LABEL_COUNT {
                let deg = dom.degree(label, x);
                prop_assert!((0.0..=1.0).contains(&deg));
            }
        }

        #[test]
        fn crossover_partition_of_unity(
            min in 1.0f64..200.0,
            max in 500.0f64..10_000.0,
            t in 0.001f64..0.999,
        ) {
            let labels: Vec<String> =
                ["a", "b", "c", "d", "e"].map(str::to_owned).to_vec();
            let dom = Domain::new("t", min, max, &labels, 0.1).unwrap();
            let p = super::point_arrangement(min, max);
            // Overlap ramps: (p0,p1), (p2,p3), (p4,p5), (p6,p7)
            for i in 0..4 {
                let lo = p[2 * i];
                let hi = p[2 * i + 1];
                prop_assume!(hi > lo);
                let x = lo + t * (hi - lo);
                let sum = dom.degree(i, x) + dom.degree(i + 1, x);
                prop_assert!((sum - 1.0).abs() < 1e-9);
            }
        }
    }
}
