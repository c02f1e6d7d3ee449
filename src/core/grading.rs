//! Grade point conversion and GPA computation

use crate::core::models::Enrollment;

/// Lower bounds of the grade bands, highest first, with their grade points.
const GRADE_BANDS: [(f64, f64); 4] = [(90.0, 4.0), (80.0, 3.0), (70.0, 2.0), (60.0, 1.0)];

/// Highest percentage that still earns grade points
const MAX_PERCENTAGE: f64 = 100.0;

/// Convert a percentage grade into grade points on the 0.0–4.0 scale
///
/// Each band includes its lower bound and excludes its upper bound, except the
/// top band which includes 100. Anything outside 0–100 (or NaN) maps to 0.0.
///
/// | percentage | points |
/// |------------|--------|
/// | [90, 100]  | 4.0    |
/// | [80, 90)   | 3.0    |
/// | [70, 80)   | 2.0    |
/// | [60, 70)   | 1.0    |
/// | otherwise  | 0.0    |
#[must_use]
pub fn grade_points(percentage: f64) -> f64 {
    if percentage > MAX_PERCENTAGE {
        return 0.0;
    }
    GRADE_BANDS
        .iter()
        .find(|(lower, _)| percentage >= *lower)
        .map_or(0.0, |(_, points)| *points)
}

/// Credit-weighted mean of grade points over graded enrollments
///
/// Ungraded enrollments are ignored. Returns 0.0 when no graded credits exist.
#[must_use]
pub fn compute_gpa(enrollments: &[Enrollment]) -> f64 {
    let (weighted, credits) = enrollments
        .iter()
        .filter_map(|e| e.grade.map(|points| (f64::from(e.credits), points)))
        .fold((0.0, 0.0), |(weighted, total), (credits, points)| {
            (weighted + credits * points, total + credits)
        });

    if credits > 0.0 {
        weighted / credits
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graded(name: &str, credits: u32, points: f64) -> Enrollment {
        let mut e = Enrollment::new(name.to_string(), credits);
        e.grade = Some(points);
        e
    }

    #[test]
    fn test_band_lower_bounds() {
        assert!((grade_points(90.0) - 4.0).abs() < f64::EPSILON);
        assert!((grade_points(80.0) - 3.0).abs() < f64::EPSILON);
        assert!((grade_points(70.0) - 2.0).abs() < f64::EPSILON);
        assert!((grade_points(60.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_band_upper_edges() {
        assert!((grade_points(100.0) - 4.0).abs() < f64::EPSILON);
        assert!((grade_points(89.99) - 3.0).abs() < f64::EPSILON);
        assert!((grade_points(79.5) - 2.0).abs() < f64::EPSILON);
        assert!((grade_points(69.9) - 1.0).abs() < f64::EPSILON);
        assert!(grade_points(59.99).abs() < f64::EPSILON);
    }

    #[test]
    fn test_out_of_range_is_zero() {
        assert!(grade_points(100.01).abs() < f64::EPSILON);
        assert!(grade_points(-5.0).abs() < f64::EPSILON);
        assert!(grade_points(f64::NAN).abs() < f64::EPSILON);
        assert!(grade_points(0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gpa_without_grades_is_zero() {
        assert!(compute_gpa(&[]).abs() < f64::EPSILON);
        let ungraded = vec![Enrollment::new("CS101".to_string(), 3)];
        assert!(compute_gpa(&ungraded).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gpa_is_credit_weighted() {
        let enrollments = vec![graded("CS101", 3, 4.0), graded("CS102", 2, 1.0)];
        assert!((compute_gpa(&enrollments) - 2.8).abs() < 1e-9);
    }

    #[test]
    fn test_gpa_ignores_ungraded_and_order() {
        let forward = vec![
            graded("A", 4, 3.0),
            Enrollment::new("B".to_string(), 5),
            graded("C", 1, 2.0),
        ];
        let mut backward = forward.clone();
        backward.reverse();

        let expected = (4.0 * 3.0 + 2.0) / 5.0;
        assert!((compute_gpa(&forward) - expected).abs() < 1e-9);
        assert!((compute_gpa(&backward) - compute_gpa(&forward)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_credit_records_do_not_divide_by_zero() {
        let enrollments = vec![graded("Seminar", 0, 4.0)];
        assert!(compute_gpa(&enrollments).abs() < f64::EPSILON);
    }
}
