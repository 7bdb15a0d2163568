//! Physical length handling for the document layout.
//!
//! Everything the builder measures is a `Length`. The container only speaks
//! twips (1/20 pt) for geometry and half-points for font sizes, so the
//! conversion lives here and nowhere else.

pub const POINTS_PER_INCH: f64 = 72.0;
pub const CM_PER_INCH: f64 = 2.54;
pub const TWIPS_PER_POINT: f64 = 20.0;
/// Line spacing in the container is expressed in 240ths of a single line.
pub const LINE_UNITS: f64 = 240.0;

/// A physical length, stored internally in points.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Length(f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    pub const fn pt(points: f64) -> Self {
        Length(points)
    }

    pub fn cm(centimeters: f64) -> Self {
        Length(centimeters / CM_PER_INCH * POINTS_PER_INCH)
    }

    /// `percent` of `available`, e.g. `Length::percent_of(50.0, text_width)`.
    /// Negative percentages clamp to zero.
    pub fn percent_of(percent: f64, available: Length) -> Self {
        Length(available.0 * percent.max(0.0) / 100.0)
    }

    pub fn points(self) -> f64 {
        self.0
    }

    pub fn to_cm(self) -> f64 {
        self.0 / POINTS_PER_INCH * CM_PER_INCH
    }

    /// Rounded to the nearest whole twip.
    pub fn twips(self) -> i64 {
        (self.0 * TWIPS_PER_POINT).round() as i64
    }

    /// Font sizes are written in half-points.
    pub fn half_points(self) -> u32 {
        (self.0 * 2.0).round().max(0.0) as u32
    }

    pub fn divide(self, parts: usize) -> Self {
        if parts == 0 {
            return Length::ZERO;
        }
        Length(self.0 / parts as f64)
    }
}

impl std::ops::Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl std::ops::Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

/// Converts a line-spacing multiplier (1.0 = single) into 240ths of a line.
pub fn line_spacing_units(multiplier: f64) -> i64 {
    (multiplier * LINE_UNITS).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inch_in_cm_is_1440_twips() {
        assert_eq!(Length::cm(2.54).twips(), 1440);
    }

    #[test]
    fn test_a4_page_dimensions_in_twips() {
        assert_eq!(Length::cm(21.0).twips(), 11906);
        assert_eq!(Length::cm(29.7).twips(), 16838);
    }

    #[test]
    fn test_points_to_twips_and_half_points() {
        assert_eq!(Length::pt(6.0).twips(), 120);
        assert_eq!(Length::pt(11.0).half_points(), 22);
        assert_eq!(Length::pt(10.5).half_points(), 21);
    }

    #[test]
    fn test_percent_of_available_width() {
        let available = Length::cm(15.92);
        let half = Length::percent_of(50.0, available);
        assert!((half.to_cm() - 7.96).abs() < 1e-9, "got {}", half.to_cm());
        assert_eq!(Length::percent_of(-10.0, available), Length::ZERO);
        assert!((Length::percent_of(100.0, available) - available).points().abs() < 1e-9);
    }

    #[test]
    fn test_divide_by_zero_parts_is_zero() {
        assert_eq!(Length::cm(10.0).divide(0), Length::ZERO);
        assert!((Length::cm(9.0).divide(3).to_cm() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_spacing_multiplier() {
        assert_eq!(line_spacing_units(1.0), 240);
        assert_eq!(line_spacing_units(1.15), 276);
    }
}
