/**
 * Area of objective space dominated by a two-objective minimisation front,
 * bounded above by a reference point.
 *
 * The points are sorted by the first objective and swept left to right,
 * accumulating one rectangle per point: its width is the gap in the first
 * objective since the previous point (the first gap is measured from zero)
 * and its height is the reference minus the point's second objective. Only
 * positive contributions count, so points outside the reference box add
 * nothing. An empty front has zero hypervolume.
 *
 * Reporting only. The indicator never feeds back into selection or the
 * archive.
 */
pub fn hypervolume(points: &[(f64, f64)], reference: (f64, f64)) -> f64 {
    let mut points = points.to_vec();
    points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

    let mut total = 0.0;
    let mut prev_x = 0.0;

    for &(x, y) in &points {
        let width = x - prev_x;
        let height = reference.1 - y;

        let area = width * height;
        if area > 0.0 {
            total = total + area;
        }

        prev_x = x;
    }

    total
}
