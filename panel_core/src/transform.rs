pub use ecad_file_format::pnp::normalize_angle;

/// Maps a design-local position and rotation onto the panel.
///
/// The point is rotated counter-clockwise by `angle` degrees around the design origin, then
/// moved by the instance offset. Local coordinates must be relative to the same origin the
/// panel layout places; positions exported against another origin end up shifted.
pub fn transform(
    local_x: f64,
    local_y: f64,
    local_rotation: f64,
    offset_x: f64,
    offset_y: f64,
    angle: f64,
) -> (f64, f64, f64) {
    let (x, y) = rotate_point(local_x, local_y, angle);
    (
        x + offset_x,
        y + offset_y,
        normalize_angle(local_rotation + angle),
    )
}

/// Rotates `(x, y)` counter-clockwise around the origin.
pub fn rotate_point(x: f64, y: f64, angle_deg: f64) -> (f64, f64) {
    let (s, c) = angle_deg.to_radians().sin_cos();
    (x * c - y * s, x * s + y * c)
}
