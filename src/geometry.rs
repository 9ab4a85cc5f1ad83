use glam::Vec3;

/// Linear interpolation from `a` to `b`, never leaving `[a, b]` for `t` in `[0, 1]`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (a + (b - a) * t).clamp(a.min(b), a.max(b))
}

/// Normalizes `v` unless it is shorter than `min_length`.
pub fn try_normalize(v: Vec3, min_length: f32) -> Option<Vec3> {
    (v.length() >= min_length).then(|| v.normalize())
}

/// Counter-clockwise face normal by Newell's method over every edge.
///
/// Zero for polygons without area.
pub fn face_normal(polygon: &[Vec3]) -> Vec3 {
    let next = polygon.iter().cycle().skip(1);
    polygon
        .iter()
        .zip(next)
        .fold(Vec3::ZERO, |normal, (a, b)| {
            normal
                + Vec3::new(
                    (a.y - b.y) * (a.z + b.z),
                    (a.z - b.z) * (a.x + b.x),
                    (a.x - b.x) * (a.y + b.y),
                )
        })
        .normalize_or_zero()
}

/// Unit cube centered on the origin, as 12 triangles.
pub const UNIT_CUBE: [[f32; 3]; 36] = [
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, -0.5, -0.5],
    //
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [-0.5, -0.5, 0.5],
    //
    [-0.5, 0.5, 0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, -0.5, -0.5],
    [-0.5, -0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [-0.5, 0.5, 0.5],
    //
    [0.5, 0.5, 0.5],
    [0.5, 0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    //
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [-0.5, -0.5, 0.5],
    [-0.5, -0.5, -0.5],
    //
    [-0.5, 0.5, -0.5],
    [0.5, 0.5, -0.5],
    [0.5, 0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [-0.5, 0.5, -0.5],
];
