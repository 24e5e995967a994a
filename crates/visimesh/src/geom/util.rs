use nalgebra::Vector2;

/// Quadrant of a direction (axes belong to the quadrant counter-clockwise of them).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    First,
    Second,
    Third,
    Fourth,
}

impl Quadrant {
    /// Counter-clockwise order starting at +x/+y.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::First,
        Quadrant::Second,
        Quadrant::Third,
        Quadrant::Fourth,
    ];

    /// Unit signs `(sx, sy)` of the quadrant.
    #[inline]
    pub fn signs(self) -> Vector2<f64> {
        match self {
            Quadrant::First => Vector2::new(1.0, 1.0),
            Quadrant::Second => Vector2::new(-1.0, 1.0),
            Quadrant::Third => Vector2::new(-1.0, -1.0),
            Quadrant::Fourth => Vector2::new(1.0, -1.0),
        }
    }
}

#[inline]
pub fn quadrant(v: Vector2<f64>) -> Quadrant {
    match (v.x >= 0.0, v.y >= 0.0) {
        (true, true) => Quadrant::First,
        (false, true) => Quadrant::Second,
        (false, false) => Quadrant::Third,
        (true, false) => Quadrant::Fourth,
    }
}

/// `|p.x| <= half.x && |p.y| <= half.y` (closed rectangle centered at the origin).
#[inline]
pub fn point_in_rect(p: Vector2<f64>, half: Vector2<f64>) -> bool {
    p.x.abs() <= half.x && p.y.abs() <= half.y
}

/// Parameter interval `[t0, t1]` of the segment `a → b` that lies inside the closed
/// rectangle of half-extents `half` (Liang–Barsky). `None` when it misses.
pub fn clip_segment_to_rect(
    a: Vector2<f64>,
    b: Vector2<f64>,
    half: Vector2<f64>,
) -> Option<(f64, f64)> {
    let d = b - a;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    let slabs = [
        (-d.x, a.x + half.x),
        (d.x, half.x - a.x),
        (-d.y, a.y + half.y),
        (d.y, half.y - a.y),
    ];
    for (p, q) in slabs {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((t0, t1))
}

/// Scale `p` along its own direction onto the rectangle edge it points at.
///
/// The edge is chosen by comparing `|p.x|·half.y` against `|p.y|·half.x`
/// (vertical edge on ties). With `edge_only == false`, points already inside
/// are returned unchanged. The zero vector maps to itself.
pub fn clamp_to_rect_edge(p: Vector2<f64>, half: Vector2<f64>, edge_only: bool) -> Vector2<f64> {
    if !edge_only && point_in_rect(p, half) {
        return p;
    }
    let ax = p.x.abs();
    let ay = p.y.abs();
    let scale = if ax > 0.0 && ax * half.y >= ay * half.x {
        half.x / ax
    } else if ay > 0.0 {
        half.y / ay
    } else {
        return Vector2::zeros();
    };
    p * scale
}

/// `atan2(y, x)` in degrees, mapped to [0,360). `(0,0)` yields 0.
#[inline]
pub fn angle360(x: f64, y: f64) -> f64 {
    if x == 0.0 && y == 0.0 {
        return 0.0;
    }
    wrap360(y.atan2(x).to_degrees())
}

/// Map any finite angle (degrees) into [0,360); non-finite input yields 0.
#[inline]
pub fn wrap360(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let a = deg.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Counter-clockwise angular distance from `from` to `to`, in [0,360).
#[inline]
pub fn angular_gap(from: f64, to: f64) -> f64 {
    wrap360(to - from)
}

/// Orthogonal projection of `point` onto the line through `tangent_point` with
/// direction `tangent`. A zero tangent returns `tangent_point`.
#[inline]
pub fn project_onto_line(
    point: Vector2<f64>,
    tangent: Vector2<f64>,
    tangent_point: Vector2<f64>,
) -> Vector2<f64> {
    let len2 = tangent.norm_squared();
    if !(len2.is_finite()) || len2 <= 0.0 {
        return tangent_point;
    }
    tangent_point + tangent * ((point - tangent_point).dot(&tangent) / len2)
}

/// Unsigned angle between two directions in degrees; 0 if either is zero.
#[inline]
pub fn angle_between_deg(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let denom = a.norm() * b.norm();
    if !(denom.is_finite()) || denom <= 0.0 {
        return 0.0;
    }
    (a.dot(&b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// 90° counter-clockwise rotation.
#[inline]
pub fn perp(v: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-v.y, v.x)
}

#[inline]
pub fn normalize_or_zero(v: Vector2<f64>) -> Vector2<f64> {
    let norm = v.norm();
    if !(norm.is_finite()) || norm <= 0.0 {
        Vector2::zeros()
    } else {
        v / norm
    }
}
