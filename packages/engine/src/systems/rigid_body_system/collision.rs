use crate::rigid_body::{RigidBody, Vec2};

/// Allowed penetration before positional correction kicks in (px)
const SLOP: f32 = 0.05;
/// Share of the remaining penetration removed per iteration
const CORRECTION_PERCENT: f32 = 0.8;
/// Closing speed (px/ms) below which contacts don't bounce
const RESTING_SPEED: f32 = 0.05;

/// Overlap between bodies `a` and `b` (indices into the body list).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub a: usize,
    pub b: usize,
    /// Unit axis pointing from `a` towards `b`
    pub normal: Vec2,
    pub depth: f32,
}

/// Penetration on x and y for two boxes whose centers are `d` apart.
fn penetration(a: &RigidBody, b: &RigidBody, d: Vec2) -> (f32, f32) {
    (
        a.half_width + b.half_width - d.x.abs(),
        a.half_height + b.half_height - d.y.abs(),
    )
}

/// Axis-aligned overlap test.
///
/// The contact normal is the axis the bodies were still apart on at the
/// start of the step (`prev_pos`), so a block that sank into its support is
/// pushed back up rather than sideways. When the previous positions don't
/// decide it, the axis with the smaller penetration wins.
pub(super) fn overlap(a: &RigidBody, b: &RigidBody) -> Option<(Vec2, f32)> {
    let d = b.pos - a.pos;
    let (px, py) = penetration(a, b, d);
    if px <= 0.0 || py <= 0.0 {
        return None;
    }

    let (prev_px, prev_py) = penetration(a, b, b.prev_pos - a.prev_pos);
    let along_x = match (prev_px > 0.0, prev_py > 0.0) {
        (true, false) => false,
        (false, true) => true,
        (true, true) => prev_px < prev_py,
        (false, false) => px < py,
    };

    if along_x {
        let sign = if d.x < 0.0 { -1.0 } else { 1.0 };
        Some((Vec2::new(sign, 0.0), px))
    } else {
        let sign = if d.y < 0.0 { -1.0 } else { 1.0 };
        Some((Vec2::new(0.0, sign), py))
    }
}

/// Sort-and-sweep over x extents. Returns candidate pairs `(i, j)` with
/// `i < j`, skipping static/static and inactive bodies.
pub(super) fn broad_phase(bodies: &[RigidBody], order: &mut Vec<usize>, pairs: &mut Vec<(usize, usize)>) {
    order.clear();
    order.extend((0..bodies.len()).filter(|&i| bodies[i].active));
    order.sort_by(|&i, &j| bodies[i].min().x.total_cmp(&bodies[j].min().x));

    pairs.clear();
    for (n, &i) in order.iter().enumerate() {
        let max_x = bodies[i].max().x;
        for &j in &order[n + 1..] {
            if bodies[j].min().x > max_x {
                break;
            }
            if bodies[i].is_static && bodies[j].is_static {
                continue;
            }
            pairs.push((i.min(j), i.max(j)));
        }
    }
}

pub(super) fn find_contacts(bodies: &[RigidBody], pairs: &[(usize, usize)], contacts: &mut Vec<Contact>) {
    contacts.clear();
    for &(a, b) in pairs {
        if let Some((normal, depth)) = overlap(&bodies[a], &bodies[b]) {
            contacts.push(Contact { a, b, normal, depth });
        }
    }
}

/// Mutable access to two distinct bodies.
fn pair_mut(bodies: &mut [RigidBody], a: usize, b: usize) -> (&mut RigidBody, &mut RigidBody) {
    debug_assert!(a < b);
    let (head, tail) = bodies.split_at_mut(b);
    (&mut head[a], &mut tail[0])
}

/// One solver pass over `contacts`: push bodies apart, then cancel the
/// closing velocity along the normal (bouncing only above
/// [`RESTING_SPEED`]) and apply Coulomb friction.
pub(super) fn resolve(bodies: &mut [RigidBody], contacts: &[Contact]) {
    for contact in contacts {
        let (a, b) = pair_mut(bodies, contact.a, contact.b);
        let inv_sum = a.inv_mass + b.inv_mass;
        if inv_sum <= 0.0 {
            continue;
        }

        // Depth may be stale after earlier contacts moved these bodies.
        let Some((normal, depth)) = overlap(a, b) else {
            continue;
        };

        let correction = (depth - SLOP).max(0.0) / inv_sum * CORRECTION_PERCENT;
        a.pos -= normal * (correction * a.inv_mass);
        b.pos += normal * (correction * b.inv_mass);

        let relative = b.velocity - a.velocity;
        let vn = relative.dot(normal);
        if vn >= 0.0 {
            continue;
        }

        let restitution = if -vn > RESTING_SPEED {
            a.material.restitution.max(b.material.restitution)
        } else {
            0.0
        };
        let j = -(1.0 + restitution) * vn / inv_sum;
        a.velocity -= normal * (j * a.inv_mass);
        b.velocity += normal * (j * b.inv_mass);

        let relative = b.velocity - a.velocity;
        let tangent = (relative - normal * relative.dot(normal)).normalize();
        if tangent == Vec2::zero() {
            continue;
        }
        let mu = a.material.friction.min(b.material.friction);
        let jt = (-relative.dot(tangent) / inv_sum).clamp(-j * mu, j * mu);
        a.velocity -= tangent * (jt * a.inv_mass);
        b.velocity += tangent * (jt * b.inv_mass);
    }
}

/// Final pass over the broad-phase `pairs`: lift every dynamic body fully
/// clear of whatever it rests on and stop it sinking further. Supports are
/// handled before what they carry (floor first), so a whole stack ends the
/// step without vertical overlap.
pub(super) fn settle_stacks(bodies: &mut [RigidBody], pairs: &mut [(usize, usize)]) {
    {
        let view: &[RigidBody] = bodies;
        // Bottom edge of the lower body of a pair; larger y is closer to the floor.
        let support_bottom = |a: usize, b: usize| view[a].max().y.max(view[b].max().y);
        pairs.sort_by(|&(a1, b1), &(a2, b2)| support_bottom(a2, b2).total_cmp(&support_bottom(a1, b1)));
    }

    for &(a, b) in pairs.iter() {
        let (first, second) = pair_mut(bodies, a, b);
        let Some((normal, depth)) = overlap(first, second) else {
            continue;
        };
        if normal.y == 0.0 {
            continue;
        }
        // Normal points from `first` to `second`; +y is down.
        let (upper, lower) = if normal.y > 0.0 { (first, second) } else { (second, first) };
        if upper.is_static {
            continue;
        }
        upper.pos.y -= depth;
        if upper.velocity.y > lower.velocity.y {
            upper.velocity.y = lower.velocity.y;
        }
    }
}
