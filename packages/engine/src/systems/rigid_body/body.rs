use super::vec2::Vec2;

/// Surface and air behaviour of a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Coulomb friction coefficient against other bodies
    pub friction: f32,
    /// Fraction of velocity lost to air each step
    pub friction_air: f32,
    /// Bounciness (0.0 = no bounce, 1.0 = full elastic)
    pub restitution: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            friction: 0.1,
            friction_air: 0.01,
            restitution: 0.0,
        }
    }
}

/// Rigid Body - moves as a single unit
#[derive(Clone, Debug)]
pub struct RigidBody {
    // === Physics State ===
    /// World position (center of mass)
    pub pos: Vec2,
    /// Velocity vector (pixels per millisecond)
    pub velocity: Vec2,
    /// Force accumulated since the last step
    pub force: Vec2,
    /// Rotation angle (radians), rendered but not simulated
    pub angle: f32,
    /// 1 / (density * area); 0.0 for static bodies
    pub inv_mass: f32,
    /// Is body active (simulated)?
    pub active: bool,
    /// Unique ID for this body (assigned by the system)
    pub id: u32,

    // === Shape Definition ===
    pub half_width: f32,
    pub half_height: f32,
    /// Corner radius for rendering
    pub chamfer: f32,

    /// Position at the start of the current step; decides contact normals
    pub prev_pos: Vec2,

    pub material: Material,
    pub is_static: bool,
    /// Static bodies that exist only to keep blocks on screen
    pub visible: bool,
}

impl RigidBody {
    /// Create a dynamic rectangular body centered at (x, y)
    pub fn new_rect(x: f32, y: f32, w: f32, h: f32, density: f32, material: Material) -> Self {
        let w = w.max(1.0);
        let h = h.max(1.0);
        let mass = (density * w * h).max(f32::EPSILON);

        Self {
            pos: Vec2::new(x, y),
            velocity: Vec2::zero(),
            force: Vec2::zero(),
            angle: 0.0,
            inv_mass: 1.0 / mass,
            active: true,
            id: 0,
            half_width: w / 2.0,
            half_height: h / 2.0,
            chamfer: 0.0,
            prev_pos: Vec2::new(x, y),
            material,
            is_static: false,
            visible: true,
        }
    }

    /// Create an immovable rectangle (floor, walls)
    pub fn new_static_rect(x: f32, y: f32, w: f32, h: f32, material: Material) -> Self {
        let mut body = Self::new_rect(x, y, w, h, 1.0, material);
        body.inv_mass = 0.0;
        body.is_static = true;
        body
    }

    pub fn with_chamfer(mut self, radius: f32) -> Self {
        self.chamfer = radius.max(0.0);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn width(&self) -> f32 {
        self.half_width * 2.0
    }

    pub fn height(&self) -> f32 {
        self.half_height * 2.0
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.pos.x - self.half_width, self.pos.y - self.half_height)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.half_width, self.pos.y + self.half_height)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (point.x - self.pos.x).abs() <= self.half_width && (point.y - self.pos.y).abs() <= self.half_height
    }

    /// Transform local coordinates to world coordinates
    #[inline]
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        let (sin, cos) = self.angle.sin_cos();
        Vec2::new(
            self.pos.x + local.x * cos - local.y * sin,
            self.pos.y + local.x * sin + local.y * cos,
        )
    }

    /// Transform world coordinates into this body's local frame
    #[inline]
    pub fn world_to_local(&self, world: Vec2) -> Vec2 {
        let (sin, cos) = self.angle.sin_cos();
        let d = world - self.pos;
        Vec2::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos)
    }

    /// Remember where the body started this step (call before integrating)
    pub fn save_prev_state(&mut self) {
        self.prev_pos = self.pos;
    }

    /// Accumulate a force for the next step
    pub fn apply_force(&mut self, force: Vec2) {
        if !self.is_static {
            self.force += force;
        }
    }
}
