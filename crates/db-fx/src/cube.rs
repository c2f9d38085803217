//! Cube 3D en rotation : transformations pures, projection perspective,
//! tri des faces par profondeur (algorithme du peintre).
//!
//! Les angles sont recalculés depuis le temps à chaque frame, sans
//! intégration : reprendre après une pause fait sauter la rotation.

use db_core::color::Color;
use db_core::surface::{Point, Surface};
use db_core::timeline::EffectKind;
use glam::{Vec2, Vec3};

use crate::Effect;

/// Demi-côté du cube.
pub const HALF_EXTENT: f32 = 50.0;
/// Distance caméra du modèle sténopé.
pub const CAMERA_DISTANCE: f32 = 200.0;

const S: f32 = HALF_EXTENT;

pub const VERTICES: [Vec3; 8] = [
    Vec3::new(-S, -S, -S),
    Vec3::new(S, -S, -S),
    Vec3::new(S, S, -S),
    Vec3::new(-S, S, -S),
    Vec3::new(-S, -S, S),
    Vec3::new(S, -S, S),
    Vec3::new(S, S, S),
    Vec3::new(-S, S, S),
];

pub const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

pub const FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
    [0, 3, 7, 4],
    [1, 2, 6, 5],
];

#[must_use]
pub fn rotate_x(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x, p.y * c - p.z * s, p.y * s + p.z * c)
}

#[must_use]
pub fn rotate_y(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x * c + p.z * s, p.y, -p.x * s + p.z * c)
}

#[must_use]
pub fn rotate_z(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x * c - p.y * s, p.x * s + p.y * c, p.z)
}

/// Angles (x, y, z) au temps `time` : 0.7, 0.5 et 0.3 rad/s.
#[must_use]
pub fn rotation_angles(time: f64) -> Vec3 {
    Vec3::new((time * 0.7) as f32, (time * 0.5) as f32, (time * 0.3) as f32)
}

/// Applique les rotations dans l'ordre X, puis Y, puis Z.
///
/// # Example
/// ```
/// use db_fx::cube::transform;
/// use glam::Vec3;
/// let p = Vec3::new(50.0, 50.0, 50.0);
/// assert_eq!(transform(p, Vec3::ZERO), p);
/// ```
#[must_use]
pub fn transform(p: Vec3, angles: Vec3) -> Vec3 {
    rotate_z(rotate_y(rotate_x(p, angles.x), angles.y), angles.z)
}

/// Projection perspective centrée sur la surface.
#[must_use]
pub fn project(p: Vec3, width: f32, height: f32) -> Vec2 {
    let scale = CAMERA_DISTANCE / (CAMERA_DISTANCE + p.z);
    Vec2::new(width / 2.0 + p.x * scale, height / 2.0 + p.y * scale)
}

/// Profondeur moyenne d'une face après transformation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceDepth {
    /// Index d'origine dans `FACES`, qui fixe aussi la couleur.
    pub index: usize,
    pub depth: f32,
}

/// Faces triées de la plus lointaine (z petit) à la plus proche.
///
/// Tri stable : à profondeur égale, l'ordre de `FACES` est conservé.
#[must_use]
pub fn depth_sorted_faces(vertices: &[Vec3; 8]) -> [FaceDepth; 6] {
    let mut faces: [FaceDepth; 6] = std::array::from_fn(|index| {
        let sum: f32 = FACES[index].iter().map(|&v| vertices[v].z).sum();
        FaceDepth {
            index,
            depth: sum / 4.0,
        }
    });
    faces.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    faces
}

/// Couleur d'une face selon son index d'origine, pas sa place dans le tri.
#[must_use]
pub fn face_color(index: usize, time: f64) -> Color {
    let hue = ((index * 60) as f64 + time * 30.0) % 360.0;
    Color::Hsl(hue, 80.0, 40.0 + (index * 8) as f64)
}

pub struct RotatingCube {
    width: f32,
    height: f32,
}

impl RotatingCube {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }
}

impl Effect for RotatingCube {
    fn kind(&self) -> EffectKind {
        EffectKind::Cube
    }

    fn render(&mut self, surface: &mut dyn Surface, time: f64) {
        let angles = rotation_angles(time);
        let rotated = VERTICES.map(|v| transform(v, angles));
        let screen: [Point; 8] = rotated.map(|v| project(v, self.width, self.height).into());

        for face in depth_sorted_faces(&rotated) {
            let quad = FACES[face.index].map(|v| screen[v]);
            surface.fill_polygon(&quad, face_color(face.index, time));
        }

        for (a, b) in EDGES {
            surface.stroke_line(screen[a], screen[b], 1.0, Color::WHITE);
        }

        for (x, y) in screen {
            surface.fill_rect(x - 1.0, y - 1.0, 2.0, 2.0, Color::WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawOp, RecordingSurface};

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn zero_angles_are_identity() {
        let p = Vec3::new(50.0, 50.0, 50.0);
        assert_eq!(transform(p, Vec3::ZERO), p);
        for v in VERTICES {
            assert_eq!(transform(v, Vec3::ZERO), v);
        }
    }

    #[test]
    fn quarter_turns() {
        let half_pi = std::f32::consts::FRAC_PI_2;
        assert!(close(rotate_x(Vec3::Y, half_pi), Vec3::Z));
        assert!(close(rotate_y(Vec3::Z, half_pi), Vec3::X));
        assert!(close(rotate_z(Vec3::X, half_pi), Vec3::Y));
    }

    #[test]
    fn rotation_order_is_x_then_y_then_z() {
        let half_pi = std::f32::consts::FRAC_PI_2;
        let angles = Vec3::new(half_pi, half_pi, 0.0);
        // X : Y → Z, puis Y : Z → X
        assert!(close(transform(Vec3::Y, angles), Vec3::X));
    }

    #[test]
    fn rotation_preserves_length() {
        let angles = rotation_angles(12.34);
        for v in VERTICES {
            let r = transform(v, angles);
            assert!((r.length() - v.length()).abs() < 1e-3);
        }
    }

    #[test]
    fn projection_centres_origin_and_shrinks_far_points() {
        assert_eq!(project(Vec3::ZERO, 320.0, 256.0), Vec2::new(160.0, 128.0));
        let near = project(Vec3::new(50.0, 0.0, -50.0), 320.0, 256.0);
        let far = project(Vec3::new(50.0, 0.0, 50.0), 320.0, 256.0);
        assert!(near.x > far.x);
        assert!((far.x - 200.0).abs() < 1e-4);
    }

    #[test]
    fn faces_sorted_back_to_front() {
        let rotated = VERTICES.map(|v| transform(v, rotation_angles(3.0)));
        let faces = depth_sorted_faces(&rotated);
        for pair in faces.windows(2) {
            assert!(pair[0].depth <= pair[1].depth);
        }
        let mut seen: Vec<usize> = faces.iter().map(|f| f.index).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn equal_depths_keep_face_order() {
        // à plat : toutes les faces ont la même profondeur
        let flat = VERTICES.map(|v| Vec3::new(v.x, v.y, 0.0));
        let order: Vec<usize> = depth_sorted_faces(&flat).iter().map(|f| f.index).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn identity_pose_draws_back_face_first() {
        let faces = depth_sorted_faces(&VERTICES);
        assert_eq!(faces[0].index, 0);
        assert_eq!(faces[5].index, 1);
    }

    #[test]
    fn colour_uses_original_index() {
        assert_eq!(face_color(0, 0.0), Color::Hsl(0.0, 80.0, 40.0));
        assert_eq!(face_color(5, 0.0), Color::Hsl(300.0, 80.0, 80.0));
        assert_eq!(face_color(1, 11.0), Color::Hsl(30.0, 80.0, 48.0));
    }

    #[test]
    fn draws_faces_then_edges_then_vertices() {
        let mut cube = RotatingCube::new(320, 256);
        let mut surface = RecordingSurface::new(320, 256);
        cube.render(&mut surface, 0.0);

        let kinds: Vec<u8> = surface
            .ops
            .iter()
            .map(|op| match op {
                DrawOp::Polygon { .. } => 0,
                DrawOp::Line { .. } => 1,
                DrawOp::FillRect { .. } => 2,
                _ => 9,
            })
            .collect();
        let mut expected = vec![0; 6];
        expected.extend([1; 12]);
        expected.extend([2; 8]);
        assert_eq!(kinds, expected);

        // pose identité : première face dessinée = face 0, couleur d'index 0
        match &surface.ops[0] {
            DrawOp::Polygon { points, color } => {
                assert_eq!(points.len(), 4);
                assert_eq!(*color, face_color(0, 0.0));
            }
            other => panic!("attendu un polygone, obtenu {other:?}"),
        }
    }
}
