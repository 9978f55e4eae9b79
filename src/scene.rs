//! Frame → drawable primitives, shared by the desktop and web front ends.
//!
//! Coordinates are window pixels with y pointing down. Colors are RGBA in
//! [0, 1].

use serde::Serialize;

use crate::simulation::FrameSnapshot;

pub const NUCLEUS_RADIUS: f32 = 10.0;
pub const ELECTRON_COLOR: [u8; 3] = [100, 200, 255];
pub const LABEL_COLOR: [u8; 3] = [255, 255, 255];
/// Label anchor relative to the nucleus center.
pub const LABEL_OFFSET: [f32; 2] = [12.0, -10.0];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Disc {
    pub center: [f32; 2],
    pub radius: f32,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Everything needed to draw one frame, in draw order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scene {
    pub frame: u64,
    pub width: u32,
    pub height: u32,
    pub discs: Vec<Disc>,
    pub labels: Vec<Label>,
}

pub fn rgba(rgb: [u8; 3], alpha: f32) -> [f32; 4] {
    [
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
        alpha,
    ]
}

/// Opacity of a trail point `age` frames old (0 = current position).
pub fn trail_alpha(age: usize) -> f32 {
    (255.0 - age as f32 * 25.0).max(30.0) / 255.0
}

/// Dot radius shrinks with distance from the screen plane.
pub fn dot_radius(depth: f32) -> f32 {
    (3.0 - depth.abs() * 0.01).max(1.0)
}

pub fn build_scene(snapshot: &FrameSnapshot) -> Scene {
    let mut scene = Scene {
        frame: snapshot.frame,
        width: snapshot.width,
        height: snapshot.height,
        ..Scene::default()
    };

    for atom in &snapshot.atoms {
        let [x, y, _] = atom.position;
        scene.discs.push(Disc {
            center: [x, y],
            radius: NUCLEUS_RADIUS,
            color: rgba(atom.color, 1.0),
        });
        scene.labels.push(Label {
            text: atom.symbol.clone(),
            position: [x + LABEL_OFFSET[0], y + LABEL_OFFSET[1]],
            color: rgba(LABEL_COLOR, 1.0),
        });
    }

    for atom in &snapshot.atoms {
        for electron in &atom.electrons {
            let radius = dot_radius(electron.position[2] - atom.position[2]);
            let newest = electron.trail.len().saturating_sub(1);
            // oldest first so the current position is drawn on top
            for (i, &point) in electron.trail.iter().enumerate() {
                scene.discs.push(Disc {
                    center: point,
                    radius,
                    color: rgba(ELECTRON_COLOR, trail_alpha(newest - i)),
                });
            }
        }
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::simulation::SimulationState;

    #[test]
    fn test_trail_alpha_fades() {
        assert_eq!(trail_alpha(0), 1.0);
        assert!(trail_alpha(1) < trail_alpha(0));
        assert_eq!(trail_alpha(9), 30.0 / 255.0);
        assert_eq!(trail_alpha(50), 30.0 / 255.0);
    }

    #[test]
    fn test_dot_radius() {
        assert_eq!(dot_radius(0.0), 3.0);
        assert!((dot_radius(-100.0) - 2.0).abs() < 1e-5);
        assert_eq!(dot_radius(1000.0), 1.0);
    }

    #[test]
    fn test_scene_layout() {
        let config = AppConfig {
            seed: Some(10),
            ..AppConfig::default()
        };
        let mut state = SimulationState::new(&config).unwrap();
        for _ in 0..4 {
            state.tick();
        }
        let scene = build_scene(&state.snapshot());

        // 3 nuclei, then 13 electrons with 4 trail points each
        assert_eq!(scene.discs.len(), 3 + 13 * 4);
        assert_eq!(scene.labels.len(), 3);
        assert_eq!(scene.discs[0].center, [550.0, 250.0]);
        assert_eq!(scene.discs[0].radius, NUCLEUS_RADIUS);
        assert_eq!(scene.labels[2].text, "O");
        assert_eq!(scene.labels[2].position, [412.0, 340.0]);

        // first electron's newest point is fully opaque and drawn last
        let hydrogen_trail = &scene.discs[3..7];
        assert_eq!(hydrogen_trail[3].color[3], 1.0);
        assert!(hydrogen_trail[0].color[3] < hydrogen_trail[3].color[3]);
        let h = &state.atoms()[0].electrons[0];
        assert_eq!(hydrogen_trail[3].center, h.position().xy());
    }
}
