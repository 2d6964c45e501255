//! Scene descriptions for the 3D games

use glam::{EulerRot, Quat, Vec3};

use super::{Camera, Light, Scene, SceneObject, Shape, Viewport, hex};
use crate::consts::{CAMERA3D_Z, SUN_DISTANCE};
use crate::sim::voxel::BlockKind;
use crate::sim::{Flappy3dState, VoxelState};

const WHITE: u32 = 0xffffff;
const TORCH_STICK: u32 = 0x8b4513;
const TORCH_FLAME: u32 = 0xffa500;
const TORCH_RANGE: f32 = 10.0;

pub fn flappy3d_scene(state: &Flappy3dState, viewport: &Viewport) -> Scene {
    let bird = &state.bird;
    let body_rotation = Quat::from_rotation_x(bird.pitch);
    let mut objects = Vec::with_capacity(state.platforms.len() + 3);

    objects.push(
        SceneObject::new(
            Shape::Sphere,
            bird.pos,
            Vec3::splat(bird.radius),
            hex(0xff6b6b),
        )
        .rotated(body_rotation),
    );
    for side in [-1.0, 1.0] {
        let eye = bird.pos + body_rotation * Vec3::new(0.2 * side, 0.2, -0.4);
        objects.push(SceneObject::new(
            Shape::Sphere,
            eye,
            Vec3::splat(0.1),
            hex(WHITE),
        ));
    }
    objects.push(
        SceneObject::new(
            Shape::Cone,
            bird.pos + body_rotation * Vec3::new(0.0, 0.0, -0.6),
            Vec3::new(0.1, 0.3, 0.1),
            hex(0xffa500),
        )
        .rotated(body_rotation * Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
    );

    for platform in &state.platforms {
        objects.push(SceneObject::new(
            Shape::Cube,
            platform.pos,
            platform.size,
            hex(0x4caf50),
        ));
    }

    Scene {
        sky: hex(0x87ceeb),
        camera: Camera {
            position: Vec3::new(0.0, 0.0, CAMERA3D_Z),
            rotation: Quat::IDENTITY,
        },
        projection: viewport.projection(),
        lights: vec![
            Light::Ambient {
                color: hex(WHITE),
                intensity: 0.5,
            },
            Light::Directional {
                position: Vec3::new(0.0, 1.0, 1.0),
                color: hex(WHITE),
                intensity: 0.5,
            },
        ],
        objects,
    }
}

pub fn voxel_scene(state: &VoxelState, viewport: &Viewport) -> Scene {
    let lighting = state.clock.lighting();
    let sun = state.clock.sun_position(SUN_DISTANCE);

    let mut lights = vec![
        Light::Ambient {
            color: hex(WHITE),
            intensity: lighting.ambient_intensity,
        },
        Light::Directional {
            position: sun,
            color: hex(WHITE),
            intensity: lighting.sun_intensity,
        },
    ];

    let mut objects = Vec::with_capacity(state.world.len() + state.clouds.len() + 1);
    for block in state.world.blocks() {
        if block.kind == BlockKind::Torch {
            objects.push(SceneObject::new(
                Shape::Cylinder,
                block.pos,
                Vec3::new(0.2, 0.5, 0.2),
                hex(TORCH_STICK),
            ));
            objects.push(SceneObject::new(
                Shape::Sphere,
                block.pos + Vec3::Y * 0.3,
                Vec3::splat(0.15),
                hex(TORCH_FLAME),
            ));
        } else {
            objects.push(SceneObject::new(
                Shape::Cube,
                block.pos,
                Vec3::ONE,
                hex(block.kind.color()),
            ));
        }
        if block.kind.emits_light() {
            lights.push(Light::Point {
                position: block.pos + Vec3::Y * 0.5,
                color: hex(TORCH_FLAME),
                intensity: 1.0,
                range: TORCH_RANGE,
            });
        }
    }

    for cloud in &state.clouds {
        let mut color = hex(WHITE);
        color[3] = 0.8;
        objects.push(SceneObject::new(
            Shape::Cube,
            cloud.pos,
            cloud.scale * Vec3::new(4.0, 1.0, 4.0),
            color,
        ));
    }
    objects.push(SceneObject::new(
        Shape::Sphere,
        sun,
        Vec3::splat(5.0),
        hex(0xffff00),
    ));

    let player = &state.player;
    Scene {
        sky: hex(lighting.sky_color),
        camera: Camera {
            position: player.eye(),
            rotation: Quat::from_euler(EulerRot::YXZ, player.yaw, player.pitch, 0.0),
        },
        projection: viewport.projection(),
        lights,
        objects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Flappy3dTuning, VoxelTuning};
    use crate::sim::voxel::Block;

    #[test]
    fn test_flappy3d_scene_layout() {
        let state = Flappy3dState::new(2, Flappy3dTuning::default());
        let viewport = Viewport::new(800, 600);
        let scene = flappy3d_scene(&state, &viewport);
        assert_eq!(scene.camera.position, Vec3::new(0.0, 0.0, 5.0));
        // Body, two eyes, beak, five platforms
        assert_eq!(scene.objects.len(), 9);
        assert_eq!(scene.projection, viewport.projection());
    }

    #[test]
    fn test_voxel_scene_follows_clock_and_torches() {
        let mut state = VoxelState::new(2, VoxelTuning::default());
        state
            .world
            .insert(Block::new(BlockKind::Torch, Vec3::new(2.0, 0.5, 2.0)));
        state.clock.set_minutes(23.0 * 60.0);
        let scene = voxel_scene(&state, &Viewport::default());
        assert_eq!(scene.sky, hex(0x191970));
        let points = scene
            .lights
            .iter()
            .filter(|l| matches!(l, Light::Point { .. }))
            .count();
        assert_eq!(points, 1);
        assert_eq!(scene.camera.position, state.player.eye());
    }
}
