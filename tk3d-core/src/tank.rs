/// Rigid body composer for the tank and the floor it drives on
///
/// Parts are unit meshes sized by a scale, oriented by a rotation and
/// placed by a translation, in that order of effect. Group frames never
/// scale, so the frame of any group is a rigid motion.
use nalgebra::Matrix4;

use crate::geometry::{MeshKind, UNIT_TORUS_MINOR};
use crate::scene::Node;
use crate::state::TankPose;
use crate::transform::LocalTransform;
use crate::tuning::{FloorTuning, TankTuning};

/// Name of the group whose frame sits at the cannon tip, +X along the bore
pub const MUZZLE: &str = "muzzle";

/// The whole tank at `pose`: wheels, axles and the body with its turret
pub fn tank_node(pose: &TankPose, tank: &TankTuning) -> Node {
    let hull = LocalTransform::new()
        .translate(pose.x, 0.0, pose.z)
        .rotate_y(pose.hull_yaw);

    Node::group(
        "tank",
        hull,
        vec![
            wheels_node(pose, tank),
            axles_node(tank),
            body_node(pose, tank),
        ],
    )
}

fn wheels_node(pose: &TankPose, tank: &TankTuning) -> Node {
    let mut wheels = Vec::with_capacity(tank.wheels_per_side * 2);
    for i in 0..tank.wheels_per_side {
        for side in [-1.0, 1.0] {
            let hub = LocalTransform::new()
                .translate(tank.axle_x(i), tank.wheel_radius, side * tank.track_width / 2.0)
                .rotate_z(-pose.wheel_spin);
            wheels.push(Node::group("wheel", hub, wheel_parts(tank)));
        }
    }
    Node::group("wheels", LocalTransform::new(), wheels)
}

/// Tire and rim, both turned so their axis runs along Z
fn wheel_parts(tank: &TankTuning) -> Vec<Node> {
    let d = tank.wheel_radius * 2.0;
    let w = tank.wheel_width;
    vec![
        Node::part(
            "tire",
            MeshKind::Torus,
            LocalTransform::new()
                .rotate_x(90.0)
                .scale(d, w / (2.0 * UNIT_TORUS_MINOR), d),
            tank.tire_color,
        ),
        Node::part(
            "rim",
            MeshKind::Cylinder,
            LocalTransform::new()
                .rotate_x(90.0)
                .scale(d * 0.6, w * 0.8, d * 0.6),
            tank.rim_color,
        ),
    ]
}

fn axles_node(tank: &TankTuning) -> Node {
    let axles = (0..tank.wheels_per_side)
        .map(|i| {
            Node::part(
                "axle",
                MeshKind::Cylinder,
                LocalTransform::new()
                    .translate(tank.axle_x(i), tank.wheel_radius, 0.0)
                    .rotate_x(90.0)
                    .scale(tank.axle_diameter, tank.track_width, tank.axle_diameter),
                tank.axle_color,
            )
        })
        .collect();
    Node::group("axles", LocalTransform::new(), axles)
}

fn body_node(pose: &TankPose, tank: &TankTuning) -> Node {
    let length = tank.hull_length();
    let width = tank.track_width - tank.wheel_width;
    let base_top = tank.base_height / 2.0;

    let base = Node::part(
        "base",
        MeshKind::Cube,
        LocalTransform::new().scale(length, tank.base_height, width),
        tank.base_color,
    );
    // Ridge along the hull's forward axis
    let shell = Node::part(
        "shell",
        MeshKind::Prism,
        LocalTransform::new()
            .translate(0.0, base_top + tank.shell_height / 2.0, 0.0)
            .rotate_y(90.0)
            .scale(width * 0.9, tank.shell_height, length * 0.9),
        tank.shell_color,
    );

    Node::group(
        "body",
        LocalTransform::new().translate(0.0, tank.wheel_radius * 1.2, 0.0),
        vec![base, shell, turret_node(pose, tank, base_top)],
    )
}

fn turret_node(pose: &TankPose, tank: &TankTuning, base_top: f32) -> Node {
    let td = tank.turret_diameter;
    let dome = Node::part(
        "turret_body",
        MeshKind::Sphere,
        LocalTransform::new().scale(td, td * 0.7, td),
        tank.turret_color,
    );

    Node::group(
        "turret",
        LocalTransform::new()
            .translate(0.0, base_top + tank.shell_height * 0.7, 0.0)
            .rotate_y(pose.turret_yaw),
        vec![dome, cannon_node(pose, tank)],
    )
}

/// Breech and barrel along +X, pitched up about Z
fn cannon_node(pose: &TankPose, tank: &TankTuning) -> Node {
    let bl = tank.breech_length;
    let len = tank.barrel_length;

    let breech = Node::part(
        "breech",
        MeshKind::Cylinder,
        LocalTransform::new()
            .translate(bl / 2.0, 0.0, 0.0)
            .rotate_z(-90.0)
            .scale(tank.breech_diameter, bl, tank.breech_diameter),
        tank.cannon_color,
    );
    let barrel = Node::part(
        "barrel",
        MeshKind::Cylinder,
        LocalTransform::new()
            .translate(bl + len / 2.0, 0.0, 0.0)
            .rotate_z(-90.0)
            .scale(tank.barrel_diameter, len, tank.barrel_diameter),
        tank.cannon_color,
    );
    let muzzle = Node::group(
        MUZZLE,
        LocalTransform::new().translate(bl + len, 0.0, 0.0),
        Vec::new(),
    );

    Node::group(
        "cannon",
        LocalTransform::new()
            .translate(tank.turret_diameter * 0.35, tank.turret_diameter * 0.1, 0.0)
            .rotate_z(pose.cannon_pitch),
        vec![breech, barrel, muzzle],
    )
}

/// World transform of the cannon tip, +X along the bore. `None` only if
/// the tree built by `tank_node` has lost its `MUZZLE` group.
pub fn muzzle_transform(pose: &TankPose, tank: &TankTuning) -> Option<Matrix4<f32>> {
    let muzzle = tank_node(pose, tank).locate(MUZZLE, &Matrix4::identity());
    debug_assert!(muzzle.is_some(), "tank tree has no `{MUZZLE}` group");
    muzzle
}

/// Checkerboard of tiles centered on the origin, top faces at y = 0
pub fn floor_node(floor: &FloorTuning) -> Node {
    let n = floor.tiles_per_side;
    let size = floor.tile_size;
    let first = -floor.half_width() + size / 2.0;

    let mut tiles = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let color = if (i + j) % 2 == 0 {
                floor.light_color
            } else {
                floor.dark_color
            };
            tiles.push(Node::part(
                "tile",
                MeshKind::Cube,
                LocalTransform::new()
                    .translate(
                        first + i as f32 * size,
                        -floor.tile_thickness / 2.0,
                        first + j as f32 * size,
                    )
                    .scale(size, floor.tile_thickness, size),
                color,
            ));
        }
    }
    Node::group("floor", LocalTransform::new(), tiles)
}
