//! The café itself: every piece of furniture, the barista, the wall art and
//! the light set, assembled into the scene graph. Decorative jitter (rose
//! petals, book heights, plant stems) comes from per-cluster seeded RNGs so a
//! given seed always builds the same room.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::interaction::{Interactable, InteractionRegistry};
use crate::scene::{Light, MaterialDesc, NodeId, Primitive, Scene, SceneNode, Transform};

use super::palette;

const TAU: f32 = std::f32::consts::TAU;
const PI: f32 = std::f32::consts::PI;

/// Handles to the interesting nodes, mostly for tests and the controller sim.
pub struct CafeHandles {
    pub character: NodeId,
    pub table: NodeId,
    pub cup: NodeId,
    pub vase: NodeId,
    pub chairs: [NodeId; 2],
    pub shelf: NodeId,
    pub painting: NodeId,
    pub plant: NodeId,
    pub dining_set: NodeId,
}

/// Builds the full café under the scene root and registers the interactive
/// pieces. The cup and the rose vase can be picked up; the furniture only
/// reacts to hover.
pub fn build_cafe(scene: &mut Scene, registry: &mut InteractionRegistry, seed: u64) -> CafeHandles {
    let root = scene.graph.root();

    spawn_floor(scene, root);
    let character = spawn_character(scene, root);
    let (table, table_top) = spawn_table(scene, root);
    let cup = spawn_coffee_cup(scene, root);
    let vase = spawn_rose_vase(scene, root, StdRng::seed_from_u64(seed ^ 0x1));
    let chairs = [
        spawn_chair(scene, root, 0, Vec3::new(3.5, 0.0, 0.0), PI * 0.1),
        spawn_chair(scene, root, 1, Vec3::ZERO, -PI * 0.1),
    ];
    let shelf = spawn_shelf(scene, root, StdRng::seed_from_u64(seed ^ 0x2));
    let painting = spawn_back_wall(scene, root);
    let plant = spawn_potted_plant(scene, root, StdRng::seed_from_u64(seed ^ 0x3));
    let dining_set = spawn_dining_set(scene, root);
    spawn_lights(scene);

    registry.register(&mut scene.graph, Interactable::new(cup, 0.15));
    registry.register(&mut scene.graph, Interactable::new(vase, 0.15));
    registry.register(&mut scene.graph, Interactable::fixed(character, 0.6));
    registry.register(
        &mut scene.graph,
        Interactable::fixed(table, 0.9).with_highlight(vec![table_top]),
    );
    for &(chair, seat) in &chairs {
        registry.register(
            &mut scene.graph,
            Interactable::fixed(chair, 0.5).with_highlight(vec![seat]),
        );
    }
    registry.register(&mut scene.graph, Interactable::fixed(shelf, 1.1));
    registry.register(&mut scene.graph, Interactable::fixed(plant, 0.7));
    registry.register(&mut scene.graph, Interactable::fixed(dining_set, 1.2));

    CafeHandles {
        character,
        table,
        cup,
        vase,
        chairs: [chairs[0].0, chairs[1].0],
        shelf,
        painting,
        plant,
        dining_set,
    }
}

fn spawn_floor(scene: &mut Scene, root: NodeId) {
    scene.graph.insert(
        root,
        SceneNode::primitive(
            "floor",
            Transform::from_position(Vec3::new(0.0, -0.5, 0.0)),
            Primitive::Plane {
                width: 20.0,
                depth: 20.0,
            },
            MaterialDesc::colored(palette::FLOOR).with_surface(0.8, 0.2),
        ),
    );
}

fn cuboid(size: Vec3) -> Primitive {
    Primitive::Cuboid { size }
}

fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> Primitive {
    Primitive::Cylinder {
        radius_top,
        radius_bottom,
        height,
        segments,
    }
}

fn spawn_character(scene: &mut Scene, root: NodeId) -> NodeId {
    let graph = &mut scene.graph;
    let skin = MaterialDesc::colored(palette::LIGHT_GRAY);
    let clothes = MaterialDesc::colored(palette::DARK_GRAY);
    let hair = MaterialDesc::colored(palette::BLONDE_HAIR);

    let character = graph.insert(
        root,
        SceneNode::group(
            "barista",
            Transform::from_position(Vec3::new(-2.0, 0.0, 0.0))
                .with_rotation(Vec3::new(0.0, PI * 0.25, 0.0)),
        ),
    );

    // Torso, waist and the gold name tag.
    let body = graph.insert(
        character,
        SceneNode::group("body", Transform::from_position(Vec3::new(0.0, 0.9, 0.0))),
    );
    graph.insert(
        body,
        SceneNode::primitive(
            "torso",
            Transform::from_position(Vec3::new(0.0, 0.3, 0.0)),
            cuboid(Vec3::new(0.4, 0.6, 0.2)),
            skin.clone(),
        ),
    );
    let tag = graph.insert(
        body,
        SceneNode::group(
            "name-tag",
            Transform::from_position(Vec3::new(0.12, 0.4, 0.101)),
        ),
    );
    graph.insert(
        tag,
        SceneNode::primitive(
            "tag-face",
            Transform::new(),
            cuboid(Vec3::new(0.12, 0.04, 0.001)),
            MaterialDesc::colored(palette::NAME_TAG_GOLD).with_surface(0.3, 0.7),
        ),
    );
    graph.insert(
        tag,
        SceneNode::primitive(
            "tag-border",
            Transform::from_position(Vec3::new(0.0, 0.0, -0.001)),
            cuboid(Vec3::new(0.13, 0.05, 0.002)),
            MaterialDesc::colored(palette::BLACK).with_surface(0.8, 0.0),
        ),
    );
    graph.insert(
        body,
        SceneNode::primitive(
            "waist",
            Transform::from_position(Vec3::new(0.0, -0.1, 0.0)),
            cuboid(Vec3::new(0.35, 0.2, 0.2)),
            clothes.clone(),
        ),
    );

    // Head, face and blonde hair.
    let head_group = graph.insert(
        character,
        SceneNode::group("head", Transform::from_position(Vec3::new(0.0, 1.8, 0.0))),
    );
    graph.insert(
        head_group,
        SceneNode::primitive(
            "neck",
            Transform::from_position(Vec3::new(0.0, -0.1, 0.0)),
            cylinder(0.08, 0.1, 0.1, 16),
            skin.clone(),
        ),
    );
    let face = graph.insert(
        head_group,
        SceneNode::group("face", Transform::from_position(Vec3::new(0.0, 0.1, 0.0))),
    );
    graph.insert(
        face,
        SceneNode::primitive(
            "skull",
            Transform::new(),
            cylinder(0.15, 0.15, 0.25, 16),
            skin.clone(),
        ),
    );
    graph.insert(
        face,
        SceneNode::primitive(
            "mouth",
            Transform::from_position(Vec3::new(0.0, 0.0, 0.15)),
            cuboid(Vec3::new(0.12, 0.04, 0.02)),
            clothes.clone(),
        ),
    );
    for (i, x) in [0.04f32, -0.04].iter().enumerate() {
        graph.insert(
            face,
            SceneNode::primitive(
                format!("eye-{}", i),
                Transform::from_position(Vec3::new(*x, 0.02, 0.15)),
                cuboid(Vec3::new(0.03, 0.03, 0.02)),
                MaterialDesc::colored(palette::BLACK),
            ),
        );
    }
    graph.insert(
        face,
        SceneNode::primitive(
            "hair-top",
            Transform::from_position(Vec3::new(0.0, 0.15, 0.0)),
            cuboid(Vec3::new(0.32, 0.1, 0.32)),
            hair.clone(),
        ),
    );
    for (i, x) in [0.16f32, -0.16].iter().enumerate() {
        graph.insert(
            face,
            SceneNode::primitive(
                format!("hair-side-{}", i),
                Transform::from_position(Vec3::new(*x, -0.05, 0.0)),
                cuboid(Vec3::new(0.08, 0.35, 0.15)),
                hair.clone(),
            ),
        );
    }
    graph.insert(
        face,
        SceneNode::primitive(
            "hair-back",
            Transform::from_position(Vec3::new(0.0, -0.05, -0.12)),
            cuboid(Vec3::new(0.3, 0.4, 0.1)),
            hair,
        ),
    );

    // Arms hang from the shoulders; each ends in a palm and fingers.
    let arms = graph.insert(
        character,
        SceneNode::group("arms", Transform::from_position(Vec3::new(0.0, 1.4, 0.0))),
    );
    for (side, sign) in [("left", -1.0f32), ("right", 1.0)] {
        let arm = graph.insert(
            arms,
            SceneNode::group(
                format!("arm-{}", side),
                Transform::from_position(Vec3::new(sign * 0.25, 0.0, 0.0)),
            ),
        );
        graph.insert(
            arm,
            SceneNode::primitive(
                "upper",
                Transform::from_position(Vec3::new(sign * 0.1, -0.2, 0.0))
                    .with_rotation(Vec3::new(0.0, 0.0, -sign * 0.4)),
                cylinder(0.05, 0.05, 0.4, 8),
                skin.clone(),
            ),
        );
        graph.insert(
            arm,
            SceneNode::primitive(
                "lower",
                Transform::from_position(Vec3::new(sign * 0.25, -0.5, 0.0))
                    .with_rotation(Vec3::new(0.0, 0.0, -sign * 0.1)),
                cylinder(0.05, 0.05, 0.4, 8),
                skin.clone(),
            ),
        );
        let hand = graph.insert(
            arm,
            SceneNode::group(
                "hand",
                Transform::from_position(Vec3::new(sign * 0.3, -0.7, 0.0)),
            ),
        );
        graph.insert(
            hand,
            SceneNode::primitive(
                "palm",
                Transform::new(),
                cuboid(Vec3::new(0.08, 0.12, 0.04)),
                skin.clone(),
            ),
        );
        graph.insert(
            hand,
            SceneNode::primitive(
                "fingers",
                Transform::from_position(Vec3::new(0.0, -0.08, 0.02)),
                cuboid(Vec3::new(0.08, 0.06, 0.03)),
                skin.clone(),
            ),
        );
    }

    // Legs: thigh, calf, foot.
    let legs = graph.insert(
        character,
        SceneNode::group("legs", Transform::from_position(Vec3::new(0.0, 0.5, 0.0))),
    );
    for (side, sign) in [("left", -1.0f32), ("right", 1.0)] {
        let leg = graph.insert(
            legs,
            SceneNode::group(
                format!("leg-{}", side),
                Transform::from_position(Vec3::new(sign * 0.1, 0.0, 0.0)),
            ),
        );
        graph.insert(
            leg,
            SceneNode::primitive(
                "thigh",
                Transform::from_position(Vec3::new(0.0, -0.25, 0.0)),
                cylinder(0.07, 0.07, 0.5, 8),
                clothes.clone(),
            ),
        );
        graph.insert(
            leg,
            SceneNode::primitive(
                "calf",
                Transform::from_position(Vec3::new(0.0, -0.7, 0.05)),
                cylinder(0.07, 0.07, 0.4, 8),
                skin.clone(),
            ),
        );
        graph.insert(
            leg,
            SceneNode::primitive(
                "foot",
                Transform::from_position(Vec3::new(0.0, -0.9, 0.1)),
                cuboid(Vec3::new(0.1, 0.1, 0.2)),
                clothes.clone(),
            ),
        );
    }

    character
}

/// Round table. Returns the group node and the table-top node used for the
/// hover highlight.
fn spawn_table(scene: &mut Scene, root: NodeId) -> (NodeId, NodeId) {
    let graph = &mut scene.graph;
    let wood = MaterialDesc::colored(palette::DARK_BROWN).with_surface(0.7, 0.1);

    let table = graph.insert(
        root,
        SceneNode::group("table", Transform::from_position(Vec3::new(1.5, 0.0, 0.0))),
    );
    let top = graph.insert(
        table,
        SceneNode::primitive(
            "table-top",
            Transform::from_position(Vec3::new(0.0, 0.7, 0.0)),
            cylinder(0.9, 0.9, 0.05, 32),
            wood.clone(),
        ),
    );
    graph.insert(
        table,
        SceneNode::primitive(
            "table-leg",
            Transform::from_position(Vec3::new(0.0, 0.35, 0.0)),
            cylinder(0.08, 0.08, 0.7, 8),
            wood.clone(),
        ),
    );
    graph.insert(
        table,
        SceneNode::primitive(
            "table-base",
            Transform::new(),
            cylinder(0.4, 0.4, 0.05, 16),
            wood,
        ),
    );

    (table, top)
}

/// Coffee cup with a three-piece handle and a coffee surface. Sits on the
/// table but lives at the top level so grabbing it moves it in world space.
fn spawn_coffee_cup(scene: &mut Scene, root: NodeId) -> NodeId {
    let graph = &mut scene.graph;
    let china = MaterialDesc::colored(palette::WHITE).with_surface(0.2, 0.1);

    let cup = graph.insert(
        root,
        SceneNode::group("cup", Transform::from_position(Vec3::new(1.8, 0.75, 0.0))),
    );
    graph.insert(
        cup,
        SceneNode::primitive(
            "cup-body",
            Transform::new(),
            cylinder(0.06, 0.04, 0.12, 16),
            china.clone(),
        ),
    );
    let handle = graph.insert(
        cup,
        SceneNode::group(
            "cup-handle",
            Transform::from_position(Vec3::new(0.06, 0.0, 0.0))
                .with_rotation(Vec3::new(0.0, -PI / 2.0, 0.0)),
        ),
    );
    graph.insert(
        handle,
        SceneNode::primitive(
            "handle-bottom",
            Transform::new(),
            cylinder(0.03, 0.03, 0.02, 8),
            china.clone(),
        ),
    );
    graph.insert(
        handle,
        SceneNode::primitive(
            "handle-middle",
            Transform::from_position(Vec3::new(0.0, 0.04, 0.0))
                .with_rotation(Vec3::new(PI / 2.0, 0.0, 0.0)),
            cylinder(0.03, 0.03, 0.04, 8),
            china.clone(),
        ),
    );
    graph.insert(
        handle,
        SceneNode::primitive(
            "handle-top",
            Transform::from_position(Vec3::new(0.0, 0.08, 0.0)),
            cylinder(0.03, 0.03, 0.02, 8),
            china,
        ),
    );
    graph.insert(
        cup,
        SceneNode::primitive(
            "coffee-surface",
            Transform::from_position(Vec3::new(0.0, 0.06, 0.0)),
            cylinder(0.055, 0.055, 0.01, 16),
            MaterialDesc::colored(palette::COFFEE).with_surface(0.3, 0.0),
        ),
    );

    cup
}

/// Glass vase with water and three roses. Stem angles, petal tilts and leaf
/// orientations are jittered from the cluster RNG.
fn spawn_rose_vase(scene: &mut Scene, root: NodeId, mut rng: StdRng) -> NodeId {
    let graph = &mut scene.graph;

    let vase = graph.insert(
        root,
        SceneNode::group("vase", Transform::from_position(Vec3::new(1.3, 0.75, 0.0))),
    );
    graph.insert(
        vase,
        SceneNode::primitive(
            "vase-glass",
            Transform::new(),
            cylinder(0.04, 0.03, 0.12, 16),
            MaterialDesc::colored(palette::WHITE)
                .with_surface(0.1, 0.3)
                .with_opacity(0.6),
        ),
    );
    graph.insert(
        vase,
        SceneNode::primitive(
            "vase-water",
            Transform::from_position(Vec3::new(0.0, -0.01, 0.0)),
            cylinder(0.035, 0.025, 0.08, 16),
            MaterialDesc::colored(palette::WATER)
                .with_surface(0.1, 0.0)
                .with_opacity(0.3),
        ),
    );

    for i in 0..3 {
        let angle = (i as f32 * TAU) / 3.0 + rng.gen::<f32>() * 0.5;
        let radius = 0.01 + rng.gen::<f32>() * 0.01;
        let stem = graph.insert(
            vase,
            SceneNode::group(
                format!("rose-{}", i),
                Transform::from_position(Vec3::new(
                    radius * angle.cos(),
                    0.06,
                    radius * angle.sin(),
                )),
            ),
        );
        graph.insert(
            stem,
            SceneNode::primitive(
                "stem",
                Transform::from_position(Vec3::new(0.0, 0.075, 0.0)).with_rotation(Vec3::new(
                    0.2 * rng.gen::<f32>(),
                    0.0,
                    0.2 * rng.gen::<f32>(),
                )),
                cylinder(0.003, 0.003, 0.15, 8),
                MaterialDesc::colored(palette::ROSE_GREEN),
            ),
        );

        let flower = graph.insert(
            stem,
            SceneNode::group(
                "flower",
                Transform::from_position(Vec3::new(0.0, 0.15, 0.0)).with_rotation(Vec3::new(
                    0.2 * rng.gen::<f32>(),
                    0.0,
                    0.2 * rng.gen::<f32>(),
                )),
            ),
        );
        graph.insert(
            flower,
            SceneNode::primitive(
                "rose-center",
                Transform::new(),
                cylinder(0.015, 0.015, 0.02, 16),
                MaterialDesc::colored(palette::ROSE_RED),
            ),
        );
        for petal in 0..8 {
            let petal_angle = (petal as f32 * TAU) / 8.0;
            graph.insert(
                flower,
                SceneNode::primitive(
                    format!("petal-{}", petal),
                    Transform::from_position(Vec3::new(
                        0.01 * petal_angle.cos(),
                        0.0,
                        0.01 * petal_angle.sin(),
                    ))
                    .with_rotation(Vec3::new(
                        0.3 + rng.gen::<f32>() * 0.2,
                        petal_angle,
                        0.5 + rng.gen::<f32>() * 0.2,
                    )),
                    cuboid(Vec3::new(0.02, 0.01, 0.02)),
                    MaterialDesc::colored(palette::ROSE_RED).with_surface(0.6, 0.0),
                ),
            );
        }
        for leaf in 0..2 {
            graph.insert(
                stem,
                SceneNode::primitive(
                    format!("leaf-{}", leaf),
                    Transform::from_position(Vec3::new(0.0, 0.05 + leaf as f32 * 0.06, 0.0))
                        .with_rotation(Vec3::new(0.0, TAU * rng.gen::<f32>(), 0.0)),
                    cuboid(Vec3::new(0.02, 0.01, 0.04)),
                    MaterialDesc::colored(palette::ROSE_GREEN),
                ),
            );
        }
    }

    vase
}

/// One chair. Returns the group node and the seat node for highlighting.
fn spawn_chair(
    scene: &mut Scene,
    root: NodeId,
    index: usize,
    position: Vec3,
    yaw: f32,
) -> (NodeId, NodeId) {
    let graph = &mut scene.graph;
    let wood = MaterialDesc::colored(palette::LIGHT_BROWN).with_surface(0.9, 0.1);

    let chair = graph.insert(
        root,
        SceneNode::group(
            format!("chair-{}", index),
            Transform::from_position(position).with_rotation(Vec3::new(0.0, yaw, 0.0)),
        ),
    );
    let seat = graph.insert(
        chair,
        SceneNode::primitive(
            "seat",
            Transform::from_position(Vec3::new(0.0, 0.45, 0.0)),
            cuboid(Vec3::new(0.45, 0.05, 0.45)),
            wood.clone(),
        ),
    );
    graph.insert(
        chair,
        SceneNode::primitive(
            "back",
            Transform::from_position(Vec3::new(0.0, 0.7, -0.2)),
            cuboid(Vec3::new(0.45, 0.5, 0.05)),
            wood.clone(),
        ),
    );
    for (i, (x, z)) in [(-0.2f32, -0.2f32), (0.2, -0.2), (-0.2, 0.2), (0.2, 0.2)]
        .iter()
        .enumerate()
    {
        graph.insert(
            chair,
            SceneNode::primitive(
                format!("leg-{}", i),
                Transform::from_position(Vec3::new(*x, 0.225, *z)),
                cuboid(Vec3::new(0.05, 0.45, 0.05)),
                wood.clone(),
            ),
        );
    }

    (chair, seat)
}

/// Wall shelf with five books and a small plant. Book heights, thicknesses,
/// tilts and cover colors are jittered; every other book gets a textured
/// spine.
fn spawn_shelf(scene: &mut Scene, root: NodeId, mut rng: StdRng) -> NodeId {
    let graph = &mut scene.graph;
    let board = MaterialDesc::colored(palette::WHITE).with_surface(0.6, 0.1);

    let shelf = graph.insert(
        root,
        SceneNode::group("shelf", Transform::from_position(Vec3::new(3.0, 2.0, -7.8))),
    );
    graph.insert(
        shelf,
        SceneNode::primitive(
            "shelf-board",
            Transform::new(),
            cuboid(Vec3::new(2.0, 0.08, 0.3)),
            board.clone(),
        ),
    );
    for (i, x) in [-0.8f32, 0.8].iter().enumerate() {
        graph.insert(
            shelf,
            SceneNode::primitive(
                format!("support-{}", i),
                Transform::from_position(Vec3::new(*x, -0.1, 0.0)),
                cuboid(Vec3::new(0.08, 0.2, 0.3)),
                board.clone(),
            ),
        );
    }

    for i in 0..5 {
        let x = -0.8 + i as f32 * 0.2;
        let height = 0.3 + rng.gen::<f32>() * 0.1;
        let thickness = 0.05 + rng.gen::<f32>() * 0.03;
        let tilt = rng.gen::<f32>() * 0.1 - 0.05;

        let book = graph.insert(
            shelf,
            SceneNode::group(
                format!("book-{}", i),
                Transform::from_position(Vec3::new(x, height / 2.0 + 0.04, 0.0))
                    .with_rotation(Vec3::new(0.0, 0.0, tilt)),
            ),
        );

        let cover = if i % 2 == 0 {
            MaterialDesc::colored(palette::WHITE)
                .with_surface(0.7, 0.0)
                .with_texture(format!("assets/books/book{}.jpg", (i % 3) + 1))
        } else {
            let color = palette::BOOK_COVERS[rng.gen_range(0..palette::BOOK_COVERS.len())];
            MaterialDesc::colored(color).with_surface(0.7, 0.0)
        };
        graph.insert(
            book,
            SceneNode::primitive(
                "body",
                Transform::new(),
                cuboid(Vec3::new(thickness, height, 0.25)),
                cover,
            ),
        );
        graph.insert(
            book,
            SceneNode::primitive(
                "spine-band",
                Transform::from_position(Vec3::new(0.0, height * 0.2, 0.0)),
                cuboid(Vec3::new(thickness + 0.001, height * 0.1, 0.252)),
                MaterialDesc::colored(palette::WHITE).with_surface(0.8, 0.0),
            ),
        );
        for (j, z) in [0.13f32, -0.13].iter().enumerate() {
            graph.insert(
                book,
                SceneNode::primitive(
                    format!("pages-{}", j),
                    Transform::from_position(Vec3::new(0.0, 0.0, *z)),
                    cuboid(Vec3::new(thickness, height, 0.01)),
                    MaterialDesc::colored(palette::PAGE_EDGE).with_surface(0.5, 0.0),
                ),
            );
        }
    }

    graph.insert(
        shelf,
        SceneNode::primitive(
            "shelf-plant",
            Transform::from_position(Vec3::new(0.9, 0.15, 0.0)),
            cuboid(Vec3::new(0.15, 0.15, 0.15)),
            MaterialDesc::colored(palette::PLANT_GREEN).with_surface(0.8, 0.0),
        ),
    );

    shelf
}

/// Back wall with two gold sconces and the framed painting. Each sconce
/// carries a point light; the painting gets its own spot light (added in
/// `spawn_lights`). Returns the painting node.
fn spawn_back_wall(scene: &mut Scene, root: NodeId) -> NodeId {
    let gold = MaterialDesc::colored(palette::LAMP_GOLD).with_surface(0.3, 0.7);
    let frame = MaterialDesc::colored(palette::FRAME).with_surface(0.7, 0.0);

    let wall_group = scene.graph.insert(
        root,
        SceneNode::group(
            "back-wall",
            Transform::from_position(Vec3::new(0.0, 0.0, -8.0)),
        ),
    );
    scene.graph.insert(
        wall_group,
        SceneNode::primitive(
            "wall",
            Transform::from_position(Vec3::new(0.0, 3.0, 0.0)),
            cuboid(Vec3::new(20.0, 6.0, 0.1)),
            MaterialDesc::colored(palette::WALL),
        ),
    );

    for (i, x) in [-1.8f32, 1.8].iter().enumerate() {
        let sconce = scene.graph.insert(
            wall_group,
            SceneNode::group(
                format!("sconce-{}", i),
                Transform::from_position(Vec3::new(*x, 4.2, 0.2)),
            ),
        );
        scene.graph.insert(
            sconce,
            SceneNode::primitive(
                "mount",
                Transform::new(),
                cuboid(Vec3::new(0.1, 0.2, 0.1)),
                gold.clone(),
            ),
        );
        scene.graph.insert(
            sconce,
            SceneNode::primitive(
                "arm",
                Transform::from_position(Vec3::new(0.0, 0.0, 0.1)),
                cuboid(Vec3::new(0.05, 0.05, 0.2)),
                gold.clone(),
            ),
        );
        let shade_group = scene.graph.insert(
            sconce,
            SceneNode::group("lamp", Transform::from_position(Vec3::new(0.0, 0.0, 0.2))),
        );
        scene.graph.insert(
            shade_group,
            SceneNode::primitive(
                "ring-top",
                Transform::from_position(Vec3::new(0.0, 0.1, 0.0)),
                cylinder(0.12, 0.12, 0.02, 16),
                gold.clone(),
            ),
        );
        scene.graph.insert(
            shade_group,
            SceneNode::primitive(
                "shade",
                Transform::new(),
                cylinder(0.12, 0.08, 0.2, 16),
                MaterialDesc::colored(palette::LAMP_SHADE)
                    .with_opacity(0.8)
                    .with_emissive(palette::LAMP_SHADE, 0.2),
            ),
        );
        scene.graph.insert(
            shade_group,
            SceneNode::primitive(
                "ring-bottom",
                Transform::from_position(Vec3::new(0.0, -0.1, 0.0)),
                cylinder(0.08, 0.08, 0.02, 16),
                gold.clone(),
            ),
        );
        // Warm bulb inside the shade; world position of the shade group.
        scene.add_light(Light::point(
            Vec3::new(*x, 4.2, -7.6),
            Vec3::from_array(palette::LAMP_SHADE),
            0.4,
            3.0,
        ));
    }

    let painting = scene.graph.insert(
        wall_group,
        SceneNode::group(
            "painting",
            Transform::from_position(Vec3::new(0.0, 3.0, 0.1)),
        ),
    );
    scene.graph.insert(
        painting,
        SceneNode::primitive(
            "frame-backing",
            Transform::new(),
            cuboid(Vec3::new(3.2, 2.2, 0.1)),
            frame.clone(),
        ),
    );
    scene.graph.insert(
        painting,
        SceneNode::primitive(
            "canvas",
            Transform::from_position(Vec3::new(0.0, 0.0, 0.05)),
            cuboid(Vec3::new(3.0, 2.0, 0.05)),
            MaterialDesc::colored(palette::WHITE)
                .with_surface(0.5, 0.1)
                .with_texture("assets/starry-night.jpg"),
        ),
    );
    for (name, size, position) in [
        ("frame-top", Vec3::new(3.4, 0.15, 0.15), Vec3::new(0.0, 1.1, 0.05)),
        ("frame-bottom", Vec3::new(3.4, 0.15, 0.15), Vec3::new(0.0, -1.1, 0.05)),
        ("frame-left", Vec3::new(0.15, 2.4, 0.15), Vec3::new(-1.6, 0.0, 0.05)),
        ("frame-right", Vec3::new(0.15, 2.4, 0.15), Vec3::new(1.6, 0.0, 0.05)),
    ] {
        scene.graph.insert(
            painting,
            SceneNode::primitive(name, Transform::from_position(position), cuboid(size), frame.clone()),
        );
    }

    painting
}

/// Potted plant: one tall center stem plus six jittered side stems.
fn spawn_potted_plant(scene: &mut Scene, root: NodeId, mut rng: StdRng) -> NodeId {
    let graph = &mut scene.graph;
    let pot = MaterialDesc::colored(palette::POT_BROWN).with_surface(0.8, 0.0);
    let green = MaterialDesc::colored(palette::PLANT_GREEN);
    let light_green = MaterialDesc::colored(palette::PLANT_LIGHT_GREEN);

    let plant = graph.insert(
        root,
        SceneNode::group(
            "potted-plant",
            Transform::from_position(Vec3::new(4.2, 0.0, 0.3))
                .with_rotation(Vec3::new(0.0, PI * 0.15, 0.0)),
        ),
    );
    graph.insert(
        plant,
        SceneNode::primitive(
            "pot-base",
            Transform::from_position(Vec3::new(0.0, 0.025, 0.0)),
            cylinder(0.25, 0.2, 0.05, 32),
            pot.clone(),
        ),
    );
    graph.insert(
        plant,
        SceneNode::primitive(
            "pot-body",
            Transform::from_position(Vec3::new(0.0, 0.3, 0.0)),
            cylinder(0.2, 0.25, 0.5, 32),
            pot,
        ),
    );

    let foliage = graph.insert(
        plant,
        SceneNode::group(
            "foliage",
            Transform::from_position(Vec3::new(0.0, 0.55, 0.0)),
        ),
    );

    let center = graph.insert(
        foliage,
        SceneNode::group(
            "center-stem",
            Transform::new().with_rotation(Vec3::new(0.0, rng.gen::<f32>() * TAU, 0.0)),
        ),
    );
    graph.insert(
        center,
        SceneNode::primitive(
            "stalk",
            Transform::from_position(Vec3::new(0.0, 0.5, 0.0))
                .with_rotation(Vec3::new(0.1, 0.0, 0.0)),
            cylinder(0.02, 0.02, 1.0, 8),
            green.clone(),
        ),
    );
    for (i, height) in [0.4f32, 0.6, 0.8].iter().enumerate() {
        let side = if i % 2 == 1 { 1.0 } else { -1.0 };
        graph.insert(
            center,
            SceneNode::primitive(
                format!("center-leaf-{}", i),
                Transform::from_position(Vec3::new(0.0, *height, 0.0)).with_rotation(Vec3::new(
                    0.3,
                    PI * 0.2 * side,
                    0.0,
                )),
                cuboid(Vec3::new(0.25, 0.02, 0.4)),
                green.clone(),
            ),
        );
    }

    for i in 0..6 {
        let angle = i as f32 * PI / 3.0 + rng.gen::<f32>() * 0.5;
        let tilt = 0.4 + rng.gen::<f32>() * 0.3;
        let stem = graph.insert(
            foliage,
            SceneNode::group(
                format!("side-stem-{}", i),
                Transform::new().with_rotation(Vec3::new(0.0, angle, 0.0)),
            ),
        );
        graph.insert(
            stem,
            SceneNode::primitive(
                "stalk",
                Transform::from_position(Vec3::new(0.15, 0.35, 0.0))
                    .with_rotation(Vec3::new(tilt, 0.0, 0.2)),
                cylinder(0.015, 0.015, 0.7, 8),
                green.clone(),
            ),
        );
        for (j, height) in [0.3f32, 0.5].iter().enumerate() {
            let side = if j % 2 == 1 { 1.0 } else { -1.0 };
            let leaf = graph.insert(
                stem,
                SceneNode::group(
                    format!("leaf-{}", j),
                    Transform::from_position(Vec3::new(0.15, *height, 0.0))
                        .with_rotation(Vec3::new(tilt, 0.0, 0.2)),
                ),
            );
            graph.insert(
                leaf,
                SceneNode::primitive(
                    "blade",
                    Transform::new().with_rotation(Vec3::new(0.3, PI * 0.2 * side, 0.0)),
                    cuboid(Vec3::new(0.2, 0.02, 0.35)),
                    light_green.clone(),
                ),
            );
        }
    }

    plant
}

/// The wooden dining set, an external glTF asset in the far corner.
fn spawn_dining_set(scene: &mut Scene, root: NodeId) -> NodeId {
    scene.graph.insert(
        root,
        SceneNode::primitive(
            "dining-set",
            Transform::from_position(Vec3::new(-4.0, -0.5, -4.0))
                .with_rotation(Vec3::new(0.0, PI * 0.25, 0.0)),
            Primitive::Mesh {
                path: "assets/dining-table.glb".into(),
            },
            MaterialDesc::colored(palette::WHITE).with_surface(0.8, 0.0),
        ),
    )
}

fn spawn_lights(scene: &mut Scene) {
    scene.add_light(Light::ambient(0.6));
    scene.add_light(Light::directional(Vec3::new(-5.0, -5.0, -5.0), 0.7));
    scene.add_light(Light::directional(Vec3::new(5.0, -5.0, 5.0), 0.3));
    // Spot on the painting.
    scene.add_light(Light::spot(
        Vec3::new(0.0, 4.0, -6.0),
        Vec3::new(0.0, 3.0, -7.9),
        1.2,
        PI / 6.0,
    ));
}
