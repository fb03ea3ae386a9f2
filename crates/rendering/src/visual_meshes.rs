use std::collections::HashMap;

use bevy::prelude::*;

use placement::prototypes::SnapCategory;
use placement::visuals::{BuildableVisual, DemolitionPreview};

/// Mesh child of a `BuildableVisual`, carrying the body box.
#[derive(Component)]
pub struct VisualBody;

/// Shared materials and box meshes for placed objects.
#[derive(Resource)]
pub struct VisualAssets {
    ground: Handle<StandardMaterial>,
    wall: Handle<StandardMaterial>,
    free: Handle<StandardMaterial>,
    demolition: Handle<StandardMaterial>,
    /// Box meshes keyed by size in millimetres.
    boxes: HashMap<IVec3, Handle<Mesh>>,
}

impl VisualAssets {
    pub fn material_for(&self, snap: SnapCategory, demolition: bool) -> Handle<StandardMaterial> {
        if demolition {
            return self.demolition.clone();
        }
        match snap {
            SnapCategory::Ground => self.ground.clone(),
            SnapCategory::Wall => self.wall.clone(),
            SnapCategory::Free => self.free.clone(),
        }
    }

    fn box_mesh(&mut self, size: Vec3, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
        self.boxes
            .entry(mesh_key(size))
            .or_insert_with(|| meshes.add(Cuboid::new(size.x, size.y, size.z)))
            .clone()
    }
}

/// Sizes that agree to the millimetre share a mesh.
pub fn mesh_key(size: Vec3) -> IVec3 {
    (size * 1000.0).round().as_ivec3()
}

pub fn setup_visual_assets(mut commands: Commands, mut materials: ResMut<Assets<StandardMaterial>>) {
    let mut solid = |color: Color| {
        materials.add(StandardMaterial {
            base_color: color,
            perceptual_roughness: 0.8,
            ..default()
        })
    };
    let ground = solid(Color::srgb(0.62, 0.58, 0.52));
    let wall = solid(Color::srgb(0.80, 0.76, 0.68));
    let free = solid(Color::srgb(0.55, 0.38, 0.22));
    let demolition = materials.add(StandardMaterial {
        base_color: Color::srgba(0.9, 0.15, 0.1, 0.6),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    commands.insert_resource(VisualAssets {
        ground,
        wall,
        free,
        demolition,
        boxes: HashMap::new(),
    });
}

/// Give every new placed-object visual a box body sized to its collider.
pub fn attach_visual_meshes(
    mut commands: Commands,
    added: Query<(Entity, &BuildableVisual, Option<&DemolitionPreview>), Added<BuildableVisual>>,
    assets: Option<ResMut<VisualAssets>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Some(mut assets) = assets else {
        return;
    };
    for (entity, visual, preview) in &added {
        let mesh = assets.box_mesh(visual.size, &mut meshes);
        let demolition = preview.is_some_and(|p| p.0);
        let material = assets.material_for(visual.snap, demolition);
        commands.entity(entity).with_children(|parent| {
            parent.spawn((
                VisualBody,
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(visual.offset),
            ));
        });
    }
}

/// Tint bodies red while their object is about to be demolished.
pub fn update_demolition_preview(
    changed: Query<(&BuildableVisual, &DemolitionPreview, &Children), Changed<DemolitionPreview>>,
    mut bodies: Query<&mut MeshMaterial3d<StandardMaterial>, With<VisualBody>>,
    assets: Option<Res<VisualAssets>>,
) {
    let Some(assets) = assets else {
        return;
    };
    for (visual, preview, children) in &changed {
        let material = assets.material_for(visual.snap, preview.0);
        for &child in children.iter() {
            if let Ok(mut body) = bodies.get_mut(child) {
                body.0 = material.clone();
            }
        }
    }
}
