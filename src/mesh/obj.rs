//! Wavefront OBJ/MTL loading via `tobj`
//!
//! Faces are loaded untriangulated so the pipeline sees the source polygon
//! loops. Every object in the file is merged into one mesh.

use std::path::{Path, PathBuf};
use super::model::{Face, FaceCorner, Material, Mesh};
use crate::error::LoadError;
use crate::rasterizer::{Vec2, Vec3};

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Load a mesh and its materials from an OBJ file.
/// A missing or broken MTL file is not fatal: faces keep their material
/// names only where the materials parsed.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    let (models, materials) = tobj::load_obj(path, &load_options())?;

    let materials = materials.unwrap_or_else(|e| {
        log::warn!("No materials for {}: {}", path.display(), e);
        Vec::new()
    });

    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let mesh = build_mesh(&models, &materials, &base_dir);

    if mesh.faces.is_empty() {
        return Err(LoadError::EmptyMesh(path.to_path_buf()));
    }

    log::info!(
        "Loaded mesh {}: {} vertices, {} faces, {} materials",
        path.display(),
        mesh.vertices.len(),
        mesh.faces.len(),
        mesh.materials.len()
    );

    Ok(mesh)
}

/// Parse OBJ source without materials
#[cfg(test)]
pub fn load_obj_from_reader<R: std::io::BufRead>(reader: &mut R) -> Result<Mesh, LoadError> {
    let (models, _) = tobj::load_obj_buf(reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;
    Ok(build_mesh(&models, &[], Path::new("")))
}

fn build_mesh(models: &[tobj::Model], materials: &[tobj::Material], base_dir: &Path) -> Mesh {
    let mut mesh = Mesh::default();

    for mat in materials {
        let texture = mat.diffuse_texture.as_ref().map(|t| base_dir.join(t));
        mesh.materials.insert(mat.name.clone(), Material { texture });
    }

    for model in models {
        let m = &model.mesh;
        let vertex_base = mesh.vertices.len();
        let uv_base = mesh.texcoords.len();

        mesh.vertices.extend(
            m.positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );
        mesh.texcoords.extend(
            m.texcoords
                .chunks_exact(2)
                .map(|t| Vec2::new(t[0], t[1])),
        );

        let material = m
            .material_id
            .and_then(|id| materials.get(id))
            .map(|mat| mat.name.clone());

        let has_uvs = m.texcoord_indices.len() == m.indices.len();
        let arities: Vec<usize> = if m.face_arities.is_empty() {
            vec![3; m.indices.len() / 3]
        } else {
            m.face_arities.iter().map(|&a| a as usize).collect()
        };

        let mut cursor = 0;
        for arity in arities {
            let end = (cursor + arity).min(m.indices.len());
            let corners: Vec<FaceCorner> = (cursor..end)
                .map(|i| {
                    let uv = has_uvs.then(|| uv_base + m.texcoord_indices[i] as usize);
                    FaceCorner::new(vertex_base + m.indices[i] as usize, uv)
                })
                .collect();
            cursor = end;

            mesh.faces.push(match &material {
                Some(name) => Face::with_material(corners, name),
                None => Face::new(corners),
            });
        }
    }

    mesh
}

/// Resolve the texture to use: an explicit path wins, then the first
/// material texture in the mesh.
pub fn resolve_texture_path(mesh: &Mesh, explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| mesh.first_texture().cloned())
}
