//! Rendering collaborator boundary
//!
//! The terrain core never talks to a graphics API directly. It creates one
//! mesh per pooled chunk through [`RenderBackend`] and uploads, shows and
//! hides it there.

pub mod headless;

pub use headless::HeadlessBackend;

use crate::mesh::MeshBuffers;

/// Opaque mesh handle issued by a backend
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u32);

/// What the terrain needs from the host renderer
pub trait RenderBackend {
    /// Create an empty, disabled mesh bound to `name`
    fn create_mesh(&mut self, name: &str) -> MeshId;

    /// Replace the mesh's geometry
    fn upload(&mut self, mesh: MeshId, buffers: &MeshBuffers);

    /// Show or hide the mesh without destroying it
    fn set_enabled(&mut self, mesh: MeshId, enabled: bool);

    /// Destroy the mesh; the id is dead afterwards
    fn dispose(&mut self, mesh: MeshId);

    /// Whether the mesh is inside the current camera frustum (diagnostics only)
    fn in_frustum(&self, mesh: MeshId) -> bool;
}
