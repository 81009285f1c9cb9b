use glam::{Mat4, Vec2, Vec3};
use rune_core::ViewProjCamera;

/// Build a camera from matrices handed over by the JS host.
///
/// - `view_proj`: 16 floats, column-major (three.js `elements` order)
/// - `eye`, `forward`: 3 floats each, world space
/// - `viewport`: drawing canvas backing size in pixels
pub fn from_host(
    view_proj: &[f32],
    eye: &[f32],
    forward: &[f32],
    viewport: Vec2,
) -> anyhow::Result<ViewProjCamera> {
    if view_proj.len() != 16 {
        anyhow::bail!("view_proj needs 16 floats, got {}", view_proj.len());
    }
    if eye.len() != 3 || forward.len() != 3 {
        anyhow::bail!(
            "eye and forward need 3 floats each, got {} and {}",
            eye.len(),
            forward.len()
        );
    }
    let m = Mat4::from_cols_slice(view_proj);
    if !m.is_finite() {
        anyhow::bail!("view_proj has non-finite entries");
    }
    Ok(ViewProjCamera::new(
        m,
        Vec3::from_slice(eye),
        Vec3::from_slice(forward),
        viewport,
    ))
}
