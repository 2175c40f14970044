/// One vertex of the unit cube batch, laid out for direct upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub colour: [f32; 3],
}

impl CubeVertex {
    const fn new(position: [f32; 3], normal: [f32; 3], colour: [f32; 3]) -> Self {
        Self {
            position,
            normal,
            colour,
        }
    }
}

/// Vertices per cube batch (6 quads)
pub const CUBE_VERTEX_COUNT: usize = 24;

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const CYAN: [f32; 3] = [0.0, 1.0, 1.0];
const MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];

const POS_X: [f32; 3] = [1.0, 0.0, 0.0];
const POS_Y: [f32; 3] = [0.0, 1.0, 0.0];
const POS_Z: [f32; 3] = [0.0, 0.0, 1.0];
const NEG_X: [f32; 3] = [-1.0, 0.0, 0.0];
const NEG_Y: [f32; 3] = [0.0, -1.0, 0.0];
const NEG_Z: [f32; 3] = [0.0, 0.0, -1.0];

/// Unit cube centred on the origin, one quad per face, each face its own colour
pub const CUBE_VERTICES: [CubeVertex; CUBE_VERTEX_COUNT] = [
    // +x
    CubeVertex::new([0.5, -0.5, 0.5], POS_X, RED),
    CubeVertex::new([0.5, -0.5, -0.5], POS_X, RED),
    CubeVertex::new([0.5, 0.5, -0.5], POS_X, RED),
    CubeVertex::new([0.5, 0.5, 0.5], POS_X, RED),
    // +y
    CubeVertex::new([-0.5, 0.5, 0.5], POS_Y, GREEN),
    CubeVertex::new([0.5, 0.5, 0.5], POS_Y, GREEN),
    CubeVertex::new([0.5, 0.5, -0.5], POS_Y, GREEN),
    CubeVertex::new([-0.5, 0.5, -0.5], POS_Y, GREEN),
    // +z
    CubeVertex::new([-0.5, 0.5, 0.5], POS_Z, BLUE),
    CubeVertex::new([-0.5, -0.5, 0.5], POS_Z, BLUE),
    CubeVertex::new([0.5, -0.5, 0.5], POS_Z, BLUE),
    CubeVertex::new([0.5, 0.5, 0.5], POS_Z, BLUE),
    // -x
    CubeVertex::new([-0.5, 0.5, 0.5], NEG_X, CYAN),
    CubeVertex::new([-0.5, 0.5, -0.5], NEG_X, CYAN),
    CubeVertex::new([-0.5, -0.5, -0.5], NEG_X, CYAN),
    CubeVertex::new([-0.5, -0.5, 0.5], NEG_X, CYAN),
    // -y
    CubeVertex::new([-0.5, -0.5, -0.5], NEG_Y, MAGENTA),
    CubeVertex::new([0.5, -0.5, -0.5], NEG_Y, MAGENTA),
    CubeVertex::new([0.5, -0.5, 0.5], NEG_Y, MAGENTA),
    CubeVertex::new([-0.5, -0.5, 0.5], NEG_Y, MAGENTA),
    // -z
    CubeVertex::new([-0.5, -0.5, -0.5], NEG_Z, YELLOW),
    CubeVertex::new([-0.5, 0.5, -0.5], NEG_Z, YELLOW),
    CubeVertex::new([0.5, 0.5, -0.5], NEG_Z, YELLOW),
    CubeVertex::new([0.5, -0.5, -0.5], NEG_Z, YELLOW),
];

/// Raw bytes of the cube table for a vertex buffer upload
pub fn cube_vertex_bytes() -> &'static [u8] {
    bytemuck::cast_slice(&CUBE_VERTICES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_vertex_size() {
        assert_eq!(std::mem::size_of::<CubeVertex>(), 36);
        assert_eq!(cube_vertex_bytes().len(), 36 * CUBE_VERTEX_COUNT);
    }

    #[test]
    fn test_cube_vertices_on_unit_cube() {
        for vertex in CUBE_VERTICES.iter() {
            assert!(vertex.position.iter().all(|c| c.abs() == 0.5));
        }
    }

    #[test]
    fn test_face_vertices_lie_on_their_normal() {
        for vertex in CUBE_VERTICES.iter() {
            let along: f32 = vertex
                .position
                .iter()
                .zip(vertex.normal.iter())
                .map(|(p, n)| p * n)
                .sum();
            assert_eq!(along, 0.5, "vertex {:?} off its face", vertex);
        }
    }
}
