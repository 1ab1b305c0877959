//! The six axis-aligned face directions of a voxel

/// Axis index into `[x, y, z]` arrays
pub const AXIS_X: usize = 0;
pub const AXIS_Y: usize = 1;
pub const AXIS_Z: usize = 2;

/// Face direction. Left/right are -X/+X, bottom/top are -Y/+Y, back/front are -Z/+Z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Left,
    Right,
    Bottom,
    Top,
    Back,
    Front,
}

/// Axis permutation used to walk a face plane.
///
/// `tertiary` is the face normal axis; `main` and `alt` span the face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceAxes {
    pub main: usize,
    pub alt: usize,
    pub tertiary: usize,
    pub positive: bool,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Left,
        Face::Right,
        Face::Bottom,
        Face::Top,
        Face::Back,
        Face::Front,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Bit for this face in a 6-bit visited mask
    #[inline]
    pub fn bit(self) -> u8 {
        1 << self.index()
    }

    /// Main axis runs up the column for side faces so growth scans stay sequential.
    pub fn axes(self) -> FaceAxes {
        let (main, alt, tertiary) = match self {
            Face::Left | Face::Right => (AXIS_Y, AXIS_Z, AXIS_X),
            Face::Bottom | Face::Top => (AXIS_Z, AXIS_X, AXIS_Y),
            Face::Back | Face::Front => (AXIS_Y, AXIS_X, AXIS_Z),
        };
        FaceAxes {
            main,
            alt,
            tertiary,
            positive: matches!(self, Face::Right | Face::Top | Face::Front),
        }
    }

    /// Unit offset towards the neighbouring voxel
    pub fn normal(self) -> [i32; 3] {
        match self {
            Face::Left => [-1, 0, 0],
            Face::Right => [1, 0, 0],
            Face::Bottom => [0, -1, 0],
            Face::Top => [0, 1, 0],
            Face::Back => [0, 0, -1],
            Face::Front => [0, 0, 1],
        }
    }
}

impl FaceAxes {
    /// Whether `main x alt` points against the outward normal.
    ///
    /// When true the quad's triangles must be wound in reverse.
    pub fn flips_winding(&self) -> bool {
        let right_handed = (self.alt + 3 - self.main) % 3 == 1;
        right_handed != self.positive
    }
}
