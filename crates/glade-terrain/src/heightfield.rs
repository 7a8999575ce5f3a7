//! Multi-octave value-noise height field.
//!
//! Elevation is computed on demand for any real `(x, z)` by layering smoothly
//! interpolated lattice noise (fractal Brownian motion). Nothing is stored, so the
//! same field can be queried on-grid for the ground mesh and off-grid for placement.
//!
//! The lattice hash is a fixed integer function with no seed: every query for a given
//! coordinate agrees regardless of which random stream the caller holds.

/// Prime-ish stride folding the z lattice coordinate into the hash input.
const LATTICE_Z_STRIDE: i32 = 57;

/// Largest positive 31-bit value, used to normalize the masked hash.
const HASH_NORMALIZER: f64 = 2_147_483_647.0;

/// Configuration for the fBm terrain.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightFieldParams {
    /// Number of noise layers summed. Default: 5.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves. Default: 2.1.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves. Default: 0.45.
    pub persistence: f64,
    /// Frequency of the first octave in lattice cells per world unit. Default: 0.04.
    pub base_frequency: f64,
    /// World-space elevation of a normalized noise value of 1.0. Default: 3.5.
    pub max_height: f64,
}

impl Default for HeightFieldParams {
    fn default() -> Self {
        Self {
            octaves: 5,
            lacunarity: 2.1,
            persistence: 0.45,
            base_frequency: 0.04,
            max_height: 3.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Noise primitives
// ---------------------------------------------------------------------------

/// Deterministic pseudo-random value in `[-1, 1]` for an integer lattice point.
pub fn lattice_hash(ix: i32, iz: i32) -> f64 {
    let mut n = ix.wrapping_add(iz.wrapping_mul(LATTICE_Z_STRIDE));
    n = (n << 13) ^ n;
    let mixed = n
        .wrapping_mul(
            n.wrapping_mul(n)
                .wrapping_mul(15_731)
                .wrapping_add(789_221),
        )
        .wrapping_add(1_376_312_589)
        & 0x7fff_ffff;
    f64::from(mixed) / HASH_NORMALIZER * 2.0 - 1.0
}

/// Smoothstep blend weight `t²(3 − 2t)`.
#[inline]
fn blend(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Single layer of interpolated value noise at `frequency`.
///
/// Blends the four lattice corners around the scaled point with smoothstep weights on
/// both axes, so the result is continuous across cell boundaries.
pub fn value_noise(x: f64, z: f64, frequency: f64) -> f64 {
    let sx = x * frequency;
    let sz = z * frequency;
    let fx0 = sx.floor();
    let fz0 = sz.floor();
    let ix = fx0 as i32;
    let iz = fz0 as i32;

    let wx = blend(sx - fx0);
    let wz = blend(sz - fz0);

    let v00 = lattice_hash(ix, iz);
    let v10 = lattice_hash(ix.wrapping_add(1), iz);
    let v01 = lattice_hash(ix, iz.wrapping_add(1));
    let v11 = lattice_hash(ix.wrapping_add(1), iz.wrapping_add(1));

    let near = lerp(v00, v10, wx);
    let far = lerp(v01, v11, wx);
    lerp(near, far, wz)
}

// ---------------------------------------------------------------------------
// Height field
// ---------------------------------------------------------------------------

/// Terrain elevation as a pure function of `(x, z)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeightField {
    params: HeightFieldParams,
}

impl HeightField {
    /// Create a height field with the given parameters.
    pub fn new(params: HeightFieldParams) -> Self {
        Self { params }
    }

    /// World-space elevation at `(x, z)`.
    ///
    /// The octave sum is divided by the total amplitude used, bringing it back into
    /// roughly `[-1, 1]`, then scaled by `max_height`. Zero octaves yield a flat 0.0.
    pub fn height(&self, x: f64, z: f64) -> f64 {
        let mut total = 0.0;
        let mut normalization = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = 1.0;

        for _ in 0..self.params.octaves {
            total += value_noise(x, z, frequency) * amplitude;
            normalization += amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        if normalization == 0.0 {
            return 0.0;
        }
        total / normalization * self.params.max_height
    }

    /// Upper bound on `|height(x, z)|` for any input.
    pub fn max_abs_height(&self) -> f64 {
        if self.params.octaves == 0 {
            0.0
        } else {
            self.params.max_height.abs()
        }
    }

    /// Return a reference to the current parameters.
    pub fn params(&self) -> &HeightFieldParams {
        &self.params
    }
}
