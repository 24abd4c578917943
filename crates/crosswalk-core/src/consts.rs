/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f32 = 1e-10;

/// Homogeneous `w` below which a projected point is treated as at infinity.
pub const PROJECTION_W_EPSILON: f64 = 1e-12;

/// Largest rectified region, in pixels per channel, that will be allocated.
pub const MAX_RECTIFIED_PIXELS: usize = 1 << 26;

/// Number of channels in a color frame (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Default low-pass cutoff in cycles per sample (or per region pixel,
/// depending on the threshold basis). Tuned on 640x640 satellite tiles.
pub const DEFAULT_FREQUENCY_THRESHOLD: f64 = 0.001;

/// Default minimum distance between two reported peaks, in samples.
pub const DEFAULT_MIN_PEAK_SEPARATION: usize = 40;

/// Default half-width of the window used to measure peak amplitude.
pub const DEFAULT_AMPLITUDE_WINDOW_RADIUS: usize = 20;

/// Number of intensity levels used by histogram-based filters.
pub const HISTOGRAM_LEVELS: usize = 256;

/// Local contrast enhancement defaults: window size, mean/stddev gates, gain.
pub const DEFAULT_LOCAL_WINDOW: usize = 25;
pub const DEFAULT_LOCAL_K0: f32 = 0.8;
pub const DEFAULT_LOCAL_K1: f32 = 0.001;
pub const DEFAULT_LOCAL_K2: f32 = 0.8;
pub const DEFAULT_LOCAL_GAIN: f32 = 7.0;

/// CLAHE defaults: relative clip limit and tile grid (columns, rows).
pub const DEFAULT_CLAHE_CLIP_LIMIT: f32 = 2.0;
pub const DEFAULT_CLAHE_GRID: usize = 8;

/// Kernel size of the blur used to find locally dark (shadowed) pixels.
pub const SHADOW_MASK_KERNEL: usize = 21;

/// Kernel size of the blur used as the illumination estimate.
pub const ILLUMINATION_KERNEL: usize = 51;

/// How much darker than its surroundings a pixel must be to count as shadow
/// (10 grey levels out of 255).
pub const DEFAULT_SHADOW_OFFSET: f32 = 10.0 / 255.0;

/// Half-size of the square removed around DC by the shadow high-pass.
pub const DEFAULT_HIGH_PASS_HALF_SIZE: usize = 20;

/// Bilateral filter defaults. The range sigma is 50 grey levels of 255.
pub const DEFAULT_BILATERAL_SIGMA_SPATIAL: f32 = 2.0;
pub const DEFAULT_BILATERAL_SIGMA_RANGE: f32 = 50.0 / 255.0;
pub const DEFAULT_BILATERAL_KERNEL: usize = 5;
