// Shared animation/sensing tuning constants used by the front-end and tests.

// Motion sensing
pub const SAMPLE_WIDTH: u32 = 64; // downsampled frame width used for differencing
pub const SAMPLE_HEIGHT: u32 = 48;
pub const SENSITIVITY_DIVISOR: f32 = 25.0; // smaller => small movements read as more tension

// Tension smoothing (one-pole filters)
pub const SENSOR_SMOOTHING_ALPHA: f32 = 0.1; // applied at sensor cadence
pub const RENDER_SMOOTHING_ALPHA: f32 = 0.15; // applied once per rendered frame

// Particle classes
pub const HEAD_PROBABILITY: f32 = 0.3;
pub const HEAD_SIZE_RANGE: (f32, f32) = (1.0, 4.0);
pub const TENTACLE_SIZE_RANGE: (f32, f32) = (0.5, 2.5);
pub const TENTACLE_ROOT_RADIUS: f32 = 0.5;
pub const TENTACLE_ROOT_DEPTH: f32 = 0.5;

// Whole-field spin per frame: (BASE + TENSION * tension) * movement_speed
pub const SPIN_BASE_PER_FRAME: f32 = 0.001;
pub const SPIN_TENSION_PER_FRAME: f32 = 0.005;

// Perspective point sizing: pixels = size * scale * POINT_SIZE_SCALE / depth
pub const POINT_SIZE_SCALE: f32 = 300.0;

// Camera / orbit
pub const CAMERA_DISTANCE: f32 = 12.0;
pub const CAMERA_FOVY_DEGREES: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 400.0;
pub const ORBIT_MIN_DISTANCE: f32 = 5.0;
pub const ORBIT_MAX_DISTANCE: f32 = 25.0;
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_ROTATE_PER_PIXEL: f32 = std::f32::consts::TAU / 1000.0;
pub const AUTO_ROTATE_SPEED: f32 = 0.8; // one orbit per 60s at speed 1
pub const AUTO_ROTATE_MAX_TENSION: f32 = 0.2; // auto-rotate only while calmer than this
