/// Width of the on-screen viewport images are fitted into.
pub const VIEWPORT_WIDTH: u32 = 800;

/// Height of the on-screen viewport images are fitted into.
pub const VIEWPORT_HEIGHT: u32 = 600;

/// Solid color painted over selected pixels in the display overlay.
pub const OVERLAY_COLOR: [u8; 3] = [0, 255, 0];

/// Blend weight of the colored composite against the original image.
pub const OVERLAY_ALPHA: f32 = 0.5;

/// Raw mask values strictly above this are treated as selected.
/// SAM emits logits, so 0.0 is its decision boundary; a 0/1 mask also works.
pub const MASK_THRESHOLD: f32 = 0.0;

/// Number of hex characters kept from the file digest.
pub const FINGERPRINT_LEN: usize = 6;

/// Directory masks are written to, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Checkpoint loaded when none is given on the command line.
pub const DEFAULT_CHECKPOINT: &str = "checkpoints/sam_vit_b_01ec64.safetensors";
