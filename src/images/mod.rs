mod cache;
mod compose;
mod stack_blur;

pub use cache::ThumbnailCache;
pub use compose::{
    adjust_opacity, apply_bottom_blur_and_gradient, center_crop, solid_placeholder, BLUR_RADIUS,
    BOTTOM_SPLIT_FRACTION,
};
pub use stack_blur::stack_blur;
